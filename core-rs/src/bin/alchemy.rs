//! Alchemy CLI
//!
//! Inspect schema documents and print the triples of their individuals

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::Level;

use alchemy_core::{iter_triples, Model, OwnedTriple, SchemaDocument};

#[derive(Parser)]
#[command(name = "alchemy")]
#[command(version)]
#[command(about = "Ontology Alchemy modeling tool", long_about = None)]
struct Cli {
    /// Log declarations and construction (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List declared classes with their ancestors and effective properties
    Classes {
        /// Schema document (YAML)
        schema: PathBuf,
    },
    /// Show a property's declared and inferred domain and range
    Inspect {
        /// Schema document (YAML)
        schema: PathBuf,
        /// Property name
        property: String,
    },
    /// Print the triples of every individual in the document
    Triples {
        /// Schema document (YAML)
        schema: PathBuf,
        /// Emit a JSON array instead of N-Triples-style lines
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_model(path: &Path) -> Result<Model> {
    let document = SchemaDocument::load(path)
        .with_context(|| format!("Failed to load schema document {}", path.display()))?;
    document
        .apply()
        .with_context(|| format!("Failed to apply schema document {}", path.display()))
}

fn handle_classes(schema: &Path) -> Result<()> {
    let model = load_model(schema)?;
    let registry = &model.registry;

    for class in registry.classes() {
        println!("{}", class);

        let ancestors: Vec<String> = registry
            .ancestors(class.name())?
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        if !ancestors.is_empty() {
            println!("  Ancestors:  {}", ancestors.join(", "));
        }

        let properties: Vec<String> = registry
            .effective_properties(class.name())?
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        println!("  Properties: {}", properties.join(", "));
    }

    Ok(())
}

fn handle_inspect(schema: &Path, property: &str) -> Result<()> {
    let model = load_model(schema)?;
    let registry = &model.registry;

    let declaration = registry
        .property(property)
        .with_context(|| format!("Property '{}' is not declared", property))?;

    let join = |set: &std::collections::BTreeSet<String>| {
        set.iter().cloned().collect::<Vec<_>>().join(", ")
    };

    println!("{}", declaration);
    println!("  Identifier:      {}", declaration.identifier());
    println!("  Kind:            {:?}", declaration.kind());
    println!("  Declared domain: [{}]", join(declaration.domain()));
    println!("  Inferred domain: [{}]", join(&registry.inferred_domain(property)?));
    println!("  Declared range:  [{}]", join(declaration.range()));
    println!("  Inferred range:  [{}]", join(&registry.inferred_range(property)?));

    Ok(())
}

fn handle_triples(schema: &Path, json: bool) -> Result<()> {
    let model = load_model(schema)?;

    if json {
        let triples: Vec<OwnedTriple> = model
            .individuals
            .iter()
            .flat_map(|individual| iter_triples(individual).to_vec())
            .collect();
        println!("{}", serde_json::to_string_pretty(&triples)?);
        return Ok(());
    }

    for individual in &model.individuals {
        for triple in &iter_triples(individual) {
            println!("{}", triple);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Classes { schema } => handle_classes(&schema)?,
        Commands::Inspect { schema, property } => handle_inspect(&schema, &property)?,
        Commands::Triples { schema, json } => handle_triples(&schema, json)?,
    }

    Ok(())
}
