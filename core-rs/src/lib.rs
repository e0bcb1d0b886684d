//! # Alchemy Core - ontology modeling runtime
//!
//! Declare RDF Schema classes and properties, construct individuals against
//! them, and project those individuals into triples.
//!
//! ## Core Principle
//!
//! **Every attribute is a list**: an instance never holds a bare value. Each
//! property it carries is an append-only container, so a triple exists for
//! every value ever assigned.
//!
//! ## Key Features
//!
//! - Class and property registry with domain/range inference
//! - Cycle detection across both supertype graphs
//! - Unique, label-seeded identifiers for new individuals
//! - A process-wide session indexing declarations and instances
//! - Lazy triple materialization with oxigraph interop
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  declare   ┌──────────────┐
//! │   Registry   │──────────▶│   Session    │
//! └──────┬───────┘            └──────▲───────┘
//!        │ instance(class)           │ register
//!        ▼                           │
//! ┌──────────────┐  iter_triples  ┌──┴───────────┐
//! │   Triples    │◀──────────────│   Instance   │
//! └──────────────┘                └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use alchemy_core::{iter_triples, Registry};
//!
//! let mut registry = Registry::new();
//! registry.declare_class("Animal", "http://example.org/Animal", &[]).unwrap();
//! registry.declare_class("Dog", "http://example.org/Dog", &["Animal"]).unwrap();
//! registry
//!     .declare_property("name", "http://example.org/name", &["http://example.org/Animal"], &[], &[])
//!     .unwrap();
//!
//! let rex = registry.instance("Dog").set("name", "Rex").build().unwrap();
//! rex.append("name", "Rexy").unwrap();
//!
//! for triple in &iter_triples(&rex) {
//!     println!("{}", triple);
//! }
//! ```

pub mod config;
pub mod errors;
pub mod export;
pub mod model;
pub mod registry;
pub mod schema;
pub mod session;
pub mod uri;
pub mod vocabulary;

pub use config::{ModelConfig, TypeAssertion};
pub use errors::{AlchemyError, DeclarationKind, Result};
pub use export::{iter_triples, OwnedTriple, Triple, Triples};
pub use model::{Instance, InstanceBuilder, Literal, PropertyKind, PropertyValue, Value};
pub use registry::{ClassDeclaration, ClassSpec, PropertyDeclaration, PropertySpec, Registry};
pub use schema::{IndividualSpec, Model, SchemaDocument};
pub use session::{current_session, replace_current, Session};
pub use vocabulary::{Vocabulary, IMPOSE_URI_KEY};

/// Version of the Alchemy modeling runtime
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
