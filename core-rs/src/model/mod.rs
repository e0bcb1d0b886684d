//! Instance model
//!
//! - value: literal and resource values
//! - property_value: the append-only container behind every property
//! - instance: individuals and their construction

mod instance;
mod property_value;
mod value;

pub use instance::{Instance, InstanceBuilder};
pub use property_value::PropertyValue;
pub use value::{Literal, PropertyKind, Value};
