pub mod record;

pub use record::{Entry, Field, StructuredRecord};
