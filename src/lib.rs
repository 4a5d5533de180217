pub mod api;
pub mod error;
pub mod parser;
pub mod patch;
pub mod path;
pub mod unicode;
pub mod value;
pub mod writer;
mod serialization;
mod utils;

pub use api::{read, read_from, try_read, try_read_from, try_read_named};
pub use error::{JotError, ParseError, PatchError};
pub use serialization::to_serde_value;
pub use value::{Json, Kind, Property};
pub use writer::Format;
