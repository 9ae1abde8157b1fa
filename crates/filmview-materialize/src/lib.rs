//! Creates the rental-ranking view and reads it back.

mod decode;
mod executor;
mod run;

pub use decode::decode_row;
pub use executor::{materialize_view, read_view};
pub use run::{create_view, read_back, CreatedView, RunSpec};
