pub use error::*;
pub use parser::*;
pub use track::*;

pub mod cue;

mod error;
mod parser;
mod track;
