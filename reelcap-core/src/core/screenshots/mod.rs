pub use error::*;
pub use service::*;
pub use sink::*;

mod error;
mod service;
mod sink;
