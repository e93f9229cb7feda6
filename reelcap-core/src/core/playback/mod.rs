pub use session::*;
pub use source::*;

mod session;
mod source;
