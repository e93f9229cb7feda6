pub use error::*;
pub use font::*;
pub use renderer::*;
pub use text::*;

mod error;
mod font;
mod renderer;
mod text;
