use std::fmt::Debug;

#[cfg(test)]
use mockall::automock;

/// The measured size of a rendered caption line in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSize {
    pub width: u32,
    pub height: u32,
}

/// An anti-aliased alpha coverage mask of a rendered caption line.
///
/// The mask is row-major with one byte per pixel, 0 being fully transparent
/// and 255 fully opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRaster {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
}

/// Measures and rasterizes single caption lines with a fixed font and size.
#[cfg_attr(test, automock)]
pub trait TextRasterizer: Debug {
    /// The height in pixels of a rendered line, constant for all content.
    fn line_height(&self) -> u32;

    /// Measure the rendered size of the given line.
    fn measure(&self, line: &str) -> TextSize;

    /// Rasterize the given line into an alpha coverage mask of its measured size.
    fn rasterize(&self, line: &str) -> TextRaster;
}
