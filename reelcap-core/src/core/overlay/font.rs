use std::fmt;
use std::fmt::{Debug, Formatter};

use fontdb::{Database, Family, Query};
use fontdue::layout::{CoordinateSystem, Layout, TextStyle};
use fontdue::{Font, FontSettings};
use log::debug;

use crate::core::overlay::{OverlayError, Result, TextRaster, TextRasterizer, TextSize};

/// The fixed pixel size captions are rendered at.
const FONT_PIXEL_SIZE: f32 = 18.0;

/// Rasterizes caption lines with a sans-serif font discovered on the system.
pub struct SystemTextRasterizer {
    font: Font,
    line_height: u32,
}

impl SystemTextRasterizer {
    /// Create a new rasterizer from the first usable sans-serif system font.
    ///
    /// It returns [OverlayError::NoFontAvailable] when the system has no
    /// usable font, in which case playback should continue without captions.
    pub fn new() -> Result<Self> {
        let mut database = Database::new();
        database.load_system_fonts();
        debug!("Loaded {} system font faces", database.len());

        let id = database
            .query(&Query {
                families: &[Family::SansSerif],
                ..Query::default()
            })
            .ok_or(OverlayError::NoFontAvailable)?;
        let font = database
            .with_face_data(id, |data, index| {
                Font::from_bytes(
                    data,
                    FontSettings {
                        collection_index: index,
                        ..FontSettings::default()
                    },
                )
            })
            .ok_or(OverlayError::NoFontAvailable)?
            .map_err(|e| OverlayError::FontLoadFailed(e.to_string()))?;

        Self::with_font(font)
    }

    /// Create a new rasterizer for the given font.
    pub fn with_font(font: Font) -> Result<Self> {
        let metrics = font.horizontal_line_metrics(FONT_PIXEL_SIZE).ok_or_else(|| {
            OverlayError::FontLoadFailed("font is missing horizontal line metrics".to_string())
        })?;
        let line_height = (metrics.ascent - metrics.descent).ceil() as u32;

        debug!("Caption line height is {} pixels", line_height);
        Ok(Self { font, line_height })
    }

    fn layout(&self, line: &str) -> Layout {
        let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.append(&[&self.font], &TextStyle::new(line, FONT_PIXEL_SIZE, 0));
        layout
    }
}

impl TextRasterizer for SystemTextRasterizer {
    fn line_height(&self) -> u32 {
        self.line_height
    }

    fn measure(&self, line: &str) -> TextSize {
        let layout = self.layout(line);
        let width = layout
            .glyphs()
            .iter()
            .map(|glyph| glyph.x + glyph.width as f32)
            .fold(0.0f32, f32::max)
            .ceil() as u32;

        TextSize {
            width,
            height: self.line_height,
        }
    }

    fn rasterize(&self, line: &str) -> TextRaster {
        let size = self.measure(line);
        let mut coverage = vec![0u8; (size.width * size.height) as usize];
        let layout = self.layout(line);

        for glyph in layout.glyphs() {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }

            let (_, bitmap) = self.font.rasterize_config(glyph.key);
            let x = glyph.x.round() as i32;
            let y = glyph.y.round() as i32;

            for row in 0..glyph.height {
                let py = y + row as i32;
                if py < 0 || py >= size.height as i32 {
                    continue;
                }
                for col in 0..glyph.width {
                    let px = x + col as i32;
                    if px < 0 || px >= size.width as i32 {
                        continue;
                    }

                    let mask = bitmap[row * glyph.width + col];
                    let index = (py as u32 * size.width + px as u32) as usize;
                    coverage[index] = coverage[index].max(mask);
                }
            }
        }

        TextRaster {
            width: size.width,
            height: size.height,
            coverage,
        }
    }
}

impl Debug for SystemTextRasterizer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemTextRasterizer")
            .field("line_height", &self.line_height)
            .finish()
    }
}
