use image::RgbImage;

use crate::core::overlay::{TextRasterizer, TextSize};

/// The vertical gap between caption lines in pixels.
const LINE_SPACING: u32 = 10;
/// The distance between the caption block and the bottom frame edge in pixels.
const MARGIN_BOTTOM: i32 = 20;
/// The horizontal padding of the darkened bar around the caption block in pixels.
const BAR_PADDING_X: i32 = 10;
/// The vertical padding of the darkened bar around the caption block in pixels.
const BAR_PADDING_Y: i32 = 5;

/// Draws caption lines onto video frames as white text over a darkened bar.
///
/// The renderer never modifies the frame it's given, it always returns a new
/// frame with the captions applied.
#[derive(Debug)]
pub struct OverlayRenderer {
    rasterizer: Box<dyn TextRasterizer>,
}

impl OverlayRenderer {
    pub fn new(rasterizer: Box<dyn TextRasterizer>) -> Self {
        Self { rasterizer }
    }

    /// Render the given caption lines onto a copy of the frame.
    ///
    /// The caption block is centered horizontally and anchored above the
    /// bottom edge of the frame, with each line centered within the block.
    pub fn render(&self, frame: &RgbImage, lines: &[String]) -> RgbImage {
        let mut output = frame.clone();
        if lines.is_empty() {
            return output;
        }

        let sizes: Vec<TextSize> = lines
            .iter()
            .map(|line| self.rasterizer.measure(line))
            .collect();
        let total_height = sizes.iter().map(|e| e.height).sum::<u32>()
            + LINE_SPACING * (lines.len() as u32 - 1);
        let max_width = sizes.iter().map(|e| e.width).max().unwrap_or(0);

        let width = output.width() as i32;
        let height = output.height() as i32;
        let y_start = height - MARGIN_BOTTOM - total_height as i32;
        let x_start = (width - max_width as i32) / 2;

        self.darken_region(
            &mut output,
            x_start - BAR_PADDING_X,
            y_start - BAR_PADDING_Y,
            x_start + max_width as i32 + BAR_PADDING_X,
            y_start + total_height as i32 + BAR_PADDING_Y,
        );

        let mut y = y_start;
        for (line, size) in lines.iter().zip(sizes.iter()) {
            let x = (width - size.width as i32) / 2;
            self.draw_line(&mut output, line, x, y);
            y += size.height as i32 + LINE_SPACING as i32;
        }

        output
    }

    /// Halve the brightness of the given region, clipped to the frame bounds.
    fn darken_region(&self, frame: &mut RgbImage, x0: i32, y0: i32, x1: i32, y1: i32) {
        let x0 = x0.clamp(0, frame.width() as i32) as u32;
        let y0 = y0.clamp(0, frame.height() as i32) as u32;
        let x1 = x1.clamp(0, frame.width() as i32) as u32;
        let y1 = y1.clamp(0, frame.height() as i32) as u32;

        for y in y0..y1 {
            for x in x0..x1 {
                let pixel = frame.get_pixel_mut(x, y);
                for channel in pixel.0.iter_mut() {
                    *channel /= 2;
                }
            }
        }
    }

    /// Blend a single caption line in white onto the frame at the given position.
    fn draw_line(&self, frame: &mut RgbImage, line: &str, x: i32, y: i32) {
        let raster = self.rasterizer.rasterize(line);
        let width = frame.width() as i32;
        let height = frame.height() as i32;

        for row in 0..raster.height {
            let py = y + row as i32;
            if py < 0 || py >= height {
                continue;
            }

            for col in 0..raster.width {
                let px = x + col as i32;
                if px < 0 || px >= width {
                    continue;
                }

                let alpha = raster.coverage[(row * raster.width + col) as usize] as u32;
                if alpha == 0 {
                    continue;
                }

                let pixel = frame.get_pixel_mut(px as u32, py as u32);
                for channel in pixel.0.iter_mut() {
                    *channel = ((255 * alpha + *channel as u32 * (255 - alpha) + 127) / 255) as u8;
                }
            }
        }
    }
}
