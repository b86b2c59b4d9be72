//! Canvas - fixed-size RGBA buffer owned by one render call

use image::{imageops, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;
use std::io::Cursor;

use crate::error::{Result, SignatureError};

pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Fully transparent canvas.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Copy `top` onto the canvas, replacing pixels (alpha included).
    pub fn paste(&mut self, top: &RgbaImage, x: u32, y: u32) {
        imageops::replace(&mut self.image, top, i64::from(x), i64::from(y));
    }

    /// One pixel wide, both ends inclusive.
    pub fn vertical_line(&mut self, x: u32, top: u32, bottom: u32, color: [u8; 4]) {
        draw_line_segment_mut(
            &mut self.image,
            (x as f32, top as f32),
            (x as f32, bottom as f32),
            Rgba(color),
        );
    }

    /// Source-over composite of `color` scaled by `coverage` (0..=1).
    /// Out-of-bounds coordinates are ignored.
    pub fn blend(&mut self, x: i64, y: i64, color: [u8; 4], coverage: f32) {
        if x < 0 || y < 0 || x >= i64::from(self.width()) || y >= i64::from(self.height()) {
            return;
        }
        let src_a = f32::from(color[3]) / 255.0 * coverage.clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        let dst_a = f32::from(dst.0[3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);

        for c in 0..3 {
            let src_c = f32::from(color[c]);
            let dst_c = f32::from(dst.0[c]);
            let mixed = (src_c * src_a + dst_c * dst_a * (1.0 - src_a)) / out_a;
            dst.0[c] = mixed.round().clamp(0.0, 255.0) as u8;
        }
        dst.0[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }

    /// Encode as PNG, keeping the alpha channel.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(SignatureError::Encode)?;
        Ok(bytes)
    }
}
