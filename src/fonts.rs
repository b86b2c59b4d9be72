//! Fonts - TrueType faces with a built-in bitmap fallback
//!
//! A run uses exactly one typeface. If the configured font file cannot be
//! loaded, the whole run falls back to the built-in 5x8 bitmap font.

use rusttype::{point, Font, Scale};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::canvas::Canvas;
use crate::config::RenderConfig;
use crate::error::{Result, SignatureError};
use crate::record::TextRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontKind {
    TrueType,
    Builtin,
}

enum Typeface {
    TrueType(Font<'static>),
    Builtin,
}

pub struct FontSet {
    typeface: Typeface,
    name_size: f32,
    body_size: f32,
}

impl FontSet {
    /// Load the configured font, falling back to the built-in face with a warning.
    pub fn load(config: &RenderConfig) -> Self {
        let path = config.font_file();
        match load_truetype(&path) {
            Ok(font) => {
                debug!(font = %path.display(), "loaded font");
                Self {
                    typeface: Typeface::TrueType(font),
                    name_size: config.name_font_size,
                    body_size: config.font_size,
                }
            }
            Err(e) => {
                warn!(error = %e, "{} font not found, using built-in font", config.font_family);
                Self::builtin(config)
            }
        }
    }

    pub fn builtin(config: &RenderConfig) -> Self {
        Self {
            typeface: Typeface::Builtin,
            name_size: config.name_font_size,
            body_size: config.font_size,
        }
    }

    pub fn kind(&self) -> FontKind {
        match self.typeface {
            Typeface::TrueType(_) => FontKind::TrueType,
            Typeface::Builtin => FontKind::Builtin,
        }
    }

    fn size_for(&self, role: TextRole) -> f32 {
        match role {
            TextRole::Primary => self.name_size,
            TextRole::Secondary => self.body_size,
        }
    }

    /// Draw `text` with its top-left at (x, y).
    pub fn draw(
        &self,
        canvas: &mut Canvas,
        role: TextRole,
        x: i64,
        y: i64,
        color: [u8; 4],
        text: &str,
    ) {
        match &self.typeface {
            Typeface::TrueType(font) => {
                draw_truetype(canvas, font, self.size_for(role), x, y, color, text)
            }
            Typeface::Builtin => draw_builtin(canvas, x, y, color, text),
        }
    }
}

fn load_truetype(path: &Path) -> Result<Font<'static>> {
    let bytes = fs::read(path).map_err(|e| SignatureError::FontUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Font::try_from_vec(bytes).ok_or_else(|| SignatureError::FontUnavailable {
        path: path.to_path_buf(),
        reason: "not a TrueType/OpenType font".into(),
    })
}

/// Convert an em size (as font sizes are usually quoted) to rusttype's
/// line-height based scale.
fn em_scale(font: &Font<'_>, size: f32) -> Scale {
    let units_per_em = f32::from(font.units_per_em());
    if units_per_em <= 0.0 {
        return Scale::uniform(size);
    }
    let metrics = font.v_metrics_unscaled();
    Scale::uniform(size * (metrics.ascent - metrics.descent) / units_per_em)
}

fn draw_truetype(
    canvas: &mut Canvas,
    font: &Font<'_>,
    size: f32,
    x: i64,
    y: i64,
    color: [u8; 4],
    text: &str,
) {
    let scale = em_scale(font, size);
    let ascent = font.v_metrics(scale).ascent;
    let origin = point(x as f32, y as f32 + ascent);

    for glyph in font.layout(text, scale, origin) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                canvas.blend(
                    i64::from(bb.min.x) + i64::from(gx),
                    i64::from(bb.min.y) + i64::from(gy),
                    color,
                    coverage,
                );
            });
        }
    }
}

const GLYPH_WIDTH: usize = 5;
const GLYPH_ADVANCE: i64 = 6;

fn draw_builtin(canvas: &mut Canvas, x: i64, y: i64, color: [u8; 4], text: &str) {
    let mut caret = x;
    for ch in text.chars() {
        let glyph = builtin_glyph(ch);
        for (col, bits) in glyph.iter().enumerate() {
            for row in 0..8u8 {
                if (bits >> row) & 1 == 1 {
                    canvas.blend(caret + col as i64, y + i64::from(row), color, 1.0);
                }
            }
        }
        caret += GLYPH_ADVANCE;
    }
}

/// Column-major bitmap, least significant bit at the top.
/// Characters outside printable ASCII render as '?'.
fn builtin_glyph(ch: char) -> &'static [u8; GLYPH_WIDTH] {
    let code = ch as u32;
    let index = if (0x20..=0x7e).contains(&code) {
        (code - 0x20) as usize
    } else {
        ('?' as u32 - 0x20) as usize
    };
    &BUILTIN_GLYPHS[index]
}

#[rustfmt::skip]
static BUILTIN_GLYPHS: [[u8; GLYPH_WIDTH]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5f, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7f, 0x14, 0x7f, 0x14], // #
    [0x24, 0x2a, 0x7f, 0x2a, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x56, 0x20, 0x50], // &
    [0x00, 0x08, 0x07, 0x03, 0x00], // '
    [0x00, 0x1c, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1c, 0x00], // )
    [0x2a, 0x1c, 0x7f, 0x1c, 0x2a], // *
    [0x08, 0x08, 0x3e, 0x08, 0x08], // +
    [0x00, 0x80, 0x70, 0x30, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x00, 0x60, 0x60, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3e, 0x51, 0x49, 0x45, 0x3e], // 0
    [0x00, 0x42, 0x7f, 0x40, 0x00], // 1
    [0x72, 0x49, 0x49, 0x49, 0x46], // 2
    [0x21, 0x41, 0x49, 0x4d, 0x33], // 3
    [0x18, 0x14, 0x12, 0x7f, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3c, 0x4a, 0x49, 0x49, 0x31], // 6
    [0x41, 0x21, 0x11, 0x09, 0x07], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x46, 0x49, 0x49, 0x29, 0x1e], // 9
    [0x00, 0x00, 0x14, 0x00, 0x00], // :
    [0x00, 0x40, 0x34, 0x00, 0x00], // ;
    [0x00, 0x08, 0x14, 0x22, 0x41], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x59, 0x09, 0x06], // ?
    [0x3e, 0x41, 0x5d, 0x59, 0x4e], // @
    [0x7c, 0x12, 0x11, 0x12, 0x7c], // A
    [0x7f, 0x49, 0x49, 0x49, 0x36], // B
    [0x3e, 0x41, 0x41, 0x41, 0x22], // C
    [0x7f, 0x41, 0x41, 0x41, 0x3e], // D
    [0x7f, 0x49, 0x49, 0x49, 0x41], // E
    [0x7f, 0x09, 0x09, 0x09, 0x01], // F
    [0x3e, 0x41, 0x41, 0x51, 0x73], // G
    [0x7f, 0x08, 0x08, 0x08, 0x7f], // H
    [0x00, 0x41, 0x7f, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3f, 0x01], // J
    [0x7f, 0x08, 0x14, 0x22, 0x41], // K
    [0x7f, 0x40, 0x40, 0x40, 0x40], // L
    [0x7f, 0x02, 0x1c, 0x02, 0x7f], // M
    [0x7f, 0x04, 0x08, 0x10, 0x7f], // N
    [0x3e, 0x41, 0x41, 0x41, 0x3e], // O
    [0x7f, 0x09, 0x09, 0x09, 0x06], // P
    [0x3e, 0x41, 0x51, 0x21, 0x5e], // Q
    [0x7f, 0x09, 0x19, 0x29, 0x46], // R
    [0x26, 0x49, 0x49, 0x49, 0x32], // S
    [0x03, 0x01, 0x7f, 0x01, 0x03], // T
    [0x3f, 0x40, 0x40, 0x40, 0x3f], // U
    [0x1f, 0x20, 0x40, 0x20, 0x1f], // V
    [0x3f, 0x40, 0x38, 0x40, 0x3f], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x03, 0x04, 0x78, 0x04, 0x03], // Y
    [0x61, 0x59, 0x49, 0x4d, 0x43], // Z
    [0x00, 0x7f, 0x41, 0x41, 0x41], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // backslash
    [0x00, 0x41, 0x41, 0x41, 0x7f], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x03, 0x07, 0x08, 0x00], // `
    [0x20, 0x54, 0x54, 0x78, 0x40], // a
    [0x7f, 0x28, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x28], // c
    [0x38, 0x44, 0x44, 0x28, 0x7f], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x00, 0x08, 0x7e, 0x09, 0x02], // f
    [0x18, 0xa4, 0xa4, 0x9c, 0x78], // g
    [0x7f, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7d, 0x40, 0x00], // i
    [0x20, 0x40, 0x40, 0x3d, 0x00], // j
    [0x7f, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7f, 0x40, 0x00], // l
    [0x7c, 0x04, 0x78, 0x04, 0x78], // m
    [0x7c, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0xfc, 0x18, 0x24, 0x24, 0x18], // p
    [0x18, 0x24, 0x24, 0x18, 0xfc], // q
    [0x7c, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x24], // s
    [0x04, 0x04, 0x3f, 0x44, 0x24], // t
    [0x3c, 0x40, 0x40, 0x20, 0x7c], // u
    [0x1c, 0x20, 0x40, 0x20, 0x1c], // v
    [0x3c, 0x40, 0x30, 0x40, 0x3c], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x4c, 0x90, 0x90, 0x90, 0x7c], // y
    [0x44, 0x64, 0x54, 0x4c, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x77, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x02, 0x01, 0x02, 0x04, 0x02], // ~
];
