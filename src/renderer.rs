//! Signature Renderer - one record in, one PNG out
//!
//! Order of operations is fixed: canvas, logo, separator, text (shadow then
//! face, line by line), encode. Same inputs give byte-identical output.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::canvas::Canvas;
use crate::config::RenderConfig;
use crate::error::{Result, SignatureError};
use crate::fonts::{FontKind, FontSet};
use crate::hashing::sha256_hex;
use crate::layout::{self, LogoSize};
use crate::record::InputRecord;

/// A composed card that has not been written anywhere yet.
pub struct RenderedSignature {
    pub canvas: Canvas,
    pub logo_size: LogoSize,
    pub lines_drawn: usize,
}

#[derive(Debug, Clone)]
pub struct WrittenSignature {
    pub path: PathBuf,
    pub sha256: String,
    pub logo_size: LogoSize,
    pub lines_drawn: usize,
}

pub struct SignatureRenderer {
    config: RenderConfig,
    fonts: FontSet,
}

impl SignatureRenderer {
    pub fn new(config: RenderConfig, fonts: FontSet) -> Self {
        Self { config, fonts }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn font_kind(&self) -> FontKind {
        self.fonts.kind()
    }

    /// Resolve and decode a logo from the logo directory.
    ///
    /// A path that is not a regular file is `MissingLogo`; anything the
    /// decoder rejects is `LogoDecode`. Both are row skips.
    pub fn load_logo(&self, filename: &str) -> Result<RgbaImage> {
        let path = self.config.logo_dir.join(filename);
        if !path.is_file() {
            return Err(SignatureError::MissingLogo(path));
        }
        let logo = image::open(&path).map_err(|source| SignatureError::LogoDecode {
            path: path.clone(),
            source,
        })?;
        Ok(logo.to_rgba8())
    }

    /// Build the card in memory.
    pub fn compose(&self, record: &InputRecord) -> Result<RenderedSignature> {
        let config = &self.config;
        let logo = self.load_logo(&record.logo_filename)?;

        let mut canvas = Canvas::transparent(config.max_width, config.max_height);

        let logo_size = layout::fit_logo(logo.width(), logo.height(), config);
        let logo = imageops::resize(
            &logo,
            logo_size.width,
            logo_size.height,
            FilterType::CatmullRom,
        );
        canvas.paste(&logo, config.margin, config.margin);

        let separator_x = layout::separator_x(logo_size, config);
        canvas.vertical_line(
            separator_x,
            config.margin,
            config.max_height.saturating_sub(config.margin),
            config.separator_color,
        );

        let lines = record.text_lines();
        let placed = layout::place_lines(&lines, config);
        let text_x = i64::from(layout::text_x(logo_size, config));
        let offset = i64::from(config.shadow_offset);
        let shadow = config.shadow_color();

        for entry in &placed {
            let role = entry.line.role;
            let text = entry.line.text;
            self.fonts
                .draw(&mut canvas, role, text_x + offset, entry.y + offset, shadow, text);
            self.fonts
                .draw(&mut canvas, role, text_x, entry.y, config.text_color, text);
        }

        debug!(
            name = %record.name,
            logo_width = logo_size.width,
            logo_height = logo_size.height,
            separator_x,
            lines = placed.len(),
            "composed signature"
        );

        Ok(RenderedSignature {
            canvas,
            logo_size,
            lines_drawn: placed.len(),
        })
    }

    /// Compose and write `<Name>_signature.png` into the output directory.
    ///
    /// The output directory must already exist; the batch driver creates it.
    pub fn render_signature(&self, record: &InputRecord) -> Result<WrittenSignature> {
        let rendered = self.compose(record)?;
        let bytes = rendered.canvas.encode_png()?;

        let path = self.config.output_dir.join(record.output_filename());
        fs::write(&path, &bytes).map_err(|source| SignatureError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(WrittenSignature {
            path,
            sha256: sha256_hex(&bytes),
            logo_size: rendered.logo_size,
            lines_drawn: rendered.lines_drawn,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn record(logo: &str) -> InputRecord {
        InputRecord {
            name: "Jane Doe".into(),
            position: "Engineer".into(),
            email: "jane@acme.test".into(),
            phone: "555-0100".into(),
            mailing_address: "1 Main St".into(),
            logo_filename: logo.into(),
        }
    }

    fn renderer_in(dir: &std::path::Path) -> SignatureRenderer {
        let config = RenderConfig {
            logo_dir: dir.to_path_buf(),
            output_dir: dir.to_path_buf(),
            ..RenderConfig::default()
        };
        let fonts = FontSet::builtin(&config);
        SignatureRenderer::new(config, fonts)
    }

    #[test]
    fn test_missing_logo_is_skippable() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = renderer_in(dir.path());
        let err = renderer.compose(&record("nope.png")).err().unwrap();
        assert!(matches!(err, SignatureError::MissingLogo(_)));
        assert!(err.is_skippable());
    }

    #[test]
    fn test_unvalidated_margins_do_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::from_pixel(20, 10, Rgba([255, 0, 0, 255]))
            .save(dir.path().join("acme.png"))
            .unwrap();
        let config = RenderConfig {
            margin: 500,
            logo_dir: dir.path().to_path_buf(),
            output_dir: dir.path().to_path_buf(),
            ..RenderConfig::default()
        };
        let fonts = FontSet::builtin(&config);
        let renderer = SignatureRenderer::new(config, fonts);

        let rendered = renderer.compose(&record("acme.png")).unwrap();
        assert_eq!(rendered.lines_drawn, 0);
        assert_eq!((rendered.canvas.width(), rendered.canvas.height()), (1200, 400));
    }

    #[test]
    fn test_compose_places_logo_separator_and_text() {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::from_pixel(200, 100, Rgba([255, 0, 0, 255]))
            .save(dir.path().join("acme.png"))
            .unwrap();
        let renderer = renderer_in(dir.path());

        let rendered = renderer.compose(&record("acme.png")).unwrap();
        let canvas = &rendered.canvas;
        assert_eq!((canvas.width(), canvas.height()), (1200, 400));
        assert_eq!(rendered.logo_size, LogoSize { width: 400, height: 200 });
        assert_eq!(rendered.lines_drawn, 5);

        // logo spans 20..420 x 20..220
        assert!(canvas.pixel(200, 100)[0] > 200);
        assert!(canvas.pixel(200, 100)[3] > 200);
        assert_eq!(canvas.pixel(200, 300)[3], 0);

        assert_eq!(canvas.pixel(440, 200), [0, 0, 0, 255]);
        assert_eq!(canvas.pixel(439, 200)[3], 0);
        assert_eq!(canvas.pixel(440, 10)[3], 0);

        // name line drawn at (460, 90)
        let inked = (460..520).any(|x| (90..100).any(|y| canvas.pixel(x, y)[3] > 0));
        assert!(inked);
    }
}
