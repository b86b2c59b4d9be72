//! Render Configuration - process-wide constants
//!
//! Loaded once at startup (defaults, optionally overridden by a JSON file)
//! and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SignatureError};

pub const DEFAULT_INPUT_FILE: &str = "signatures.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    pub max_width: u32,
    pub max_height: u32,
    pub margin: u32,
    pub line_height: u32,
    pub name_line_height: u32,
    pub font_family: String,
    /// Explicit font file; when unset the family name is resolved as `<family>.ttf`.
    pub font_path: Option<PathBuf>,
    pub font_size: f32,
    pub name_font_size: f32,
    pub separator_color: [u8; 4],
    pub text_color: [u8; 4],
    pub shadow_alpha: u8,
    pub shadow_offset: u32,
    pub logo_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_width: 1200,
            max_height: 400,
            margin: 20,
            line_height: 30,
            name_line_height: 100,
            font_family: "Roboto".to_string(),
            font_path: None,
            font_size: 24.0,
            name_font_size: 60.0,
            separator_color: [0, 0, 0, 255],
            text_color: [0, 0, 0, 255],
            shadow_alpha: 128,
            shadow_offset: 1,
            logo_dir: PathBuf::from("logos"),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl RenderConfig {
    /// Load overrides from a JSON file. Absent keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SignatureError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_width < 3 || self.max_height == 0 {
            return Err(SignatureError::Config(format!(
                "canvas {}x{} is too small",
                self.max_width, self.max_height
            )));
        }
        if self.available_height() == 0 {
            return Err(SignatureError::Config(format!(
                "margin {} leaves no room on a {}px tall canvas",
                self.margin, self.max_height
            )));
        }
        if self.line_height == 0 || self.name_line_height == 0 {
            return Err(SignatureError::Config("line heights must be non-zero".into()));
        }
        for size in [self.font_size, self.name_font_size] {
            if !size.is_finite() || size <= 0.0 {
                return Err(SignatureError::Config(format!("invalid font size {}", size)));
            }
        }
        Ok(())
    }

    /// Height of the column the logo and text block live in.
    /// Zero when the margins consume the canvas.
    pub fn available_height(&self) -> u32 {
        self.max_height.saturating_sub(self.margin.saturating_mul(2))
    }

    pub fn max_logo_width(&self) -> u32 {
        self.max_width / 3
    }

    pub fn font_file(&self) -> PathBuf {
        self.font_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.ttf", self.font_family)))
    }

    /// Text color with the shadow alpha substituted.
    pub fn shadow_color(&self) -> [u8; 4] {
        let [r, g, b, _] = self.text_color;
        [r, g, b, self.shadow_alpha]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_constants() {
        let config = RenderConfig::default();
        assert_eq!((config.max_width, config.max_height), (1200, 400));
        assert_eq!(config.available_height(), 360);
        assert_eq!(config.max_logo_width(), 400);
        assert_eq!(config.shadow_color(), [0, 0, 0, 128]);
        assert_eq!(config.font_file(), PathBuf::from("Roboto.ttf"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: RenderConfig =
            serde_json::from_str(r#"{"margin": 10, "outputDir": "cards"}"#).unwrap();
        assert_eq!(config.margin, 10);
        assert_eq!(config.output_dir, PathBuf::from("cards"));
        assert_eq!(config.line_height, 30);
    }

    #[test]
    fn test_margin_consuming_canvas_rejected() {
        let config = RenderConfig {
            margin: 200,
            ..RenderConfig::default()
        };
        assert!(matches!(config.validate(), Err(SignatureError::Config(_))));
        assert_eq!(config.available_height(), 0);
    }

    #[test]
    fn test_explicit_font_path_wins() {
        let config = RenderConfig {
            font_path: Some(PathBuf::from("/fonts/Inter.ttf")),
            ..RenderConfig::default()
        };
        assert_eq!(config.font_file(), PathBuf::from("/fonts/Inter.ttf"));
    }
}
