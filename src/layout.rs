//! Layout - pure geometry for one signature card
//!
//! Nothing here touches pixels. The renderer asks for positions, then draws.

use serde::{Deserialize, Serialize};

use crate::config::RenderConfig;
use crate::record::{TextLine, TextRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoSize {
    pub width: u32,
    pub height: u32,
}

/// A line that survived the overflow check, with its top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedLine<'a> {
    pub line: TextLine<'a>,
    pub y: i64,
}

/// Fit a logo to the full available height, then clamp to a third of the canvas width.
///
/// Width is truncated when derived from the height; height is rounded half-up
/// when recomputed from a clamped width.
pub fn fit_logo(src_width: u32, src_height: u32, config: &RenderConfig) -> LogoSize {
    let aspect = f64::from(src_width.max(1)) / f64::from(src_height.max(1));

    let mut height = config.available_height();
    let mut width = (aspect * f64::from(height)) as u32;

    let max_width = config.max_logo_width();
    if width > max_width {
        width = max_width;
        height = ((f64::from(width) / aspect) + 0.5) as u32;
    }

    LogoSize {
        width: width.max(1),
        height: height.min(config.available_height()).max(1),
    }
}

pub fn separator_x(logo: LogoSize, config: &RenderConfig) -> u32 {
    logo.width + 2 * config.margin
}

pub fn text_x(logo: LogoSize, config: &RenderConfig) -> u32 {
    separator_x(logo, config) + config.margin
}

impl TextRole {
    /// Vertical advance after drawing a line of this role.
    pub fn advance(self, config: &RenderConfig) -> u32 {
        match self {
            TextRole::Primary => config.name_line_height,
            TextRole::Secondary => config.line_height,
        }
    }
}

pub fn block_height(lines: &[TextLine<'_>], config: &RenderConfig) -> u32 {
    lines.iter().map(|line| line.role.advance(config)).sum()
}

/// Top of the first line so the block is centered in the available height.
/// May be negative when the block is taller than the column.
pub fn text_origin_y(lines: &[TextLine<'_>], config: &RenderConfig) -> i64 {
    let slack = i64::from(config.available_height()) - i64::from(block_height(lines, config));
    i64::from(config.margin) + slack.div_euclid(2)
}

/// Assign a y to each line in order, stopping at the first one that would
/// overflow the available height. Lines after that are dropped.
pub fn place_lines<'a>(lines: &[TextLine<'a>], config: &RenderConfig) -> Vec<PlacedLine<'a>> {
    let limit = i64::from(config.available_height());
    let line_height = i64::from(config.line_height);

    let mut y = text_origin_y(lines, config);
    let mut placed = Vec::with_capacity(lines.len());
    for line in lines {
        if y + line_height > limit {
            break;
        }
        placed.push(PlacedLine { line: *line, y });
        y += i64::from(line.role.advance(config));
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_lines() -> Vec<TextLine<'static>> {
        let mut lines = vec![TextLine {
            text: "Jane Doe",
            role: TextRole::Primary,
        }];
        for text in ["Engineer", "jane@acme.test", "555-0100", "1 Main St"] {
            lines.push(TextLine {
                text,
                role: TextRole::Secondary,
            });
        }
        lines
    }

    #[test]
    fn test_wide_logo_clamped_to_third_of_canvas() {
        let size = fit_logo(200, 100, &RenderConfig::default());
        assert_eq!(size, LogoSize { width: 400, height: 200 });
        assert_eq!(separator_x(size, &RenderConfig::default()), 440);
        assert_eq!(text_x(size, &RenderConfig::default()), 460);
    }

    #[test]
    fn test_narrow_logo_keeps_full_height() {
        let config = RenderConfig::default();
        let size = fit_logo(100, 400, &config);
        assert_eq!(size.height, config.available_height());
        assert_eq!(size.width, 90);
    }

    #[test]
    fn test_square_logo_is_not_clamped() {
        let size = fit_logo(64, 64, &RenderConfig::default());
        assert_eq!(size, LogoSize { width: 360, height: 360 });
    }

    #[test]
    fn test_clamped_height_rounds_half_up() {
        // aspect 3.0 -> 400 / 3 = 133.33 -> 133
        let size = fit_logo(300, 100, &RenderConfig::default());
        assert_eq!(size, LogoSize { width: 400, height: 133 });
        // aspect 1.6 -> 400 / 1.6 = 250.0
        let size = fit_logo(160, 100, &RenderConfig::default());
        assert_eq!(size, LogoSize { width: 400, height: 250 });
    }

    #[test]
    fn test_logo_never_exceeds_bounds() {
        let config = RenderConfig::default();
        for (w, h) in [(1, 1), (5000, 3), (3, 5000), (1200, 400), (7, 11)] {
            let size = fit_logo(w, h, &config);
            assert!(size.width <= config.max_logo_width(), "{w}x{h}");
            assert!(size.height <= config.available_height(), "{w}x{h}");
        }
    }

    #[test]
    fn test_default_block_is_centered_at_90() {
        let config = RenderConfig::default();
        let lines = five_lines();
        assert_eq!(block_height(&lines, &config), 220);
        assert_eq!(text_origin_y(&lines, &config), 90);

        let placed = place_lines(&lines, &config);
        let ys: Vec<_> = placed.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![90, 190, 220, 250, 280]);
    }

    #[test]
    fn test_overflowing_lines_are_dropped() {
        let config = RenderConfig {
            max_height: 200,
            ..RenderConfig::default()
        };
        let lines = five_lines();
        // slack = 160 - 220 = -60 -> origin 20 - 30 = -10
        assert_eq!(text_origin_y(&lines, &config), -10);

        let placed = place_lines(&lines, &config);
        assert_eq!(placed.len(), 3);
        assert_eq!(placed[0].line.role, TextRole::Primary);
        assert_eq!(placed.last().map(|p| p.line.text), Some("jane@acme.test"));
    }

    #[test]
    fn test_margins_consuming_canvas_place_nothing() {
        let config = RenderConfig {
            margin: 250,
            ..RenderConfig::default()
        };
        assert_eq!(config.available_height(), 0);
        let size = fit_logo(200, 100, &config);
        assert_eq!(size.height, 1);
        assert!(place_lines(&five_lines(), &config).is_empty());
    }

    #[test]
    fn test_odd_slack_floors() {
        let config = RenderConfig {
            max_height: 301,
            ..RenderConfig::default()
        };
        // available 261, slack 41 -> 20
        assert_eq!(text_origin_y(&five_lines(), &config), 40);
    }
}
