//! Signature Cards - batch renderer for logo + contact-detail PNG cards
//!
//! # Pipeline (per row)
//! 1. Row ingestion (CSV, header-driven)
//! 2. Logo preparation (decode, proportional resize)
//! 3. Canvas composition (transparent canvas, logo, separator)
//! 4. Text layout (centered block, drop shadow, large name line)
//! 5. Output (`<Name>_signature.png`)

pub mod batch;
pub mod canvas;
pub mod config;
pub mod error;
pub mod fonts;
pub mod hashing;
pub mod layout;
pub mod logging;
pub mod record;
pub mod renderer;

pub use batch::{BatchReport, BatchRunner, RowOutcome, RowReport};
pub use canvas::Canvas;
pub use config::{RenderConfig, DEFAULT_INPUT_FILE};
pub use error::{Result, SignatureError};
pub use fonts::{FontKind, FontSet};
pub use hashing::{canonical_json, config_fingerprint, sha256_hex};
pub use layout::LogoSize;
pub use logging::{init_logging, LoggingConfig};
pub use record::{InputRecord, TextLine, TextRole, REQUIRED_COLUMNS};
pub use renderer::{RenderedSignature, SignatureRenderer, WrittenSignature};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
