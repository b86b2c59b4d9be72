//! Hashing - SHA-256 for output files and config fingerprints
//!
//! Lets a rerun prove it produced the same bytes from the same constants.

use serde::Serialize;
use serde_json::{to_string, Value};
use sha2::{Digest, Sha256};

use crate::config::RenderConfig;

/// Lowercase hex SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// JSON with object keys sorted at every depth and no whitespace, so equal
/// values always hash equally regardless of field declaration order.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    to_string(&with_sorted_keys(serde_json::to_value(value)?))
}

fn with_sorted_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, inner)| (key, with_sorted_keys(inner)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(with_sorted_keys).collect()),
        other => other,
    }
}

/// Fingerprint of every constant that affects pixels or file placement.
pub fn config_fingerprint(config: &RenderConfig) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(config)?;
    Ok(sha256_hex(canonical.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;

    #[test]
    fn test_config_serializes_with_sorted_camel_case_keys() {
        let canonical = canonical_json(&RenderConfig::default()).unwrap();
        assert!(canonical.starts_with(r#"{"fontFamily":"Roboto","fontPath":null,"fontSize":24.0,"#));
        assert!(canonical.contains(r#""separatorColor":[0,0,0,255],"shadowAlpha":128,"#));
        assert!(!canonical.contains(char::is_whitespace));
    }

    #[test]
    fn test_identical_cards_share_a_digest() {
        let mut first = Canvas::transparent(16, 8);
        let mut second = Canvas::transparent(16, 8);
        for canvas in [&mut first, &mut second] {
            canvas.vertical_line(4, 1, 6, [0, 0, 0, 255]);
        }
        let digest = sha256_hex(&first.encode_png().unwrap());
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, sha256_hex(&second.encode_png().unwrap()));

        second.blend(10, 3, [0, 0, 0, 128], 1.0);
        assert_ne!(digest, sha256_hex(&second.encode_png().unwrap()));
    }

    #[test]
    fn test_fingerprint_tracks_constants() {
        let base = RenderConfig::default();
        let h1 = config_fingerprint(&base).unwrap();
        let h2 = config_fingerprint(&base.clone()).unwrap();
        assert_eq!(h1, h2);

        let shifted = RenderConfig {
            margin: 21,
            ..base
        };
        assert_ne!(h1, config_fingerprint(&shifted).unwrap());
    }
}
