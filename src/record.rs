//! Input Records - one CSV row per signature

use serde::{Deserialize, Serialize};

/// Column headers the input table must carry, in display order.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Name",
    "Position",
    "Email Address",
    "Phone Number",
    "Mailing Address",
    "Logo Filename",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Position")]
    pub position: String,
    #[serde(rename = "Email Address")]
    pub email: String,
    #[serde(rename = "Phone Number")]
    pub phone: String,
    #[serde(rename = "Mailing Address")]
    pub mailing_address: String,
    #[serde(rename = "Logo Filename")]
    pub logo_filename: String,
}

/// Primary lines use the large font and the tall line advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextRole {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLine<'a> {
    pub text: &'a str,
    pub role: TextRole,
}

impl InputRecord {
    pub fn text_lines(&self) -> Vec<TextLine<'_>> {
        let mut lines = vec![TextLine {
            text: self.name.as_str(),
            role: TextRole::Primary,
        }];
        lines.extend(
            [&self.position, &self.email, &self.phone, &self.mailing_address]
                .into_iter()
                .map(|text| TextLine {
                    text: text.as_str(),
                    role: TextRole::Secondary,
                }),
        );
        lines
    }

    pub fn output_filename(&self) -> String {
        format!("{}_signature.png", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
Name,Position,Email Address,Phone Number,Mailing Address,Logo Filename
Jane Doe,Engineer,jane@acme.test,555-0100,\"1 Main St, Springfield\",acme.png
";

    #[test]
    fn test_deserialize_by_header_name() {
        let mut reader = csv::Reader::from_reader(TABLE.as_bytes());
        let records: Vec<InputRecord> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Jane Doe");
        assert_eq!(records[0].mailing_address, "1 Main St, Springfield");
        assert_eq!(records[0].logo_filename, "acme.png");
    }

    #[test]
    fn test_name_is_the_only_primary_line() {
        let record = InputRecord {
            name: "Engineer".into(),
            position: "Engineer".into(),
            email: String::new(),
            phone: String::new(),
            mailing_address: String::new(),
            logo_filename: String::new(),
        };
        let roles: Vec<_> = record.text_lines().iter().map(|l| l.role).collect();
        assert_eq!(
            roles,
            vec![
                TextRole::Primary,
                TextRole::Secondary,
                TextRole::Secondary,
                TextRole::Secondary,
                TextRole::Secondary,
            ]
        );
        assert_eq!(record.output_filename(), "Engineer_signature.png");
    }
}
