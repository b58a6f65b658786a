//! Front-matter parsing

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FrontMatterError;
use crate::helpers::parse_date_string;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Accepts any YAML scalar and keeps its string spelling
///
/// `date: 2021` or `title: 404` arrive as numbers, but the pipeline only
/// ever treats these fields as text.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct ScalarString;

    impl<'de> Visitor<'de> for ScalarString {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
            Ok(Some(value))
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(ScalarString)
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,

    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,

    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(deserialize_with = "string_or_vec", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Additional custom fields, in document order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Text whose first line is not exactly `---` has no front-matter and is
    /// returned whole as the body.
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let Some(rest) = strip_delimiter(content) else {
            return Ok((FrontMatter::default(), content));
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if is_delimiter(line) {
                let yaml_content = &rest[..offset];
                let remaining = &rest[offset + line.len()..];

                if yaml_content.trim().is_empty() {
                    return Ok((FrontMatter::default(), remaining));
                }

                let fm: FrontMatter = serde_yaml::from_str(yaml_content)?;
                return Ok((fm, remaining));
            }
            offset += line.len();
        }

        Err(FrontMatterError::Unterminated)
    }

    /// Serialize back into a YAML block (without delimiters)
    pub fn to_yaml(&self) -> Result<String, FrontMatterError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check the fields every post must carry
    /// Returns (title, date, parsed_date)
    pub fn require(&self) -> Result<(&str, &str, NaiveDateTime), FrontMatterError> {
        let title = non_empty(self.title.as_deref()).ok_or(FrontMatterError::MissingField("title"))?;
        let date = non_empty(self.date.as_deref()).ok_or(FrontMatterError::MissingField("date"))?;
        let parsed =
            parse_date_string(date).ok_or_else(|| FrontMatterError::InvalidDate(date.to_string()))?;

        Ok((title, date, parsed))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == "---"
}

/// Strip the opening `---` line, if the text starts with one
fn strip_delimiter(content: &str) -> Option<&str> {
    let (first, rest) = match content.find('\n') {
        Some(pos) => (&content[..pos], &content[pos + 1..]),
        None => (content, ""),
    };

    is_delimiter(first).then_some(rest)
}
