//! Tag attribute types.

use std::str::FromStr;

use thiserror::Error;

/// Maximum length of a tag name or slug.
pub const TAG_FIELD_MAX_LEN: usize = 200;

/// Hex colour of a tag, normalized to upper-case `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Error returned when a string is not a `#RRGGBB` colour.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid hex color: {0:?}")]
pub struct InvalidHexColor(pub String);

impl FromStr for HexColor {
    type Err = InvalidHexColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| InvalidHexColor(s.to_owned()))?;
        Ok(Self(format!("#{}", digits.to_ascii_uppercase())))
    }
}

/// URL-safe tag identifier: ASCII letters, digits, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid slug: {0:?}")]
pub struct InvalidSlug(pub String);

impl FromStr for Slug {
    type Err = InvalidSlug;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = !s.is_empty()
            && s.len() <= TAG_FIELD_MAX_LEN
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(InvalidSlug(s.to_owned()));
        }
        Ok(Self(s.to_owned()))
    }
}
