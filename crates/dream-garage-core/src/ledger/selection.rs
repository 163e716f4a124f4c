use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::ItemId;
use crate::error::ValidationError;

/// Underglow accent as a normalized lowercase `#rrggbb` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Underglow(String);

impl Underglow {
    pub const CYAN: &'static str = "#00ffff";
    pub const MAGENTA: &'static str = "#ff00ff";
    pub const YELLOW: &'static str = "#ffff00";

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Underglow {
    fn default() -> Self {
        Self(Self::CYAN.to_string())
    }
}

impl FromStr for Underglow {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let hex = match s.as_str() {
            "cyan" => Self::CYAN.to_string(),
            "magenta" => Self::MAGENTA.to_string(),
            "yellow" => Self::YELLOW.to_string(),
            _ => s,
        };
        let digits = hex.strip_prefix('#').unwrap_or("");
        if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Self(hex))
        } else {
            Err(ValidationError::InvalidValue {
                field: "underglow".into(),
                message: format!("expected #rrggbb or cyan/magenta/yellow, got '{hex}'"),
            })
        }
    }
}

impl TryFrom<String> for Underglow {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Underglow> for String {
    fn from(u: Underglow) -> Self {
        u.0
    }
}

impl fmt::Display for Underglow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the garage is currently showing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub car: Option<ItemId>,
    pub theme: Option<ItemId>,
    pub underglow: Underglow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underglow_accepts_presets_and_hex() {
        assert_eq!("Magenta".parse::<Underglow>().unwrap().as_str(), "#ff00ff");
        assert_eq!("#A1B2C3".parse::<Underglow>().unwrap().as_str(), "#a1b2c3");
        assert!("#12345".parse::<Underglow>().is_err());
        assert!("chartreuse".parse::<Underglow>().is_err());
    }

    #[test]
    fn underglow_deserialize_validates() {
        let ok: Underglow = serde_json::from_str("\"yellow\"").unwrap();
        assert_eq!(ok.as_str(), Underglow::YELLOW);
        assert!(serde_json::from_str::<Underglow>("\"#zzzzzz\"").is_err());
    }
}
