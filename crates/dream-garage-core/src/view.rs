//! Screens the front end can show. Closed set, matched exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Dashboard,
    Garage,
    Shop,
    Achievements,
    Environments,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::Garage,
        View::Shop,
        View::Achievements,
        View::Environments,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Garage => "garage",
            View::Shop => "shop",
            View::Achievements => "achievements",
            View::Environments => "environments",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Garage => "Garage",
            View::Shop => "Shop",
            View::Achievements => "Achievements",
            View::Environments => "Garage Environments",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        View::ALL
            .into_iter()
            .find(|v| v.as_str() == wanted)
            .ok_or_else(|| ValidationError::UnknownView(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive_and_closed() {
        assert_eq!("Shop".parse::<View>().unwrap(), View::Shop);
        assert_eq!(" environments ".parse::<View>().unwrap(), View::Environments);
        assert_eq!(
            "settings".parse::<View>(),
            Err(ValidationError::UnknownView("settings".into()))
        );
        for v in View::ALL {
            assert_eq!(v.to_string().parse::<View>().unwrap(), v);
        }
    }
}
