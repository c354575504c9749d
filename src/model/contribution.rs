//! Daily contribution counts from the contributions proxy.

use jiff::civil::Date;
use serde::{Deserialize, Deserializer, Serialize};

/// One day of the contribution calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub date: Date,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub level: ContributionLevel,
}

/// Intensity bucket, 0 (none) through 4 (most).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ContributionLevel(u8);

impl ContributionLevel {
    pub const MAX: u8 = 4;

    /// Levels above the maximum clamp to it.
    pub fn new(level: u8) -> Self {
        Self(level.min(Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl<'de> Deserialize<'de> for ContributionLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u64::deserialize(deserializer)?;
        Ok(Self::new(u8::try_from(raw).unwrap_or(u8::MAX)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_contribution() {
        let c: Contribution =
            serde_json::from_str(r#"{ "date": "2024-03-05", "count": 7, "level": 2 }"#).unwrap();
        assert_eq!(c.date, jiff::civil::date(2024, 3, 5));
        assert_eq!(c.count, 7);
        assert_eq!(c.level.get(), 2);
    }

    #[test]
    fn level_clamps() {
        let c: Contribution =
            serde_json::from_str(r#"{ "date": "2024-03-05", "count": 70, "level": 900 }"#)
                .unwrap();
        assert_eq!(c.level.get(), ContributionLevel::MAX);
        assert_eq!(ContributionLevel::new(9).get(), 4);
    }
}
