use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Urgency level of a task.
///
/// Serialized lowercase. Unrecognized or missing values in stored data
/// deserialize to `Medium` rather than failing, so older lists keep loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!(
                "Invalid priority '{}'. Valid options: low, medium, high",
                s
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_display() {
        assert_eq!(format!("{}", Priority::Low), "low");
        assert_eq!(format!("{}", Priority::Medium), "medium");
        assert_eq!(format!("{}", Priority::High), "high");
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!(Priority::from_str("low").unwrap(), Priority::Low);
        assert_eq!(Priority::from_str("MEDIUM").unwrap(), Priority::Medium);
        assert_eq!(Priority::from_str("High").unwrap(), Priority::High);
    }

    #[test]
    fn test_priority_from_str_invalid() {
        assert!(Priority::from_str("urgent").is_err());
        assert!(Priority::from_str("").is_err());
    }

    #[test]
    fn test_priority_default_is_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_priority_json_roundtrip() {
        let priority = Priority::High;
        let json = serde_json::to_string(&priority).unwrap();
        assert_eq!(json, "\"high\"");

        let parsed: Priority = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, priority);
    }

    #[test]
    fn test_priority_unknown_value_falls_back_to_medium() {
        let parsed: Priority = serde_json::from_str("\"urgent\"").unwrap();
        assert_eq!(parsed, Priority::Medium);

        let parsed: Priority = serde_json::from_str("\"\"").unwrap();
        assert_eq!(parsed, Priority::Medium);
    }
}
