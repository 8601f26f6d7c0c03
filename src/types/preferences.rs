use serde::{Deserialize, Serialize};
use std::{convert::Infallible, fmt, str::FromStr};

/// Search radius used when the survey leaves it blank, in miles.
pub const DEFAULT_RADIUS_MILES: f64 = 5.0;

/// Self-reported activity level from the trip survey.
///
/// The survey offers Low, Moderate and High, but answers are not validated.
/// Only those exact spellings map to the named variants; anything else,
/// including `"low"` or `" High "`, is kept verbatim as [`ActivityLevel::Other`]
/// so the prompt shows what the visitor actually typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityLevel {
    Low,
    Moderate,
    High,
    Other(String),
}

impl ActivityLevel {
    pub fn as_str(&self) -> &str {
        match self {
            ActivityLevel::Low => "Low",
            ActivityLevel::Moderate => "Moderate",
            ActivityLevel::High => "High",
            ActivityLevel::Other(value) => value,
        }
    }
}

impl From<String> for ActivityLevel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Low" => ActivityLevel::Low,
            "Moderate" => ActivityLevel::Moderate,
            "High" => ActivityLevel::High,
            _ => ActivityLevel::Other(value),
        }
    }
}

impl From<&str> for ActivityLevel {
    fn from(value: &str) -> Self {
        ActivityLevel::from(value.to_string())
    }
}

impl From<ActivityLevel> for String {
    fn from(level: ActivityLevel) -> Self {
        match level {
            ActivityLevel::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ActivityLevel::from(s))
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Survey answers describing the visitor's trip.
///
/// Values are interpolated into the prompt as given; nothing here is
/// range-checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPreferences {
    /// Number of days in Chicago
    pub stay_length: u32,
    /// Neighborhood or area the visitor is staying in
    pub location: String,
    pub favorite_cuisine: String,
    pub activity_level: ActivityLevel,
    /// Total trip budget in dollars
    pub budget: f64,
    /// Who the visitor is travelling with ("solo", "family", ...)
    pub social_context: String,
    /// Things to avoid; may be empty
    #[serde(default)]
    pub dislikes: String,
    /// Search radius around `location`, in miles
    #[serde(default = "default_radius")]
    pub radius: f64,
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS_MILES
}

impl TripPreferences {
    pub fn new(
        stay_length: u32,
        location: impl Into<String>,
        favorite_cuisine: impl Into<String>,
        activity_level: impl Into<ActivityLevel>,
        budget: f64,
        social_context: impl Into<String>,
        dislikes: impl Into<String>,
    ) -> Self {
        Self {
            stay_length,
            location: location.into(),
            favorite_cuisine: favorite_cuisine.into(),
            activity_level: activity_level.into(),
            budget,
            social_context: social_context.into(),
            dislikes: dislikes.into(),
            radius: DEFAULT_RADIUS_MILES,
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Number of itinerary items the model is asked for (four per day).
    pub fn expected_item_count(&self) -> u64 {
        u64::from(self.stay_length) * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_activity_level_parsing() {
        assert_eq!(ActivityLevel::from("Low"), ActivityLevel::Low);
        assert_eq!(
            ActivityLevel::from("low"),
            ActivityLevel::Other("low".to_string())
        );
        assert_eq!(ActivityLevel::from(" HIGH ").to_string(), " HIGH ");
        assert_eq!(
            "Moderate".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::Moderate
        );
        assert_eq!(
            ActivityLevel::from("couch potato"),
            ActivityLevel::Other("couch potato".to_string())
        );
    }

    #[test]
    fn test_activity_level_serde_is_lossless() {
        let level: ActivityLevel = serde_json::from_value(json!("Extreme")).unwrap();
        assert_eq!(serde_json::to_value(&level).unwrap(), json!("Extreme"));

        let level: ActivityLevel = serde_json::from_value(json!("moderate")).unwrap();
        assert_eq!(serde_json::to_value(&level).unwrap(), json!("moderate"));

        let level: ActivityLevel = serde_json::from_value(json!("Moderate")).unwrap();
        assert_eq!(level, ActivityLevel::Moderate);
    }

    #[test]
    fn test_radius_defaults_when_missing() {
        let prefs: TripPreferences = serde_json::from_value(json!({
            "stay_length": 2,
            "location": "Wicker Park",
            "favorite_cuisine": "Thai",
            "activity_level": "High",
            "budget": 800,
            "social_context": "friends"
        }))
        .unwrap();

        assert_eq!(prefs.radius, DEFAULT_RADIUS_MILES);
        assert!(prefs.dislikes.is_empty());
        assert_eq!(prefs.expected_item_count(), 8);
    }

    #[test]
    fn test_builder() {
        let prefs = TripPreferences::new(3, "Loop", "Italian", "Low", 1200.0, "family", "")
            .with_radius(2.5);
        assert_eq!(prefs.radius, 2.5);
        assert_eq!(prefs.activity_level, ActivityLevel::Low);
        assert_eq!(prefs.expected_item_count(), 12);
    }

    #[test]
    fn test_expected_item_count_does_not_overflow() {
        let prefs = TripPreferences::new(u32::MAX, "Loop", "Thai", "Low", 100.0, "solo", "");
        assert_eq!(prefs.expected_item_count(), u64::from(u32::MAX) * 4);
    }
}
