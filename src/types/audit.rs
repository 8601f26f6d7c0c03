use std::{
    collections::{BTreeMap, HashSet},
    fmt,
};

use super::{itinerary::ItineraryResult, preferences::TripPreferences};

const ITEMS_PER_DAY: usize = 4;
const MIN_ACTIVITIES_PER_DAY: usize = 2;
const MIN_RECOMMENDATIONS: usize = 8;
const MAX_RECOMMENDATIONS: usize = 12;

/// A requested itinerary rule the model did not follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    ItemCount { expected: u64, actual: usize },
    Unscheduled { name: String },
    DayOutOfRange { name: String, day: u32 },
    MissingDays { missing: u64 },
    DayItemCount { day: u32, actual: usize },
    TooFewActivities { day: u32, actual: usize },
    MissingRestaurant { day: u32 },
    RecommendationCount { actual: usize },
    DuplicatePlace { name: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::ItemCount { expected, actual } => {
                write!(f, "expected {expected} itinerary items, got {actual}")
            }
            Violation::Unscheduled { name } => write!(f, "`{name}` has no day"),
            Violation::DayOutOfRange { name, day } => {
                write!(f, "`{name}` is scheduled on day {day}, outside the trip")
            }
            Violation::MissingDays { missing } => {
                write!(f, "{missing} day(s) of the trip have no items")
            }
            Violation::DayItemCount { day, actual } => {
                write!(f, "day {day} has {actual} items instead of {ITEMS_PER_DAY}")
            }
            Violation::TooFewActivities { day, actual } => write!(
                f,
                "day {day} has {actual} activities, at least {MIN_ACTIVITIES_PER_DAY} requested"
            ),
            Violation::MissingRestaurant { day } => write!(f, "day {day} has no restaurant"),
            Violation::RecommendationCount { actual } => write!(
                f,
                "{actual} recommendations returned, {MIN_RECOMMENDATIONS}-{MAX_RECOMMENDATIONS} requested"
            ),
            Violation::DuplicatePlace { name } => {
                write!(f, "`{name}` appears in both itinerary and recommendations")
            }
        }
    }
}

#[derive(Default)]
struct DayTally {
    items: usize,
    activities: usize,
    restaurants: usize,
}

impl ItineraryResult {
    /// Check the decoded result against the rules the prompt asks the model to follow.
    ///
    /// Purely diagnostic: the result is neither modified nor rejected. Radius and
    /// place existence cannot be checked locally and are not reported. Work is
    /// bounded by the size of the reply, not by the requested trip length.
    pub fn audit(&self, preferences: &TripPreferences) -> Vec<Violation> {
        let mut violations = Vec::new();
        let stay_length = preferences.stay_length;
        let itinerary = self.itinerary();

        let expected = preferences.expected_item_count();
        if itinerary.len() as u64 != expected {
            violations.push(Violation::ItemCount {
                expected,
                actual: itinerary.len(),
            });
        }

        let mut days: BTreeMap<u32, DayTally> = BTreeMap::new();
        for item in itinerary {
            let day = match item.day {
                Some(day) if (1..=stay_length).contains(&day) => day,
                Some(day) => {
                    violations.push(Violation::DayOutOfRange {
                        name: item.name.clone(),
                        day,
                    });
                    continue;
                }
                None => {
                    violations.push(Violation::Unscheduled {
                        name: item.name.clone(),
                    });
                    continue;
                }
            };
            let tally = days.entry(day).or_default();
            tally.items += 1;
            if item.is_activity() {
                tally.activities += 1;
            }
            if item.is_restaurant() {
                tally.restaurants += 1;
            }
        }

        let missing = u64::from(stay_length) - days.len() as u64;
        if missing > 0 {
            violations.push(Violation::MissingDays { missing });
        }

        for (day, tally) in &days {
            if tally.items != ITEMS_PER_DAY {
                violations.push(Violation::DayItemCount {
                    day: *day,
                    actual: tally.items,
                });
            }
            if tally.activities < MIN_ACTIVITIES_PER_DAY {
                violations.push(Violation::TooFewActivities {
                    day: *day,
                    actual: tally.activities,
                });
            }
            if tally.restaurants == 0 {
                violations.push(Violation::MissingRestaurant { day: *day });
            }
        }

        let recommendation_count = self.recommendations().len();
        if !(MIN_RECOMMENDATIONS..=MAX_RECOMMENDATIONS).contains(&recommendation_count) {
            violations.push(Violation::RecommendationCount {
                actual: recommendation_count,
            });
        }

        let scheduled: HashSet<String> = itinerary
            .iter()
            .map(|item| normalize_name(&item.name))
            .collect();
        let mut reported = HashSet::new();
        for recommendation in self.recommendations() {
            let key = normalize_name(&recommendation.name);
            if scheduled.contains(&key) && reported.insert(key) {
                violations.push(Violation::DuplicatePlace {
                    name: recommendation.name.clone(),
                });
            }
        }

        violations
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn item(name: &str, day: u32, order: u32, category: &str) -> Value {
        json!({
            "neighborhood": "Loop",
            "name": name,
            "explanation": "",
            "day": day,
            "order": order,
            "category": category
        })
    }

    fn recommendation(name: &str) -> Value {
        json!({
            "neighborhood": "River North",
            "name": name,
            "explanation": "",
            "category": "restaurant"
        })
    }

    fn full_day(day: u32) -> Vec<Value> {
        vec![
            item(&format!("Museum {day}"), day, 1, "activity"),
            item(&format!("Park {day}"), day, 2, "activity"),
            item(&format!("Diner {day}"), day, 3, "restaurant"),
            item(&format!("Tour {day}"), day, 4, "activity"),
        ]
    }

    fn result(itinerary: Vec<Value>, recommendations: Vec<Value>) -> ItineraryResult {
        ItineraryResult::from(json!({
            "itinerary": itinerary,
            "recommendations": recommendations
        }))
    }

    fn alternates(count: usize) -> Vec<Value> {
        (1..=count)
            .map(|i| recommendation(&format!("Alt {i}")))
            .collect()
    }

    fn prefs(days: u32) -> TripPreferences {
        TripPreferences::new(days, "Loop", "Italian", "Moderate", 500.0, "solo", "")
    }

    #[test]
    fn test_compliant_result_has_no_violations() {
        let result = result([full_day(1), full_day(2)].concat(), alternates(10));

        assert!(result.audit(&prefs(2)).is_empty());
    }

    #[test]
    fn test_truncated_itinerary_is_reported() {
        let result = result(full_day(1), alternates(8));

        let violations = result.audit(&prefs(3));
        assert!(violations.contains(&Violation::ItemCount {
            expected: 12,
            actual: 4
        }));
        assert!(violations.contains(&Violation::MissingDays { missing: 2 }));
        assert!(!violations
            .iter()
            .any(|v| matches!(v, Violation::DayItemCount { .. })));
    }

    #[test]
    fn test_huge_stay_length_is_bounded_by_reply() {
        let result = result(full_day(1), alternates(8));

        let violations = result.audit(&prefs(u32::MAX));
        assert!(violations.contains(&Violation::ItemCount {
            expected: u64::from(u32::MAX) * 4,
            actual: 4
        }));
        assert!(violations.contains(&Violation::MissingDays {
            missing: u64::from(u32::MAX) - 1
        }));
    }

    #[test]
    fn test_day_composition_and_range() {
        let mut itinerary = vec![
            item("A", 1, 1, "activity"),
            item("B", 1, 2, "restaurant"),
            item("C", 1, 3, "restaurant"),
            item("D", 1, 4, "shopping"),
        ];
        itinerary.push(item("E", 5, 1, "activity"));
        itinerary.push(json!({"name": "F", "category": "activity"}));

        let result = result(itinerary, alternates(12));

        let violations = result.audit(&prefs(1));
        assert!(violations.contains(&Violation::TooFewActivities { day: 1, actual: 1 }));
        assert!(violations.contains(&Violation::DayOutOfRange {
            name: "E".to_string(),
            day: 5
        }));
        assert!(violations.contains(&Violation::Unscheduled {
            name: "F".to_string()
        }));
        assert!(!violations
            .iter()
            .any(|v| matches!(v, Violation::RecommendationCount { .. })));
    }

    #[test]
    fn test_duplicates_and_recommendation_count() {
        let result = result(
            full_day(1),
            vec![recommendation("diner 1"), recommendation("Diner 1 ")],
        );

        let violations = result.audit(&prefs(1));
        assert_eq!(
            violations
                .iter()
                .filter(|v| matches!(v, Violation::DuplicatePlace { .. }))
                .count(),
            1
        );
        assert!(violations.contains(&Violation::RecommendationCount { actual: 2 }));
        assert!(violations
            .iter()
            .any(|v| v.to_string().contains("both itinerary and recommendations")));
    }
}
