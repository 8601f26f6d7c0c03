use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

const ITINERARY_KEYS: [&str; 6] = ["neighborhood", "name", "explanation", "day", "order", "category"];
const RECOMMENDATION_KEYS: [&str; 4] = ["neighborhood", "name", "explanation", "category"];

/// Kind of place suggested by the model.
///
/// The model is asked for `"activity"` or `"restaurant"`; any other label is
/// kept as-is rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Activity,
    Restaurant,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Activity => "activity",
            Category::Restaurant => "restaurant",
            Category::Other(label) => label,
        }
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        match label.as_str() {
            "activity" => Category::Activity,
            "restaurant" => Category::Restaurant,
            _ => Category::Other(label),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A place scheduled on a specific day of the trip.
///
/// Built leniently from whatever the model returned: absent or oddly typed
/// fields become empty strings or `None`, unknown keys land in `extra`.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryItem {
    pub neighborhood: String,
    pub name: String,
    /// Why this place fits the survey answers
    pub explanation: String,
    /// 1-based day of the trip
    pub day: Option<u32>,
    /// Position within the day
    pub order: Option<u32>,
    pub category: Option<Category>,
    pub extra: Map<String, Value>,
}

impl ItineraryItem {
    fn from_value(value: &Value) -> Self {
        let fields = Fields::of(value);
        Self {
            neighborhood: fields.text("neighborhood"),
            name: fields.text("name"),
            explanation: fields.text("explanation"),
            day: fields.position("day"),
            order: fields.position("order"),
            category: fields.category("category"),
            extra: fields.extra(&ITINERARY_KEYS),
        }
    }

    pub fn is_activity(&self) -> bool {
        matches!(self.category, Some(Category::Activity))
    }

    pub fn is_restaurant(&self) -> bool {
        matches!(self.category, Some(Category::Restaurant))
    }
}

/// An unscheduled alternate the visitor can swap into the itinerary.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationItem {
    pub neighborhood: String,
    pub name: String,
    pub explanation: String,
    pub category: Option<Category>,
    pub extra: Map<String, Value>,
}

impl RecommendationItem {
    fn from_value(value: &Value) -> Self {
        let fields = Fields::of(value);
        Self {
            neighborhood: fields.text("neighborhood"),
            name: fields.text("name"),
            explanation: fields.text("explanation"),
            category: fields.category("category"),
            extra: fields.extra(&RECOMMENDATION_KEYS),
        }
    }
}

/// Decoded model reply: the day-by-day plan plus alternates.
///
/// Any JSON value is accepted. The reply is kept exactly as decoded and is what
/// serialization writes back out; `itinerary()` and `recommendations()` are a
/// typed view over it with one entry per array element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct ItineraryResult {
    itinerary: Vec<ItineraryItem>,
    recommendations: Vec<RecommendationItem>,
    raw: Value,
}

impl ItineraryResult {
    pub fn itinerary(&self) -> &[ItineraryItem] {
        &self.itinerary
    }

    pub fn recommendations(&self) -> &[RecommendationItem] {
        &self.recommendations
    }

    /// The reply exactly as the model produced it.
    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    pub fn into_value(self) -> Value {
        self.raw
    }

    /// Itinerary items scheduled on `day`, in the order the model returned them.
    pub fn items_for_day(&self, day: u32) -> impl Iterator<Item = &ItineraryItem> {
        self.itinerary
            .iter()
            .filter(move |item| item.day == Some(day))
    }
}

impl From<Value> for ItineraryResult {
    fn from(raw: Value) -> Self {
        let itinerary = array_at(&raw, "itinerary")
            .map(ItineraryItem::from_value)
            .collect();
        let recommendations = array_at(&raw, "recommendations")
            .map(RecommendationItem::from_value)
            .collect();

        Self {
            itinerary,
            recommendations,
            raw,
        }
    }
}

impl From<ItineraryResult> for Value {
    fn from(result: ItineraryResult) -> Self {
        result.raw
    }
}

fn array_at<'a>(raw: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    raw.get(key).and_then(Value::as_array).into_iter().flatten()
}

struct Fields<'a>(Option<&'a Map<String, Value>>);

impl<'a> Fields<'a> {
    fn of(value: &'a Value) -> Self {
        Self(value.as_object())
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.and_then(|object| object.get(key))
    }

    fn text(&self, key: &str) -> String {
        self.get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default()
    }

    // Models occasionally quote numbers ("day": "2").
    fn position(&self, key: &str) -> Option<u32> {
        match self.get(key)? {
            Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    fn category(&self, key: &str) -> Option<Category> {
        self.get(key)
            .and_then(Value::as_str)
            .map(|label| Category::from(label.to_string()))
    }

    fn extra(&self, known: &[&str]) -> Map<String, Value> {
        self.0
            .into_iter()
            .flatten()
            .filter(|(key, _)| !known.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_category_is_kept() {
        assert_eq!(Category::from("restaurant".to_string()), Category::Restaurant);
        let unknown = Category::from("attraction".to_string());
        assert_eq!(unknown, Category::Other("attraction".to_string()));
        assert_eq!(unknown.to_string(), "attraction");
    }

    #[test]
    fn test_missing_and_misshapen_fields_are_tolerated() {
        let result = ItineraryResult::from(json!({
            "itinerary": [
                {"name": "Art Institute of Chicago", "day": "2", "category": "activity"},
                {"name": "Navy Pier", "day": "one", "order": -1},
                "Lou Malnati's"
            ],
            "recommendations": [{"name": "Frontera Grill"}]
        }));

        let items = result.itinerary();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].day, Some(2));
        assert_eq!(items[0].order, None);
        assert!(items[0].explanation.is_empty());
        assert!(items[0].is_activity());
        assert_eq!(items[1].day, None);
        assert_eq!(items[1].order, None);
        assert_eq!(items[1].category, None);
        assert!(items[2].name.is_empty());
        assert_eq!(result.recommendations()[0].name, "Frontera Grill");
    }

    #[test]
    fn test_extra_fields_survive_serialization() {
        let reply = json!({
            "itinerary": [{
                "neighborhood": "Loop",
                "name": "The Gage",
                "explanation": "Gastropub on Michigan Ave.",
                "day": 1,
                "order": 3,
                "category": "restaurant",
                "address": "24 S Michigan Ave",
                "price": "$$"
            }],
            "recommendations": [],
            "notes": "Bring a jacket."
        });

        let result: ItineraryResult = serde_json::from_value(reply.clone()).unwrap();
        let item = &result.itinerary()[0];
        assert_eq!(item.extra["address"], "24 S Michigan Ave");
        assert_eq!(item.extra["price"], "$$");
        assert!(!item.extra.contains_key("name"));
        assert_eq!(serde_json::to_value(&result).unwrap(), reply);
    }

    #[test]
    fn test_non_object_reply_is_kept_verbatim() {
        let result = ItineraryResult::from(json!(["Millennium Park", "Navy Pier"]));
        assert!(result.itinerary().is_empty());
        assert!(result.recommendations().is_empty());
        assert_eq!(result.into_value(), json!(["Millennium Park", "Navy Pier"]));
    }

    #[test]
    fn test_items_for_day() {
        let result = ItineraryResult::from(json!({
            "itinerary": [
                {"neighborhood": "Loop", "name": "Millennium Park", "explanation": "", "day": 1, "order": 1, "category": "activity"},
                {"neighborhood": "Loop", "name": "Willis Tower", "explanation": "", "day": 2, "order": 1, "category": "activity"},
                {"neighborhood": "Loop", "name": "The Gage", "explanation": "", "day": 1, "order": 2, "category": "restaurant"}
            ],
            "recommendations": []
        }));

        let day_one: Vec<&str> = result.items_for_day(1).map(|i| i.name.as_str()).collect();
        assert_eq!(day_one, vec!["Millennium Park", "The Gage"]);
    }
}
