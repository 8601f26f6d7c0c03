use crate::types::TripPreferences;

/// System message sent alongside every itinerary prompt.
pub const SYSTEM_INSTRUCTION: &str =
    "You are a JSON-only response generator. Do not include any text outside the JSON object.";

/// Build the itinerary prompt for a set of survey answers.
///
/// Every field is interpolated verbatim. The day and item counts are repeated
/// in several rules because models tend to stop after the first day otherwise.
pub fn build_prompt(preferences: &TripPreferences) -> String {
    let TripPreferences {
        stay_length,
        location,
        favorite_cuisine,
        activity_level,
        budget,
        social_context,
        dislikes,
        radius,
    } = preferences;
    let total_items = preferences.expected_item_count();

    format!(
        r#"You are an expert Chicago travel planner. Build a personalized, day-by-day itinerary for a visitor based strictly on their survey preferences below.

USER SURVEY:
- Trip length: {stay_length} days
- Staying in: {location}, Chicago  ← BASE LOCATION. Prioritize places here and in immediately adjacent neighborhoods.
- Search radius: {radius} miles from {location}. All itinerary items MUST be within {radius} miles of {location}.
- Favorite cuisine: {favorite_cuisine}
- Activity level: {activity_level}  (Low = relaxed/seated, Moderate = some walking, High = physically active)
- Budget: ${budget}
- Travelling with: {social_context}
- Wants to avoid: {dislikes}

RULES:
1. Only recommend places that genuinely exist in Chicago. Do not make up places.
2. The user is staying in {location}. Every recommended place MUST be within {radius} miles of {location}. Do not suggest places outside this radius.
3. You MUST generate exactly {stay_length} days of activities. Each day MUST have exactly 4 items: at least 2 activities/attractions AND at least 1 restaurant. That means {total_items} total itinerary items with "day" values from 1 to {stay_length}. Do NOT stop at Day 1.
4. Match recommendations to the user's cuisine preference, activity level, budget, and social context.
5. Add 8-12 alternative places (not used in the itinerary) into recommendations for the user to swap in, also within {radius} miles of {location}.
6. Never repeat a place between itinerary and recommendations.
7. CRITICAL: The itinerary array MUST contain items for ALL {stay_length} days. If the trip is 3 days, return 12 items (4 for day 1, 4 for day 2, 4 for day 3). Stopping early is unacceptable.
8. Output MUST be valid JSON in exactly this format — no extra text:

{{
    "itinerary": [
        {{
            "neighborhood": "Lincoln Park",
            "name": "Lincoln Park Zoo",
            "explanation": "Free admission makes it perfect for your budget, and the outdoor walks suit your moderate activity level.",
            "day": 1,
            "order": 1,
            "category": "activity"
        }}
    ],
    "recommendations": [
        {{
            "neighborhood": "River North",
            "name": "Frontera Grill",
            "explanation": "Award-winning Mexican cuisine that matches your taste preference.",
            "category": "restaurant"
        }}
    ]
}}"#
    )
}
