use serde_json::Value;
use tracing::{debug, error};

use crate::{
    error::{PlannerError, Result},
    types::ItineraryResult,
};

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Remove markdown code fences a model may wrap around its JSON reply.
///
/// Handles a leading ```` ```json ```` or bare ```` ``` ```` fence and a trailing
/// ```` ``` ```` fence independently, so a reply with only one of them is still
/// cleaned. Surrounding whitespace is trimmed.
pub fn strip_code_fences(reply: &str) -> &str {
    let mut content = reply.trim();

    if let Some(rest) = content.strip_prefix(JSON_FENCE) {
        content = rest;
    } else if let Some(rest) = content.strip_prefix(FENCE) {
        content = rest;
    }

    if let Some(rest) = content.strip_suffix(FENCE) {
        content = rest;
    }

    content.trim()
}

/// Decode a raw model reply into an [`ItineraryResult`].
///
/// Any syntactically valid JSON is accepted as-is; only a reply that is not
/// JSON after fence stripping fails. There is no partial recovery.
pub fn parse_itinerary_response(reply: &str) -> Result<ItineraryResult> {
    match serde_json::from_str::<Value>(strip_code_fences(reply)) {
        Ok(value) => {
            let result = ItineraryResult::from(value);
            debug!(
                target: "chicago_planner::itinerary",
                itinerary_items = result.itinerary().len(),
                recommendations = result.recommendations().len(),
                itinerary = %serde_json::to_string_pretty(result.as_value()).unwrap_or_default(),
                "parsed itinerary"
            );
            Ok(result)
        }
        Err(err) => {
            let message = err.to_string();
            error!(
                target: "chicago_planner::itinerary",
                error = %message,
                raw = %reply,
                "could not parse model reply as JSON"
            );
            Err(PlannerError::Parse {
                message,
                raw: reply.to_string(),
            })
        }
    }
}
