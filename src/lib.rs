//! chicago-planner: survey-driven Chicago itineraries from an LLM chat-completions API
//!
//! Survey answers are rendered into a single prompt, sent in one completion
//! request, and the reply is decoded into a typed [`ItineraryResult`]. Replies
//! wrapped in markdown code fences are accepted; anything that still fails to
//! decode is reported as [`PlannerError::Parse`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chicago_planner::{ItineraryPlanner, TripPreferences};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let planner = ItineraryPlanner::from_env()?;
//!     let preferences =
//!         TripPreferences::new(2, "River North", "Italian", "Moderate", 800.0, "couple", "")
//!             .with_radius(3.0);
//!
//!     let result = planner.get_recommendations(&preferences).await?;
//!     for item in result.itinerary() {
//!         let day = item.day.unwrap_or_default();
//!         println!("Day {day} #{}: {}", item.order.unwrap_or_default(), item.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod types;

pub use config::PlannerConfig;
pub use core::{build_prompt, ItineraryPlanner, SYSTEM_INSTRUCTION};
pub use error::{PlannerError, Result};
pub use services::{
    parse_itinerary_response, strip_code_fences, ChatCompletion, ChatCompletionRequest,
    OpenAIClient,
};
pub use types::{
    ActivityLevel, Category, ItineraryItem, ItineraryResult, RecommendationItem,
    TripPreferences, Violation, DEFAULT_RADIUS_MILES,
};

#[cfg(feature = "cli")]
pub mod cli;
