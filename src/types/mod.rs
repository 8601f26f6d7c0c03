pub mod audit;
pub mod itinerary;
pub mod preferences;

pub use audit::Violation;
pub use itinerary::{Category, ItineraryItem, ItineraryResult, RecommendationItem};
pub use preferences::{ActivityLevel, TripPreferences, DEFAULT_RADIUS_MILES};
