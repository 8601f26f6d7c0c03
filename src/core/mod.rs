pub mod planner;
pub mod prompt;

pub use planner::ItineraryPlanner;
pub use prompt::{build_prompt, SYSTEM_INSTRUCTION};
