use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    config::PlannerConfig,
    core::prompt::{build_prompt, SYSTEM_INSTRUCTION},
    error::Result,
    services::{
        openai_client::{ChatCompletion, ChatCompletionRequest, OpenAIClient},
        response_handler::parse_itinerary_response,
    },
    types::{ItineraryResult, TripPreferences},
};

/// Generates itineraries from survey answers with one completion call per request.
///
/// Construct once and reuse; the planner holds no per-request state, so
/// concurrent calls from separate tasks are independent.
#[derive(Debug, Clone)]
pub struct ItineraryPlanner {
    backend: Arc<dyn ChatCompletion>,
    config: PlannerConfig,
}

impl ItineraryPlanner {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(api_key, PlannerConfig::default())
    }

    pub fn with_config(api_key: impl Into<String>, config: PlannerConfig) -> Self {
        let mut client = OpenAIClient::new(api_key);
        client.set_base_url(config.base_url.clone());
        Self {
            backend: Arc::new(client),
            config,
        }
    }

    /// Use a caller-supplied completion backend instead of the HTTP client.
    pub fn with_backend(backend: impl ChatCompletion + 'static, config: PlannerConfig) -> Self {
        Self {
            backend: Arc::new(backend),
            config,
        }
    }

    /// Build a planner from `OPENAI_API_KEY` plus [`PlannerConfig::from_env`].
    ///
    /// A missing key is not rejected here; the service answers 401 on first use.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        let config = PlannerConfig::from_env()?;
        Ok(Self::with_config(api_key, config))
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// The exact request [`get_recommendations`](Self::get_recommendations) would send.
    pub fn build_request(&self, preferences: &TripPreferences) -> ChatCompletionRequest {
        ChatCompletionRequest::with_system_and_user(
            self.config.model.clone(),
            SYSTEM_INSTRUCTION,
            &build_prompt(preferences),
        )
        .with_temperature(self.config.temperature)
        .with_max_tokens(Some(self.config.max_tokens))
    }

    /// Ask the model for an itinerary and decode its reply.
    ///
    /// Transport failures are returned as-is. A reply that is not valid JSON
    /// after fence stripping yields [`PlannerError::Parse`](crate::PlannerError::Parse).
    /// Nothing is retried.
    #[instrument(
        skip_all,
        fields(
            stay_length = preferences.stay_length,
            location = %preferences.location,
            model = %self.config.model,
        )
    )]
    pub async fn get_recommendations(
        &self,
        preferences: &TripPreferences,
    ) -> Result<ItineraryResult> {
        let request = self.build_request(preferences);
        let reply = self.backend.complete(&request, self.config.timeout).await?;
        let result = parse_itinerary_response(&reply)?;

        info!(
            itinerary_items = result.itinerary().len(),
            recommendations = result.recommendations().len(),
            "itinerary generated"
        );
        Ok(result)
    }
}
