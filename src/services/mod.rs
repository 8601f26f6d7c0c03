pub mod openai_client;
pub mod response_handler;

pub use openai_client::{ChatCompletion, ChatCompletionRequest, OpenAIClient};
pub use response_handler::{parse_itinerary_response, strip_code_fences};
