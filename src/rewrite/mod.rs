pub mod client;
pub mod prompt;
pub mod response;

pub use client::{CompletionBackend, GenerationSettings, GroqBackend, RewriteClient};
pub use prompt::build_prompt;
pub use response::parse_completion;
