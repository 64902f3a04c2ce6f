pub mod client;
pub mod config;
pub mod console;
pub mod error;
pub mod http;
pub mod models;
pub mod presets;

// Re-export commonly used types
pub use client::{CompletionClient, HttpCompletionClient};
pub use config::Config;
pub use console::{Phase, PromptConsole, PromptForm};
pub use error::{ConsoleError, InvokeError};
pub use models::{ChatType, CompletionPayload, FunctionReply, ModelId, PromptRequest};
pub use presets::{PRESETS, Preset};
