pub mod analysis;
pub mod llm;
pub mod messages;
pub mod suggestions;
pub mod supervisor;
pub mod traits;
