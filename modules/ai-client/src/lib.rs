mod openai;
mod traits;

pub use openai::OpenAi;
pub use traits::{ChatAgent, EmbedAgent};
