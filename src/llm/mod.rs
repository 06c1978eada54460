pub mod groq;
pub mod huggingface;
pub mod provider;
pub mod types;

pub use groq::GroqProvider;
pub use huggingface::HuggingFaceEmbeddings;
pub use provider::{ChatProvider, EmbeddingProvider};
pub use types::{ChatMessage, ChatRequest};
