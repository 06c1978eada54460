pub mod core;
#[cfg(feature = "rag")]
pub mod llm;
pub mod rag;
pub mod resolver;
pub mod server;
pub mod state;

#[cfg(all(test, feature = "rag"))]
mod test_support;
