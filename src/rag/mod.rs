//! RAG (Retrieval-Augmented Generation) module.
//!
//! This module provides:
//! - `QueryPipeline` / `PipelineFactory`: the seam the resolver memoizes behind
//! - `load_documents` / `TextSplitter`: corpus loading and overlapping chunking
//! - `VectorIndex`: in-memory cosine similarity search over chunk embeddings
//! - `RagPipeline`: retrieval + prompt-stuffed generation
//! - `RagPipelineBuilder`: assembles a pipeline from configuration
//!
//! Everything except the traits is compiled only with the `rag` feature.

mod provider;

#[cfg(feature = "rag")]
mod builder;
#[cfg(feature = "rag")]
mod index;
#[cfg(feature = "rag")]
mod loader;
#[cfg(feature = "rag")]
mod pipeline;
#[cfg(feature = "rag")]
mod prompt;
#[cfg(feature = "rag")]
mod splitter;

pub use provider::{PipelineFactory, QueryPipeline};

#[cfg(feature = "rag")]
pub use builder::RagPipelineBuilder;
#[cfg(feature = "rag")]
pub use index::{ScoredChunk, VectorIndex};
#[cfg(feature = "rag")]
pub use loader::{load_documents, Document};
#[cfg(feature = "rag")]
pub use pipeline::RagPipeline;
#[cfg(feature = "rag")]
pub use prompt::{stuff_documents, PromptTemplate, INSUFFICIENT_CONTEXT_REPLY};
#[cfg(feature = "rag")]
pub use splitter::{SplitterConfig, TextChunk, TextSplitter};
