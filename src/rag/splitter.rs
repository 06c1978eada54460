//! Overlapping fixed-size chunking.
//!
//! Windows are measured in characters. When a window ends inside the text, the
//! cut is moved back to the last paragraph, line, sentence or word break found
//! in the second half of the window.

use super::loader::Document;

const SEPARATORS: [&str; 6] = ["\n\n", "\n", ". ", "! ", "? ", " "];

/// Configuration for the splitter.
#[derive(Debug, Clone)]
pub struct SplitterConfig {
    /// Maximum chunk size in characters
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks
    pub chunk_overlap: usize,
}

/// A text chunk with source information.
#[derive(Debug, Clone, PartialEq)]
pub struct TextChunk {
    pub text: String,
    /// Source identifier (relative corpus path)
    pub source: String,
    /// Character offset in the source document
    pub start_offset: usize,
    /// Chunk index within the source
    pub chunk_index: usize,
}

pub struct TextSplitter {
    config: SplitterConfig,
}

impl TextSplitter {
    pub fn new(config: SplitterConfig) -> Self {
        Self { config }
    }

    pub fn split_documents(&self, documents: &[Document]) -> Vec<TextChunk> {
        documents
            .iter()
            .flat_map(|doc| self.split_text(&doc.content, &doc.source))
            .collect()
    }

    /// Split text into overlapping chunks.
    pub fn split_text(&self, text: &str, source: &str) -> Vec<TextChunk> {
        let chunk_size = self.config.chunk_size.max(1);
        let overlap = self.config.chunk_overlap.min(chunk_size - 1);

        let chars: Vec<char> = text.chars().collect();
        let total_chars = chars.len();
        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            while start < total_chars && chars[start].is_whitespace() {
                start += 1;
            }
            if start >= total_chars {
                break;
            }

            let window_end = (start + chunk_size).min(total_chars);
            let end = if window_end < total_chars {
                find_break(&chars[start..window_end])
                    .map(|offset| start + offset)
                    .unwrap_or(window_end)
            } else {
                window_end
            };

            let piece: String = chars[start..end].iter().collect();
            let trimmed = piece.trim_end();
            if !trimmed.is_empty() {
                chunks.push(TextChunk {
                    text: trimmed.to_string(),
                    source: source.to_string(),
                    start_offset: start,
                    chunk_index: chunks.len(),
                });
            }

            if end >= total_chars {
                break;
            }

            let next = end.saturating_sub(overlap);
            start = if next > start { next } else { end };
        }

        chunks
    }
}

/// Offset just past the preferred break in `window`, searching its second half.
fn find_break(window: &[char]) -> Option<usize> {
    let min_pos = window.len() / 2;

    for separator in SEPARATORS {
        let sep: Vec<char> = separator.chars().collect();
        if sep.len() > window.len() {
            continue;
        }
        let last_start = window.len() - sep.len();
        if let Some(pos) = (min_pos..=last_start)
            .rev()
            .find(|&i| window[i..i + sep.len()] == sep[..])
        {
            return Some(pos + sep.len());
        }
    }

    None
}
