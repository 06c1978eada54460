//! In-memory cosine similarity index over chunk embeddings.

use std::cmp::Ordering;

use ndarray::{Array1, Array2, ArrayView1};

use super::splitter::TextChunk;
use crate::core::errors::PipelineError;

/// A chunk with its similarity to the query (higher = better).
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: TextChunk,
    pub score: f32,
}

/// Rows are L2-normalized so a single matrix-vector product yields cosine scores.
pub struct VectorIndex {
    chunks: Vec<TextChunk>,
    matrix: Array2<f32>,
}

impl VectorIndex {
    pub fn build(chunks: Vec<TextChunk>, embeddings: Vec<Vec<f32>>) -> Result<Self, PipelineError> {
        if chunks.len() != embeddings.len() {
            return Err(PipelineError::Index(format!(
                "{} chunks but {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }
        let dimension = match embeddings.first() {
            Some(first) if !first.is_empty() => first.len(),
            Some(_) => return Err(PipelineError::Index("embeddings are empty".to_string())),
            None => return Err(PipelineError::Index("no chunks to index".to_string())),
        };

        let mut flat = Vec::with_capacity(embeddings.len() * dimension);
        for (row, embedding) in embeddings.iter().enumerate() {
            if embedding.len() != dimension {
                return Err(PipelineError::Index(format!(
                    "embedding {} has dimension {}, expected {}",
                    row,
                    embedding.len(),
                    dimension
                )));
            }
            flat.extend(normalized(embedding).iter());
        }

        let matrix = Array2::from_shape_vec((embeddings.len(), dimension), flat)
            .map_err(|e| PipelineError::Index(e.to_string()))?;

        Ok(Self { chunks, matrix })
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn dimension(&self) -> usize {
        self.matrix.ncols()
    }

    /// Top-`k` chunks by cosine similarity to `query`, best first.
    pub fn similarity_search(
        &self,
        query: &[f32],
        k: usize,
    ) -> Result<Vec<ScoredChunk>, PipelineError> {
        if query.len() != self.dimension() {
            return Err(PipelineError::Index(format!(
                "query dimension {} != index dimension {}",
                query.len(),
                self.dimension()
            )));
        }

        let scores = self.matrix.dot(&normalized(query));
        let mut ranked: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
        ranked.sort_by(|left, right| right.1.partial_cmp(&left.1).unwrap_or(Ordering::Equal));
        ranked.truncate(k);

        Ok(ranked
            .into_iter()
            .map(|(idx, score)| ScoredChunk {
                chunk: self.chunks[idx].clone(),
                score,
            })
            .collect())
    }
}

fn normalized(values: &[f32]) -> Array1<f32> {
    let view = ArrayView1::from(values);
    let norm = view.dot(&view).sqrt();
    if norm <= f32::EPSILON {
        return Array1::zeros(values.len());
    }
    view.mapv(|v| v / norm)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str) -> TextChunk {
        TextChunk {
            text: text.to_string(),
            source: "test.md".to_string(),
            start_offset: 0,
            chunk_index: 0,
        }
    }

    fn approx_eq(left: f32, right: f32) -> bool {
        (left - right).abs() < 1e-5
    }

    fn sample_index() -> VectorIndex {
        VectorIndex::build(
            vec![chunk("a"), chunk("b"), chunk("c")],
            vec![vec![0.8, 0.2], vec![0.1, 0.9], vec![0.9, 0.0]],
        )
        .unwrap()
    }

    #[test]
    fn ranking_returns_highest_similarity_first() {
        let hits = sample_index().similarity_search(&[1.0, 0.0], 3).unwrap();

        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].chunk.text, "c");
        assert!(approx_eq(hits[0].score, 1.0));
        assert_eq!(hits[2].chunk.text, "b");
    }

    #[test]
    fn search_truncates_to_k() {
        let hits = sample_index().similarity_search(&[0.0, 1.0], 1).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].chunk.text, "b");
    }

    #[test]
    fn scale_does_not_change_cosine() {
        let index = sample_index();
        let small = index.similarity_search(&[1.0, 1.0], 3).unwrap();
        let large = index.similarity_search(&[50.0, 50.0], 3).unwrap();

        for (s, l) in small.iter().zip(large.iter()) {
            assert_eq!(s.chunk.text, l.chunk.text);
            assert!(approx_eq(s.score, l.score));
        }
    }

    #[test]
    fn zero_query_scores_zero() {
        let hits = sample_index().similarity_search(&[0.0, 0.0], 3).unwrap();
        assert!(hits.iter().all(|h| approx_eq(h.score, 0.0)));
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        assert!(sample_index().similarity_search(&[1.0, 0.0, 0.0], 3).is_err());
        assert!(VectorIndex::build(
            vec![chunk("a"), chunk("b")],
            vec![vec![1.0, 0.0], vec![1.0]],
        )
        .is_err());
    }

    #[test]
    fn count_mismatch_and_empty_are_rejected() {
        assert!(VectorIndex::build(vec![chunk("a")], vec![]).is_err());
        assert!(VectorIndex::build(vec![], vec![]).is_err());
    }
}
