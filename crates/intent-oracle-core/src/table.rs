//! Read-only embedding vocabulary searched by the crystallizer.
//!
//! An [`EmbeddingTable`] is validated once at construction and never mutated
//! afterwards, so it can be wrapped in an `Arc` and shared by every request.

use serde::Deserialize;

use crate::error::{OracleError, OracleResult};

/// Parallel `words` / `vectors` sequences with a uniform dimension.
///
/// # Invariants
///
/// - `words.len() == vectors.len()`
/// - at least one entry
/// - every vector has the same dimension `D > 0`
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingTable {
    words: Vec<String>,
    vectors: Vec<Vec<f32>>,
    dimension: usize,
}

/// Unvalidated on-disk shape; converted through [`EmbeddingTable::new`].
#[derive(Debug, Deserialize)]
pub(crate) struct RawTable {
    pub words: Vec<String>,
    pub vectors: Vec<Vec<f32>>,
}

impl EmbeddingTable {
    /// Build a table, enforcing all structural invariants.
    ///
    /// # Example
    ///
    /// ```
    /// use intent_oracle_core::EmbeddingTable;
    ///
    /// let table = EmbeddingTable::new(
    ///     vec!["ember".into(), "frost".into()],
    ///     vec![vec![1.0, 0.0], vec![0.0, 1.0]],
    /// )
    /// .unwrap();
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.dimension(), 2);
    /// ```
    pub fn new(words: Vec<String>, vectors: Vec<Vec<f32>>) -> OracleResult<Self> {
        if words.len() != vectors.len() {
            return Err(OracleError::LengthMismatch {
                words: words.len(),
                vectors: vectors.len(),
            });
        }
        let Some(first) = vectors.first() else {
            return Err(OracleError::EmptyTable);
        };
        let dimension = first.len();
        if dimension == 0 {
            return Err(OracleError::InvalidDimension(0));
        }
        if let Some((row, v)) = vectors
            .iter()
            .enumerate()
            .find(|(_, v)| v.len() != dimension)
        {
            return Err(OracleError::RaggedTable {
                row,
                word: words[row].clone(),
                expected: dimension,
                actual: v.len(),
            });
        }

        Ok(Self {
            words,
            vectors,
            dimension,
        })
    }

    /// Build a table from `(word, vector)` pairs.
    pub fn from_entries<I, S>(entries: I) -> OracleResult<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let (words, vectors): (Vec<String>, Vec<Vec<f32>>) = entries
            .into_iter()
            .map(|(w, v)| (w.into(), v))
            .unzip();
        Self::new(words, vectors)
    }

    pub(crate) fn from_raw(raw: RawTable) -> OracleResult<Self> {
        Self::new(raw.words, raw.vectors)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false for a constructed table; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Shared vector dimension `D`.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn vector(&self, index: usize) -> Option<&[f32]> {
        self.vectors.get(index).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_table() {
        let table = EmbeddingTable::from_entries([
            ("ash", vec![1.0, 0.0, 0.0]),
            ("brine", vec![0.0, 1.0, 0.0]),
            ("cinder", vec![0.0, 0.0, 1.0]),
        ])
        .unwrap();

        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());
        assert_eq!(table.dimension(), 3);
        assert_eq!(table.word(1), Some("brine"));
        assert_eq!(table.vector(2), Some(&[0.0, 0.0, 1.0][..]));
        assert_eq!(table.word(3), None);

        assert_eq!(table.words(), ["ash", "brine", "cinder"]);
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = EmbeddingTable::new(vec![], vec![]).unwrap_err();
        assert!(matches!(err, OracleError::EmptyTable));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = EmbeddingTable::new(vec!["a".into(), "b".into()], vec![vec![1.0]]).unwrap_err();
        assert!(matches!(
            err,
            OracleError::LengthMismatch {
                words: 2,
                vectors: 1
            }
        ));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let err = EmbeddingTable::new(vec!["a".into()], vec![vec![]]).unwrap_err();
        assert!(matches!(err, OracleError::InvalidDimension(0)));
    }

    #[test]
    fn test_ragged_rejected() {
        let err = EmbeddingTable::from_entries([
            ("a", vec![1.0, 0.0]),
            ("b", vec![1.0, 0.0]),
            ("c", vec![1.0]),
        ])
        .unwrap_err();

        match err {
            OracleError::RaggedTable {
                row,
                word,
                expected,
                actual,
            } => {
                assert_eq!(row, 2);
                assert_eq!(word, "c");
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_words_allowed() {
        let table =
            EmbeddingTable::from_entries([("echo", vec![1.0]), ("echo", vec![-1.0])]).unwrap();
        assert_eq!(table.len(), 2);
    }
}
