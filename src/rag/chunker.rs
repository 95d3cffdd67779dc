//! Fixed-window text chunking.
//!
//! Windows are `chunk_size` characters long and start every
//! `chunk_size - chunk_overlap` characters, so consecutive chunks share
//! `chunk_overlap` characters. Lengths and offsets count Unicode scalar
//! values, never bytes, so a window never splits a character.

use crate::types::{AppError, DocumentChunk, Result};
use std::iter;

pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    /// Create a chunker.
    ///
    /// # Errors
    ///
    /// `chunk_size` must be non-zero and larger than `chunk_overlap`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 || chunk_overlap >= chunk_size {
            return Err(AppError::Configuration(format!(
                "invalid chunking window: size {} overlap {}",
                chunk_size, chunk_overlap
            )));
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Distance between the starts of consecutive windows.
    pub fn step(&self) -> usize {
        self.chunk_size - self.chunk_overlap
    }

    /// Split `text` into overlapping windows attributed to `source`.
    ///
    /// Newlines inside a window become spaces. The last window may be shorter
    /// than `chunk_size`; empty text yields no chunks.
    pub fn chunk(&self, text: &str, source: &str, document_hash: &str) -> Vec<DocumentChunk> {
        // Byte position of every char start, plus the end of the text
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(iter::once(text.len()))
            .collect();
        let char_count = bounds.len() - 1;

        (0..char_count)
            .step_by(self.step())
            .map(|offset| {
                let end = (offset + self.chunk_size).min(char_count);
                DocumentChunk {
                    id: format!("{}_{}", source, offset),
                    text: text[bounds[offset]..bounds[end]].replace('\n', " "),
                    source: source.to_string(),
                    document_hash: document_hash.to_string(),
                }
            })
            .collect()
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_text(len: usize) -> String {
        (0..len)
            .map(|i| char::from(b'a' + (i % 26) as u8))
            .collect()
    }

    #[test]
    fn test_rejects_bad_window() {
        assert!(TextChunker::new(0, 0).is_err());
        assert!(TextChunker::new(100, 100).is_err());
        assert!(TextChunker::new(100, 150).is_err());
        assert!(TextChunker::new(100, 99).is_ok());
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(TextChunker::default().chunk("", "a.pdf", "").is_empty());
    }

    #[rstest]
    #[case(1, 1)]
    #[case(799, 1)]
    #[case(800, 1)]
    #[case(801, 2)]
    #[case(1000, 2)]
    #[case(1600, 2)]
    #[case(1601, 3)]
    #[case(4000, 5)]
    fn test_chunk_count_is_ceil_len_over_step(#[case] len: usize, #[case] expected: usize) {
        let chunks = TextChunker::default().chunk(&sample_text(len), "doc.pdf", "");
        assert_eq!(chunks.len(), expected);
        assert_eq!(expected, len.div_ceil(800));
    }

    #[test]
    fn test_offsets_and_ids() {
        let chunks = TextChunker::default().chunk(&sample_text(1600), "notes.pdf", "abc");

        assert_eq!(chunks[0].id, "notes.pdf_0");
        assert_eq!(chunks[1].id, "notes.pdf_800");
        assert_eq!(chunks[0].text.chars().count(), 1000);
        // Final window runs past the end and is kept short
        assert_eq!(chunks[1].text.chars().count(), 800);
        assert!(chunks.iter().all(|c| c.source == "notes.pdf"));
        assert!(chunks.iter().all(|c| c.document_hash == "abc"));
    }

    #[test]
    fn test_consecutive_chunks_overlap() {
        let text = sample_text(2500);
        let chunks = TextChunker::default().chunk(&text, "a.pdf", "");

        for pair in chunks.windows(2) {
            let tail: String = pair[0].text.chars().skip(800).collect();
            let head: String = pair[1].text.chars().take(tail.chars().count()).collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn test_non_overlapping_prefixes_reconstruct_text() {
        let text = sample_text(3333);
        let chunker = TextChunker::default();
        let rebuilt: String = chunker
            .chunk(&text, "a.pdf", "")
            .iter()
            .flat_map(|c| c.text.chars().take(chunker.step()))
            .collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_newlines_become_spaces() {
        let chunker = TextChunker::new(10, 2).unwrap();
        let chunks = chunker.chunk("line one\nline two\n", "a.pdf", "");
        assert_eq!(chunks[0].text, "line one l");
        assert!(chunks.iter().all(|c| !c.text.contains('\n')));
    }

    #[test]
    fn test_multibyte_characters_are_not_split() {
        let text = "é".repeat(25);
        let chunker = TextChunker::new(10, 3).unwrap();
        let chunks = chunker.chunk(&text, "ü.pdf", "");

        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0].text, "é".repeat(10));
        assert_eq!(chunks[3].id, "ü.pdf_21");
        assert_eq!(chunks[3].text, "é".repeat(4));
    }
}
