//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and [`RecursiveChunker`], which
//! splits text hierarchically by paragraph breaks, line breaks, sentence
//! periods, then whitespace, falling back to a hard character cut only when
//! no separator produces a small-enough piece.

/// A strategy for splitting document text into bounded-length chunks.
///
/// Implementations are pure: identical input always yields the identical
/// chunk sequence, and chunking never fails on well-formed input.
pub trait Chunker: Send + Sync {
    /// Split text into an ordered sequence of chunks.
    ///
    /// Returns an empty `Vec` for empty input. Text at or under the size
    /// limit yields exactly one chunk equal to the input.
    fn chunk(&self, text: &str) -> Vec<String>;
}

/// Separator priority: paragraph break, line break, sentence period, whitespace.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ".", " "];

/// Splits text hierarchically with a bounded chunk size and a fixed overlap
/// of shared text between adjacent chunks, so content spanning a cut point
/// remains retrievable from at least one chunk.
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveChunker {
    /// Create a new `RecursiveChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size` — maximum number of characters per chunk
    /// * `chunk_overlap` — number of overlapping characters between consecutive chunks
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self { chunk_size, chunk_overlap }
    }
}

impl Chunker for RecursiveChunker {
    fn chunk(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        if char_len(text) <= self.chunk_size {
            return vec![text.to_string()];
        }
        split_and_merge(text, self.chunk_size, self.chunk_overlap, &SEPARATORS)
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// The last `overlap` characters of `text` (all of it if shorter).
fn overlap_tail(text: &str, overlap: usize) -> String {
    let len = char_len(text);
    let skip = len.saturating_sub(overlap);
    text.chars().skip(skip).collect()
}

/// Split text at a separator while keeping the separator attached to the
/// preceding segment, so no characters are dropped between segments.
fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    let mut result = Vec::new();
    let mut start = 0;

    while let Some(pos) = text[start..].find(separator) {
        let end = start + pos + separator.len();
        result.push(&text[start..end]);
        start = end;
    }

    if start < text.len() {
        result.push(&text[start..]);
    }

    result
}

/// Split text by the highest-priority separator, then merge segments into
/// chunks that respect `chunk_size`, seeding each new chunk with the tail of
/// the previous one. Segments that still exceed `chunk_size` are split
/// further using the next separator in priority order.
fn split_and_merge(
    text: &str,
    chunk_size: usize,
    chunk_overlap: usize,
    separators: &[&str],
) -> Vec<String> {
    if char_len(text) <= chunk_size || separators.is_empty() {
        return split_by_size(text, chunk_size, chunk_overlap);
    }

    let separator = separators[0];
    let remaining_separators = &separators[1..];
    let segments = split_keeping_separator(text, separator);

    let mut chunks = Vec::new();
    let mut current = String::new();

    for segment in segments {
        if current.is_empty() || char_len(&current) + char_len(segment) <= chunk_size {
            current.push_str(segment);
        } else {
            let tail = overlap_tail(&current, chunk_overlap);
            flush(&mut chunks, current, chunk_size, chunk_overlap, remaining_separators);
            current = tail;
            current.push_str(segment);
        }
    }

    if !current.is_empty() {
        flush(&mut chunks, current, chunk_size, chunk_overlap, remaining_separators);
    }

    chunks
}

/// Emit a merged piece, recursing into the next separator level if it still
/// exceeds the size limit.
fn flush(
    chunks: &mut Vec<String>,
    piece: String,
    chunk_size: usize,
    chunk_overlap: usize,
    remaining_separators: &[&str],
) {
    if char_len(&piece) > chunk_size {
        chunks.extend(split_and_merge(&piece, chunk_size, chunk_overlap, remaining_separators));
    } else {
        chunks.push(piece);
    }
}

/// Hard character cut with overlap; the fallback when no separator helps.
/// Cuts are taken at character boundaries.
fn split_by_size(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        let step = chunk_size.saturating_sub(chunk_overlap);
        if step == 0 {
            break;
        }
        start += step;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker() -> RecursiveChunker {
        RecursiveChunker::new(500, 50)
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunker().chunk("").is_empty());
    }

    #[test]
    fn text_under_limit_yields_single_chunk() {
        let text = "A short document about nothing in particular.";
        assert_eq!(chunker().chunk(text), vec![text.to_string()]);
    }

    #[test]
    fn text_at_limit_yields_single_chunk() {
        let text = "x".repeat(500);
        assert_eq!(chunker().chunk(&text), vec![text.clone()]);
    }

    #[test]
    fn unbroken_text_hard_cuts_with_overlap() {
        let text = "a".repeat(1200);
        let chunks = chunker().chunk(&text);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 500);
        assert_eq!(chunks[1].len(), 500);
        assert_eq!(chunks[2].len(), 300);
    }

    #[test]
    fn paragraph_break_preferred_over_hard_cut() {
        let first = "alpha ".repeat(60).trim_end().to_string();
        let second = "omega ".repeat(60).trim_end().to_string();
        let text = format!("{first}\n\n{second}");
        let chunks = chunker().chunk(&text);

        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].ends_with("\n\n"));
        assert!(chunks[1].ends_with(&second));
    }

    #[test]
    fn adjacent_chunks_share_overlap() {
        let first = "alpha ".repeat(60).trim_end().to_string();
        let second = "omega ".repeat(60).trim_end().to_string();
        let text = format!("{first}\n\n{second}");
        let chunks = chunker().chunk(&text);

        let tail: String = overlap_tail(&chunks[0], 50);
        assert!(chunks[1].starts_with(&tail));
    }

    #[test]
    fn sentences_merge_under_limit() {
        let sentence = format!("{}.", "word ".repeat(15).trim_end());
        let text = sentence.repeat(12);
        let chunks = chunker().chunk(&text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 500, "chunk over limit: {}", chunk.len());
        }
    }

    #[test]
    fn overlap_trimmed_chunks_reconstruct_content() {
        let sentence = format!("{}.", "word ".repeat(15).trim_end());
        let text = sentence.repeat(12);
        let chunks = chunker().chunk(&text);
        assert!(chunks.len() > 1);

        let mut reconstructed = chunks[0].clone();
        for chunk in &chunks[1..] {
            let shared = 50.min(chunk.chars().count());
            reconstructed.extend(chunk.chars().skip(shared));
        }
        assert_eq!(reconstructed, text);
    }

    #[test]
    fn chunking_is_deterministic() {
        let text = format!("{}\n\n{}", "lorem ipsum dolor. ".repeat(40), "sit amet. ".repeat(30));
        assert_eq!(chunker().chunk(&text), chunker().chunk(&text));
    }

    #[test]
    fn multibyte_text_cuts_at_char_boundaries() {
        let text = "é".repeat(1200);
        let chunks = chunker().chunk(&text);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chars().count(), 500);
    }
}
