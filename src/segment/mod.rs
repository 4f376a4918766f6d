//! Structure-preserving message segmentation.
//!
//! Splits a long reply into chunks at the most natural boundary
//! available, in priority order:
//!
//! 1. Paragraphs (blank-line separated units, segmented independently)
//! 2. List items (never split mid-item unless one item alone is oversized)
//! 3. Code fences (kept intact when they fit, else split by whole lines)
//! 4. Sentence boundaries (`.`, `!`, `?` followed by whitespace)
//! 5. Word boundaries
//!
//! A single word or code line longer than the limit becomes its own
//! oversized chunk; mid-token splits never happen. Sizes are measured in
//! grapheme clusters (see [`crate::text`]).

mod classify;

pub use classify::classify;

use crate::core::{Chunk, ContentType};
use crate::text::{grapheme_count, split_sentences};
use classify::{FENCE, list_item_pattern};
use tracing::debug;

/// Intermediate chunk text with its classification, before indexing.
type Piece = (String, ContentType);

/// Segments a message into delivery-ready chunks.
///
/// Short messages (at most `max_chunk_size` graphemes after trimming)
/// come back as a single trimmed chunk with no further inspection; empty
/// or whitespace-only messages come back unchanged. The caller is
/// expected to have validated the configuration (`max_chunk_size > 0`).
///
/// With `preserve_formatting` off, paragraph/list/code structure is
/// ignored: the whole message is classified once and split by sentences
/// and words.
///
/// # Arguments
///
/// * `message` - The full reply text.
/// * `max_chunk_size` - Maximum chunk size in grapheme clusters.
/// * `preserve_formatting` - Whether to respect message structure.
///
/// # Examples
///
/// ```
/// use cadence_rs::segment::segment_message;
///
/// let chunks = segment_message("short reply", 280, true);
/// assert_eq!(chunks.len(), 1);
/// assert_eq!(chunks[0].text, "short reply");
/// ```
#[must_use]
pub fn segment_message(message: &str, max_chunk_size: usize, preserve_formatting: bool) -> Vec<Chunk> {
    let trimmed = message.trim();

    // Nothing worth segmenting: hand back the input untouched
    if trimmed.is_empty() {
        return vec![Chunk::new(message.to_string(), 0, ContentType::Text)];
    }

    // Fits in one message: a length check is all the work we do
    if grapheme_count(trimmed) <= max_chunk_size {
        return vec![Chunk::new(trimmed.to_string(), 0, ContentType::Text)];
    }

    let mut pieces: Vec<Piece> = Vec::new();
    if preserve_formatting {
        for unit in trimmed.split("\n\n") {
            let unit = unit.trim();
            if unit.is_empty() {
                continue;
            }
            split_unit(unit, max_chunk_size, &mut pieces);
        }
    } else {
        split_prose(trimmed, max_chunk_size, classify(trimmed), &mut pieces);
    }

    let chunks: Vec<Chunk> = pieces
        .into_iter()
        .filter(|(text, _)| !text.trim().is_empty())
        .enumerate()
        .map(|(index, (text, content_type))| Chunk::new(text, index, content_type))
        .collect();

    debug!(
        chunks = chunks.len(),
        max_chunk_size, "segmented message for delivery"
    );
    chunks
}

/// Splits one blank-line-separated unit, choosing a splitter by content.
fn split_unit(unit: &str, max: usize, out: &mut Vec<Piece>) {
    let content_type = classify(unit);

    if grapheme_count(unit) <= max {
        out.push((unit.to_string(), content_type));
        return;
    }

    // Fenced code gets line-preserving treatment; inline-code prose
    // reads like prose and splits like it (still paced as code)
    if unit.contains(FENCE) {
        split_code_unit(unit, max, out);
        return;
    }

    match content_type {
        ContentType::List => split_list_unit(unit, max, out),
        other => split_prose(unit, max, other, out),
    }
}

/// Splits prose at sentence boundaries, packing sentences greedily.
///
/// An oversized sentence falls back to word packing; an oversized word
/// becomes its own chunk.
fn split_prose(text: &str, max: usize, content_type: ContentType, out: &mut Vec<Piece>) {
    let mut buffer = String::new();
    let mut buffer_len = 0usize;

    for sentence in split_sentences(text) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        let len = grapheme_count(sentence);

        if len > max {
            flush(&mut buffer, &mut buffer_len, content_type, out);
            split_words(sentence, max, content_type, out);
            continue;
        }

        if buffer.is_empty() {
            buffer.push_str(sentence);
            buffer_len = len;
        } else if buffer_len + 1 + len <= max {
            buffer.push(' ');
            buffer.push_str(sentence);
            buffer_len += 1 + len;
        } else {
            flush(&mut buffer, &mut buffer_len, content_type, out);
            buffer.push_str(sentence);
            buffer_len = len;
        }
    }

    flush(&mut buffer, &mut buffer_len, content_type, out);
}

/// Packs whitespace-separated words; an oversized word stands alone.
fn split_words(text: &str, max: usize, content_type: ContentType, out: &mut Vec<Piece>) {
    let mut buffer = String::new();
    let mut buffer_len = 0usize;

    for word in text.split_whitespace() {
        let len = grapheme_count(word);

        if len > max {
            flush(&mut buffer, &mut buffer_len, content_type, out);
            out.push((word.to_string(), content_type));
            continue;
        }

        if buffer.is_empty() {
            buffer.push_str(word);
            buffer_len = len;
        } else if buffer_len + 1 + len <= max {
            buffer.push(' ');
            buffer.push_str(word);
            buffer_len += 1 + len;
        } else {
            flush(&mut buffer, &mut buffer_len, content_type, out);
            buffer.push_str(word);
            buffer_len = len;
        }
    }

    flush(&mut buffer, &mut buffer_len, content_type, out);
}

/// Splits a unit containing a fenced block.
///
/// The fence is preserved intact when it fits; otherwise it is split by
/// whole lines. Surrounding prose inside the same unit keeps the code
/// classification for pacing.
fn split_code_unit(unit: &str, max: usize, out: &mut Vec<Piece>) {
    let Some(open) = unit.find(FENCE) else {
        split_code_lines(unit, max, out);
        return;
    };
    let Some(rel_close) = unit[open + FENCE.len()..].find(FENCE) else {
        // Unclosed fence: treat the whole unit as code lines
        split_code_lines(unit, max, out);
        return;
    };
    let close = open + FENCE.len() + rel_close + FENCE.len();

    let before = unit[..open].trim();
    if !before.is_empty() {
        split_prose(before, max, ContentType::Code, out);
    }

    let block = &unit[open..close];
    if grapheme_count(block) <= max {
        out.push((block.to_string(), ContentType::Code));
    } else {
        split_code_lines(block, max, out);
    }

    let after = unit[close..].trim();
    if !after.is_empty() {
        if after.contains(FENCE) {
            split_code_unit(after, max, out);
        } else {
            split_prose(after, max, ContentType::Code, out);
        }
    }
}

/// Packs whole lines of code; a line longer than the limit stands alone.
fn split_code_lines(text: &str, max: usize, out: &mut Vec<Piece>) {
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for line in text.lines() {
        let len = grapheme_count(line);

        if len > max {
            flush_lines(&mut current, &mut current_len, out);
            out.push((line.to_string(), ContentType::Code));
            continue;
        }

        if !current.is_empty() && current_len + 1 + len > max {
            flush_lines(&mut current, &mut current_len, out);
        }
        if current.is_empty() {
            current_len = len;
        } else {
            current_len += 1 + len;
        }
        current.push(line);
    }

    flush_lines(&mut current, &mut current_len, out);
}

/// Splits a list unit at item boundaries, packing whole items.
///
/// Text before the first item (an intro line) is packed like an item. A
/// single item longer than the limit falls back to sentence/word
/// splitting, still classified as list content.
fn split_list_unit(unit: &str, max: usize, out: &mut Vec<Piece>) {
    let starts: Vec<usize> = list_item_pattern()
        .find_iter(unit)
        .map(|m| m.start())
        .collect();

    if starts.is_empty() {
        split_prose(unit, max, ContentType::List, out);
        return;
    }

    let mut items: Vec<&str> = Vec::new();
    if starts[0] > 0 {
        items.push(unit[..starts[0]].trim_end());
    }
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(unit.len());
        items.push(unit[start..end].trim_end());
    }

    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for item in items {
        if item.is_empty() {
            continue;
        }
        let len = grapheme_count(item);

        if len > max {
            flush_items(&mut current, &mut current_len, out);
            split_prose(item, max, ContentType::List, out);
            continue;
        }

        if !current.is_empty() && current_len + 1 + len > max {
            flush_items(&mut current, &mut current_len, out);
        }
        if current.is_empty() {
            current_len = len;
        } else {
            current_len += 1 + len;
        }
        current.push(item);
    }

    flush_items(&mut current, &mut current_len, out);
}

/// Emits the buffered text as a piece, if it holds anything visible.
fn flush(buffer: &mut String, buffer_len: &mut usize, content_type: ContentType, out: &mut Vec<Piece>) {
    if !buffer.trim().is_empty() {
        out.push((std::mem::take(buffer), content_type));
    } else {
        buffer.clear();
    }
    *buffer_len = 0;
}

/// Emits buffered code lines joined back with newlines.
fn flush_lines(lines: &mut Vec<&str>, current_len: &mut usize, out: &mut Vec<Piece>) {
    if !lines.is_empty() {
        let text = lines.join("\n");
        if !text.trim().is_empty() {
            out.push((text, ContentType::Code));
        }
        lines.clear();
    }
    *current_len = 0;
}

/// Emits buffered list items joined back with newlines.
fn flush_items(items: &mut Vec<&str>, current_len: &mut usize, out: &mut Vec<Piece>) {
    if !items.is_empty() {
        let text = items.join("\n");
        if !text.trim().is_empty() {
            out.push((text, ContentType::List));
        }
        items.clear();
    }
    *current_len = 0;
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 280;

    /// Whitespace-separated tokens, for reconstruction checks.
    fn tokens(s: &str) -> Vec<&str> {
        s.split_whitespace().collect()
    }

    fn joined_tokens(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().flat_map(|c| tokens(&c.text)).collect()
    }

    #[test]
    fn test_short_message_single_trimmed_chunk() {
        let chunks = segment_message("  quick reply  ", MAX, true);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "quick reply");
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[0].content_type, ContentType::Text);
    }

    #[test]
    fn test_empty_message_passes_through() {
        let chunks = segment_message("", MAX, true);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "");
    }

    #[test]
    fn test_whitespace_only_message_passes_through() {
        let chunks = segment_message("  \n\t ", MAX, true);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "  \n\t ");
    }

    #[test]
    fn test_exactly_max_is_single_chunk() {
        let text = "x".repeat(MAX);
        let chunks = segment_message(&text, MAX, true);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_long_plain_text_splits_at_sentences() {
        // 15 sentences of 42 graphemes pack 6 per chunk
        let text = "This message keeps going with plain words. ".repeat(15);
        let chunks = segment_message(&text, MAX, true);

        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert!(chunk.size() <= MAX);
            assert_eq!(chunk.content_type, ContentType::Text);
            // Chunks end at sentence boundaries
            assert!(chunk.text.ends_with('.'));
        }
        assert_eq!(joined_tokens(&chunks), tokens(&text));
    }

    #[test]
    fn test_indices_are_sequential() {
        let text = "One sentence here. ".repeat(40);
        let chunks = segment_message(&text, MAX, true);
        assert!(chunks.len() > 1);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
        }
    }

    #[test]
    fn test_paragraphs_kept_separate() {
        let first = "First paragraph with enough words to matter. ".repeat(4);
        let second = "Second paragraph, also with words. ".repeat(4);
        let message = format!("{}\n\n{}", first.trim(), second.trim());
        let chunks = segment_message(&message, MAX, true);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, first.trim());
        assert_eq!(chunks[1].text, second.trim());
    }

    #[test]
    fn test_list_splits_on_item_boundaries() {
        let items: Vec<String> = (1..=12)
            .map(|i| format!("- bullet point number {i} with a few extra words on it"))
            .collect();
        let message = items.join("\n");
        let chunks = segment_message(&message, MAX, true);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.size() <= MAX);
            assert_eq!(chunk.content_type, ContentType::List);
            // Every line in every chunk is a complete item
            for line in chunk.text.lines() {
                assert!(line.starts_with("- "), "split mid-item: {line:?}");
            }
        }
        assert_eq!(joined_tokens(&chunks), tokens(&message));
    }

    #[test]
    fn test_list_intro_line_stays_with_list() {
        let items: Vec<String> = (1..=10)
            .map(|i| format!("- errand number {i} for the long weekend ahead"))
            .collect();
        let message = format!("Things to get done:\n{}", items.join("\n"));
        let chunks = segment_message(&message, MAX, true);

        assert!(chunks[0].text.starts_with("Things to get done:"));
        assert!(chunks.iter().all(|c| c.content_type == ContentType::List));
    }

    #[test]
    fn test_oversized_list_item_falls_back_to_sentences() {
        let long_item = format!(
            "- {}",
            "this single item runs on and on with clause after clause. ".repeat(8)
        );
        let message = format!("- short item one\n{long_item}\n- short item two");
        let chunks = segment_message(&message, MAX, true);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.size() <= MAX);
            assert_eq!(chunk.content_type, ContentType::List);
        }
        assert_eq!(joined_tokens(&chunks), tokens(&message));
    }

    #[test]
    fn test_small_fence_preserved_intact() {
        let fence = "```rust\nfn answer() -> u32 {\n    42\n}\n```";
        let filler = "Some context sentence to push the whole message over the limit. ".repeat(4);
        let message = format!("{}\n\n{fence}", filler.trim());
        let chunks = segment_message(&message, MAX, true);

        assert!(chunks.iter().any(|c| c.text == fence));
        let fences: Vec<_> = chunks.iter().filter(|c| c.text.contains("```")).collect();
        for chunk in fences {
            assert_eq!(chunk.content_type, ContentType::Code);
        }
    }

    #[test]
    fn test_large_fence_splits_on_whole_lines() {
        // 50 lines of 10 characters: too big for one chunk
        let body: Vec<String> = (0..50).map(|i| format!("let_x_{i:03};")).collect();
        let block = format!("```\n{}\n```", body.join("\n"));
        let chunks = segment_message(&block, MAX, true);

        assert!(chunks.len() > 1);
        let original_lines: Vec<&str> = block.lines().collect();
        let mut rebuilt: Vec<&str> = Vec::new();
        for chunk in &chunks {
            assert!(chunk.size() <= MAX);
            assert_eq!(chunk.content_type, ContentType::Code);
            rebuilt.extend(chunk.text.lines());
        }
        // No line was ever split
        assert_eq!(rebuilt, original_lines);
    }

    #[test]
    fn test_oversized_code_line_stands_alone() {
        let long_line = "x".repeat(400);
        let block = format!("```\nshort();\n{long_line}\nalso_short();\n```");
        let chunks = segment_message(&block, MAX, true);

        assert!(chunks.iter().any(|c| c.text == long_line));
    }

    #[test]
    fn test_prose_around_fence_keeps_code_classification() {
        let body: Vec<String> = (0..40).map(|i| format!("call_number_{i:02}();")).collect();
        let message = format!(
            "Here is the whole thing:\n```\n{}\n```\nThat should fix it.",
            body.join("\n")
        );
        let chunks = segment_message(&message, MAX, true);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.content_type == ContentType::Code));
        assert_eq!(joined_tokens(&chunks), tokens(&message));
    }

    #[test]
    fn test_unclosed_fence_splits_as_code_lines() {
        let body: Vec<String> = (0..50).map(|i| format!("line_{i:04}()")).collect();
        let message = format!("```\n{}", body.join("\n"));
        let chunks = segment_message(&message, MAX, true);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert_eq!(chunk.content_type, ContentType::Code);
            assert!(chunk.size() <= MAX);
        }
    }

    #[test]
    fn test_oversized_sentence_falls_back_to_words() {
        let sentence = format!("{} end.", "word ".repeat(80).trim());
        let chunks = segment_message(&sentence, MAX, true);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.size() <= MAX);
        }
        assert_eq!(joined_tokens(&chunks), tokens(&sentence));
    }

    #[test]
    fn test_oversized_word_is_its_own_chunk() {
        let monster = "a".repeat(500);
        let message = format!("Take a look at {monster} when you can. More text follows here.");
        let chunks = segment_message(&message, MAX, true);

        assert!(chunks.iter().any(|c| c.text == monster));
        assert_eq!(joined_tokens(&chunks), tokens(&message));
    }

    #[test]
    fn test_preserve_formatting_off_flattens_structure() {
        let message = format!(
            "Intro paragraph here.\n\n- item one\n- item two\n\n{}",
            "Closing sentence with several more words in it. ".repeat(8)
        );
        let chunks = segment_message(&message, MAX, false);

        assert!(chunks.len() > 1);
        // One classification for the whole message
        let first_type = chunks[0].content_type;
        assert!(chunks.iter().all(|c| c.content_type == first_type));
        assert_eq!(joined_tokens(&chunks), tokens(&message));
    }

    #[test]
    fn test_mixed_message_types_in_order() {
        let prose = "Plenty of ordinary words to start the message off properly. ".repeat(5);
        let items: Vec<String> = (1..=10)
            .map(|i| format!("- numbered errand {i} with some trailing words"))
            .collect();
        let message = format!("{}\n\n{}", prose.trim(), items.join("\n"));
        let chunks = segment_message(&message, MAX, true);

        assert!(chunks.len() >= 2);
        assert_eq!(chunks[0].content_type, ContentType::Text);
        assert_eq!(
            chunks.last().map(|c| c.content_type),
            Some(ContentType::List)
        );
    }

    #[test]
    fn test_no_empty_chunks_emitted() {
        let message = "Sentence one here.\n\n\n\nSentence two over the limit. ".repeat(10);
        let chunks = segment_message(&message, MAX, true);
        for chunk in &chunks {
            assert!(!chunk.text.trim().is_empty());
        }
    }

    #[test]
    fn test_grapheme_sizing_with_emoji() {
        // Flag emoji are two code points but one grapheme each
        let flag = "\u{1f1e6}\u{1f1f7}";
        let word = flag.repeat(8);
        let text = format!("{word} ").repeat(40);
        let chunks = segment_message(&text, 40, true);

        for chunk in &chunks {
            assert!(chunk.size() <= 40, "grapheme size {} > 40", chunk.size());
        }
    }
}
