//! Greedy word-boundary wrapping of transcripts into bounded chunks.
//!
//! Lengths are counted in `char`s. Whitespace is kept attached to the word
//! before it, so joining the chunks with no separator gives back the input.
//! A single word longer than the limit is split mid-word as a last resort.

pub const DEFAULT_MAX_CHARS: usize = 5000;

/// Splits `text` into chunks of at most `max_chars` characters.
///
/// Text that already fits comes back as a single chunk. `max_chars` of 0 is
/// treated as 1.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    if text.chars().count() <= max_chars {
        return vec![text];
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut len = 0;

    for (offset, seg_len) in segments(text) {
        if len + seg_len <= max_chars {
            len += seg_len;
            continue;
        }

        if len > 0 {
            chunks.push(&text[start..offset]);
            start = offset;
            len = 0;
        }

        if seg_len <= max_chars {
            len = seg_len;
            continue;
        }

        // oversized word: hard split, leave the remainder open for following words
        let mut remaining = seg_len;
        let mut cursor = offset;
        while remaining > max_chars {
            let cut = nth_char_boundary(text, cursor, max_chars);
            chunks.push(&text[cursor..cut]);
            cursor = cut;
            remaining -= max_chars;
        }
        start = cursor;
        len = remaining;
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}

/// Yields `(byte offset, char length)` of each word plus its trailing whitespace
fn segments(text: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
    let mut iter = text.char_indices().peekable();
    std::iter::from_fn(move || {
        let (offset, _) = *iter.peek()?;
        let mut count = 0;
        let mut seen_space = false;

        while let Some(&(_, c)) = iter.peek() {
            if c.is_whitespace() {
                seen_space = true;
            } else if seen_space {
                break;
            }
            count += 1;
            iter.next();
        }

        Some((offset, count))
    })
}

fn nth_char_boundary(text: &str, from: usize, n: usize) -> usize {
    text[from..]
        .char_indices()
        .nth(n)
        .map(|(i, _)| from + i)
        .unwrap_or(text.len())
}
