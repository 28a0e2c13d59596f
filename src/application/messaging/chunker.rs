//! Splitting long replies to fit the transport's message ceiling

/// Split `text` into consecutive chunks of at most `max` characters.
///
/// Chunks never split a code point. Every chunk except the last holds exactly
/// `max` characters, so the count is minimal. An empty `text` yields no chunks
/// and a `max` of zero is treated as 1.
pub fn split_into_chunks(text: &str, max: usize) -> Vec<String> {
    let max = max.max(1);
    let mut chunks = Vec::with_capacity(text.len() / max + 1);
    let mut start = 0;
    let mut count = 0;

    for (idx, ch) in text.char_indices() {
        count += 1;
        if count == max {
            let end = idx + ch.len_utf8();
            chunks.push(text[start..end].to_string());
            start = end;
            count = 0;
        }
    }

    if start < text.len() {
        chunks.push(text[start..].to_string());
    }

    chunks
}
