pub fn split_safe_utf8(s: &str, max_bytes: usize) -> Result<Vec<&str>, &'static str> {
    if max_bytes == 0 {
        return Err("max_bytes must be greater than zero");
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < s.len() {
        let remaining = s.len() - start;

        if remaining <= max_bytes {
            chunks.push(&s[start..]);
            break;
        }

        let mut end = start + max_bytes;
        while !s.is_char_boundary(end) {
            end -= 1;
        }

        // Scanned all the way back: the next character alone is wider than max_bytes.
        if end == start {
            return Err("max_bytes is too small to fit the next character");
        }

        chunks.push(&s[start..end]);
        start = end;
    }

    Ok(chunks)
}

/// Packs `text` into messages of at most `max_bytes`, breaking on line ends
/// where possible and inside overlong lines otherwise.
pub fn pack_lines(text: &str, max_bytes: usize) -> Result<Vec<String>, &'static str> {
    let mut messages = Vec::new();
    let mut buffer = String::new();

    for line in text.lines() {
        let pieces = if line.is_empty() {
            vec![line]
        } else {
            split_safe_utf8(line, max_bytes)?
        };

        for piece in pieces {
            let additional_len = if buffer.is_empty() {
                piece.len()
            } else {
                1 + piece.len()
            };
            if !buffer.is_empty() && buffer.len() + additional_len > max_bytes {
                messages.push(std::mem::take(&mut buffer));
            }
            if !buffer.is_empty() {
                buffer.push('\n');
            }
            buffer.push_str(piece);
        }
    }

    if !buffer.is_empty() {
        messages.push(buffer);
    }

    Ok(messages
        .into_iter()
        .map(|m| m.trim_end_matches('\n').to_string())
        .filter(|m| !m.trim().is_empty())
        .collect())
}
