//! Text block normalization.

/// Trim blank lines from both ends of a block and strip the leading spaces
/// every remaining non-blank line shares.
///
/// Only U+0020 counts towards the shared prefix. Blank lines inside the block
/// are kept but do not affect the prefix; if one is shorter than the prefix it
/// becomes empty.
pub fn dedent_lines<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    let Some(first) = lines.iter().position(|line| !is_blank(line)) else {
        return Vec::new();
    };
    let last = lines.iter().rposition(|line| !is_blank(line)).unwrap_or(first);
    let block = &lines[first..=last];

    let prefix = block
        .iter()
        .filter(|line| !is_blank(line))
        .map(|line| line.chars().take_while(|&c| c == ' ').count())
        .min()
        .unwrap_or(0);

    block.iter().map(|line| strip_chars(line, prefix)).collect()
}

/// [`dedent_lines`] over the lines of `text`, split by [`split_lines`].
pub fn dedent(text: &str) -> Vec<&str> {
    dedent_lines(&split_lines(text))
}

/// Split `text` at every line boundary: `\n`, `\r`, `\r\n`, vertical tab,
/// form feed, the file, group and record separators, NEL, and the Unicode
/// line and paragraph separators. A trailing boundary does not start an
/// extra empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((index, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..index]);
        start = index + c.len_utf8();
        if c == '\r' {
            if let Some(&(newline, '\n')) = chars.peek() {
                chars.next();
                start = newline + 1;
            }
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

fn strip_chars(line: &str, count: usize) -> &str {
    match line.char_indices().nth(count) {
        Some((index, _)) => &line[index..],
        None => "",
    }
}
