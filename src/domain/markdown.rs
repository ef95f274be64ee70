/// Escape text for interpolation into a Telegram MarkdownV2 message.
///
/// Every reserved character is prefixed with a single backslash; nothing else
/// is altered. Callers must escape each field exactly once, at the point of
/// formatting; escaping an already-formatted message double-escapes it.
pub fn escape_markdown_v2(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '_' | '*'
                | '['
                | ']'
                | '('
                | ')'
                | '~'
                | '`'
                | '>'
                | '#'
                | '+'
                | '-'
                | '='
                | '|'
                | '{'
                | '}'
                | '.'
                | '!'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
