/// Quote state for the field scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    Unquoted,
    Quoted,
}

/// Splits one CSV line into its raw fields.
///
/// Rules:
/// - a double quote toggles the quote state, except that `""` inside quotes
///   emits a single literal quote and consumes both characters;
/// - an unquoted comma ends the current field;
/// - an unquoted LF ends the field and stops the scan (anything after it
///   belongs to the next row); a quoted LF is kept verbatim;
/// - an unterminated open quote is not an error: the remainder of the line
///   becomes the final field as-is.
///
/// The empty string parses to one empty field, never to zero fields.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut state = QuoteState::Unquoted;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (state, c) {
            (QuoteState::Quoted, '"') => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    state = QuoteState::Unquoted;
                }
            }
            (QuoteState::Unquoted, '"') => state = QuoteState::Quoted,
            (QuoteState::Unquoted, ',') => {
                fields.push(std::mem::take(&mut current));
            }
            (QuoteState::Unquoted, '\n') => break,
            (_, other) => current.push(other),
        }
    }

    fields.push(current);
    fields
}
