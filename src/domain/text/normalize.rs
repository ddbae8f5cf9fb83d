//! Canonical form of question text for comparison.

/// Function words removed as whole tokens.
///
/// Negations ("no", "not") are kept: they flip the meaning of a question.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "will", "would", "be", "been", "is", "are", "was", "were", "of", "in", "on",
    "at", "to", "for", "by", "with", "from", "and", "or", "it", "its", "this", "that", "as", "do",
    "does", "did", "has", "have", "had", "if", "than", "then", "so",
];

/// Canonicalize question text.
///
/// Lower-cases, removes every character that is neither a word character
/// nor whitespace, drops [`STOP_WORDS`] as whole tokens, and collapses
/// whitespace. Blank input yields an empty string.
///
/// The output is a fixed point: `normalize(&normalize(s)) == normalize(s)`.
///
/// ```
/// use oddsbridge::domain::text::normalize;
///
/// assert_eq!(normalize("Will the Bill pass by June?"), "bill pass june");
/// assert_eq!(normalize("Theatre, then..."), "theatre");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| is_word_char(*c) || c.is_whitespace())
        .collect();

    stripped
        .split_whitespace()
        .filter(|token| !STOP_WORDS.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
