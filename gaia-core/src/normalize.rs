//! Answer normalization
//!
//! Canonical forms used by the scorer: numbers are parsed after removing
//! grouping commas, currency and percent signs; free text is case-folded,
//! stripped of punctuation and leading articles, and whitespace-collapsed.

/// Separator between list elements. A bare comma is not a separator so that
/// grouped numbers such as `1,000` stay whole.
pub const LIST_SEPARATOR: &str = ", ";

/// Leading tokens dropped from free-text answers.
pub const ARTICLES: &[&str] = &["a", "an", "the"];

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥', '₹'];

/// Parse a numeric answer.
///
/// Removes thousands separators, currency symbols and percent signs, then
/// parses what remains (surrounding whitespace ignored). Returns `None` for
/// anything that is not a finite number.
///
/// ```
/// use gaia::normalize::normalize_number;
///
/// assert_eq!(normalize_number("$1,234.50"), Some(1234.5));
/// assert_eq!(normalize_number("12%"), Some(12.0));
/// assert_eq!(normalize_number("twelve"), None);
/// ```
pub fn normalize_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != ',' && *c != '%' && !CURRENCY_SYMBOLS.contains(c))
        .collect();
    let cleaned = cleaned.trim();

    // f64::from_str accepts "inf" and "NaN"; answers must contain a digit
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Whether `text` reads as a number under [`normalize_number`].
pub fn is_numeric(text: &str) -> bool {
    normalize_number(text).is_some()
}

/// Canonical form of a free-text answer.
///
/// Lower-cases, removes ASCII punctuation, collapses whitespace and drops
/// leading articles. An answer made only of an article (e.g. a multiple
/// choice `"A"`) keeps it.
///
/// ```
/// use gaia::normalize::normalize_text;
///
/// assert_eq!(normalize_text("  The  Eiffel Tower. "), "eiffel tower");
/// assert_eq!(normalize_text("A"), "a");
/// ```
pub fn normalize_text(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    let mut tokens: Vec<&str> = lowered.split_whitespace().collect();
    let leading = tokens
        .iter()
        .take_while(|t| ARTICLES.contains(t))
        .count()
        .min(tokens.len().saturating_sub(1));
    tokens.drain(..leading);

    tokens.join(" ")
}

/// Whether a reference answer is a list.
pub fn is_list(text: &str) -> bool {
    text.contains(LIST_SEPARATOR)
}

/// Split an answer into list elements on [`LIST_SEPARATOR`].
pub fn split_list(text: &str) -> Vec<&str> {
    text.split(LIST_SEPARATOR).collect()
}
