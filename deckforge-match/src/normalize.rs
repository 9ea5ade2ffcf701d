//! Canonical matching keys.
//!
//! All matching comparisons happen between normalized keys: lowercase,
//! ASCII letters/digits only, single `_` separators. Normalization is
//! idempotent, so keys can be re-normalized safely.

/// Normalize free text into a canonical matching key.
///
/// Lowercases, keeps ASCII letters and digits, collapses whitespace
/// runs (and existing `_` separators) to single underscores, and drops
/// every other character without introducing a separator. Returns an
/// empty string for degenerate input.
///
/// # Examples
///
/// ```
/// use deckforge_match::normalize_name;
///
/// assert_eq!(normalize_name("The Gemini!"), "the_gemini");
/// assert_eq!(normalize_name("Angry Mob (Middle Ages)"), "angry_mob_middle_ages");
/// assert_eq!(normalize_name(normalize_name("  Mixed  CASE  ").as_str()), "mixed_case");
/// ```
pub fn normalize_name(text: &str) -> String {
    let mut key = String::with_capacity(text.len());
    let mut pending_sep = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !key.is_empty() {
                key.push('_');
            }
            pending_sep = false;
            key.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '_' {
            pending_sep = true;
        }
        // Punctuation is dropped without becoming a separator.
    }

    key
}

/// Normalize a pool identifier into its comparison key.
///
/// Drops the file extension, normalizes, and strips a leading
/// `digits_` index prefix: `"014_anubis.webp"` → `"anubis"`.
pub fn asset_key(id: &str) -> String {
    let stem = match id.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => stem,
        _ => id,
    };
    strip_index_prefix(&normalize_name(stem)).to_string()
}

/// Strip a leading all-digits token from a normalized key.
///
/// `"014_anubis"` → `"anubis"`; keys without a numeric head token are
/// returned unchanged.
pub fn strip_index_prefix(key: &str) -> &str {
    match key.split_once('_') {
        Some((head, rest)) if !head.is_empty() && head.bytes().all(|b| b.is_ascii_digit()) => rest,
        _ => key,
    }
}
