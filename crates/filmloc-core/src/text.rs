// crates/filmloc-core/src/text.rs

/// Convert a string into a folded key suitable for lookup tables.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Łódź` -> `Lodz`)
/// 2\) Normalize to lowercase
/// 3\) Collapse runs of whitespace into a single space
///
/// # Examples
///
/// ```rust
/// use filmloc_core::text::fold_key;
///
/// assert_eq!(fold_key("Łódź,  Poland"), "lodz, poland");
/// assert_eq!(fold_key("Zürich"), "zurich");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
