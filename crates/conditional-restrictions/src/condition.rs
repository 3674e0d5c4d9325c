//! Normalization of raw leaf condition text.

/// Normalize the raw text captured for a single condition.
///
/// Conditions are kept verbatim apart from surrounding whitespace, so the
/// result may be empty when the group parser captured nothing but spaces.
///
/// # Examples
/// ```
/// use conditional_restrictions::normalize_condition;
/// assert_eq!(normalize_condition("  Mo-Fr 07:00-19:00 "), "Mo-Fr 07:00-19:00");
/// assert_eq!(normalize_condition("   "), "");
/// ```
#[must_use]
pub fn normalize_condition(raw: &str) -> String {
    raw.trim().to_owned()
}
