//! Small text helpers shared by the extraction and verification stages.

use unicode_normalization::UnicodeNormalization;

/// ASCII punctuation characters, in code-point order.
pub const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// Whether `token` is a contiguous run of [`PUNCTUATION`].
///
/// Mirrors substring membership in the punctuation string: `"."` and `"()"`
/// qualify, `".."` does not. The empty string qualifies.
#[must_use]
pub fn is_punctuation(token: &str) -> bool {
    PUNCTUATION.contains(token)
}

/// Lower-case a table field label and collapse non-breaking spaces.
#[must_use]
pub fn normalize_field_label(label: &str) -> String {
    label.replace('\u{a0}', " ").to_lowercase()
}

/// Remove zero-width spaces and apply NFKC normalization.
#[must_use]
pub fn normalize_field_value(value: &str) -> String {
    value.replace('\u{200b}', "").nfkc().collect()
}

/// Strip a single trailing space left behind by claim structuring.
#[must_use]
pub fn strip_trailing_space(info: &str) -> &str {
    info.strip_suffix(' ').unwrap_or(info)
}
