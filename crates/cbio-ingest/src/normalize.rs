//! Column identifier normalization.

use cbio_model::NameCase;

/// Turns arbitrary header text into a `[A-Za-z_][A-Za-z0-9_]*` token.
///
/// Surrounding whitespace is trimmed, every other character outside
/// `[A-Za-z0-9_]` becomes `_`, and a leading `_` is added when the token
/// would start with a digit. Normalizing a normalized token is a no-op.
///
/// # Examples
///
/// ```
/// use cbio_ingest::normalize_column_name;
/// use cbio_model::NameCase;
///
/// assert_eq!(normalize_column_name("Gene-Name (years)", NameCase::Lower), "gene_name__years_");
/// assert_eq!(normalize_column_name("1abc", NameCase::Lower), "_1abc");
/// assert_eq!(normalize_column_name("Hugo_Symbol", NameCase::Preserve), "Hugo_Symbol");
/// ```
pub fn normalize_column_name(name: &str, case: NameCase) -> String {
    let trimmed = name.trim();
    let mut token = String::with_capacity(trimmed.len() + 1);
    for ch in trimmed.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            token.push(ch);
        } else {
            token.push('_');
        }
    }
    let starts_ok = token
        .chars()
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_');
    if !starts_ok {
        token.insert(0, '_');
    }
    match case {
        NameCase::Lower => token.to_ascii_lowercase(),
        NameCase::Preserve => token,
    }
}
