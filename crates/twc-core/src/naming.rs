//! Name canonicalization.
//!
//! Pure string functions shared by discovery, synthesis and the schema
//! compiler. Word detection follows the ASCII definition of a word character
//! (`[A-Za-z0-9_]`).
//!
//! # Examples
//!
//! ```
//! use twc_core::naming::{are_same_name_ignoring_case, to_camel_case, to_operation_name};
//!
//! assert_eq!(to_operation_name(&["chat", "postMessage"]), "ChatPostMessage");
//! assert_eq!(to_camel_case("chat post message"), "chatPostMessage");
//! assert!(are_same_name_ignoring_case(Some("apiTest"), Some("APITest")));
//! ```

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Joins path segments into a PascalCase operation name.
///
/// Only the first character of each segment is upper-cased; the rest of the
/// segment is kept as is, so `postMessage` stays `PostMessage`.
///
/// # Examples
///
/// ```
/// use twc_core::naming::to_operation_name;
///
/// assert_eq!(to_operation_name(&["usergroups", "users", "list"]), "UsergroupsUsersList");
/// assert_eq!(to_operation_name::<&str>(&[]), "");
/// ```
#[must_use]
pub fn to_operation_name<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|segment| upper_first(segment.as_ref()))
        .collect()
}

/// Upper-cases the first character of `word`.
#[must_use]
pub fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Converts PascalCase, camelCase or space separated words to lowerCamelCase.
///
/// A character starts a word when it is a word character preceded by a
/// non-word character (or the start of input), or when it is an ASCII
/// upper-case letter. The character at offset zero is lower-cased, every
/// other word start is upper-cased, and whitespace is removed.
///
/// # Examples
///
/// ```
/// use twc_core::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("ChatPostMessage"), "chatPostMessage");
/// assert_eq!(to_camel_case("chatPostMessage"), "chatPostMessage");
/// assert_eq!(to_camel_case("chat post message"), "chatPostMessage");
/// ```
#[must_use]
pub fn to_camel_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut prev_is_word = false;

    for (offset, ch) in input.char_indices() {
        let is_word = is_word_char(ch);
        let starts_word = (is_word && !prev_is_word) || ch.is_ascii_uppercase();

        if starts_word {
            if offset == 0 {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
        } else if !ch.is_whitespace() {
            result.push(ch);
        }

        prev_is_word = is_word;
    }

    result
}

/// Case- and accent-insensitive name comparison.
///
/// Two missing names are equal; a missing name never equals a present one.
///
/// # Examples
///
/// ```
/// use twc_core::naming::are_same_name_ignoring_case;
///
/// assert!(are_same_name_ignoring_case(
///     Some("chatPostMessageArguments"),
///     Some("ChatPostMessageArguments"),
/// ));
/// assert!(are_same_name_ignoring_case(None, None));
/// assert!(!are_same_name_ignoring_case(None, Some("x")));
/// ```
#[must_use]
pub fn are_same_name_ignoring_case(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => fold(a) == fold(b),
        _ => false,
    }
}

const fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn fold(name: &str) -> String {
    name.nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect()
}
