//! Content hash tags.
//!
//! A hash tag identifies a `(key, context)` pair with a short, stable token.
//! Skeletons put `<hash>_tr` where a translation used to be, which lets a
//! compiler find the position of a key again without re-parsing the source.

use lazy_static::lazy_static;
use md5::{Digest, Md5};
use regex::Regex;

/// Suffix appended to a hash tag to form a skeleton placeholder.
pub const PLACEHOLDER_SUFFIX: &str = "_tr";

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"^([0-9a-f]{32})_tr$").unwrap();
    static ref HASH_TAG_REGEX: Regex = Regex::new(r"^[0-9a-f]{32}$").unwrap();
}

/// Returns the hash tag of `key` in `context`: the lowercase hex MD5 of
/// `key:context`.
///
/// ```rust
/// use joomla_ini::hash::hash_tag;
/// assert_eq!(hash_tag("FOO", ""), hash_tag("FOO", ""));
/// assert_ne!(hash_tag("FOO", ""), hash_tag("FOO", "menu"));
/// assert_eq!(hash_tag("FOO", "").len(), 32);
/// ```
pub fn hash_tag(key: &str, context: &str) -> String {
    let digest = Md5::digest(format!("{}:{}", key, context).as_bytes());
    format!("{:x}", digest)
}

/// Skeleton placeholder for `key` in `context`.
pub fn placeholder(key: &str, context: &str) -> String {
    format!("{}{}", hash_tag(key, context), PLACEHOLDER_SUFFIX)
}

/// If `text` is exactly a skeleton placeholder, returns its hash tag.
pub fn parse_placeholder(text: &str) -> Option<&str> {
    PLACEHOLDER_REGEX
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Whether `text` is a bare hash tag.
pub fn is_hash_tag(text: &str) -> bool {
    HASH_TAG_REGEX.is_match(text)
}
