use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
}

/// Normalize a skill label using NFKC normalization, lowercasing, trimming,
/// and inner-whitespace collapsing, so "K8s " and "k8s" index and query as
/// the same skill. Returns an empty string for labels that are all whitespace;
/// callers drop those.
pub fn normalize_label(label: &str) -> String {
    let normalized = label.nfkc().collect::<String>().to_lowercase();
    WHITESPACE.replace_all(normalized.trim(), " ").into_owned()
}
