//! Free-text grocery line normalizer.
//!
//! # Responsibility
//! - Turn one raw list line into a canonical lowercase singular phrase.
//! - Extract at most one leading or trailing quantity token.
//!
//! # Invariants
//! - Passes run in a fixed order: marker strip, quantity extraction,
//!   leading-number cleanup, punctuation strip, whitespace collapse,
//!   per-word singularization. Later passes depend on earlier output.
//! - A prefix quantity always wins over a suffix quantity.
//! - An empty `normalized_text` is a valid result, never an error.

use crate::model::item::NormalizedItem;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static LEADING_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-•*]|\[[ xX]?\])\s*").expect("valid marker regex"));
static PREFIX_QTY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([0-9]+(?:[.,][0-9]+)?\s?(?:x|×|kg|g|lb|oz|l|ml))\s+")
        .expect("valid prefix quantity regex")
});
static SUFFIX_QTY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s+([0-9]+(?:[.,][0-9]+)?\s?(?:x|×|kg|g|lb|oz|l|ml))$")
        .expect("valid suffix quantity regex")
});
static LEADING_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9]+(?:[.,][0-9]+)?\s*(?:x|×|kg|g|lb|oz|l|ml)?\s+")
        .expect("valid leading number regex")
});
static PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s]").expect("valid punctuation regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Plural forms the suffix rules get wrong, plus nouns that only look plural.
pub const IRREGULAR_SINGULARS: &[(&str, &str)] = &[
    ("tomatoes", "tomato"),
    ("potatoes", "potato"),
    ("mangoes", "mango"),
    ("berries", "berry"),
    ("eggs", "egg"),
    ("children", "child"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("knives", "knife"),
    ("olives", "olive"),
    ("chives", "chive"),
    ("cloves", "clove"),
    ("gloves", "glove"),
    ("cookies", "cookie"),
    ("brownies", "brownie"),
    ("veggies", "veggie"),
    ("smoothies", "smoothie"),
    ("cheeses", "cheese"),
    ("mousses", "mousse"),
    ("quiches", "quiche"),
    ("hummus", "hummus"),
    ("couscous", "couscous"),
    ("asparagus", "asparagus"),
    ("citrus", "citrus"),
    ("molasses", "molasses"),
    ("octopus", "octopus"),
    ("schnapps", "schnapps"),
];

static IRREGULAR_LOOKUP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| IRREGULAR_SINGULARS.iter().copied().collect());

const SIBILANT_PLURAL_SUFFIXES: &[&str] = &["xes", "ses", "zes", "ches", "shes"];

/// Normalizes one raw grocery line.
///
/// Examples: `"- 2 kg Apples"` becomes `apple` with quantity `2 kg`;
/// `"tomatoes 3x"` becomes `tomato` with quantity `3x`.
pub fn normalize_item(raw_text: &str) -> NormalizedItem {
    let lowered = raw_text.trim().to_lowercase();
    let unmarked = LEADING_MARKER_RE.replace(&lowered, "");
    let (quantity, remainder) = extract_quantity(&unmarked);
    let without_number = LEADING_NUMBER_RE.replace(&remainder, "");
    let without_punct = PUNCT_RE.replace_all(&without_number, " ");
    let collapsed = WHITESPACE_RE.replace_all(&without_punct, " ");

    let normalized_text = collapsed
        .trim()
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(singularize_word)
        .collect::<Vec<_>>()
        .join(" ");

    NormalizedItem {
        raw_text: raw_text.to_string(),
        normalized_text,
        quantity,
    }
}

/// Singularizes one lowercase word.
///
/// Words of three characters or fewer are returned unchanged so short
/// words such as `gas` are never over-stripped.
pub fn singularize_word(word: &str) -> String {
    if let Some(singular) = IRREGULAR_LOOKUP.get(word) {
        return (*singular).to_string();
    }

    let len = word.chars().count();
    if len <= 3 {
        return word.to_string();
    }

    // Suffixes below are ASCII, so byte slicing stays on char boundaries.
    if len > 4 {
        if let Some(stem) = word.strip_suffix("ies") {
            return format!("{stem}y");
        }
        if let Some(stem) = word.strip_suffix("ves") {
            return format!("{stem}f");
        }
    }

    if SIBILANT_PLURAL_SUFFIXES
        .iter()
        .any(|suffix| word.ends_with(suffix))
    {
        return word[..word.len() - 2].to_string();
    }

    if word.ends_with('s') && !word.ends_with("ss") {
        return word[..word.len() - 1].to_string();
    }

    word.to_string()
}

fn extract_quantity(text: &str) -> (Option<String>, String) {
    if let Some(caps) = PREFIX_QTY_RE.captures(text) {
        if let (Some(whole), Some(qty)) = (caps.get(0), caps.get(1)) {
            return (Some(qty.as_str().to_string()), text[whole.end()..].to_string());
        }
    }

    if let Some(caps) = SUFFIX_QTY_RE.captures(text) {
        if let (Some(whole), Some(qty)) = (caps.get(0), caps.get(1)) {
            return (
                Some(qty.as_str().to_string()),
                text[..whole.start()].to_string(),
            );
        }
    }

    (None, text.to_string())
}
