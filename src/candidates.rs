//! Alternate spellings of a hosted file name
//!
//! Commons is inconsistent about how scans of the same card were uploaded:
//! `Cups01.jpg`, `CUPS01.jpg`, `Cup1.JPG`, `Wands 09.jpeg`, `WANDS09-1.jpg`...
//! [`generate`] expands a canonical name into an ordered, duplicate-free list
//! of guesses that the fallback fetcher walks through.

use std::collections::HashSet;

/// Extensions seen on the card scans
pub const EXTENSIONS: [&str; 5] = [".jpg", ".JPG", ".jpeg", ".png", ".PNG"];

/// Separators placed between the suit word and the rank number
pub const SEPARATORS: [&str; 3] = [" ", "_", "-"];

/// Suffixes used for re-uploads and alternate scans
pub const SUFFIXES: [&str; 4] = ["a", "-1", "_1", "01"];

/// Insertion-ordered set of names
#[derive(Default)]
struct Candidates {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl Candidates {
    fn push(&mut self, name: String) {
        if !name.is_empty() && self.seen.insert(name.clone()) {
            self.ordered.push(name);
        }
    }
}

/// Stem such as `Cups01` or `Wands 09`, split around its trailing number
struct NumberedStem<'a> {
    word: &'a str,
    separator: &'a str,
    digits: &'a str,
}

fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}

fn numbered(stem: &str) -> Option<NumberedStem<'_>> {
    let word_end = stem.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    let digits = &stem[word_end..];
    let word = stem[..word_end].trim_end_matches(|c: char| matches!(c, ' ' | '_' | '-'));

    if digits.is_empty() || !word.ends_with(|c: char| c.is_alphabetic()) {
        return None;
    }

    Some(NumberedStem {
        word,
        separator: &stem[word.len()..word_end],
        digits,
    })
}

/// `Cups` -> `Cup`, `Pent` -> `Pents`
fn toggle_plural(word: &str) -> Option<String> {
    if word.ends_with(|c: char| c == 's' || c == 'S') {
        let singular = &word[..word.len() - 1];
        (!singular.is_empty()).then(|| singular.to_string())
    } else {
        Some(format!("{}s", word))
    }
}

/// Expand a canonical file name into the ordered list of names to try.
///
/// The canonical name always comes first. An empty input yields an empty list.
pub fn generate(canonical: &str) -> Vec<String> {
    let mut out = Candidates::default();
    if canonical.is_empty() {
        return out.ordered;
    }

    let (stem, ext) = split_extension(canonical);

    out.push(canonical.to_string());

    // Case, keeping the extension first so `CUPS01.jpg` precedes `CUPS01.JPG`
    out.push(format!("{}{}", stem.to_uppercase(), ext));
    out.push(canonical.to_lowercase());
    out.push(format!("{}{}", stem.to_lowercase(), ext));
    out.push(canonical.to_uppercase());

    for alt_ext in EXTENSIONS {
        out.push(format!("{}{}", stem, alt_ext));
    }

    if let Some(parts) = numbered(stem) {
        let unpadded = parts.digits.trim_start_matches('0');
        let unpadded = if unpadded.is_empty() { "0" } else { unpadded };
        out.push(format!("{}{}{}{}", parts.word, parts.separator, unpadded, ext));

        if let Some(word) = toggle_plural(parts.word) {
            out.push(format!("{}{}{}{}", word, parts.separator, parts.digits, ext));
        }

        for separator in SEPARATORS {
            out.push(format!("{}{}{}{}", parts.word, separator, parts.digits, ext));
        }
    }

    let first_order = out.ordered.clone();
    for name in &first_order {
        let (stem, ext) = split_extension(name);
        for suffix in SUFFIXES {
            out.push(format!("{}{}{}", stem, suffix, ext));
        }
    }

    out.ordered
}
