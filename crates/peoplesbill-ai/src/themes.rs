//! Keyword extraction, theme naming, and cluster summaries.
//!
//! Themes come from a fixed, ordered keyword table: the first keyword (in
//! frequency order) containing a table key picks the theme, checking keys
//! in table order.

use std::collections::HashMap;

use crate::stopwords::is_keyword_stop_word;

/// A keyword fragment and the theme it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeRule {
    pub key: &'static str,
    pub theme: &'static str,
}

pub const THEME_RULES: &[ThemeRule] = &[
    ThemeRule { key: "asset", theme: "Asset Declaration" },
    ThemeRule { key: "property", theme: "Property Disclosure" },
    ThemeRule { key: "wealth", theme: "Unexplained Wealth" },
    ThemeRule { key: "corruption", theme: "Anti-Corruption Measures" },
    ThemeRule { key: "investigation", theme: "Investigation Process" },
    ThemeRule { key: "confiscate", theme: "Asset Confiscation" },
    ThemeRule { key: "penalty", theme: "Penalties and Sanctions" },
    ThemeRule { key: "fair", theme: "Fair Hearing Rights" },
    ThemeRule { key: "whistleblower", theme: "Whistleblower Protection" },
    ThemeRule { key: "transparency", theme: "Transparency Requirements" },
    ThemeRule { key: "audit", theme: "Lifestyle Audits" },
    ThemeRule { key: "income", theme: "Income Verification" },
    ThemeRule { key: "bank", theme: "Financial Scrutiny" },
    ThemeRule { key: "office", theme: "Public Office Standards" },
    ThemeRule { key: "report", theme: "Reporting Requirements" },
];

pub const GENERAL_THEME: &str = "General Submissions";

const SUMMARY_PREFIX: &str = "Citizens suggest: ";
const EMPTY_SUMMARY: &str = "No submissions in this cluster";
const SUMMARY_SAMPLE: usize = 3;
const SUMMARY_PART_FALLBACK_CHARS: usize = 100;
const SUMMARY_MAX_CHARS: usize = 500;
const MIN_KEYWORD_CHARS: usize = 4;

/// Top `limit` words by frequency across `texts`, most frequent first.
///
/// Words shorter than four characters and conversational stop words are
/// skipped. Equal counts keep first-seen order.
pub fn extract_keywords<S: AsRef<str>>(texts: &[S], limit: usize) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut seen = 0usize;

    for text in texts {
        for word in text.as_ref().split_whitespace() {
            let word = word.to_lowercase();
            if word.chars().count() < MIN_KEYWORD_CHARS || is_keyword_stop_word(&word) {
                continue;
            }
            let entry = counts.entry(word).or_insert((0, seen));
            entry.0 += 1;
            seen += 1;
        }
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(w, (count, first))| (w, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.into_iter().take(limit).map(|(w, _, _)| w).collect()
}

/// Name a cluster from its keywords.
pub fn generate_theme(keywords: &[String]) -> String {
    for keyword in keywords {
        let keyword = keyword.to_lowercase();
        if let Some(rule) = THEME_RULES.iter().find(|r| keyword.contains(r.key)) {
            return rule.theme.to_string();
        }
    }

    match keywords.first() {
        Some(top) => format!("{}-Related Submissions", title_case(top)),
        None => GENERAL_THEME.to_string(),
    }
}

/// Join the first sentence of up to three texts behind a fixed prefix.
///
/// A text with no `.` (or a leading one) contributes its first 100 chars.
pub fn generate_summary<S: AsRef<str>>(texts: &[S]) -> String {
    if texts.is_empty() {
        return EMPTY_SUMMARY.to_string();
    }

    let parts: Vec<String> = texts
        .iter()
        .take(SUMMARY_SAMPLE)
        .map(|t| {
            let t = t.as_ref();
            match t.split_once('.') {
                Some((first, _)) if !first.is_empty() => first.trim().to_string(),
                _ => t.chars().take(SUMMARY_PART_FALLBACK_CHARS).collect(),
            }
        })
        .collect();

    let summary = format!("{SUMMARY_PREFIX}{}", parts.join("; "));
    summary.chars().take(SUMMARY_MAX_CHARS).collect()
}

/// Uppercase the first letter of each alphabetic run, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
