//! Parameter extraction from submission text.
//!
//! Each category is scanned independently over the first
//! [`SAMPLE_SIZE`] normalised submissions; the first submission that
//! yields a value for a category fixes it.

use std::sync::LazyLock;

use peoplesbill_core::{Submission, normalize_text};
use regex::Regex;
use tracing::debug;

use crate::templates::{FREQUENCY, PERCENTAGE, PRISON_TERM, TIMEFRAME, YEARS};

pub const SAMPLE_SIZE: usize = 20;

pub const DEFAULT_TIMEFRAME: &str = "thirty (30) days";
pub const DEFAULT_FREQUENCY: &str = "every two (2) years";
pub const DEFAULT_DISQUALIFICATION: &str = "ten (10)";
pub const DEFAULT_IMPRISONMENT: &str = "five (5)";
pub const WHISTLEBLOWER_PERCENTAGE: &str = "10";

const BIENNIAL: &str = "every two (2) years";
const ANNUAL: &str = "annually";

/// Two-year forms first so "biannually" is not read as "annually".
const FREQUENCY_KEYWORDS: &[(&str, &str)] = &[
    ("every two years", BIENNIAL),
    ("biannually", BIENNIAL),
    ("yearly", ANNUAL),
    ("annually", ANNUAL),
    ("every year", ANNUAL),
];

const DISQUALIFICATION_KEYWORDS: &[&str] = &["disqualif", "ban"];
const IMPRISONMENT_KEYWORDS: &[&str] = &["prison", "jail", "imprison"];

static TIMEFRAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(day|month|year)s?").unwrap());

static YEARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*years?").unwrap());

/// Values found in a set of submissions. `None` means "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftParameters {
    pub timeframe: Option<String>,
    pub frequency: Option<&'static str>,
    pub disqualification_years: Option<String>,
    pub imprisonment_years: Option<String>,
}

impl DraftParameters {
    pub fn from_submissions(submissions: &[Submission]) -> Self {
        let texts: Vec<String> = submissions
            .iter()
            .take(SAMPLE_SIZE)
            .map(|s| normalize_text(&s.content))
            .collect();
        Self::from_texts(&texts)
    }

    /// Scan already-normalised texts. Only the first [`SAMPLE_SIZE`] are read.
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        let mut params = Self::default();

        for text in texts.iter().take(SAMPLE_SIZE) {
            let text = text.as_ref();

            if params.timeframe.is_none() {
                params.timeframe = timeframe(text);
            }
            if params.frequency.is_none() {
                params.frequency = frequency(text);
            }
            if params.disqualification_years.is_none()
                && DISQUALIFICATION_KEYWORDS.iter().any(|k| text.contains(k))
            {
                params.disqualification_years = first_years(text);
            }
            if params.imprisonment_years.is_none()
                && IMPRISONMENT_KEYWORDS.iter().any(|k| text.contains(k))
            {
                params.imprisonment_years = first_years(text);
            }
        }

        debug!(?params, "draft parameters extracted");
        params
    }

    /// Substitute every placeholder in `body`, using defaults where nothing
    /// was extracted.
    pub fn fill(&self, body: &str) -> String {
        body.replace(TIMEFRAME, self.timeframe.as_deref().unwrap_or(DEFAULT_TIMEFRAME))
            .replace(FREQUENCY, self.frequency.unwrap_or(DEFAULT_FREQUENCY))
            .replace(
                YEARS,
                self.disqualification_years.as_deref().unwrap_or(DEFAULT_DISQUALIFICATION),
            )
            .replace(
                PRISON_TERM,
                self.imprisonment_years.as_deref().unwrap_or(DEFAULT_IMPRISONMENT),
            )
            .replace(PERCENTAGE, WHISTLEBLOWER_PERCENTAGE)
    }
}

/// Earliest `<n> day|month|year` mention, as `"<n> <unit>"`.
fn timeframe(text: &str) -> Option<String> {
    let caps = TIMEFRAME_RE.captures(text)?;
    let count = &caps[1];
    let unit = &caps[2];
    let plural = if count == "1" { "" } else { "s" };
    Some(format!("{count} {unit}{plural}"))
}

fn frequency(text: &str) -> Option<&'static str> {
    FREQUENCY_KEYWORDS
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|&(_, value)| value)
}

fn first_years(text: &str) -> Option<String> {
    YEARS_RE.captures(text).map(|caps| caps[1].to_string())
}
