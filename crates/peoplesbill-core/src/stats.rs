//! Submission statistics: cluster demographics, regional participation,
//! and recent submission volume.
//!
//! Everything here is computed from an in-memory submission slice; callers
//! load the slice however they like.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::Serialize;

use crate::region::Region;
use crate::submission::Submission;

/// Each submission is assumed to speak for this many citizens.
pub const PARTICIPANTS_PER_SUBMISSION: u64 = 15;

/// Number of occupations reported in [`ClusterDemographics::top_occupations`].
pub const TOP_OCCUPATIONS: usize = 5;

/// Window for [`submissions_over_time`].
pub const RECENT_DAYS: i64 = 30;

const AGE_BUCKETS: [&str; 5] = ["18-25", "26-35", "36-45", "46-55", "56+"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterDemographics {
    pub total_submissions: usize,
    /// Fixed bucket order: 18-25, 26-35, 36-45, 46-55, 56+.
    pub age_groups: Vec<(&'static str, usize)>,
    /// Most common first, at most [`TOP_OCCUPATIONS`] entries.
    pub top_occupations: Vec<(String, usize)>,
    pub regions: BTreeMap<Region, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Participation {
    /// Percentage of the national population, 3 decimals.
    pub overall: f64,
    /// Percentage of each region's population, 3 decimals. Every region is present.
    pub by_region: BTreeMap<Region, f64>,
    pub estimated_participants: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

fn age_bucket(age: u32) -> usize {
    match age {
        0..=25 => 0,
        26..=35 => 1,
        36..=45 => 2,
        46..=55 => 3,
        _ => 4,
    }
}

impl ClusterDemographics {
    pub fn from_submissions(submissions: &[Submission]) -> Self {
        let mut ages = [0usize; AGE_BUCKETS.len()];
        let mut occupations: Vec<(String, usize)> = Vec::new();
        let mut regions = BTreeMap::new();

        for sub in submissions {
            if let Some(age) = sub.age {
                ages[age_bucket(age)] += 1;
            }

            if let Some(occ) = sub.occupation.as_deref().filter(|o| !o.is_empty()) {
                match occupations.iter_mut().find(|(o, _)| o == occ) {
                    Some((_, n)) => *n += 1,
                    None => occupations.push((occ.to_string(), 1)),
                }
            }

            *regions.entry(sub.region).or_insert(0) += 1;
        }

        // Stable sort keeps first-seen order among equal counts.
        occupations.sort_by(|a, b| b.1.cmp(&a.1));
        occupations.truncate(TOP_OCCUPATIONS);

        Self {
            total_submissions: submissions.len(),
            age_groups: AGE_BUCKETS.iter().copied().zip(ages).collect(),
            top_occupations: occupations,
            regions,
        }
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Count submissions per region.
pub fn submissions_by_region(submissions: &[Submission]) -> BTreeMap<Region, usize> {
    let mut counts = BTreeMap::new();
    for sub in submissions {
        *counts.entry(sub.region).or_insert(0) += 1;
    }
    counts
}

/// Estimate participation rates against census populations.
pub fn participation(by_region: &BTreeMap<Region, usize>) -> Participation {
    let total_population: u64 = Region::ALL.iter().map(Region::population).sum();
    let total_submissions: usize = by_region.values().sum();
    let estimated_participants = total_submissions as u64 * PARTICIPANTS_PER_SUBMISSION;

    let overall = if total_population > 0 {
        round3(estimated_participants as f64 / total_population as f64 * 100.0)
    } else {
        0.0
    };

    let by_region = Region::ALL
        .iter()
        .map(|&region| {
            let count = by_region.get(&region).copied().unwrap_or(0) as u64;
            let rate = round3(
                (count * PARTICIPANTS_PER_SUBMISSION) as f64 / region.population() as f64 * 100.0,
            );
            (region, rate)
        })
        .collect();

    Participation {
        overall,
        by_region,
        estimated_participants,
    }
}

/// Per-day submission counts over the [`RECENT_DAYS`] days before `now`.
///
/// Submissions without a creation timestamp are ignored. Output is sorted
/// by date ascending; days with no submissions are omitted.
pub fn submissions_over_time(submissions: &[Submission], now: DateTime<Utc>) -> Vec<DailyCount> {
    let cutoff = now - TimeDelta::days(RECENT_DAYS);
    let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();

    for created in submissions.iter().filter_map(|s| s.created_at) {
        if created >= cutoff {
            *per_day.entry(created.date_naive()).or_insert(0) += 1;
        }
    }

    let mut days: Vec<DailyCount> = per_day
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect();
    days.sort_by_key(|d| d.date);
    days
}
