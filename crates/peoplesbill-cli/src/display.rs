//! Terminal rendering for clusters, clauses and statistics.
//!
//! Clusters render from their Arrow batch: either one pretty table for the
//! whole run or one vertical card per row, grouped by section.

use std::collections::BTreeMap;

use arrow::array::*;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use peoplesbill_core::stats::{ClusterDemographics, DailyCount, Participation};
use peoplesbill_core::{Clause, ClauseValidation, Region};

const MAX_LIST_ITEMS: usize = 10;
const MAX_TEXT_CHARS: usize = 60;
const WRAP_WIDTH: usize = 76;

// ── Card section groupings ──

const OVERVIEW: &[&str] = &["size", "confidence_score", "keywords", "regions"];
const MEMBERS: &[&str] = &["submission_ids"];
const TEXT: &[&str] = &["representative_text", "summary"];

/// Columns shown in the compact cluster table.
const TABLE_COLUMNS: &[&str] = &["theme", "size", "confidence_score", "keywords", "regions"];

// ── Clusters ──

/// Print the compact columns of a cluster batch as one table.
pub fn print_cluster_table(batch: &RecordBatch) -> anyhow::Result<()> {
    let schema = batch.schema();
    let indices: Vec<usize> = TABLE_COLUMNS
        .iter()
        .filter_map(|c| schema.index_of(c).ok())
        .collect();
    let compact = batch.project(&indices)?;
    println!("{}", pretty_format_batches(&[compact])?);
    Ok(())
}

/// Print every row of a cluster batch as a vertical card.
pub fn print_cluster_cards(batch: &RecordBatch) -> anyhow::Result<()> {
    for row in 0..batch.num_rows() {
        let theme = get_utf8(batch, "theme", row).unwrap_or_default();
        println!("=== [{row}] {theme} ===");
        println!();
        print_section(batch, row, "Overview", OVERVIEW);
        print_section(batch, row, "Members", MEMBERS);
        print_section(batch, row, "Text", TEXT);
    }
    Ok(())
}

fn print_section(batch: &RecordBatch, row: usize, header: &str, cols: &[&str]) {
    let schema = batch.schema();
    let has_data = cols.iter().any(|&col| {
        schema
            .index_of(col)
            .ok()
            .is_some_and(|i| !batch.column(i).is_null(row))
    });
    if !has_data {
        return;
    }

    println!("{header}");
    for &col_name in cols {
        let Ok(idx) = schema.index_of(col_name) else {
            continue;
        };
        let col = batch.column(idx);
        if col.is_null(row) {
            continue;
        }

        match schema.field(idx).data_type() {
            DataType::Utf8 => {
                if let Some(text) = col_str(col.as_ref(), row) {
                    print_wrapped(col_name, text);
                }
            }
            DataType::UInt64 => {
                if let Some(arr) = col.as_any().downcast_ref::<UInt64Array>() {
                    println!("  {:<22} {}", col_name, arr.value(row));
                }
            }
            DataType::Float32 => {
                if let Some(arr) = col.as_any().downcast_ref::<Float32Array>() {
                    println!("  {:<22} {:.2}", col_name, arr.value(row));
                }
            }
            DataType::List(inner) => match inner.data_type() {
                DataType::Utf8 => print_list_utf8(col.as_ref(), row, col_name),
                DataType::Int64 => print_list_int64(col.as_ref(), row, col_name),
                _ => println!("  {:<22} (list)", col_name),
            },
            _ => println!("  {:<22} {:?}", col_name, col),
        }
    }
    println!();
}

// ── List columns ──

fn print_list_utf8(col: &dyn Array, row: usize, col_name: &str) {
    let Some(list) = col.as_any().downcast_ref::<ListArray>() else {
        return;
    };
    let values = list.value(row);
    let Some(strings) = values.as_any().downcast_ref::<StringArray>() else {
        return;
    };
    let items: Vec<&str> = (0..strings.len())
        .filter(|&i| !strings.is_null(i))
        .map(|i| strings.value(i))
        .collect();
    if items.is_empty() {
        return;
    }
    println!("  {:<22} {}", col_name, items.join(", "));
}

fn print_list_int64(col: &dyn Array, row: usize, col_name: &str) {
    let Some(list) = col.as_any().downcast_ref::<ListArray>() else {
        return;
    };
    let values = list.value(row);
    let Some(ints) = values.as_any().downcast_ref::<Int64Array>() else {
        return;
    };
    let len = ints.len();
    if len == 0 {
        return;
    }
    let shown: Vec<String> = (0..len.min(MAX_LIST_ITEMS))
        .map(|i| ints.value(i).to_string())
        .collect();
    print!("  {:<22} {}", col_name, shown.join(", "));
    if len > MAX_LIST_ITEMS {
        print!(" ... and {} more", len - MAX_LIST_ITEMS);
    }
    println!();
}

// ── Clauses ──

pub fn print_clause_card(index: usize, clause: &Clause, validation: &ClauseValidation) {
    println!("=== Clause {} : {} ===", index + 1, clause.title);
    println!(
        "  confidence {:.2}  based on {} submission(s)",
        clause.confidence, clause.based_on_submissions
    );
    println!();
    for line in wrap(&clause.content, WRAP_WIDTH) {
        println!("  {line}");
    }
    println!();
    println!("  Rationale: {}", clause.rationale);

    if validation.is_valid {
        println!("  Validation: ok");
    } else {
        println!("  Validation: {} issue(s)", validation.issues.len());
        for (issue, suggestion) in validation.issues.iter().zip(&validation.suggestions) {
            println!("    - {issue}: {suggestion}");
        }
    }
    println!();
}

pub fn print_validation(validation: &ClauseValidation) {
    if validation.is_valid {
        println!("valid");
        return;
    }
    println!("invalid");
    for (issue, suggestion) in validation.issues.iter().zip(&validation.suggestions) {
        println!("  - {issue}");
        println!("    {suggestion}");
    }
}

// ── Statistics ──

pub fn print_stats(
    demographics: &ClusterDemographics,
    participation: &Participation,
    recent: &[DailyCount],
) {
    println!("=== Submission statistics ===");
    println!();
    println!("  {:<22} {}", "total_submissions", demographics.total_submissions);
    println!("  {:<22} {}", "estimated_participants", participation.estimated_participants);
    println!("  {:<22} {:.3}%", "participation", participation.overall);
    println!();

    println!("Age groups");
    for (bucket, count) in &demographics.age_groups {
        println!("  {bucket:<22} {count}");
    }
    println!();

    if !demographics.top_occupations.is_empty() {
        println!("Top occupations");
        for (occupation, count) in &demographics.top_occupations {
            println!("  {:<22} {count}", truncate(occupation, 22));
        }
        println!();
    }

    print_regions(&demographics.regions, &participation.by_region);

    let active: Vec<&DailyCount> = recent.iter().filter(|d| d.count > 0).collect();
    if !active.is_empty() {
        println!("Recent days");
        for day in active {
            println!("  {:<22} {}", day.date, day.count);
        }
        println!();
    }
}

fn print_regions(counts: &BTreeMap<Region, usize>, rates: &BTreeMap<Region, f64>) {
    println!("Regions");
    for (region, rate) in rates {
        let count = counts.get(region).copied().unwrap_or(0);
        if count == 0 {
            continue;
        }
        println!("  {:<22} {:>6}  {:.3}%", region.name(), count, rate);
    }
    println!();
}

// ── Helpers ──

fn get_utf8(batch: &RecordBatch, col_name: &str, row: usize) -> Option<String> {
    let idx = batch.schema().index_of(col_name).ok()?;
    col_str(batch.column(idx).as_ref(), row).map(str::to_string)
}

fn col_str(col: &dyn Array, i: usize) -> Option<&str> {
    if col.is_null(i) {
        return None;
    }
    col.as_any()
        .downcast_ref::<StringArray>()
        .map(|a| a.value(i))
}

fn print_wrapped(label: &str, text: &str) {
    let mut lines = wrap(text, WRAP_WIDTH - 25).into_iter();
    println!("  {:<22} {}", label, lines.next().unwrap_or_default());
    for line in lines {
        println!("  {:<22} {}", "", line);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    } else {
        s.to_string()
    }
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Short preview of a submission body for search results.
pub fn preview(text: &str) -> String {
    truncate(text, MAX_TEXT_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_width() {
        let lines = wrap("every public officer shall declare assets annually", 20);
        assert_eq!(
            lines,
            ["every public officer", "shall declare assets", "annually"]
        );
        assert!(wrap("", 10).is_empty());
        assert_eq!(wrap("unbreakableword", 5), ["unbreakableword"]);
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }
}
