//! Corpus readiness report.
//!
//! Recomputes [`CorpusMetrics`] over the accepted corpus (everything not
//! rejected) and prints either a summary table or the raw report JSON.
//! Used by `dsift metrics` to decide what to review next.

use anyhow::{anyhow, Result};
use chrono::Duration;
use docsift_core::metrics::{CorpusMetrics, CorpusReport, QualityMetrics};
use docsift_core::store::Store;
use std::collections::BTreeMap;

use crate::config::Config;
use crate::ingest::classifier_for;
use crate::json_store::JsonStore;

/// Load the store and compute the report.
pub async fn build_report(config: &Config) -> Result<CorpusReport> {
    let store = JsonStore::open(&config.store.path)?;
    let custom = config.load_patterns()?;
    let docs = store.accepted_documents().await?;

    let window = Duration::try_days(config.metrics.recent_window_days)
        .ok_or_else(|| anyhow!("metrics.recent_window_days is out of range"))?;

    let report = CorpusMetrics::new(classifier_for(&custom))
        .with_recent_window(window)
        .compute_now(&docs);
    Ok(report)
}

/// Run the metrics command and print the result.
pub async fn run_metrics(config: &Config, json: bool) -> Result<()> {
    let report = build_report(config).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Docsift — Corpus Metrics");
    println!("========================");
    println!();
    println!("  Store:       {}", config.store.path.display());
    println!();

    let Some(m) = &report.metrics else {
        println!("  No documents yet. Run `dsift ingest` first.");
        println!();
        return Ok(());
    };

    print_summary(m, config.metrics.recent_window_days);
    print_distribution("By type", "TYPE", &m.type_distribution);
    print_distribution("By label", "LABEL", &m.label_distribution);
    print_distribution("By source", "EXTENSION", &m.source_distribution);

    if !report.issues.is_empty() {
        println!();
        println!("  Issues:");
        for issue in &report.issues {
            let count = issue
                .affected_count
                .map(|c| format!(" ({})", c))
                .unwrap_or_default();
            println!("  [{}] {}{}", issue.kind.as_str(), issue.title, count);
            println!("      {}", issue.description);
            if let Some(action) = &issue.action {
                println!("      → {}", action);
            }
        }
    }

    println!();
    Ok(())
}

fn print_summary(m: &QualityMetrics, window_days: i64) {
    println!("  Readiness:   {}/100", m.readiness_score);
    println!();
    println!("  Documents:   {}", m.total_documents);
    println!("  Approved:    {}", m.approved_documents);
    println!("  Pending:     {}", m.pending_documents);
    println!(
        "  Recent:      {} (last {} day{})",
        m.recent_uploads,
        window_days,
        if window_days == 1 { "" } else { "s" }
    );
    println!("  Avg length:  {} chars", m.average_content_length);
    println!("  Avg quality: {:.1}", m.average_quality_score);
    println!(
        "  Labeled:     {} / {} ({:.0}%)",
        m.label_coverage.with_labels,
        m.total_documents,
        m.label_coverage.percent()
    );
    println!("  Dup risk:    {}", m.duplicate_risk);
    println!();
    println!(
        "  Quality:     excellent {}  good {}  fair {}  poor {}",
        m.content_quality.excellent,
        m.content_quality.good,
        m.content_quality.fair,
        m.content_quality.poor
    );
}

fn print_distribution(title: &str, column: &str, counts: &BTreeMap<String, usize>) {
    if counts.is_empty() {
        return;
    }

    let mut rows: Vec<(&String, &usize)> = counts.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    println!();
    println!("  {}:", title);
    println!("  {:<28} {:>6}", column, "DOCS");
    println!("  {}", "-".repeat(35));
    for (key, count) in rows {
        println!("  {:<28} {:>6}", key, count);
    }
}
