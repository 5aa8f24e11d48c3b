//! One-off inspection commands: `dsift check` and `dsift classify`.
//!
//! Neither command writes to the store. `check` runs the same screening as
//! ingestion against the accepted corpus; `classify` needs no store at all.

use anyhow::{Context, Result};
use docsift_core::models::{DocumentAnalysis, DuplicateResult};
use docsift_core::store::Store;
use serde::Serialize;
use std::path::Path;

use crate::config::Config;
use crate::ingest::{classifier_for, screen};
use crate::json_store::JsonStore;

/// Output of `dsift check`.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub name: String,
    pub duplicate: DuplicateResult,
    pub analysis: DocumentAnalysis,
}

fn read_input(path: &Path) -> Result<(String, String)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} as UTF-8 text", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    Ok((name, content))
}

pub async fn run_check(config: &Config, file: &Path) -> Result<()> {
    let (name, content) = read_input(file)?;
    let store = JsonStore::open(&config.store.path)?;
    let custom = config.load_patterns()?;
    let classifier = classifier_for(&custom);

    let accepted = store.accepted_documents().await?;
    let duplicate = screen(&accepted, &name, &content, &config.dedup.options());
    let analysis = classifier.classify(&name, &content);

    let report = CheckReport {
        name,
        duplicate,
        analysis,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn run_classify(config: &Config, file: &Path) -> Result<()> {
    let (name, content) = read_input(file)?;
    let custom = config.load_patterns()?;
    let analysis = classifier_for(&custom).classify(&name, &content);
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}
