//! `dsift review`: record a human review decision.

use anyhow::{bail, Result};
use docsift_core::models::DocumentStatus;
use docsift_core::store::Store;
use tracing::info;

use crate::config::Config;
use crate::json_store::JsonStore;

pub async fn run_review(config: &Config, id: &str, status: &str) -> Result<()> {
    let status: DocumentStatus = status.parse()?;
    let store = JsonStore::open(&config.store.path)?;

    let Some(doc) = store.get_document(id).await? else {
        bail!("Document not found: {}", id);
    };

    if !store.set_status(id, status).await? {
        bail!("Document not found: {}", id);
    }
    info!(id, name = %doc.name, from = %doc.status, to = %status, "review recorded");

    println!("review {}", doc.name);
    println!("  {} -> {}", doc.status, status);
    println!("ok");
    Ok(())
}
