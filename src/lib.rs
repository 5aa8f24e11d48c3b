//! # Docsift
//!
//! Near-duplicate detection, keyword classification, and quality scoring for
//! document corpora.
//!
//! The engine lives in [`docsift_core`]; this crate wires it to a local
//! inbox directory and a JSON snapshot store and exposes the `dsift` CLI.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌──────────────┐   ┌────────────┐
//! │ Filesystem  │──▶│ Hash + Dedup │──▶│  Classify +  │──▶│ JSON store │
//! │  connector  │   │    screen    │   │    score     │   │ (snapshot) │
//! └─────────────┘   └──────────────┘   └──────────────┘   └─────┬──────┘
//!                                                               │
//!                                        ┌──────────────────────┤
//!                                        ▼                      ▼
//!                                  ┌───────────┐          ┌───────────┐
//!                                  │  review   │          │  metrics  │
//!                                  └───────────┘          └───────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! dsift init                        # create the store file
//! dsift ingest                      # screen and store the inbox
//! dsift check ./new/paper.txt       # would this be a duplicate?
//! dsift review <id> approved        # record a review decision
//! dsift metrics                     # corpus readiness report
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Host data types and engine re-exports |
//! | [`connector_fs`] | Filesystem connector |
//! | [`json_store`] | JSON snapshot store backend |
//! | [`ingest`] | Ingestion pipeline |
//! | [`check`] | `check` and `classify` commands |
//! | [`review`] | Review status transitions |
//! | [`report`] | Corpus metrics report |

pub mod check;
pub mod config;
pub mod connector_fs;
pub mod ingest;
pub mod json_store;
pub mod models;
pub mod report;
pub mod review;
