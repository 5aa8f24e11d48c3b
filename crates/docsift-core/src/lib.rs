//! # Docsift Core
//!
//! The document deduplication and classification engine: data models,
//! similarity measures, near-duplicate detection, keyword-pattern
//! classification, quality scoring, corpus metrics, and the store
//! abstraction.
//!
//! Every engine function is pure and synchronous. This crate contains no
//! tokio, filesystem I/O, or other host dependencies.
//!
//! ## Flow
//!
//! ```text
//! (name, content) ──▶ dedup ──▶ duplicate? ──yes──▶ caller decides
//!                                   │
//!                                   no
//!                                   ▼
//!                     classify + quality ──▶ store
//!                                                │
//!                     metrics (whole corpus) ◀───┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | `Document`, options, and result types |
//! | [`similarity`] | Levenshtein filename and Jaccard content similarity |
//! | [`dedup`] | Duplicate detection against a corpus |
//! | [`patterns`] | Declarative label → keyword table |
//! | [`classify`] | Pattern classifier producing `DocumentAnalysis` |
//! | [`quality`] | Classification and corpus scoring profiles |
//! | [`metrics`] | Corpus metrics, readiness, and review issues |
//! | [`store`] | `Store` trait and in-memory backend |

pub mod classify;
pub mod dedup;
pub mod metrics;
pub mod models;
pub mod patterns;
pub mod quality;
pub mod similarity;
pub mod store;
