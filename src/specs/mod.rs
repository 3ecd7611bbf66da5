// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific knowledge about the results provider lives here: which URL
//! holds a year's results and *where the ground truth sits in the HTML*.
//!
//! ## What lives here
//! - **URL layout** for the alphabetical result lists (`alfa<letter>.htm`).
//! - **Pure parsing** of a fetched page into raw runner entries, using
//!   `core::html` (selector matching, text extraction) and one line pattern.
//!
//! ## What does **not** live here
//! - **Fetching** (`core::net`), **cleaning / dedup** (`scrape`), and
//!   **persistence** (`store`).
//!
//! ## Typical call chain
//! ```text
//! parser bin → scrape::collect_results → specs::results::parse_doc()
//!                                     ↘  raw entries per letter page
//!                  store::save_dataset (outside of specs)
//! ```
//!
//! ## Conventions & invariants
//! - Lines that do not look like a runner line are skipped, never an error;
//!   headers, footers and legends share the same `<font>` blocks.
//! - Parsing is offline-testable against inline fixtures.
pub mod results;
