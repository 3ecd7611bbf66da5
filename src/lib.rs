// src/lib.rs

pub mod cli;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod file;
pub mod log;
pub mod model;
pub mod progress;
pub mod runner;
pub mod scrape;
pub mod specs;
pub mod store;

pub use error::{RunError, ScrapeError, ServeError, StoreError};
pub use model::{AgeGroup, FinishTime, Rank, RunnerResult};
pub use store::Dataset;
