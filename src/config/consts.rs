// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://services.datasport.com";
pub const RACE_PATH: &str = "lauf/zuerich";
pub const USER_AGENT: &str = concat!("marathon_scrape/", env!("CARGO_PKG_VERSION"));
pub const TIMEOUT_SECS: u64 = 10;

// Scrape
pub const DEFAULT_YEARS: [i32; 3] = [2019, 2022, 2023];
pub const LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=2100;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "runners";
pub const DEFAULT_TABLE: &str = "runners";

// Config file + env
pub const CONFIG_FILE: &str = "marathon";
pub const ENV_PREFIX: &str = "MARATHON";

// Dashboard
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8050;
