// src/config/consts.rs

// Net config
pub const LISTING_BASE_URL: &str = "https://www.zillow.com/homedetails/";
pub const LISTING_URL_SUFFIX: &str = "_zpid/";
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const TIMEOUT_SECS: u64 = 15;

// Sheets
pub const CONFIG_FILE: &str = "listing_updater.toml";
pub const DEFAULT_SHEET_DIR: &str = "sheets";
pub const DEFAULT_SHEETS: [(&str, &str); 2] = [("Buy", "buy.csv"), ("Rent", "rent.csv")];

// Logging
pub const LOG_LEVEL: &str = "info";

// Concurrency
pub const WORKERS: usize = 1;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms
