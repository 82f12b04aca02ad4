// src/specs/mod.rs
//! # Page "specs"
//!
//! Page-specific scraping specifications: *where the ground truth lives in the
//! HTML* and *how to extract it robustly*.
//!
//! ## What lives here
//! - **Pure HTML parsing** of a fetched page into a small bundle of raw named
//!   strings (`listing::ListingFields`).
//! - **Tolerant extraction** using `core::html` helpers (case-insensitive tag
//!   blocks, balanced element matching, meta tags, whitespace/entity
//!   normalization).
//!
//! ## What does **not** live here
//! - **Fetching** (`scrape`), **field extraction from fact text** and **derived
//!   values** (`attributes`), **merging into the sheet** (`property`,
//!   `updater`).
//!
//! ## Conventions
//! - Missing page parts become empty strings, never errors: a half-rendered page
//!   still yields whatever it has.
//! - Specs are testable **offline** against inline HTML fixtures.
pub mod listing;

pub use listing::ListingFields;
