// src/attributes/catalog.rs
//
// The fixed column catalog for the listing spreadsheet.
// Rank decides column order (lowest first). Derived ratios sit right after the
// core listing columns.

use super::numeric::{ratio_sentinel, safe_divide_str, scaled_ratio};
use super::registry::{Derivation, FieldDef};

/// Listing identifier column. Only ever sourced from the sheet.
pub const ID_FIELD: &str = "zillow_id";

pub const ADDRESS: &str = "address";
pub const BEDS: &str = "beds";
pub const BATH: &str = "bath";
pub const SQFT: &str = "sqft";
pub const STATUS: &str = "status";
pub const PRICE: &str = "price";
pub const ESTIMATE: &str = "estimate";
pub const DESCRIPTION: &str = "description";
pub const FACTS: &str = "facts";

pub const PRICE_SQFT_ZILLOW: &str = "price_sqft_zillow";
pub const LOT_SIZE: &str = "lot_size";

pub const PRICE_INDOOR_SQFT: &str = "price_indoor_sqft";
pub const PRICE_LOT_SQFT: &str = "price_lot_sqft";

/// Free-text columns that go through the printable-only filter.
pub const TEXT_FIELDS: [&str; 2] = [DESCRIPTION, FACTS];

pub const STATIC_FIELDS: &[(&str, f64)] = &[
    (ID_FIELD, 1.0),
    (ADDRESS, 8.0),
    (BEDS, 5.0),
    (BATH, 6.0),
    (SQFT, 7.0),
    (STATUS, 2.0),
    (PRICE, 3.0),
    (ESTIMATE, 4.0),
    (DESCRIPTION, 10000.0),
    (FACTS, 10001.0),
];

/// (field, pattern, rank). Patterns are matched at the start of a fact line.
pub const FACT_PARSERS: &[(&str, &str, f64)] = &[
    ("built_year", r"Built in\s+(.*)", 103.0),
    (LOT_SIZE, r"Lot:\s+(.*)\s+sqft", 102.0),
    ("days_on_zillow", r"(.*)\s+days on Zillow", 110.0),
    ("views", r"Views:\s+([0-9,]+)", 111.0),
    ("saved", r"(.*) shoppers saved", 112.0),
    (PRICE_SQFT_ZILLOW, r"Price/sqft:\s+\$(\d+)", 1101.0),
    ("mls", r"MLS[^0-9]*(\d+)", 200.0),
    ("parking", r"Parking: (.*)", 113.0),
    ("stories", r"Stories: (\d+)", 114.0),
    ("floor_size", r"Floor size:\s+([0-9,]+)\s+sqft", 104.0),
    ("cooling", r"Cooling:\s+(.*)", 105.0),
    ("heating", r"Heating:\s+(.*)", 106.0),
    ("last_remodel", r"Last remodel year: (\d+)", 115.0),
    ("room_count", r"Room count: (\d+)", 116.0),
    ("last_sold", r"Last sold: (.*)", 117.0),
];

pub const DERIVED_FIELDS: &[(&str, f64, Derivation)] = &[
    (
        PRICE_INDOOR_SQFT,
        101.0,
        Derivation { inputs: &[PRICE_SQFT_ZILLOW, SQFT, PRICE, ESTIMATE], compute: price_indoor_sqft },
    ),
    (
        PRICE_LOT_SQFT,
        101.5,
        Derivation { inputs: &[LOT_SIZE, PRICE, ESTIMATE], compute: price_lot_sqft },
    ),
];

const INDOOR_SCALE: f64 = 500.0;
const LOT_SCALE: f64 = 150.0;

/// Static fields, then fact fields, then derived fields.
pub fn field_defs() -> Vec<FieldDef> {
    let statics = STATIC_FIELDS.iter().map(|&(name, rank)| FieldDef::new_static(name, rank));
    let facts = FACT_PARSERS.iter().map(|&(name, _, rank)| FieldDef::new_static(name, rank));
    let derived = DERIVED_FIELDS
        .iter()
        .map(|&(name, rank, derivation)| FieldDef::new_derived(name, rank, derivation));
    statics.chain(facts).chain(derived).collect()
}

/// Asking price (or estimate) per indoor sqft, scaled down by 500.
/// Inputs: price_sqft_zillow, sqft, price, estimate.
fn price_indoor_sqft(v: &[&str]) -> String {
    let [per_sqft, sqft, price, estimate] = [v[0], v[1], v[2], v[3]];
    if !per_sqft.is_empty() {
        return safe_divide_str(per_sqft, INDOOR_SCALE);
    }
    match price_or_estimate(price, estimate) {
        Some(p) if !sqft.is_empty() => scaled_ratio(p, sqft, INDOOR_SCALE),
        _ => ratio_sentinel(),
    }
}

/// Asking price (or estimate) per lot sqft, scaled down by 150.
/// Inputs: lot_size, price, estimate.
fn price_lot_sqft(v: &[&str]) -> String {
    let [lot, price, estimate] = [v[0], v[1], v[2]];
    match price_or_estimate(price, estimate) {
        Some(p) if !lot.is_empty() => scaled_ratio(p, lot, LOT_SCALE),
        _ => ratio_sentinel(),
    }
}

fn price_or_estimate<'a>(price: &'a str, estimate: &'a str) -> Option<&'a str> {
    if !price.is_empty() {
        Some(price)
    } else if !estimate.is_empty() {
        Some(estimate)
    } else {
        None
    }
}
