// src/attributes/mod.rs
//! # Listing attributes
//!
//! The column model of the listing spreadsheet:
//! - `registry`: every known field, its rank (column order) and, for derived
//!   fields, the inputs and pure function that compute it.
//! - `catalog`: the fixed set of fields the registry is built from.
//! - `facts`: regex extractors run over the free-text fact lines of a listing.
//! - `derive`: evaluates derived fields against a partially filled record.
//! - `values`: the per-listing field → value set and its overwrite merge.
//! - `numeric`: digit extraction and guarded division with sentinel fallbacks.
//!
//! Nothing here does I/O. The registry and parser set are built once and
//! shared read-only.
pub mod catalog;
pub mod derive;
pub mod facts;
pub mod numeric;
pub mod registry;
pub mod values;

pub use derive::{apply_derived, evaluate};
pub use facts::{FactParser, FactParserSet};
pub use registry::{Derivation, FieldDef, FieldKind, Registry};
pub use values::{AttributeValue, AttributeValueSet};
