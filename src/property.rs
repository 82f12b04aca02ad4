// src/property.rs
//
// Record assembly: sheet rows and scraped listings in, attribute sets out,
// and back to rows in registry rank order.

use std::collections::HashSet;

use crate::attributes::catalog::{
    ADDRESS, BATH, BEDS, DESCRIPTION, ESTIMATE, FACTS, ID_FIELD, PRICE, SQFT, STATUS, TEXT_FIELDS,
};
use crate::attributes::{apply_derived, AttributeValueSet, FactParserSet, Registry};
use crate::core::sanitize::printable_only;
use crate::error::Result;
use crate::specs::ListingFields;
use crate::store::Sheet;

/// One cell per non-empty column whose header resolves in the registry.
/// Unknown headers and empty cells are skipped; a repeated header only counts
/// the first time.
pub fn from_row(registry: &Registry, header: &[String], row: &[String]) -> AttributeValueSet {
    let mut seen = HashSet::new();
    header
        .iter()
        .zip(row)
        .filter(|(name, _)| seen.insert(name.as_str()))
        .filter(|(_, cell)| !cell.is_empty())
        .filter_map(|(name, cell)| registry.value(name, cell.as_str()))
        .collect()
}

/// Scraped page fields → attribute set.
///
/// Every fact field is present afterwards (empty when no fact line matched),
/// derived fields are computed, and free-text fields are reduced to printable
/// ASCII.
pub fn from_listing(registry: &Registry, parsers: &FactParserSet, listing: &ListingFields) -> AttributeValueSet {
    let facts_joined = listing.facts.join("; ");
    let scalars = [
        (ADDRESS, listing.address.as_str()),
        (BEDS, listing.beds.as_str()),
        (BATH, listing.bath.as_str()),
        (SQFT, listing.sqft.as_str()),
        (STATUS, listing.status.as_str()),
        (PRICE, listing.price.as_str()),
        (ESTIMATE, listing.estimate.as_str()),
        (DESCRIPTION, listing.description.as_str()),
        (FACTS, facts_joined.as_str()),
    ];

    let mut set: AttributeValueSet = scalars
        .into_iter()
        .filter_map(|(name, value)| registry.value(name, value))
        .collect();

    let found = parsers.scan(listing.facts.iter().map(String::as_str));
    for name in parsers.names() {
        let value = found.iter().find(|(n, _)| *n == name).map(|(_, v)| *v).unwrap_or("");
        if let Some(attr) = registry.value(name, value) {
            set.insert(attr);
        }
    }

    apply_derived(registry, &mut set);

    for name in TEXT_FIELDS {
        set.map_value(name, printable_only);
    }
    set
}

/// Cells in rank order; absent fields are empty.
pub fn render_row(registry: &Registry, set: &AttributeValueSet) -> Vec<String> {
    registry
        .ranked()
        .map(|def| s!(set.get(def.name()).unwrap_or("")))
        .collect()
}

/// Field names in rank order, for row 0.
pub fn render_header(registry: &Registry) -> Vec<String> {
    registry.names_ranked()
}

/// One listing row of a sheet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Property {
    attrs: AttributeValueSet,
}

impl Property {
    pub fn new(attrs: AttributeValueSet) -> Self { Self { attrs } }

    pub fn from_row(registry: &Registry, header: &[String], row: &[String]) -> Self {
        Self::new(from_row(registry, header, row))
    }

    /// The listing identifier cell. Rows without one cannot be refreshed.
    pub fn listing_id(&self) -> Result<&str> {
        self.attrs.get_value(ID_FIELD)
    }

    /// Scraped values overwrite sheet values of the same field.
    pub fn merge(&mut self, scraped: AttributeValueSet) {
        self.attrs.merge(scraped);
    }

    pub fn merge_listing(&mut self, registry: &Registry, parsers: &FactParserSet, listing: &ListingFields) {
        self.merge(from_listing(registry, parsers, listing));
    }

    pub fn render(&self, registry: &Registry) -> Vec<String> {
        render_row(registry, &self.attrs)
    }
}

/// One property per data row of the sheet, in row order.
pub fn parse_sheet(registry: &Registry, sheet: &Sheet) -> Vec<Property> {
    let header = sheet.header();
    sheet
        .data_rows()
        .iter()
        .map(|row| Property::from_row(registry, header, row))
        .collect()
}

/// Render header + properties over `previous`.
///
/// Columns `0..registry.len()` are rewritten in rank order. Every column of
/// `previous` whose header is not a registry field (or repeats one) is kept,
/// cells and all, to the right of that, in its original left-to-right order.
/// Rows below the first blank row are carried over as they were.
pub fn render_sheet(registry: &Registry, properties: &[Property], previous: &Sheet) -> Sheet {
    let width = registry.len();
    let extra = foreign_columns(registry, previous);
    for (k, (from, name)) in extra.iter().enumerate() {
        let to = width + k;
        if *from != to {
            tracing::warn!(column = %name, from, to, "moving unrecognized column");
        }
    }

    let carry = |row_ix: usize, mut row: Vec<String>| {
        let old = previous.rows.get(row_ix);
        for &(from, _) in &extra {
            let cell = old.and_then(|r| r.get(from)).cloned().unwrap_or_default();
            row.push(cell);
        }
        row
    };

    let mut rows = Vec::with_capacity(properties.len() + 1);
    rows.push(carry(0, render_header(registry)));
    for (i, p) in properties.iter().enumerate() {
        rows.push(carry(i + 1, p.render(registry)));
    }
    Sheet { rows, tail: previous.tail.clone() }
}

/// (column index, header) of every column the registry does not own:
/// unknown names, repeats of a name already seen, and blank-headed columns
/// that hold data (including cells past the end of the header row).
fn foreign_columns(registry: &Registry, sheet: &Sheet) -> Vec<(usize, String)> {
    let header = sheet.header();
    let span = sheet.rows.iter().map(Vec::len).max().unwrap_or(0);
    let has_data = |j: usize| sheet.data_rows().iter().any(|r| r.get(j).is_some_and(|c| !c.is_empty()));
    let mut seen = HashSet::new();
    (0..span)
        .filter_map(|j| {
            let name = header.get(j).map(String::as_str).unwrap_or("");
            if registry.contains(name) && seen.insert(name) {
                return None;
            }
            if name.is_empty() && !has_data(j) {
                return None;
            }
            Some((j, s!(name)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry { Registry::standard().unwrap() }

    #[test]
    fn from_row_skips_unknown_and_empty() {
        let reg = registry();
        let header = vec![s!("zillow_id"), s!("notes"), s!("price"), s!("beds")];
        let row = vec![s!("12345"), s!("call agent"), s!(""), s!("3")];
        let set = from_row(&reg, &header, &row);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("zillow_id"), Some("12345"));
        assert_eq!(set.get("beds"), Some("3"));
        assert!(!set.contains("price"));
    }

    #[test]
    fn from_row_tolerates_short_rows() {
        let reg = registry();
        let header = vec![s!("zillow_id"), s!("price")];
        let set = from_row(&reg, &header, &[s!("7")]);
        assert_eq!(set.get("zillow_id"), Some("7"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn render_header_is_ranked() {
        let header = render_header(&registry());
        assert_eq!(&header[..4], &["zillow_id", "status", "price", "estimate"]);
        assert_eq!(header.last().map(String::as_str), Some("facts"));
    }

    #[test]
    fn empty_set_renders_blank_row() {
        let reg = registry();
        let row = render_row(&reg, &AttributeValueSet::new());
        assert_eq!(row.len(), reg.len());
        assert!(row.iter().all(String::is_empty));
    }

    #[test]
    fn listing_fills_facts_derived_and_cleans_text() {
        let reg = registry();
        let parsers = FactParserSet::standard(&reg).unwrap();
        let listing = ListingFields {
            price: s!("500000"),
            sqft: s!("2,500"),
            description: s!("Caf\u{e9} nook"),
            facts: vec![s!("Built in 1995"), s!("Parking: None")],
            ..Default::default()
        };
        let set = from_listing(&reg, &parsers, &listing);
        assert_eq!(set.get("built_year"), Some("1995"));
        assert_eq!(set.get("parking"), Some("None"));
        assert_eq!(set.get("cooling"), Some(""));
        assert_eq!(set.get("price_indoor_sqft"), Some("0.40"));
        assert_eq!(set.get("price_lot_sqft"), Some("1.00"));
        assert_eq!(set.get("description"), Some("Caf nook"));
        assert_eq!(set.get("facts"), Some("Built in 1995; Parking: None"));
        assert!(!set.contains("zillow_id"));
    }

    #[test]
    fn render_sheet_carries_trailing_columns() {
        let reg = registry();
        let width = reg.len();
        let mut header = render_header(&reg);
        header.push(s!("my notes"));
        let mut row = vec![s!(""); width];
        row[0] = s!("1");
        row.push(s!("keep me"));
        let previous = Sheet::new(vec![header, row]);

        let props = parse_sheet(&reg, &previous);
        let out = render_sheet(&reg, &props, &previous);
        assert_eq!(out, previous);
    }

    #[test]
    fn unknown_column_inside_width_moves_right() {
        let reg = registry();
        let header = vec![s!("zillow_id"), s!("my_notes"), s!("price")];
        let previous = Sheet::new(vec![header, vec![s!("1"), s!("call agent"), s!("$5")]]);

        let out = render_sheet(&reg, &parse_sheet(&reg, &previous), &previous);
        let width = reg.len();
        assert_eq!(out.rows[0].len(), width + 1);
        assert_eq!(out.rows[0][width], "my_notes");
        assert_eq!(out.rows[1][width], "call agent");
        let price = reg.column_of("price").unwrap();
        assert_eq!(out.rows[1][price], "$5");

        // second pass leaves the layout alone
        let again = render_sheet(&reg, &parse_sheet(&reg, &out), &out);
        assert_eq!(again, out);
    }

    #[test]
    fn repeated_header_is_kept_as_its_own_column() {
        let reg = registry();
        let header = vec![s!("zillow_id"), s!("price"), s!("price")];
        let previous = Sheet::new(vec![header, vec![s!("1"), s!("$5"), s!("$7")]]);

        let props = parse_sheet(&reg, &previous);
        assert_eq!(props[0].listing_id().unwrap(), "1");
        let out = render_sheet(&reg, &props, &previous);
        let width = reg.len();
        assert_eq!(out.rows[1][reg.column_of("price").unwrap()], "$5");
        assert_eq!(out.rows[0][width], "price");
        assert_eq!(out.rows[1][width], "$7");
    }

    #[test]
    fn data_under_a_blank_header_survives() {
        let reg = registry();
        let previous = Sheet::new(vec![
            vec![s!("zillow_id"), s!("")],
            vec![s!("1"), s!(""), s!("stray")],
        ]);
        let out = render_sheet(&reg, &parse_sheet(&reg, &previous), &previous);
        let width = reg.len();
        assert_eq!(out.rows[0].len(), width + 1);
        assert_eq!(out.rows[1][width], "stray");
    }

    #[test]
    fn column_after_a_narrower_layout_is_not_overwritten() {
        let reg = registry();
        let width = reg.len();
        // old layout: every ranked field but `facts`, then a user column
        let mut header: Vec<String> = reg.names_ranked().into_iter().filter(|n| n != "facts").collect();
        assert_eq!(header.len(), width - 1);
        header.push(s!("agent"));
        let mut row = vec![s!(""); width];
        row[0] = s!("9");
        row[width - 1] = s!("Pat");
        let previous = Sheet::new(vec![header, row]);

        let out = render_sheet(&reg, &parse_sheet(&reg, &previous), &previous);
        assert_eq!(out.rows[0][width - 1], "facts");
        assert_eq!(out.rows[1][width - 1], "");
        assert_eq!(out.rows[0][width], "agent");
        assert_eq!(out.rows[1][width], "Pat");
    }
}
