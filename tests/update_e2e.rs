// tests/update_e2e.rs
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use listing_updater::attributes::{FactParserSet, Registry};
use listing_updater::config::{FetchOptions, SheetOptions};
use listing_updater::progress::Progress;
use listing_updater::scrape::{fetch_all, ListingSource};
use listing_updater::specs::ListingFields;
use listing_updater::store::Sheet;
use listing_updater::updater::Updater;
use listing_updater::{Error, Result};

/// Canned listings; unknown ids fail like a 404.
struct FakeSource(HashMap<String, ListingFields>);

impl ListingSource for FakeSource {
    fn fetch(&self, listing_id: &str) -> Result<ListingFields> {
        self.0
            .get(listing_id)
            .cloned()
            .ok_or_else(|| Error::HttpStatus { id: listing_id.to_string(), status: 404 })
    }
}

fn source() -> FakeSource {
    let mut map = HashMap::new();
    map.insert(
        "12345".to_string(),
        ListingFields {
            price: "$450,000".into(),
            facts: vec!["Built in 2001".into()],
            ..Default::default()
        },
    );
    map.insert(
        "222".to_string(),
        ListingFields { status: "Sold".into(), ..Default::default() },
    );
    FakeSource(map)
}

fn quiet(workers: usize) -> FetchOptions {
    FetchOptions { workers, pause_ms: 0, jitter_ms: 0, ..Default::default() }
}

fn write_sheet(path: &Path, text: &str) -> SheetOptions {
    fs::write(path, text).unwrap();
    SheetOptions { name: "Buy".into(), path: path.to_path_buf() }
}

fn cell<'a>(sheet: &'a Sheet, header: &[String], row: usize, name: &str) -> &'a str {
    let col = header.iter().position(|h| h == name).unwrap();
    sheet.rows[row].get(col).map(String::as_str).unwrap_or("")
}

#[derive(Default)]
struct Counting {
    done: usize,
    failed: Vec<String>,
}

impl Progress for Counting {
    fn item_done(&mut self, _id: &str) { self.done += 1; }
    fn item_failed(&mut self, id: &str, _reason: &str) { self.failed.push(id.to_string()); }
}

#[test]
fn refreshes_rows_and_keeps_failed_ones() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = write_sheet(
        &dir.path().join("buy.tsv"),
        "zillow_id\tprice\tcooling\n12345\t\t\n999\t$100\tGas\n\t$5\t\n",
    );

    let reg = Registry::standard().unwrap();
    let parsers = FactParserSet::standard(&reg).unwrap();
    let src = source();
    let fetch = quiet(1);
    let updater = Updater { registry: &reg, parsers: &parsers, source: &src, fetch: &fetch, dry_run: false };

    let mut progress = Counting::default();
    let summary = updater.update_sheet(&sheet, Some(&mut progress)).unwrap();
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.refreshed, 1);
    assert_eq!(summary.failed, vec!["999"]);
    assert_eq!(summary.without_id, 1);
    assert!(summary.written);
    assert_eq!(progress.done, 1);
    assert_eq!(progress.failed, vec!["999"]);

    let out = Sheet::load(&sheet.path).unwrap();
    let header = out.header().to_vec();
    assert_eq!(header, reg.names_ranked());

    assert_eq!(cell(&out, &header, 1, "zillow_id"), "12345");
    assert_eq!(cell(&out, &header, 1, "built_year"), "2001");
    assert_eq!(cell(&out, &header, 1, "price"), "$450,000");
    assert_eq!(cell(&out, &header, 1, "cooling"), "");
    assert_eq!(cell(&out, &header, 1, "address"), "");

    assert_eq!(cell(&out, &header, 2, "zillow_id"), "999");
    assert_eq!(cell(&out, &header, 2, "price"), "$100");
    assert_eq!(cell(&out, &header, 2, "cooling"), "Gas");
    assert_eq!(cell(&out, &header, 2, "built_year"), "");

    assert_eq!(cell(&out, &header, 3, "price"), "$5");
}

#[test]
fn dry_run_leaves_the_file_alone() {
    let dir = tempfile::tempdir().unwrap();
    let text = "zillow_id\n12345\n";
    let sheet = write_sheet(&dir.path().join("buy.csv"), text);

    let reg = Registry::standard().unwrap();
    let parsers = FactParserSet::standard(&reg).unwrap();
    let src = source();
    let fetch = quiet(1);
    let updater = Updater { registry: &reg, parsers: &parsers, source: &src, fetch: &fetch, dry_run: true };

    let summary = updater.run(std::slice::from_ref(&sheet), None).unwrap();
    assert_eq!(summary.refreshed(), 1);
    assert!(!summary.sheets[0].written);
    assert_eq!(fs::read_to_string(&sheet.path).unwrap(), text);
}

#[test]
fn unknown_trailing_columns_survive_an_update() {
    let dir = tempfile::tempdir().unwrap();
    let reg = Registry::standard().unwrap();
    let mut header = reg.names_ranked();
    header.push("notes".into());
    let mut row = vec![String::new(); reg.len()];
    row[0] = "222".into();
    row.push("call back".into());
    let path = dir.path().join("rent.csv");
    Sheet::new(vec![header, row]).save(&path).unwrap();
    let sheet = SheetOptions { name: "Rent".into(), path };

    let parsers = FactParserSet::standard(&reg).unwrap();
    let src = source();
    let fetch = quiet(1);
    let updater = Updater { registry: &reg, parsers: &parsers, source: &src, fetch: &fetch, dry_run: false };
    updater.update_sheet(&sheet, None).unwrap();

    let out = Sheet::load(&sheet.path).unwrap();
    let header = out.header().to_vec();
    assert_eq!(header.last().map(String::as_str), Some("notes"));
    assert_eq!(cell(&out, &header, 1, "notes"), "call back");
    assert_eq!(cell(&out, &header, 1, "status"), "Sold");
}

#[test]
fn missing_sheet_file_is_created_with_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new").join("buy.csv");
    let sheet = SheetOptions { name: "Buy".into(), path: path.clone() };

    let reg = Registry::standard().unwrap();
    let parsers = FactParserSet::standard(&reg).unwrap();
    let src = source();
    let fetch = quiet(1);
    let updater = Updater { registry: &reg, parsers: &parsers, source: &src, fetch: &fetch, dry_run: false };
    let summary = updater.update_sheet(&sheet, None).unwrap();

    assert_eq!(summary.rows, 0);
    let out = Sheet::load(&path).unwrap();
    assert_eq!(out.header(), reg.names_ranked().as_slice());
    assert!(out.data_rows().is_empty());
}

#[test]
fn parallel_fetch_keeps_input_order() {
    let ids: Vec<String> = ["12345", "nope", "222", "12345", "x"].iter().map(|s| s.to_string()).collect();
    let results = fetch_all(&source(), &ids, &quiet(4), None);

    assert_eq!(results.len(), ids.len());
    assert_eq!(results[0].as_ref().unwrap().price, "$450,000");
    assert!(matches!(results[1], Err(Error::HttpStatus { status: 404, .. })));
    assert_eq!(results[2].as_ref().unwrap().status, "Sold");
    assert_eq!(results[3].as_ref().unwrap().price, "$450,000");
    assert!(results[4].is_err());
}

#[test]
fn rows_below_a_blank_row_are_written_back() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = write_sheet(&dir.path().join("buy.csv"), "zillow_id,price\n1,$5\n,\n2,$6\n");

    let reg = Registry::standard().unwrap();
    let parsers = FactParserSet::standard(&reg).unwrap();
    let src = source();
    let fetch = quiet(1);
    let updater = Updater { registry: &reg, parsers: &parsers, source: &src, fetch: &fetch, dry_run: false };
    let summary = updater.update_sheet(&sheet, None).unwrap();
    assert_eq!(summary.rows, 1);

    let text = fs::read_to_string(&sheet.path).unwrap();
    assert!(text.ends_with("\n,\n2,$6\n"), "{text}");
    let out = Sheet::load(&sheet.path).unwrap();
    assert_eq!(out.tail, vec![vec!["", ""], vec!["2", "$6"]]);
}

#[test]
fn notes_column_between_known_columns_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = write_sheet(&dir.path().join("buy.csv"), "zillow_id,my_notes,price\n1,call agent,$5\n");

    let reg = Registry::standard().unwrap();
    let parsers = FactParserSet::standard(&reg).unwrap();
    let src = source();
    let fetch = quiet(1);
    let updater = Updater { registry: &reg, parsers: &parsers, source: &src, fetch: &fetch, dry_run: false };
    updater.update_sheet(&sheet, None).unwrap();

    let out = Sheet::load(&sheet.path).unwrap();
    let header = out.header().to_vec();
    assert_eq!(header.len(), reg.len() + 1);
    assert_eq!(cell(&out, &header, 1, "my_notes"), "call agent");
    assert_eq!(cell(&out, &header, 1, "price"), "$5");
}

#[test]
fn one_progress_sink_spans_every_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let buy = write_sheet(&dir.path().join("buy.csv"), "zillow_id\n12345\n");
    let rent = SheetOptions {
        name: "Rent".into(),
        ..write_sheet(&dir.path().join("rent.csv"), "zillow_id\n222\n404\n")
    };

    let reg = Registry::standard().unwrap();
    let parsers = FactParserSet::standard(&reg).unwrap();
    let src = source();
    let fetch = quiet(2);
    let updater = Updater { registry: &reg, parsers: &parsers, source: &src, fetch: &fetch, dry_run: false };

    let mut progress = Counting::default();
    let summary = updater.run(&[buy, rent], Some(&mut progress)).unwrap();
    assert_eq!(summary.refreshed(), 2);
    assert_eq!(summary.failed(), 1);
    assert_eq!(progress.done, 2);
    assert_eq!(progress.failed, vec!["404"]);
}
