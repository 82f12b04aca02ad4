// src/updater.rs
//
// Batch driver: for each sheet, load → assemble → fetch → merge → render → save.

use std::path::PathBuf;

use crate::{
    attributes::{FactParserSet, Registry},
    config::options::{AppOptions, FetchOptions, SheetOptions},
    error::Result,
    progress::Progress,
    property::{parse_sheet, render_sheet},
    scrape::{fetch_all, HttpListingSource, ListingSource},
    store::Sheet,
};

/// What happened to one sheet.
#[derive(Clone, Debug, Default)]
pub struct SheetSummary {
    pub name: String,
    pub path: PathBuf,
    /// Data rows in the sheet (header excluded).
    pub rows: usize,
    pub refreshed: usize,
    /// Listing ids whose fetch failed; their rows were written back unchanged.
    pub failed: Vec<String>,
    /// Rows with no listing id.
    pub without_id: usize,
    pub written: bool,
}

#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub sheets: Vec<SheetSummary>,
}

impl RunSummary {
    pub fn refreshed(&self) -> usize { self.sheets.iter().map(|s| s.refreshed).sum() }
    pub fn failed(&self) -> usize { self.sheets.iter().map(|s| s.failed.len()).sum() }
}

/// Shared, read-only pieces of a run.
pub struct Updater<'a> {
    pub registry: &'a Registry,
    pub parsers: &'a FactParserSet,
    pub source: &'a dyn ListingSource,
    pub fetch: &'a FetchOptions,
    /// Do everything except writing the sheet files.
    pub dry_run: bool,
}

impl Updater<'_> {
    pub fn run<'p>(
        &self,
        sheets: &[SheetOptions],
        mut progress: Option<&mut (dyn Progress + 'p)>,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for sheet in sheets {
            summary.sheets.push(self.update_sheet(sheet, progress.as_deref_mut())?);
        }
        Ok(summary)
    }

    pub fn update_sheet<'p>(
        &self,
        sheet: &SheetOptions,
        mut progress: Option<&mut (dyn Progress + 'p)>,
    ) -> Result<SheetSummary> {
        let span = tracing::info_span!("sheet", name = %sheet.name);
        let _enter = span.enter();

        let previous = Sheet::load(&sheet.path)?;
        let mut properties = parse_sheet(self.registry, &previous);

        let mut summary = SheetSummary {
            name: sheet.name.clone(),
            path: sheet.path.clone(),
            rows: properties.len(),
            ..Default::default()
        };

        // (row index, listing id) for every row that can be refreshed
        let mut targets: Vec<(usize, String)> = Vec::with_capacity(properties.len());
        for (ix, p) in properties.iter().enumerate() {
            match p.listing_id() {
                Ok(id) => targets.push((ix, s!(id))),
                Err(e) => {
                    tracing::warn!(row = ix + 1, "skipping row: {e}");
                    summary.without_id += 1;
                }
            }
        }

        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Updating {} ({} listings)…", sheet.name, targets.len()));
            p.begin(targets.len());
        }

        let ids: Vec<String> = targets.iter().map(|(_, id)| id.clone()).collect();
        let fetched = fetch_all(self.source, &ids, self.fetch, progress.as_deref_mut());

        for ((ix, id), result) in targets.into_iter().zip(fetched) {
            match result {
                Ok(listing) => {
                    properties[ix].merge_listing(self.registry, self.parsers, &listing);
                    summary.refreshed += 1;
                    tracing::debug!(%id, "merged");
                }
                Err(e) => {
                    tracing::warn!(%id, "fetch failed, row kept: {e}");
                    summary.failed.push(id);
                }
            }
        }

        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }

        let rendered = render_sheet(self.registry, &properties, &previous);
        if self.dry_run {
            tracing::info!("dry run, not writing {}", sheet.path.display());
        } else {
            rendered.save(&sheet.path)?;
            summary.written = true;
        }

        tracing::info!(
            rows = summary.rows,
            refreshed = summary.refreshed,
            failed = summary.failed.len(),
            "sheet done"
        );
        Ok(summary)
    }
}

/// Build the registry, fact parsers and HTTP source from `opts` and update
/// every configured sheet. Catalog errors surface here, before any I/O.
pub fn run<'p>(
    opts: &AppOptions,
    dry_run: bool,
    progress: Option<&mut (dyn Progress + 'p)>,
) -> Result<RunSummary> {
    let registry = Registry::standard()?;
    let parsers = FactParserSet::standard(&registry)?;
    let source = HttpListingSource::new(&opts.fetch)?;

    let updater = Updater {
        registry: &registry,
        parsers: &parsers,
        source: &source,
        fetch: &opts.fetch,
        dry_run,
    };
    updater.run(&opts.sheets, progress)
}
