// src/store.rs
//
// A worksheet on disk: one CSV/TSV file, row 0 is the header naming each
// column's field, data rows follow contiguously. Whatever sits from the first
// blank row down is not ours; it is kept and written back as it was.

use std::{fs, path::Path};

use crate::config::options::SheetFormat;
use crate::csv::parse_rows;
use crate::error::Result;
use crate::file::write_rows;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sheet {
    /// Row 0 is the header. Rows may have different lengths.
    pub rows: Vec<Vec<String>>,
    /// The first blank row and everything below it, verbatim.
    pub tail: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(rows: Vec<Vec<String>>) -> Self { Self { rows, tail: Vec::new() } }

    /// Load a sheet file. A missing file is an empty sheet.
    /// Rows end at the first blank row; the rest goes to `tail`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "sheet file missing, starting empty");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        let sheet = Self::parse(&text, SheetFormat::from_path(path));
        tracing::debug!(path = %path.display(), rows = sheet.rows.len(), "sheet loaded");
        Ok(sheet)
    }

    pub fn parse(text: &str, format: SheetFormat) -> Self {
        let mut rows = parse_rows(text, format.delim());
        let tail = match rows.iter().position(|r| is_blank(r)) {
            Some(gap) => rows.split_off(gap),
            None => Vec::new(),
        };
        if tail.len() > 1 {
            tracing::debug!(kept = tail.len() - 1, "rows below first blank row left untouched");
        }
        Self { rows, tail }
    }

    /// Writes `rows`, then `tail`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let sep = SheetFormat::from_path(path).delim();
        write_rows(path, self.rows.iter().chain(&self.tail), sep)?;
        tracing::debug!(path = %path.display(), rows = self.rows.len(), tail = self.tail.len(), "sheet saved");
        Ok(())
    }

    pub fn header(&self) -> &[String] {
        self.rows.first().map(|r| r.as_slice()).unwrap_or(&[])
    }

    /// Data rows (everything after the header).
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}
