//! Reads the target URL list for an environment from the input workbook.
//!
//! One sheet per environment; URLs live under the `URL Link` column. A
//! missing sheet is fatal, an empty one just means there is nothing to do.

use crate::{Error, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;

/// Header label of the column holding the target URLs
pub const URL_COLUMN: &str = "URL Link";

/// Return the ordered URL list of the sheet named after `environment`.
///
/// Cell text is trimmed once here; everything downstream matches URLs by
/// exact string equality. Empty and whitespace-only cells are skipped.
pub fn read_urls(path: &Path, environment: &str) -> Result<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
        Error::Config(format!(
            "cannot open input workbook {}: {e}",
            path.display()
        ))
    })?;

    let range = workbook.worksheet_range(environment).map_err(|_| {
        Error::Config(format!(
            "sheet {environment} does not exist in {}",
            path.display()
        ))
    })?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        tracing::warn!("sheet {environment} is empty");
        return Ok(Vec::new());
    };

    let Some(url_col) = header
        .iter()
        .position(|cell| matches!(cell, Data::String(s) if s.trim() == URL_COLUMN))
    else {
        tracing::warn!("sheet {environment} has no {URL_COLUMN:?} column");
        return Ok(Vec::new());
    };

    let mut urls = Vec::new();
    for row in rows {
        match row.get(url_col) {
            Some(Data::String(s)) if !s.trim().is_empty() => urls.push(s.trim().to_string()),
            Some(Data::Empty) | None => {}
            Some(other) => {
                tracing::debug!("ignoring non-text cell under {URL_COLUMN:?}: {other:?}")
            }
        }
    }

    if urls.is_empty() {
        tracing::warn!("no URLs found in sheet {environment}");
    }

    Ok(urls)
}
