//! The per-environment-per-day report workbook.
//!
//! The workbook is modeled in memory as an ordered list of URL rows, each
//! holding up to three per-device score groups. Rendering is a pure function
//! of that model (see `render`), so every save rewrites the whole file and
//! reopening an existing workbook on the same day picks up exactly where the
//! previous run left off.

mod render;

use crate::device::DeviceProfile;
use crate::scores::ScoreSet;
use crate::{Error, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;

/// First data row, 0-indexed. Rows 0-1 are the title block, row 2 is a
/// spacer, rows 3-4 are the two-row header.
pub(crate) const FIRST_DATA_ROW: u32 = 5;

/// One URL row: key plus one optional score group per device profile
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub url: String,
    pub scores: [Option<ScoreSet>; 3],
}

/// In-memory model of one environment+day workbook
#[derive(Debug)]
pub struct ReportBook {
    environment: String,
    date: String,
    rows: Vec<ReportRow>,
}

impl ReportBook {
    pub fn new(environment: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            date: date.into(),
            rows: Vec::new(),
        }
    }

    pub fn file_name(environment: &str, date: &str) -> String {
        format!("{environment} {date} LH Audit report.xlsx")
    }

    pub fn sheet_name(&self) -> String {
        format!("{} {} LH report", self.environment, self.date)
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Load the workbook at `path` if it exists, otherwise start empty
    pub fn open_or_new(path: &Path, environment: &str, date: &str) -> Result<Self> {
        if path.exists() {
            Self::load(path, environment, date)
        } else {
            Ok(Self::new(environment, date))
        }
    }

    fn load(path: &Path, environment: &str, date: &str) -> Result<Self> {
        let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
            Error::ReportWrite(format!(
                "cannot reopen report workbook {}: {e}",
                path.display()
            ))
        })?;

        let mut book = Self::new(environment, date);
        let range = match workbook.worksheet_range(&book.sheet_name()) {
            Ok(range) => range,
            Err(_) => {
                tracing::warn!(
                    "workbook {} has no sheet {:?}; starting a fresh one",
                    path.display(),
                    book.sheet_name()
                );
                return Ok(book);
            }
        };

        // Scan from the first data row until the URL column goes blank
        let mut row = FIRST_DATA_ROW;
        loop {
            let url = match range.get_value((row, 0)) {
                Some(Data::String(s)) if !s.is_empty() => s.clone(),
                _ => break,
            };

            let mut scores = [None; 3];
            for device in DeviceProfile::ALL {
                let mut values = [0f64; 4];
                let mut complete = true;
                for (i, value) in values.iter_mut().enumerate() {
                    let col = (device.score_column() + i as u16) as u32;
                    match range.get_value((row, col)) {
                        Some(Data::Float(f)) => *value = *f,
                        Some(Data::Int(n)) => *value = *n as f64,
                        _ => {
                            complete = false;
                            break;
                        }
                    }
                }
                if complete {
                    scores[device.index()] = Some(ScoreSet::from_array(values));
                }
            }

            book.rows.push(ReportRow { url, scores });
            row += 1;
        }

        Ok(book)
    }

    /// Update the row keyed by `url` (exact string match), appending a new
    /// row if none exists. Only the given device's score group is touched.
    pub fn upsert(&mut self, url: &str, device: DeviceProfile, scores: ScoreSet) {
        match self.rows.iter_mut().find(|row| row.url == url) {
            Some(row) => row.scores[device.index()] = Some(scores),
            None => {
                let mut row = ReportRow {
                    url: url.to_string(),
                    scores: [None; 3],
                };
                row.scores[device.index()] = Some(scores);
                self.rows.push(row);
            }
        }
    }

    /// Rewrite the whole workbook at `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut workbook = render::render(self)?;
        workbook.save(path)?;
        Ok(())
    }
}

/// Fold one (URL, device) score set into the workbook at `path`, creating it
/// on first use. The file is rewritten after every update; that is fine at
/// this workload's volume.
pub fn record_scores(
    path: &Path,
    environment: &str,
    date: &str,
    url: &str,
    device: DeviceProfile,
    scores: ScoreSet,
) -> Result<()> {
    let mut book = ReportBook::open_or_new(path, environment, date)?;
    book.upsert(url, device, scores);
    book.save(path)?;
    tracing::info!("report updated: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const DATE: &str = "08-07-2026";

    fn scores(base: f64) -> ScoreSet {
        ScoreSet {
            performance: base,
            accessibility: base + 1.0,
            best_practices: base + 2.0,
            seo: base + 3.0,
        }
    }

    fn workbook_path(dir: &Path) -> PathBuf {
        dir.join(ReportBook::file_name("DEV", DATE))
    }

    #[test]
    fn save_writes_an_xlsx_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = workbook_path(tmp.path());

        let mut book = ReportBook::new("DEV", DATE);
        book.upsert("https://example.com", DeviceProfile::Desktop, scores(90.0));
        book.save(&path).unwrap();

        // XLSX files are ZIP archives
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn layout_renders_title_and_headers() {
        let tmp = tempfile::tempdir().unwrap();
        let path = workbook_path(tmp.path());

        ReportBook::new("DEV", DATE).save(&path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook
            .worksheet_range("DEV 08-07-2026 LH report")
            .unwrap();

        assert_eq!(
            range.get_value((0, 0)),
            Some(&Data::String("Environment: DEV".into()))
        );
        assert_eq!(
            range.get_value((1, 0)),
            Some(&Data::String("Lighthouse 08-07-2026".into()))
        );
        assert_eq!(range.get_value((3, 0)), Some(&Data::String("URL".into())));
        assert_eq!(
            range.get_value((3, 1)),
            Some(&Data::String("Desktop".into()))
        );
        assert_eq!(range.get_value((3, 5)), Some(&Data::String("Mobile".into())));
        assert_eq!(range.get_value((3, 9)), Some(&Data::String("Tablet".into())));
        // Metric labels repeat per group
        for first in [1u32, 5, 9] {
            assert_eq!(
                range.get_value((4, first)),
                Some(&Data::String("Performance".into()))
            );
            assert_eq!(
                range.get_value((4, first + 3)),
                Some(&Data::String("SEO".into()))
            );
        }
    }

    #[test]
    fn upsert_updates_existing_row_in_place() {
        let mut book = ReportBook::new("DEV", DATE);
        book.upsert("https://example.com", DeviceProfile::Desktop, scores(50.0));
        book.upsert("https://example.com", DeviceProfile::Desktop, scores(90.0));

        assert_eq!(book.rows().len(), 1);
        let desktop = book.rows()[0].scores[DeviceProfile::Desktop.index()].unwrap();
        assert_eq!(desktop.performance, 90.0);
    }

    #[test]
    fn url_matching_is_exact_and_case_sensitive() {
        let mut book = ReportBook::new("DEV", DATE);
        book.upsert("https://example.com", DeviceProfile::Desktop, scores(90.0));
        book.upsert("https://Example.com", DeviceProfile::Desktop, scores(50.0));

        assert_eq!(book.rows().len(), 2);
    }

    #[test]
    fn rerunning_same_pair_does_not_grow_the_workbook() {
        let tmp = tempfile::tempdir().unwrap();
        let path = workbook_path(tmp.path());

        for _ in 0..2 {
            record_scores(
                &path,
                "DEV",
                DATE,
                "https://example.com",
                DeviceProfile::Desktop,
                scores(90.0),
            )
            .unwrap();
        }

        let book = ReportBook::open_or_new(&path, "DEV", DATE).unwrap();
        assert_eq!(book.rows().len(), 1);
    }

    #[test]
    fn tablet_update_leaves_other_device_groups_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let path = workbook_path(tmp.path());

        record_scores(
            &path,
            "DEV",
            DATE,
            "https://example.com",
            DeviceProfile::Desktop,
            scores(90.0),
        )
        .unwrap();
        record_scores(
            &path,
            "DEV",
            DATE,
            "https://example.com",
            DeviceProfile::Tablet,
            scores(40.0),
        )
        .unwrap();

        let book = ReportBook::open_or_new(&path, "DEV", DATE).unwrap();
        assert_eq!(book.rows().len(), 1);

        let row = &book.rows()[0];
        assert_eq!(
            row.scores[DeviceProfile::Desktop.index()],
            Some(scores(90.0))
        );
        assert_eq!(row.scores[DeviceProfile::Mobile.index()], None);
        assert_eq!(
            row.scores[DeviceProfile::Tablet.index()],
            Some(scores(40.0))
        );
    }

    #[test]
    fn saved_scores_land_in_the_device_column_group() {
        let tmp = tempfile::tempdir().unwrap();
        let path = workbook_path(tmp.path());

        record_scores(
            &path,
            "DEV",
            DATE,
            "https://example.com",
            DeviceProfile::Mobile,
            ScoreSet {
                performance: 98.0,
                accessibility: 100.0,
                best_practices: 92.0,
                seo: 85.0,
            },
        )
        .unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook
            .worksheet_range("DEV 08-07-2026 LH report")
            .unwrap();

        assert_eq!(
            range.get_value((FIRST_DATA_ROW, 0)),
            Some(&Data::String("https://example.com".into()))
        );
        // Mobile group starts at column 5; desktop columns stay blank
        assert_eq!(range.get_value((FIRST_DATA_ROW, 5)), Some(&Data::Float(98.0)));
        assert_eq!(
            range.get_value((FIRST_DATA_ROW, 6)),
            Some(&Data::Float(100.0))
        );
        assert_eq!(range.get_value((FIRST_DATA_ROW, 7)), Some(&Data::Float(92.0)));
        assert_eq!(range.get_value((FIRST_DATA_ROW, 8)), Some(&Data::Float(85.0)));
        assert_eq!(
            range.get_value((FIRST_DATA_ROW, 1)),
            Some(&Data::String(String::new()))
        );
    }

    #[test]
    fn rows_keep_discovery_order() {
        let mut book = ReportBook::new("DEV", DATE);
        book.upsert("https://b.example.com", DeviceProfile::Desktop, scores(90.0));
        book.upsert("https://a.example.com", DeviceProfile::Desktop, scores(90.0));

        let urls: Vec<_> = book.rows().iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://b.example.com", "https://a.example.com"]);
    }
}
