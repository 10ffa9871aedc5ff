//! Reads category scores from the Lighthouse JSON artifact.
//!
//! The JSON report carries each category score as a fraction in 0..=1 (or
//! null when the category could not be computed); the report UI shows them
//! as rounded 0-100 values, and the summary workbook uses the same scale.

use crate::{Error, Result};
use pharos_core::scores::ScoreSet;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct LighthouseReport {
    categories: Categories,
}

#[derive(Debug, Deserialize)]
struct Categories {
    performance: Category,
    accessibility: Category,
    #[serde(rename = "best-practices")]
    best_practices: Category,
    seo: Category,
}

#[derive(Debug, Deserialize)]
struct Category {
    score: Option<f64>,
}

/// Extract the four category scores from the JSON artifact at `path`
pub fn read_scores(path: &Path) -> Result<ScoreSet> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| Error::Extraction(format!("cannot read {}: {e}", path.display())))?;
    let report: LighthouseReport = serde_json::from_str(&raw)
        .map_err(|e| Error::Extraction(format!("cannot parse {}: {e}", path.display())))?;

    let categories = report.categories;
    Ok(ScoreSet {
        performance: to_display(categories.performance, "performance")?,
        accessibility: to_display(categories.accessibility, "accessibility")?,
        best_practices: to_display(categories.best_practices, "best-practices")?,
        seo: to_display(categories.seo, "seo")?,
    })
}

fn to_display(category: Category, name: &str) -> Result<f64> {
    let score = category
        .score
        .ok_or_else(|| Error::Extraction(format!("category {name} has no score")))?;
    Ok((score * 100.0).round())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_report(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("report.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn reads_scores_and_scales_to_hundred() {
        let tmp = tempfile::tempdir().unwrap();
        // Unrelated report fields are ignored
        let path = write_report(
            tmp.path(),
            r#"{
                "lighthouseVersion": "11.0.0",
                "requestedUrl": "https://example.com",
                "categories": {
                    "performance": {"id": "performance", "score": 0.98},
                    "accessibility": {"id": "accessibility", "score": 1},
                    "best-practices": {"id": "best-practices", "score": 0.925},
                    "seo": {"id": "seo", "score": 0.85}
                }
            }"#,
        );

        let scores = read_scores(&path).unwrap();
        assert_eq!(scores.performance, 98.0);
        assert_eq!(scores.accessibility, 100.0);
        assert_eq!(scores.best_practices, 93.0);
        assert_eq!(scores.seo, 85.0);
    }

    #[test]
    fn null_score_is_an_extraction_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_report(
            tmp.path(),
            r#"{"categories": {
                "performance": {"score": null},
                "accessibility": {"score": 0.9},
                "best-practices": {"score": 0.9},
                "seo": {"score": 0.9}
            }}"#,
        );

        let err = read_scores(&path).unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
        assert!(err.to_string().contains("performance"));
    }

    #[test]
    fn missing_category_is_an_extraction_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_report(
            tmp.path(),
            r#"{"categories": {"performance": {"score": 0.5}}}"#,
        );

        assert!(matches!(
            read_scores(&path).unwrap_err(),
            Error::Extraction(_)
        ));
    }

    #[test]
    fn missing_file_is_an_extraction_error() {
        assert!(matches!(
            read_scores(Path::new("/nonexistent/report.json")).unwrap_err(),
            Error::Extraction(_)
        ));
    }
}
