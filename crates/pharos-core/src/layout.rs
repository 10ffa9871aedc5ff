//! On-disk layout of one audit run.
//!
//! Every run owns a timestamped directory under `Performance Test Result`
//! holding the JSON and HTML artifacts per device profile, plus the report
//! workbook at its root:
//!
//! ```text
//! Performance Test Result/{ENV}/{date} {time} {ENV} Performance Testing/
//!     JSON/{desktop,mobile,tablet}/{sanitized-url}.json
//!     HTML/{desktop,mobile,tablet}/{sanitized-url}.html
//!     {ENV} {date} LH Audit report.xlsx
//! ```

use crate::device::DeviceProfile;
use crate::Result;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

const RESULT_ROOT: &str = "Performance Test Result";

/// Run-scoped timestamp, computed once at startup and threaded to every
/// consumer so directory and workbook naming cannot diverge across midnight.
#[derive(Debug, Clone)]
pub struct RunStamp {
    date: String,
    time: String,
}

impl RunStamp {
    pub fn now() -> Self {
        Self::from_datetime(Local::now())
    }

    pub fn from_datetime(at: DateTime<Local>) -> Self {
        Self {
            date: at.format("%m-%d-%Y").to_string(),
            time: at.format("%I.%M%p").to_string(),
        }
    }

    /// Calendar day as `MM-DD-YYYY`
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Clock time as `HH.MMAM`/`HH.MMPM`
    pub fn time(&self) -> &str {
        &self.time
    }
}

/// Resolved paths of one run's output tree
#[derive(Debug, Clone)]
pub struct RunLayout {
    environment: String,
    date: String,
    test_dir: PathBuf,
}

impl RunLayout {
    pub fn new(base_dir: &Path, environment: &str, stamp: &RunStamp) -> Self {
        let test_dir = base_dir.join(RESULT_ROOT).join(environment).join(format!(
            "{} {} {} Performance Testing",
            stamp.date(),
            stamp.time(),
            environment
        ));

        Self {
            environment: environment.to_string(),
            date: stamp.date().to_string(),
            test_dir,
        }
    }

    /// Create the JSON and HTML artifact directories for every device profile
    pub fn create_dirs(&self) -> Result<()> {
        for device in DeviceProfile::ALL {
            std::fs::create_dir_all(self.json_dir(device))?;
            std::fs::create_dir_all(self.html_dir(device))?;
        }
        Ok(())
    }

    pub fn test_dir(&self) -> &Path {
        &self.test_dir
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Calendar day the run was stamped with, `MM-DD-YYYY`
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn json_dir(&self, device: DeviceProfile) -> PathBuf {
        self.test_dir.join("JSON").join(device.as_str())
    }

    pub fn html_dir(&self, device: DeviceProfile) -> PathBuf {
        self.test_dir.join("HTML").join(device.as_str())
    }

    pub fn json_path(&self, device: DeviceProfile, url: &str) -> PathBuf {
        self.json_dir(device)
            .join(format!("{}.json", sanitize_url(url)))
    }

    pub fn html_path(&self, device: DeviceProfile, url: &str) -> PathBuf {
        self.html_dir(device)
            .join(format!("{}.html", sanitize_url(url)))
    }

    /// The report workbook at the test-run directory root
    pub fn workbook_path(&self) -> PathBuf {
        self.test_dir
            .join(crate::report::ReportBook::file_name(
                &self.environment,
                &self.date,
            ))
    }
}

/// Map a URL to a filesystem-safe name: every character outside
/// `[A-Za-z0-9]` becomes `_`, then lowercase. Distinct URLs differing only
/// in punctuation collide; callers accept that.
pub fn sanitize_url(url: &str) -> String {
    url.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
