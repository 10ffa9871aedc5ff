//! Drives the external `lighthouse` CLI.
//!
//! One audit of a (URL, device) pair is two invocations, JSON output first
//! and HTML second. If either invocation fails the whole sequence is
//! retried; the retry budget covers the sequence, not the invocation.

use crate::{Error, Result};
use pharos_core::device::DeviceProfile;
use pharos_core::layout::sanitize_url;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Per-invocation page-load cap passed as `--max-wait-for-load`
pub const MAX_WAIT_FOR_LOAD_MS: u64 = 45_000;

/// Total attempts per (URL, device) pair, including the first
pub const DEFAULT_ATTEMPTS: u32 = 3;

/// Paths of the artifacts one successful audit produced
#[derive(Debug, Clone)]
pub struct AuditArtifacts {
    pub json: PathBuf,
    pub html: PathBuf,
}

/// Locates and invokes the Lighthouse executable
pub struct LighthouseRunner {
    program: PathBuf,
    leading_args: Vec<String>,
    attempts: u32,
}

impl LighthouseRunner {
    /// Resolve the Lighthouse command: an explicit path if given, else
    /// `lighthouse` on PATH, else `npx lighthouse`.
    pub fn locate(custom: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = custom {
            if !path.exists() {
                return Err(Error::Audit(format!(
                    "lighthouse not found at: {}",
                    path.display()
                )));
            }
            return Ok(Self::with_program(path, Vec::new()));
        }

        if let Ok(path) = which::which("lighthouse") {
            return Ok(Self::with_program(path, Vec::new()));
        }

        if let Ok(npx) = which::which("npx") {
            tracing::debug!("lighthouse not on PATH, falling back to npx");
            return Ok(Self::with_program(npx, vec!["lighthouse".to_string()]));
        }

        Err(Error::Audit(
            "lighthouse command not found. Install the Lighthouse CLI or pass --lighthouse."
                .to_string(),
        ))
    }

    /// Use a specific program, optionally with leading arguments (the npx
    /// fallback runs as `npx lighthouse ...`)
    pub fn with_program(program: PathBuf, leading_args: Vec<String>) -> Self {
        Self {
            program,
            leading_args,
            attempts: DEFAULT_ATTEMPTS,
        }
    }

    /// Audit `url` with `device` emulation, writing the JSON artifact to
    /// `json_path` and the HTML artifact into `html_dir`.
    pub async fn run(
        &self,
        url: &str,
        json_path: &Path,
        html_dir: &Path,
        device: DeviceProfile,
    ) -> Result<AuditArtifacts> {
        let html_path = html_dir.join(format!("{}.html", sanitize_url(url)));

        let mut last_error = None;
        for attempt in 1..=self.attempts {
            tracing::info!(
                "running lighthouse for {url} on {device} (attempt {attempt}/{})",
                self.attempts
            );

            let result = async {
                self.invoke(url, "json", json_path, device).await?;
                self.invoke(url, "html", &html_path, device).await
            }
            .await;

            match result {
                Ok(()) => {
                    tracing::info!("lighthouse audit completed for {url} on {device}");
                    return Ok(AuditArtifacts {
                        json: json_path.to_path_buf(),
                        html: html_path,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        "lighthouse attempt {attempt}/{} failed for {url} on {device}: {e}",
                        self.attempts
                    );
                    last_error = Some(e);
                }
            }
        }

        let cause = last_error.map(|e| e.to_string()).unwrap_or_default();
        Err(Error::Audit(format!(
            "lighthouse failed for {url} on {device} after {} attempts: {cause}",
            self.attempts
        )))
    }

    async fn invoke(
        &self,
        url: &str,
        output_format: &str,
        output_path: &Path,
        device: DeviceProfile,
    ) -> Result<()> {
        let output = Command::new(&self.program)
            .args(&self.leading_args)
            .arg(url)
            .arg(format!("--output={output_format}"))
            .arg("--output-path")
            .arg(output_path)
            .args(device.lighthouse_flags())
            .arg("--max-wait-for-load")
            .arg(MAX_WAIT_FOR_LOAD_MS.to_string())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            return Err(Error::Audit(format!(
                "lighthouse exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }
}
