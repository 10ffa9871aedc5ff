//! The audit pipeline: URLs in input order, device profiles in desktop,
//! mobile, tablet order within each URL, one pair at a time.
//!
//! Pair failures are recorded in the run summary and skipped; only
//! pre-flight errors (bad input workbook, missing sheet, unresolvable
//! lighthouse command) abort the run.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use pharos_audit::LighthouseRunner;
use pharos_browser::BrowserSession;
use pharos_core::device::DeviceProfile;
use pharos_core::input;
use pharos_core::layout::{RunLayout, RunStamp};
use pharos_core::report;
use pharos_core::summary::{FailureStage, PairFailure, RunSummary};
use std::path::PathBuf;
use std::time::Duration;

pub struct RunOptions {
    pub environment: String,
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub scrape_html: bool,
    pub lighthouse: Option<PathBuf>,
}

pub fn execute(options: RunOptions) -> Result<RunSummary> {
    // Create tokio runtime for async operations
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(run(options));

    // Shut down promptly even if the browser left blocking tasks behind
    runtime.shutdown_timeout(Duration::from_millis(100));

    result
}

async fn run(options: RunOptions) -> Result<RunSummary> {
    let urls = input::read_urls(&options.input, &options.environment)?;
    if urls.is_empty() {
        println!(
            "No URLs found for environment {}. Skipping test execution.",
            options.environment
        );
        return Ok(RunSummary::new());
    }

    let runner = LighthouseRunner::locate(options.lighthouse.clone())
        .context("cannot resolve the lighthouse command")?;

    // One timestamp for the whole run: directory and workbook naming agree
    // even when the run spans midnight
    let stamp = RunStamp::now();
    let layout = RunLayout::new(&options.output_dir, &options.environment, &stamp);
    layout.create_dirs()?;
    tracing::info!("audit artifacts under {}", layout.test_dir().display());

    let session = if options.scrape_html {
        Some(BrowserSession::launch().await?)
    } else {
        None
    };

    let bar = ProgressBar::new((urls.len() * DeviceProfile::ALL.len()) as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut summary = RunSummary::new();
    for url in &urls {
        for device in DeviceProfile::ALL {
            bar.set_message(format!("{device} {url}"));
            match audit_pair(&runner, session.as_ref(), &layout, url, device).await {
                Ok(()) => summary.record_success(),
                Err(failure) => {
                    tracing::error!(
                        "{} failed for {} on {}: {}",
                        failure.stage,
                        failure.url,
                        failure.device,
                        failure.message
                    );
                    summary.record_failure(failure);
                }
            }
            bar.inc(1);
        }
    }
    bar.finish_and_clear();

    // The session is released on every exit path: per-pair errors are all
    // caught above, so control always reaches this teardown
    if let Some(session) = session {
        if let Err(e) = session.close().await {
            tracing::warn!("browser session teardown failed: {e}");
        }
    }

    Ok(summary)
}

async fn audit_pair(
    runner: &LighthouseRunner,
    session: Option<&BrowserSession>,
    layout: &RunLayout,
    url: &str,
    device: DeviceProfile,
) -> std::result::Result<(), PairFailure> {
    // Best-effort warm-up of the target before auditing; Lighthouse
    // navigates on its own, so a failure here is not load-bearing
    if let Some(session) = session {
        if let Err(e) = session.goto(url).await {
            tracing::debug!("warm-up navigation failed for {url}: {e}");
        }
    }

    let artifacts = runner
        .run(
            url,
            &layout.json_path(device, url),
            &layout.html_dir(device),
            device,
        )
        .await
        .map_err(|e| PairFailure::new(url, device, FailureStage::Audit, e))?;

    let scores = match session {
        Some(session) => pharos_browser::scrape_scores(session, &artifacts.html)
            .await
            .map_err(|e| PairFailure::new(url, device, FailureStage::Extraction, e))?,
        None => pharos_audit::read_scores(&artifacts.json)
            .map_err(|e| PairFailure::new(url, device, FailureStage::Extraction, e))?,
    };

    report::record_scores(
        &layout.workbook_path(),
        layout.environment(),
        layout.date(),
        url,
        device,
        scores,
    )
    .map_err(|e| PairFailure::new(url, device, FailureStage::ReportWrite, e))?;

    Ok(())
}
