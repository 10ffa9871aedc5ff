//! Scrapes category scores out of a rendered Lighthouse HTML report.
//!
//! The four gauges are addressed by fixed position in the report's DOM, so
//! this lookup is tied to one report template: a layout change upstream
//! makes the elements come back empty instead of failing structurally.
//! The JSON artifact is the preferred score source; this path exists for
//! parity with `--scrape-html`.

use crate::{BrowserSession, Error, Result};
use chromiumoxide::page::Page;
use pharos_core::scores::ScoreSet;
use std::path::Path;

/// XPath of the nth score gauge (1-based) in the report header, in
/// performance / accessibility / best-practices / seo order
fn gauge_xpath(position: usize) -> String {
    format!("/html/body/article/div[2]/div[2]/div/div/div/div[2]/a[{position}]/div[2]")
}

async fn gauge_text(page: &Page, position: usize) -> Result<String> {
    let xpath = gauge_xpath(position);
    let expr = format!(
        "document.evaluate({xpath:?}, document, null, \
         XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue?.textContent ?? null"
    );

    let value: Option<String> = page
        .evaluate(expr)
        .await?
        .into_value()
        .map_err(|e| Error::Extraction(format!("gauge {position}: {e}")))?;

    value.ok_or_else(|| Error::Extraction(format!("no score element at gauge {position}")))
}

/// Load the HTML report at `html_path` and read the four gauge values
pub async fn scrape_scores(session: &BrowserSession, html_path: &Path) -> Result<ScoreSet> {
    let url = format!("file://{}", html_path.display());
    let page = session.goto(&url).await?;

    let mut values = [0f64; 4];
    for (i, value) in values.iter_mut().enumerate() {
        let text = gauge_text(&page, i + 1).await?;
        *value = text.trim().parse().map_err(|_| {
            Error::Extraction(format!("gauge {} text {:?} is not numeric", i + 1, text))
        })?;
    }

    let _ = page.close().await;
    Ok(ScoreSet::from_array(values))
}
