mod error;
mod scrape;
mod session;

pub use error::{Error, Result};
pub use scrape::scrape_scores;
pub use session::BrowserSession;
