pub mod device;
pub mod error;
pub mod input;
pub mod layout;
pub mod report;
pub mod scores;
pub mod summary;

pub use device::DeviceProfile;
pub use error::{Error, Result};
pub use scores::{ScoreBand, ScoreSet};
