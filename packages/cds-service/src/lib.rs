pub mod eligibility;
pub mod postprocess;
pub mod ranked;

mod error;

pub use eligibility::EligibilityFilter;
pub use error::{Error, Result};
pub use postprocess::{PostprocessReport, ResultSet, TopicTally};
pub use ranked::Ranked;
