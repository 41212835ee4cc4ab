pub use crate::corpus::{Corpus, Language, TextSample};
pub use crate::cost::{CostEstimate, PricingConfig, PricingTier, UsageScenario};
pub use crate::error::Error;
pub use crate::stats::{BucketScheme, TokenStatistics};

pub type Result<T> = std::result::Result<T, Error>;
