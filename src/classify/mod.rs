pub mod engine;
pub mod profile;
pub mod seo;
pub mod stats;

pub use engine::{Aggregation, AxisDomain, DerivedPoint, QuadrantEngine, Totals};
pub use profile::{EngagementWeights, PlatformProfile, QualityAxis};
pub use seo::{top_tags, SeoScorer, TagCount};
pub use stats::median;
