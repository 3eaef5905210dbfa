use serde::{Deserialize, Serialize};

/// Interaction weights for the composite engagement score. Shares carry
/// the most signal, then comments, then likes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementWeights {
    pub like: f64,
    pub comment: f64,
    pub share: f64,
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self {
            like: 1.0,
            comment: 3.0,
            share: 5.0,
        }
    }
}

/// Which value lands on the quality (y) axis of the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityAxis {
    WeightedEngagement,
    Retention,
}

/// Policy parameters for one platform family. The thresholds are observed
/// values from the dataset, not derived constants; keep them tunable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformProfile {
    pub weights: EngagementWeights,
    pub quality_axis: QualityAxis,
    pub noise_floor_views: f64,
    pub super_viral_threshold: f64,
    pub density_cap: usize,
    pub min_quality: f64,
    pub fallback_median_views: f64,
    pub fallback_median_quality: f64,
    pub seo_enabled: bool,
}

impl PlatformProfile {
    pub fn tiktok() -> Self {
        Self {
            weights: EngagementWeights::default(),
            quality_axis: QualityAxis::WeightedEngagement,
            noise_floor_views: 50.0,
            super_viral_threshold: 1.5,
            density_cap: 100,
            min_quality: 0.1,
            fallback_median_views: 1000.0,
            fallback_median_quality: 5.0,
            seo_enabled: false,
        }
    }

    pub fn youtube() -> Self {
        Self {
            weights: EngagementWeights::default(),
            quality_axis: QualityAxis::Retention,
            noise_floor_views: 50.0,
            super_viral_threshold: 1.5,
            density_cap: 100,
            min_quality: 0.1,
            fallback_median_views: 1000.0,
            fallback_median_quality: 50.0,
            seo_enabled: true,
        }
    }

    // Instagram shares the short-form engagement semantics.
    pub fn instagram() -> Self {
        Self::tiktok()
    }
}

impl Default for PlatformProfile {
    fn default() -> Self {
        Self::tiktok()
    }
}
