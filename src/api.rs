use serde::{Deserialize, Serialize};

use dominance_matrix::classify::Aggregation;
use dominance_matrix::{DensityFilter, DurationFilter, PlatformFamily, Post};

#[derive(Debug, Deserialize)]
pub struct ApiClassifyRequest {
    pub posts: Vec<Post>,
    pub platform: Option<String>,
    pub duration: Option<String>,
    pub density: Option<String>,
}

impl ApiClassifyRequest {
    pub fn into_parts(
        self,
    ) -> Result<(Vec<Post>, PlatformFamily, DurationFilter, DensityFilter), String> {
        let family = match self.platform.as_deref() {
            Some(value) => PlatformFamily::from_str(value)
                .ok_or_else(|| format!("invalid platform: {}", value))?,
            None => PlatformFamily::Tiktok,
        };
        let duration = match self.duration.as_deref() {
            Some(value) => DurationFilter::from_str(value)
                .ok_or_else(|| format!("invalid duration filter: {}", value))?,
            None => DurationFilter::All,
        };
        let density = match self.density.as_deref() {
            Some(value) => DensityFilter::from_str(value)
                .ok_or_else(|| format!("invalid density filter: {}", value))?,
            None => DensityFilter::Top,
        };
        Ok((self.posts, family, duration, density))
    }
}

#[derive(Debug, Serialize)]
pub struct ApiClassifyResponse {
    pub platform: String,
    pub post_count: usize,
    pub point_count: usize,
    pub aggregation: Aggregation,
}

impl ApiClassifyResponse {
    pub fn from_aggregation(
        family: PlatformFamily,
        post_count: usize,
        aggregation: Aggregation,
    ) -> Self {
        Self {
            platform: family.label().to_string(),
            post_count,
            point_count: aggregation.points.len(),
            aggregation,
        }
    }
}
