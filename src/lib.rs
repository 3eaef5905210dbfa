pub mod classify;
pub mod config;
pub mod posts_client;

use serde::{Deserialize, Serialize};

use crate::classify::{Aggregation, QuadrantEngine};
use crate::config::EngineConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    YoutubeLong,
    YoutubeShorts,
    Tiktok,
    Instagram,
}

impl Platform {
    pub fn family(self) -> PlatformFamily {
        match self {
            Platform::YoutubeLong | Platform::YoutubeShorts => PlatformFamily::Youtube,
            Platform::Tiktok => PlatformFamily::Tiktok,
            Platform::Instagram => PlatformFamily::Instagram,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::YoutubeLong => "youtube_long",
            Platform::YoutubeShorts => "youtube_shorts",
            Platform::Tiktok => "tiktok",
            Platform::Instagram => "instagram",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFamily {
    Youtube,
    Tiktok,
    Instagram,
}

impl PlatformFamily {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "youtube" | "yt" => Some(PlatformFamily::Youtube),
            "tiktok" | "tk" => Some(PlatformFamily::Tiktok),
            "instagram" | "ig" => Some(PlatformFamily::Instagram),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlatformFamily::Youtube => "youtube",
            PlatformFamily::Tiktok => "tiktok",
            PlatformFamily::Instagram => "instagram",
        }
    }
}

/// Post identifiers arrive from the backend as either integers or strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Int(i64),
    Str(String),
}

impl Default for PostId {
    fn default() -> Self {
        PostId::Int(0)
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostId::Int(value) => write!(f, "{}", value),
            PostId::Str(value) => write!(f, "{}", value),
        }
    }
}

/// Every numeric field defaults to zero so partially populated backend
/// records normalize at the deserialization boundary instead of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostMetrics {
    #[serde(default)]
    pub views: f64,
    #[serde(default)]
    pub likes: f64,
    #[serde(default)]
    pub comments: f64,
    #[serde(default)]
    pub shares: f64,
    #[serde(default)]
    pub subscribers_gained: f64,
    #[serde(default, rename = "averageViewPercentage")]
    pub average_view_percentage: f64,
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: PostId,
    pub platform: Platform,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub published_at: Option<i64>,
    #[serde(default)]
    pub metrics: PostMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationFilter {
    All,
    Short,
    Long,
}

impl DurationFilter {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "all" => Some(DurationFilter::All),
            "short" => Some(DurationFilter::Short),
            "long" => Some(DurationFilter::Long),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DurationFilter::All => "all",
            DurationFilter::Short => "short",
            DurationFilter::Long => "long",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DensityFilter {
    All,
    Top,
}

impl DensityFilter {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "all" => Some(DensityFilter::All),
            "top" | "top100" => Some(DensityFilter::Top),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DensityFilter::All => "all",
            DensityFilter::Top => "top",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    ViralEngaged,
    LoyalCommunity,
    Controversy,
    Laboratory,
    SuperViral,
}

impl Quadrant {
    pub fn label(self) -> &'static str {
        match self {
            Quadrant::ViralEngaged => "Viral & Engaged",
            Quadrant::LoyalCommunity => "Loyal Community",
            Quadrant::Controversy => "Controversy",
            Quadrant::Laboratory => "Laboratory",
            Quadrant::SuperViral => "Super Viral",
        }
    }
}

fn load_engine_config() -> EngineConfig {
    EngineConfig::load(None)
        .map(|(config, _)| config)
        .unwrap_or_default()
}

/// Convenience entry point: filter to one platform family and aggregate
/// with the configured profile for that family.
pub fn classify(
    posts: &[Post],
    family: PlatformFamily,
    duration: DurationFilter,
    density: DensityFilter,
) -> Aggregation {
    let config = load_engine_config();
    classify_with_config(posts, family, duration, density, &config)
}

pub fn classify_with_config(
    posts: &[Post],
    family: PlatformFamily,
    duration: DurationFilter,
    density: DensityFilter,
    config: &EngineConfig,
) -> Aggregation {
    let filtered: Vec<Post> = posts
        .iter()
        .filter(|post| post.platform.family() == family)
        .cloned()
        .collect();
    let engine = QuadrantEngine::new(config.profile_for(family).clone());
    engine.aggregate(&filtered, duration, density)
}

pub fn format_number(value: f64) -> String {
    let rounded = value.round().max(0.0) as i64;
    let mut chars: Vec<char> = rounded.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
