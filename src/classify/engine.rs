use std::cmp::Ordering;

use serde::Serialize;

use crate::classify::profile::{PlatformProfile, QualityAxis};
use crate::classify::seo::{self, SeoScorer, TagCount};
use crate::classify::stats::{log10_safe, max_of, median, min_of};
use crate::{DensityFilter, DurationFilter, Post, PostId, Quadrant};

/// Floor applied to log-scale axis values so no point lands at or below zero.
const AXIS_EPSILON: f64 = 0.1;

const SHORT_FORM_MAX_SECONDS: f64 = 60.0;
const TOP_TAG_LIMIT: usize = 20;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Totals {
    pub views: f64,
    pub likes: f64,
    pub comments: f64,
    pub shares: f64,
    pub subscribers_gained: f64,
}

/// One plotted point. Recomputed from scratch on every aggregation; carries
/// no identity beyond the back-reference to its source post.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedPoint {
    pub post_id: PostId,
    pub title: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub viral_ratio: f64,
    pub raw_score: f64,
    pub quadrant: Quadrant,
}

#[derive(Debug, Clone, Serialize)]
pub struct AxisDomain {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Aggregation {
    pub totals: Totals,
    pub viral_score: f64,
    pub community_index: f64,
    pub conversion_rate: f64,
    pub mean_retention: Option<f64>,
    pub seo_score: Option<u32>,
    pub top_tags: Vec<TagCount>,
    pub best_post: Option<PostId>,
    pub median_x: f64,
    pub median_y: f64,
    pub domain: AxisDomain,
    pub points: Vec<DerivedPoint>,
}

/// Pure, synchronous aggregation over an in-memory post collection. The
/// caller filters to one platform family first; the profile decides the
/// quality axis and the policy thresholds.
#[derive(Debug, Clone)]
pub struct QuadrantEngine {
    profile: PlatformProfile,
}

impl QuadrantEngine {
    pub fn new(profile: PlatformProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &PlatformProfile {
        &self.profile
    }

    pub fn aggregate(
        &self,
        posts: &[Post],
        duration: DurationFilter,
        density: DensityFilter,
    ) -> Aggregation {
        let filtered: Vec<&Post> = posts
            .iter()
            .filter(|post| match duration {
                DurationFilter::All => true,
                DurationFilter::Short => post.metrics.duration <= SHORT_FORM_MAX_SECONDS,
                DurationFilter::Long => post.metrics.duration > SHORT_FORM_MAX_SECONDS,
            })
            .collect();

        // Headline KPIs come from the full filtered set; the density cap
        // below only limits which points get plotted.
        let mut totals = Totals::default();
        for post in &filtered {
            totals.views += post.metrics.views;
            totals.likes += post.metrics.likes;
            totals.comments += post.metrics.comments;
            totals.shares += post.metrics.shares;
            totals.subscribers_gained += post.metrics.subscribers_gained;
        }

        let viral_score = per_mille(totals.shares, totals.views);
        let community_index = per_mille(totals.comments, totals.views);
        let conversion_rate = if totals.views > 0.0 {
            totals.subscribers_gained / totals.views * 100.0
        } else {
            0.0
        };

        let mut points: Vec<DerivedPoint> = filtered
            .iter()
            .filter(|post| post.metrics.views > self.profile.noise_floor_views)
            .map(|post| self.derive_point(post))
            .collect();

        if density == DensityFilter::Top {
            points.sort_by(|a, b| {
                b.raw_score
                    .partial_cmp(&a.raw_score)
                    .unwrap_or(Ordering::Equal)
            });
            points.truncate(self.profile.density_cap);
        }

        let xs: Vec<f64> = points.iter().map(|point| point.x).collect();
        let ys: Vec<f64> = points.iter().map(|point| point.y).collect();

        let median_x = or_fallback(median(&xs), self.profile.fallback_median_views);
        let median_y = or_fallback(median(&ys), self.profile.fallback_median_quality);
        let domain = self.domain(&xs, &ys);

        for point in points.iter_mut() {
            point.quadrant = self.quadrant_for(point, median_x, median_y);
        }

        let best_post = filtered
            .iter()
            .max_by(|a, b| {
                self.engagement_per_view(a)
                    .partial_cmp(&self.engagement_per_view(b))
                    .unwrap_or(Ordering::Equal)
            })
            .map(|post| post.id.clone());

        let mean_retention = match self.profile.quality_axis {
            QualityAxis::Retention => Some(mean_positive_retention(&filtered)),
            QualityAxis::WeightedEngagement => None,
        };

        let (seo_score, top_tags) = if self.profile.seo_enabled {
            let scorer = SeoScorer::default();
            (
                Some(scorer.channel_score(filtered.iter().copied())),
                seo::top_tags(filtered.iter().copied(), TOP_TAG_LIMIT),
            )
        } else {
            (None, Vec::new())
        };

        Aggregation {
            totals,
            viral_score,
            community_index,
            conversion_rate,
            mean_retention,
            seo_score,
            top_tags,
            best_post,
            median_x,
            median_y,
            domain,
            points,
        }
    }

    fn derive_point(&self, post: &Post) -> DerivedPoint {
        let metrics = &post.metrics;
        let weights = &self.profile.weights;
        let views = metrics.views;

        let weighted_engagement = (metrics.likes * weights.like
            + metrics.comments * weights.comment
            + metrics.shares * weights.share)
            / views.max(1.0)
            * 100.0;

        let quality = match self.profile.quality_axis {
            QualityAxis::WeightedEngagement => weighted_engagement,
            QualityAxis::Retention => metrics.average_view_percentage,
        }
        .max(self.profile.min_quality);

        let viral_ratio = metrics.shares / views.max(1.0) * 100.0;

        DerivedPoint {
            post_id: post.id.clone(),
            title: post.title.clone(),
            x: views.max(AXIS_EPSILON),
            y: quality,
            z: views,
            viral_ratio,
            // Reach-weighted relevance, used for ranking only.
            raw_score: quality * log10_safe(views + 1.0),
            quadrant: Quadrant::Laboratory,
        }
    }

    fn quadrant_for(&self, point: &DerivedPoint, median_x: f64, median_y: f64) -> Quadrant {
        // High share density wins over the geometric quadrant.
        if point.viral_ratio > self.profile.super_viral_threshold {
            return Quadrant::SuperViral;
        }
        match (point.x >= median_x, point.y >= median_y) {
            (true, true) => Quadrant::ViralEngaged,
            (false, true) => Quadrant::LoyalCommunity,
            (true, false) => Quadrant::Controversy,
            (false, false) => Quadrant::Laboratory,
        }
    }

    fn domain(&self, xs: &[f64], ys: &[f64]) -> AxisDomain {
        if xs.is_empty() {
            // Empty-state domain centered on the fallback medians.
            let profile = &self.profile;
            return AxisDomain {
                min_x: profile.fallback_median_views * 0.8,
                max_x: profile.fallback_median_views * 1.5,
                min_y: (profile.fallback_median_quality * 0.5).max(profile.min_quality),
                max_y: profile.fallback_median_quality * 1.5,
            };
        }
        AxisDomain {
            min_x: min_of(xs) * 0.8,
            max_x: max_of(xs) * 1.5,
            min_y: (min_of(ys) * 0.5).max(AXIS_EPSILON),
            max_y: max_of(ys) * 1.5,
        }
    }

    fn engagement_per_view(&self, post: &Post) -> f64 {
        let metrics = &post.metrics;
        let weights = &self.profile.weights;
        (metrics.likes * weights.like
            + metrics.comments * weights.comment
            + metrics.shares * weights.share)
            / metrics.views.max(1.0)
    }
}

fn per_mille(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 1000.0
    } else {
        0.0
    }
}

fn or_fallback(value: f64, fallback: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        fallback
    }
}

fn mean_positive_retention(posts: &[&Post]) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for post in posts {
        let retention = post.metrics.average_view_percentage;
        if retention > 0.0 {
            sum += retention;
            count += 1;
        }
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
