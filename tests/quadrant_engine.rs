use dominance_matrix::classify::{median, PlatformProfile, QuadrantEngine};
use dominance_matrix::config::EngineConfig;
use dominance_matrix::{
    classify_with_config, DensityFilter, DurationFilter, Platform, PlatformFamily, Post, PostId,
    PostMetrics, Quadrant,
};

fn post(id: i64, views: f64, likes: f64, comments: f64, shares: f64) -> Post {
    Post {
        id: PostId::Int(id),
        platform: Platform::Tiktok,
        title: format!("post {}", id),
        description: String::new(),
        tags: None,
        thumbnail_url: None,
        published_at: None,
        metrics: PostMetrics {
            views,
            likes,
            comments,
            shares,
            ..Default::default()
        },
    }
}

fn no_floor_profile() -> PlatformProfile {
    PlatformProfile {
        noise_floor_views: 0.0,
        ..PlatformProfile::tiktok()
    }
}

#[test]
fn totals_unaffected_by_density_cap() {
    let posts: Vec<Post> = (0..150)
        .map(|i| post(i, 1000.0 + i as f64, 10.0, 2.0, 1.0))
        .collect();
    let expected_views: f64 = posts.iter().map(|p| p.metrics.views).sum();

    let engine = QuadrantEngine::new(PlatformProfile::tiktok());
    let capped = engine.aggregate(&posts, DurationFilter::All, DensityFilter::Top);
    let uncapped = engine.aggregate(&posts, DurationFilter::All, DensityFilter::All);

    assert_eq!(capped.points.len(), 100);
    assert_eq!(uncapped.points.len(), 150);
    assert!((capped.totals.views - expected_views).abs() < 1e-6);
    assert!((capped.totals.views - uncapped.totals.views).abs() < 1e-6);
}

#[test]
fn density_cap_keeps_highest_raw_score() {
    let profile = PlatformProfile {
        density_cap: 2,
        ..no_floor_profile()
    };
    let engine = QuadrantEngine::new(profile);

    // Same views, so raw score ordering follows likes.
    let posts = vec![
        post(1, 1000.0, 10.0, 0.0, 0.0),
        post(2, 1000.0, 30.0, 0.0, 0.0),
        post(3, 1000.0, 20.0, 0.0, 0.0),
    ];

    let result = engine.aggregate(&posts, DurationFilter::All, DensityFilter::Top);

    assert_eq!(result.points.len(), 2);
    assert_eq!(result.points[0].post_id, PostId::Int(2));
    assert_eq!(result.points[1].post_id, PostId::Int(3));
}

#[test]
fn derived_points_stay_positive_for_log_scale() {
    let engine = QuadrantEngine::new(PlatformProfile::tiktok());
    let posts = vec![post(1, 100.0, 0.0, 0.0, 0.0)];

    let result = engine.aggregate(&posts, DurationFilter::All, DensityFilter::All);

    assert_eq!(result.points.len(), 1);
    let point = &result.points[0];
    assert!(point.x > 0.0);
    assert!((point.y - 0.1).abs() < 1e-9);
    assert!(point.y > 0.0);
}

#[test]
fn median_averages_central_pair() {
    assert!((median(&[1000.0, 10.0]) - 505.0).abs() < 1e-9);
    assert!((median(&[3.0, 1.0, 2.0]) - 2.0).abs() < 1e-9);
    assert_eq!(median(&[]), 0.0);
}

#[test]
fn classifies_reach_split_around_median() {
    let engine = QuadrantEngine::new(no_floor_profile());
    let posts = vec![
        post(1, 1000.0, 50.0, 10.0, 5.0),
        post(2, 10.0, 1.0, 0.0, 0.0),
    ];

    let result = engine.aggregate(&posts, DurationFilter::All, DensityFilter::All);

    assert!((result.totals.views - 1010.0).abs() < 1e-9);
    assert!((result.totals.shares - 5.0).abs() < 1e-9);
    assert!((result.viral_score - 5.0 / 1010.0 * 1000.0).abs() < 1e-9);
    assert!((result.median_x - 505.0).abs() < 1e-9);

    let high = result
        .points
        .iter()
        .find(|p| p.post_id == PostId::Int(1))
        .unwrap();
    let low = result
        .points
        .iter()
        .find(|p| p.post_id == PostId::Int(2))
        .unwrap();

    // weighted engagement: 10.5% vs 10.0%, median 10.25%
    assert_eq!(high.quadrant, Quadrant::ViralEngaged);
    assert_eq!(low.quadrant, Quadrant::Laboratory);
}

#[test]
fn super_viral_override_beats_quadrant() {
    let engine = QuadrantEngine::new(PlatformProfile::tiktok());
    // 20 shares on 1000 views: viral ratio 2.0, above the 1.5 threshold.
    let posts = vec![post(1, 1000.0, 0.0, 0.0, 20.0)];

    let result = engine.aggregate(&posts, DurationFilter::All, DensityFilter::All);

    assert_eq!(result.points[0].quadrant, Quadrant::SuperViral);
}

#[test]
fn empty_input_falls_back_to_defaults() {
    let engine = QuadrantEngine::new(PlatformProfile::tiktok());
    let result = engine.aggregate(&[], DurationFilter::All, DensityFilter::Top);

    assert!(result.points.is_empty());
    assert_eq!(result.totals.views, 0.0);
    assert_eq!(result.viral_score, 0.0);
    assert_eq!(result.community_index, 0.0);
    assert!((result.median_x - 1000.0).abs() < 1e-9);
    assert!((result.median_y - 5.0).abs() < 1e-9);
    assert!(result.domain.min_y >= 0.1);
    assert!(result.domain.max_x > result.domain.min_x);
}

#[test]
fn zero_views_never_divide() {
    let engine = QuadrantEngine::new(PlatformProfile::tiktok());
    let posts = vec![post(1, 0.0, 5.0, 2.0, 1.0)];

    let result = engine.aggregate(&posts, DurationFilter::All, DensityFilter::All);

    assert!(result.points.is_empty());
    assert_eq!(result.viral_score, 0.0);
    assert_eq!(result.conversion_rate, 0.0);
    assert!(result.viral_score >= 0.0 && result.community_index >= 0.0);
}

#[test]
fn aggregation_is_idempotent() {
    let engine = QuadrantEngine::new(PlatformProfile::tiktok());
    let posts: Vec<Post> = (0..20)
        .map(|i| post(i, 100.0 * (i + 1) as f64, 5.0 * i as f64, i as f64, 1.0))
        .collect();

    let first = engine.aggregate(&posts, DurationFilter::All, DensityFilter::Top);
    let second = engine.aggregate(&posts, DurationFilter::All, DensityFilter::Top);

    let first_json = serde_json::to_value(&first).unwrap();
    let second_json = serde_json::to_value(&second).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn duration_filter_buckets_posts() {
    let engine = QuadrantEngine::new(PlatformProfile::tiktok());
    let mut short = post(1, 100.0, 0.0, 0.0, 0.0);
    short.metrics.duration = 30.0;
    let mut long = post(2, 200.0, 0.0, 0.0, 0.0);
    long.metrics.duration = 90.0;
    let posts = vec![short, long];

    let shorts = engine.aggregate(&posts, DurationFilter::Short, DensityFilter::All);
    let longs = engine.aggregate(&posts, DurationFilter::Long, DensityFilter::All);

    assert!((shorts.totals.views - 100.0).abs() < 1e-9);
    assert!((longs.totals.views - 200.0).abs() < 1e-9);
}

#[test]
fn noise_floor_excludes_points_but_not_totals() {
    let engine = QuadrantEngine::new(PlatformProfile::tiktok());
    let posts = vec![post(1, 10.0, 1.0, 0.0, 0.0), post(2, 500.0, 5.0, 0.0, 0.0)];

    let result = engine.aggregate(&posts, DurationFilter::All, DensityFilter::All);

    assert_eq!(result.points.len(), 1);
    assert_eq!(result.points[0].post_id, PostId::Int(2));
    assert!((result.totals.views - 510.0).abs() < 1e-9);
}

#[test]
fn retention_axis_uses_view_percentage() {
    let engine = QuadrantEngine::new(PlatformProfile::youtube());
    let mut video = post(1, 1000.0, 10.0, 0.0, 0.0);
    video.platform = Platform::YoutubeLong;
    video.metrics.average_view_percentage = 40.0;

    let result = engine.aggregate(&[video], DurationFilter::All, DensityFilter::All);

    assert!((result.points[0].y - 40.0).abs() < 1e-9);
    assert_eq!(result.mean_retention, Some(40.0));
    assert!(result.seo_score.is_some());
}

#[test]
fn domain_pads_axis_bounds() {
    let engine = QuadrantEngine::new(PlatformProfile::tiktok());
    // weighted engagement: 100 likes on 1000 views = 10%
    let posts = vec![post(1, 1000.0, 100.0, 0.0, 0.0)];

    let result = engine.aggregate(&posts, DurationFilter::All, DensityFilter::All);

    assert!((result.domain.min_x - 800.0).abs() < 1e-9);
    assert!((result.domain.max_x - 1500.0).abs() < 1e-9);
    assert!((result.domain.min_y - 5.0).abs() < 1e-9);
    assert!((result.domain.max_y - 15.0).abs() < 1e-9);
}

#[test]
fn conversion_rate_from_subscribers() {
    let engine = QuadrantEngine::new(PlatformProfile::youtube());
    let mut video = post(1, 1000.0, 0.0, 0.0, 0.0);
    video.platform = Platform::YoutubeLong;
    video.metrics.subscribers_gained = 10.0;

    let result = engine.aggregate(&[video], DurationFilter::All, DensityFilter::All);

    assert!((result.conversion_rate - 1.0).abs() < 1e-9);
}

#[test]
fn best_post_ranks_by_per_view_engagement() {
    let engine = QuadrantEngine::new(PlatformProfile::tiktok());
    let posts = vec![
        post(1, 1000.0, 10.0, 0.0, 0.0),
        post(2, 100.0, 10.0, 0.0, 0.0),
    ];

    let result = engine.aggregate(&posts, DurationFilter::All, DensityFilter::All);

    assert_eq!(result.best_post, Some(PostId::Int(2)));
}

#[test]
fn classify_filters_by_platform_family() {
    let config = EngineConfig::default();
    let mut youtube = post(1, 5000.0, 0.0, 0.0, 0.0);
    youtube.platform = Platform::YoutubeLong;
    let tiktok = post(2, 300.0, 0.0, 0.0, 0.0);
    let posts = vec![youtube, tiktok];

    let result = classify_with_config(
        &posts,
        PlatformFamily::Tiktok,
        DurationFilter::All,
        DensityFilter::All,
        &config,
    );

    assert!((result.totals.views - 300.0).abs() < 1e-9);
    assert_eq!(result.points.len(), 1);
}

#[test]
fn posts_normalize_missing_metric_fields() {
    let payload = r#"[
        {"id": 7, "platform": "tiktok", "title": "clip", "metrics": {"views": 120}},
        {"id": "abc", "platform": "youtube_shorts", "metrics": {"likes": 3, "averageViewPercentage": 55.0}}
    ]"#;

    let posts: Vec<Post> = serde_json::from_str(payload).unwrap();

    assert_eq!(posts[0].metrics.likes, 0.0);
    assert_eq!(posts[0].metrics.shares, 0.0);
    assert_eq!(posts[1].id, PostId::Str("abc".to_string()));
    assert_eq!(posts[1].metrics.views, 0.0);
    assert!((posts[1].metrics.average_view_percentage - 55.0).abs() < 1e-9);
}
