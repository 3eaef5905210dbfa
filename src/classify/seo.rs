use std::collections::HashMap;

use serde::Serialize;

use crate::Post;

#[derive(Debug, Clone, Serialize)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

/// Metadata quality heuristic for long-form platforms. This is a fixed
/// weighted rule table tuned for organic indexing, not a statistical model;
/// the bucket boundaries and point values are deliberate policy.
#[derive(Debug, Clone, Default)]
pub struct SeoScorer;

impl SeoScorer {
    pub fn score_post(&self, post: &Post) -> u32 {
        let mut score = 0u32;
        let title = post.title.as_str();
        let description = post.description.as_str();

        // Strategic title: ideal length window, then a CTR boost for
        // brackets or emoji.
        let title_len = title.chars().count();
        if (35..=70).contains(&title_len) {
            score += 20;
        } else if title_len > 0 {
            score += 10;
        }
        if has_ctr_boost(title) {
            score += 10;
        }

        // Conversion description: a link is the big win, density second.
        if description.to_lowercase().contains("http") {
            score += 25;
        }
        let description_len = description.chars().count();
        if description_len > 200 {
            score += 15;
        } else if description_len > 50 {
            score += 5;
        }

        // Tag saturation.
        let tag_count = tag_list(post).len();
        if tag_count >= 10 {
            score += 20;
        } else if tag_count > 0 {
            score += 10;
        }

        // A question prompts comments; only the description lead counts.
        let lead: String = description.chars().take(150).collect();
        if title.contains('?') || lead.contains('?') {
            score += 10;
        }

        score
    }

    /// Rounded mean over the channel; 0 when there are no posts.
    pub fn channel_score<'a, I>(&self, posts: I) -> u32
    where
        I: IntoIterator<Item = &'a Post>,
    {
        let scores: Vec<u32> = posts.into_iter().map(|post| self.score_post(post)).collect();
        if scores.is_empty() {
            return 0;
        }
        let sum: u32 = scores.iter().sum();
        (sum as f64 / scores.len() as f64).round() as u32
    }
}

/// Case-folded tag frequency across posts, most frequent first.
pub fn top_tags<'a, I>(posts: I, limit: usize) -> Vec<TagCount>
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for post in posts {
        for tag in tag_list(post) {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }

    let mut tags: Vec<TagCount> = counts
        .into_iter()
        .map(|(name, count)| TagCount { name, count })
        .collect();
    tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    tags.truncate(limit);
    tags
}

fn has_ctr_boost(title: &str) -> bool {
    title
        .chars()
        .any(|ch| matches!(ch, '[' | ']' | '(' | ')') || ch as u32 > 0x7f)
}

fn tag_list(post: &Post) -> Vec<String> {
    post.tags
        .as_deref()
        .map(|raw| {
            raw.split(',')
                .map(|tag| tag.trim().to_lowercase())
                .filter(|tag| !tag.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
