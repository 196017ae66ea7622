//! Hashtag trend scoring over a snapshot of posts.
//!
//! Stats are rebuilt from scratch on every call; nothing is kept between
//! calls, so independent snapshots can be scored concurrently.

use std::collections::HashMap;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ledger::now_millis;

pub const DEFAULT_TREND_LIMIT: usize = 10;
pub const RECENCY_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;
pub const RECENCY_BONUS: f64 = 1.5;

// `#` followed by ASCII word characters only
static HASHTAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#([A-Za-z0-9_]+)").expect("hashtag pattern compiles")
});

// first match wins
const CATEGORY_KEYWORDS: [(&str, Category); 9] = [
    ("defi", Category::DeFi),
    ("nft", Category::Nft),
    ("ai", Category::Ai),
    ("blockchain", Category::Infrastructure),
    ("web3", Category::Infrastructure),
    ("0g", Category::Infrastructure),
    ("dao", Category::Governance),
    ("gaming", Category::Gaming),
    ("crypto", Category::DeFi),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    DeFi,
    #[serde(rename = "NFT")]
    Nft,
    #[serde(rename = "AI")]
    Ai,
    Infrastructure,
    Governance,
    Gaming,
    General,
}

impl Category {
    pub fn classify(tag: &str) -> Self {
        let tag = tag.to_lowercase();
        CATEGORY_KEYWORDS
            .iter()
            .find(|(keyword, _)| tag.contains(keyword))
            .map(|(_, category)| *category)
            .unwrap_or(Category::General)
    }
}

/// A post as handed over by the storage layer. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub likes_count: Option<i64>,
    #[serde(default)]
    pub comments_count: Option<i64>,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashtagStat {
    /// 1-based rank within the returned list.
    pub id: usize,
    pub name: String,
    pub posts_count: u64,
    pub trending_score: i64,
    pub is_following: bool,
    pub likes_count: i64,
    pub comments_count: i64,
    pub category: Category,
}

impl HashtagStat {
    fn first_seen(name: &str) -> Self {
        HashtagStat {
            id: 0,
            name: name.to_string(),
            posts_count: 0,
            trending_score: 0,
            is_following: false,
            likes_count: 0,
            comments_count: 0,
            category: Category::classify(name),
        }
    }

    /// Folds one occurrence of the tag in `post` into the accumulators.
    ///
    /// The score is recomputed from the running totals, so the recency bonus
    /// always comes from the last post folded in.
    fn record(&mut self, post: &Post, now: i64) {
        self.posts_count = self.posts_count.saturating_add(1);
        self.likes_count = self.likes_count.saturating_add(post.likes_count.unwrap_or(0));
        self.comments_count = self
            .comments_count
            .saturating_add(post.comments_count.unwrap_or(0));

        let engagement =
            (self.likes_count as f64 + self.comments_count as f64) / self.posts_count as f64;
        let recency_bonus = if now.saturating_sub(post.created_at) < RECENCY_WINDOW_MS {
            RECENCY_BONUS
        } else {
            1.0
        };
        self.trending_score = (engagement * recency_bonus * 10.0).round() as i64;
    }
}

/// Tags mentioned in `text`, marker stripped, one entry per occurrence.
pub fn extract_hashtags(text: &str) -> impl Iterator<Item = &str> {
    HASHTAG
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
}

pub fn score_hashtags(posts: &[Post], limit: usize) -> Vec<HashtagStat> {
    score_hashtags_at(posts, limit, now_millis())
}

/// Ranks hashtags by occurrence count, then trending score. Remaining ties
/// keep first-sighting order.
pub fn score_hashtags_at(posts: &[Post], limit: usize, now: i64) -> Vec<HashtagStat> {
    let mut stats: Vec<HashtagStat> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for post in posts {
        let content = post.content.as_deref().unwrap_or_default();
        for tag in extract_hashtags(content) {
            let i = *index.entry(tag.to_string()).or_insert_with(|| {
                stats.push(HashtagStat::first_seen(tag));
                stats.len() - 1
            });
            stats[i].record(post, now);
        }
    }

    debug!(
        "[TREND] {} distinct hashtags across {} posts",
        stats.len(),
        posts.len()
    );

    stats.sort_by(|a, b| {
        b.posts_count
            .cmp(&a.posts_count)
            .then(b.trending_score.cmp(&a.trending_score))
    });
    stats.truncate(limit);
    for (rank, stat) in stats.iter_mut().enumerate() {
        stat.id = rank + 1;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_760_000_000_000;

    fn post(content: &str, likes: i64, comments: i64, created_at: i64) -> Post {
        Post {
            content: Some(content.to_string()),
            likes_count: Some(likes),
            comments_count: Some(comments),
            created_at,
        }
    }

    #[test]
    fn test_extract_counts_every_occurrence() {
        let tags: Vec<_> = extract_hashtags("#a #b then #a again, #").collect();
        assert_eq!(tags, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_extract_stops_at_non_word_chars() {
        let tags: Vec<_> = extract_hashtags("#web3-summit #dao_vote!").collect();
        assert_eq!(tags, vec!["web3", "dao_vote"]);
    }

    #[test]
    fn test_category_first_keyword_wins() {
        assert_eq!(Category::classify("mydefiproject"), Category::DeFi);
        assert_eq!(Category::classify("xyz"), Category::General);
        assert_eq!(Category::classify("NFTDrop"), Category::Nft);
        assert_eq!(Category::classify("0G"), Category::Infrastructure);
        // "blockchain" contains "ai", which sits earlier in the table
        assert_eq!(Category::classify("blockchain"), Category::Ai);
    }

    #[test]
    fn test_repeated_tag_in_one_post_counts_twice() {
        let stats = score_hashtags_at(&[post("#dao #dao", 4, 0, NOW)], 10, NOW);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].posts_count, 2);
        assert_eq!(stats[0].likes_count, 8);
        // (8 + 0) / 2 * 1.5 * 10
        assert_eq!(stats[0].trending_score, 60);
    }

    #[test]
    fn test_recency_bonus_comes_from_last_post() {
        let old = NOW - RECENCY_WINDOW_MS;
        let fresh_then_old = [post("#ai", 10, 0, NOW), post("#ai", 10, 0, old)];
        let old_then_fresh = [post("#ai", 10, 0, old), post("#ai", 10, 0, NOW)];
        assert_eq!(score_hashtags_at(&fresh_then_old, 10, NOW)[0].trending_score, 100);
        assert_eq!(score_hashtags_at(&old_then_fresh, 10, NOW)[0].trending_score, 150);
    }

    #[test]
    fn test_score_rounds_half_away_from_zero() {
        let old = NOW - 2 * RECENCY_WINDOW_MS;
        let posts = [
            post("#y", 1, 0, old),
            post("#y", 0, 0, old),
            post("#y", 0, 0, old),
            post("#y", 0, 0, old),
        ];
        // 1 / 4 * 1.0 * 10 = 2.5
        assert_eq!(score_hashtags_at(&posts, 10, NOW)[0].trending_score, 3);
    }

    #[test]
    fn test_extreme_counts_saturate() {
        let posts = [
            Post {
                content: Some("#a".into()),
                likes_count: Some(i64::MAX),
                comments_count: Some(1),
                created_at: 0,
            },
            post("#a", i64::MAX, 0, i64::MIN),
        ];
        let stats = score_hashtags_at(&posts, 10, i64::MAX);
        assert_eq!(stats[0].posts_count, 2);
        assert_eq!(stats[0].likes_count, i64::MAX);
        assert_eq!(stats[0].comments_count, 1);
        // f64 -> i64 casts saturate
        assert!(stats[0].trending_score > 0);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let posts = [
            Post {
                content: None,
                likes_count: Some(3),
                comments_count: None,
                created_at: NOW,
            },
            Post {
                content: Some("#gaming".into()),
                likes_count: None,
                comments_count: None,
                created_at: NOW,
            },
        ];
        let stats = score_hashtags_at(&posts, 10, NOW);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].name, "gaming");
        assert_eq!((stats[0].likes_count, stats[0].comments_count), (0, 0));
        assert_eq!(stats[0].trending_score, 0);
    }

    #[test]
    fn test_ties_on_posts_break_by_score_and_limit_truncates() {
        let posts = [
            post("#low #high #other", 0, 0, NOW),
            post("#high", 5, 0, NOW),
            post("#low", 0, 0, NOW),
        ];
        let stats = score_hashtags_at(&posts, 2, NOW);
        let names: Vec<_> = stats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["high", "low"]);
        assert_eq!(stats[0].id, 1);
        assert_eq!(stats[1].id, 2);
    }
}
