use crate::domain::model::{HashtagCount, TweetRecord};
use std::collections::HashMap;

pub const DEFAULT_TOP_N: usize = 10;

/// Unwind → group → sort → limit over an in-memory set of tweets.
///
/// Ties on count are broken by ascending hashtag text so repeated runs are stable;
/// the document-store aggregation sorts the same way.
pub fn top_hashtags<'a, I>(records: I, limit: usize) -> Vec<HashtagCount>
where
    I: IntoIterator<Item = &'a TweetRecord>,
{
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for tag in records.into_iter().flat_map(|r| r.hashtags.iter()) {
        *counts.entry(tag.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<HashtagCount> = counts
        .into_iter()
        .map(|(hashtag, count)| HashtagCount {
            hashtag: hashtag.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.hashtag.cmp(&b.hashtag)));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tweet(tags: &[&str]) -> TweetRecord {
        TweetRecord {
            text: String::new(),
            created_at: None,
            user_id: "1".to_string(),
            hashtags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_counts_sorted_with_lexicographic_tie_break() {
        let records = vec![tweet(&["b", "a"]), tweet(&["c", "b"]), tweet(&[])];
        let ranked = top_hashtags(&records, DEFAULT_TOP_N);

        let pairs: Vec<(&str, u64)> = ranked.iter().map(|h| (h.hashtag.as_str(), h.count)).collect();
        assert_eq!(pairs, vec![("b", 2), ("a", 1), ("c", 1)]);
    }

    #[test]
    fn test_limit_truncates() {
        let records = vec![tweet(&["x", "y", "z"])];
        assert_eq!(top_hashtags(&records, 2).len(), 2);
        assert!(top_hashtags(&records, 0).is_empty());
    }

    #[test]
    fn test_repeated_tag_in_one_tweet_counts_twice() {
        // $unwind emits one row per array element, duplicates included
        let records = vec![tweet(&["dup", "dup"])];
        assert_eq!(top_hashtags(&records, 10)[0].count, 2);
    }

    #[test]
    fn test_empty_collection() {
        let records: Vec<TweetRecord> = Vec::new();
        assert!(top_hashtags(&records, 10).is_empty());
    }
}
