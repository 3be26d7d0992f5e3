//! Argument extraction for the Reddit tools
//!
//! Tool calls arrive as an untyped JSON object. The functions here pull the
//! fields each tool understands out of that object, apply defaults and bounds,
//! and return typed parameters or a [`ValidationError`] naming the offending
//! parameter.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::config::{CommentsDefaults, SearchDefaults};

/// Type prefix Reddit puts in front of post ("link") identifiers
pub const POST_ID_PREFIX: &str = "t3_";

static POST_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:/comments/|redd\.it/)([A-Za-z0-9]+)").expect("post URL pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("invalid {name} '{value}' (expected one of: {expected})")]
    InvalidChoice {
        name: &'static str,
        value: String,
        expected: String,
    },

    #[error("invalid subreddit '{0}' (letters, digits and underscores only)")]
    InvalidSubreddit(String),

    #[error("invalid post_id '{0}' (expected a Reddit id such as 'abc123' or 't3_abc123', or a post URL)")]
    InvalidPostId(String),
}

/// Sort order for post search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSort {
    Relevance,
    Hot,
    New,
    Top,
}

impl SearchSort {
    pub const ALL: [SearchSort; 4] = [Self::Relevance, Self::Hot, Self::New, Self::Top];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Hot => "hot",
            Self::New => "new",
            Self::Top => "top",
        }
    }
}

/// Sort order for a post's comment listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSort {
    Top,
    New,
    Controversial,
    Old,
    Qa,
}

impl CommentSort {
    pub const ALL: [CommentSort; 5] = [
        Self::Top,
        Self::New,
        Self::Controversial,
        Self::Old,
        Self::Qa,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::New => "new",
            Self::Controversial => "controversial",
            Self::Old => "old",
            Self::Qa => "qa",
        }
    }
}

macro_rules! sort_impls {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|sort| sort.as_str() == wanted)
                    .ok_or_else(|| ValidationError::InvalidChoice {
                        name: "sort",
                        value: s.to_string(),
                        expected: Self::ALL
                            .iter()
                            .map(|sort| sort.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

sort_impls!(SearchSort);
sort_impls!(CommentSort);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub subreddit: Option<String>,
    pub sort: SearchSort,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostParams {
    /// Bare post id, without the `t3_` prefix
    pub post_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentsParams {
    /// Bare post id, without the `t3_` prefix
    pub post_id: String,
    pub sort: CommentSort,
    pub limit: u32,
}

/// Extract `reddit_search` parameters
pub fn extract_search_args(
    args: Option<&Map<String, Value>>,
    defaults: &SearchDefaults,
) -> Result<SearchParams, ValidationError> {
    let query = string_arg(args, "query").ok_or(ValidationError::Missing("search query"))?;

    let subreddit = string_arg(args, "subreddit")
        .map(normalize_subreddit)
        .filter(|s| !s.is_empty());

    if let Some(name) = &subreddit {
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ValidationError::InvalidSubreddit(name.clone()));
        }
    }

    let sort = match string_arg(args, "sort") {
        Some(raw) => raw.parse::<SearchSort>()?,
        None => defaults.sort,
    };

    let limit = optional_limit(args, defaults.limit, &defaults.limit_bounds);

    Ok(SearchParams {
        query: query.to_string(),
        subreddit,
        sort,
        limit,
    })
}

/// Extract `reddit_post` parameters
pub fn extract_post_args(args: Option<&Map<String, Value>>) -> Result<PostParams, ValidationError> {
    let post_id = required_post_id(args)?;
    Ok(PostParams { post_id })
}

/// Extract `reddit_comments` parameters
pub fn extract_comments_args(
    args: Option<&Map<String, Value>>,
    defaults: &CommentsDefaults,
) -> Result<CommentsParams, ValidationError> {
    let post_id = required_post_id(args)?;

    let sort = match string_arg(args, "sort") {
        Some(raw) => raw.parse::<CommentSort>()?,
        None => defaults.sort,
    };

    let limit = optional_limit(args, defaults.limit, &defaults.limit_bounds);

    Ok(CommentsParams {
        post_id,
        sort,
        limit,
    })
}

/// Strip one leading `t3_` from a post id
///
/// `"t3_abc"` and `"abc"` both become `"abc"`. Only a single prefix is
/// removed, matching how Reddit builds fullnames.
pub fn strip_post_prefix(post_id: &str) -> &str {
    post_id.strip_prefix(POST_ID_PREFIX).unwrap_or(post_id)
}

/// Pull the post id out of a post URL
///
/// Understands `https://www.reddit.com/r/<sub>/comments/<id>/<slug>/`,
/// `https://www.reddit.com/comments/<id>` and `https://redd.it/<id>`.
pub fn extract_post_id_from_url(input: &str) -> Option<&str> {
    POST_URL_RE
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str())
}

/// Turn a bare post id into the fullname used by `/api/info.json`
pub fn post_fullname(post_id: &str) -> String {
    format!("{POST_ID_PREFIX}{}", strip_post_prefix(post_id))
}

/// Strip a leading `r/` or `/r/` from a subreddit name
pub fn normalize_subreddit(subreddit: &str) -> String {
    let trimmed = subreddit.trim().trim_start_matches('/');
    trimmed
        .strip_prefix("r/")
        .unwrap_or(trimmed)
        .trim_end_matches('/')
        .to_string()
}

fn required_post_id(args: Option<&Map<String, Value>>) -> Result<String, ValidationError> {
    let raw = string_arg(args, "post_id").ok_or(ValidationError::Missing("post_id"))?;

    let post_id = if raw.contains('/') {
        extract_post_id_from_url(raw).ok_or_else(|| ValidationError::InvalidPostId(raw.to_string()))?
    } else {
        strip_post_prefix(raw)
    };

    if post_id.is_empty() {
        return Err(ValidationError::Missing("post_id"));
    }

    if !post_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidPostId(raw.to_string()));
    }

    Ok(post_id.to_string())
}

/// A present, non-empty (after trimming) string field
fn string_arg<'a>(args: Option<&'a Map<String, Value>>, name: &str) -> Option<&'a str> {
    args?
        .get(name)?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Numeric limit, truncated toward zero and clamped into `bounds`
///
/// Anything that is not a JSON number falls back to `default`.
fn optional_limit(
    args: Option<&Map<String, Value>>,
    default: u32,
    bounds: &RangeInclusive<u32>,
) -> u32 {
    let Some(raw) = args.and_then(|a| a.get("limit")).and_then(Value::as_f64) else {
        return default;
    };

    // `as` saturates, and NaN becomes 0, which the clamp then lifts to the minimum.
    let truncated = raw.trunc() as i64;
    let clamped = truncated.clamp(i64::from(*bounds.start()), i64::from(*bounds.end())) as u32;

    if i64::from(clamped) != truncated {
        log::debug!(
            "limit {raw} outside {}..={}, using {clamped}",
            bounds.start(),
            bounds.end()
        );
    }

    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_search_requires_query() {
        let defaults = SearchDefaults::default();
        let err = extract_search_args(None, &defaults).unwrap_err();
        assert_eq!(err.to_string(), "search query is required");

        let map = args(json!({ "query": "   " }));
        let err = extract_search_args(Some(&map), &defaults).unwrap_err();
        assert_eq!(err, ValidationError::Missing("search query"));

        let map = args(json!({ "query": 42 }));
        assert!(extract_search_args(Some(&map), &defaults).is_err());
    }

    #[test]
    fn test_search_defaults() {
        let map = args(json!({ "query": "cats" }));
        let params = extract_search_args(Some(&map), &SearchDefaults::default()).unwrap();
        assert_eq!(
            params,
            SearchParams {
                query: "cats".to_string(),
                subreddit: None,
                sort: SearchSort::Relevance,
                limit: 10,
            }
        );
    }

    #[test]
    fn test_search_all_fields() {
        let map = args(json!({
            "query": "rust async",
            "subreddit": "r/rust",
            "sort": "Top",
            "limit": 5
        }));
        let params = extract_search_args(Some(&map), &SearchDefaults::default()).unwrap();
        assert_eq!(params.subreddit.as_deref(), Some("rust"));
        assert_eq!(params.sort, SearchSort::Top);
        assert_eq!(params.limit, 5);
    }

    #[test]
    fn test_search_empty_sort_uses_default() {
        let map = args(json!({ "query": "cats", "sort": "", "subreddit": "" }));
        let params = extract_search_args(Some(&map), &SearchDefaults::default()).unwrap();
        assert_eq!(params.sort, SearchSort::Relevance);
        assert_eq!(params.subreddit, None);
    }

    #[test]
    fn test_search_invalid_sort_names_parameter() {
        let map = args(json!({ "query": "cats", "sort": "controversial" }));
        let err = extract_search_args(Some(&map), &SearchDefaults::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid sort 'controversial' (expected one of: relevance, hot, new, top)"
        );
    }

    #[test]
    fn test_limit_truncates_and_clamps() {
        let defaults = SearchDefaults::default();
        let limit_of = |value: Value| {
            let map = args(json!({ "query": "cats", "limit": value }));
            extract_search_args(Some(&map), &defaults).unwrap().limit
        };

        assert_eq!(limit_of(json!(7.9)), 7);
        assert_eq!(limit_of(json!(500)), 25);
        assert_eq!(limit_of(json!(0)), 1);
        assert_eq!(limit_of(json!(-3)), 1);
        assert_eq!(limit_of(json!(0.5)), 1);
        assert_eq!(limit_of(json!("12")), 10);
    }

    #[test]
    fn test_post_id_prefix_is_stripped() {
        let with_prefix = args(json!({ "post_id": "t3_abc123" }));
        let without_prefix = args(json!({ "post_id": "abc123" }));

        assert_eq!(
            extract_post_args(Some(&with_prefix)).unwrap(),
            extract_post_args(Some(&without_prefix)).unwrap()
        );
        assert_eq!(
            extract_post_args(Some(&with_prefix)).unwrap().post_id,
            "abc123"
        );
    }

    #[test]
    fn test_post_id_only_one_prefix_stripped() {
        assert_eq!(strip_post_prefix("t3_t3_abc"), "t3_abc");
        assert_eq!(post_fullname("t3_abc"), "t3_abc");
        assert_eq!(post_fullname("abc"), "t3_abc");
    }

    #[test]
    fn test_post_id_required() {
        let err = extract_post_args(None).unwrap_err();
        assert_eq!(err.to_string(), "post_id is required");

        let map = args(json!({ "post_id": "t3_" }));
        assert_eq!(
            extract_post_args(Some(&map)).unwrap_err(),
            ValidationError::Missing("post_id")
        );
    }

    #[test]
    fn test_post_id_from_url() {
        for url in [
            "https://www.reddit.com/r/rust/comments/1abcde/some_title/",
            "https://old.reddit.com/comments/1abcde",
            "https://redd.it/1abcde",
        ] {
            let map = args(json!({ "post_id": url }));
            assert_eq!(extract_post_args(Some(&map)).unwrap().post_id, "1abcde", "{url}");
        }
    }

    #[test]
    fn test_post_id_rejects_path_characters() {
        let map = args(json!({ "post_id": "../api/v1/me" }));
        assert!(matches!(
            extract_post_args(Some(&map)),
            Err(ValidationError::InvalidPostId(_))
        ));
    }

    #[test]
    fn test_comments_defaults_and_bounds() {
        let defaults = CommentsDefaults::default();

        let map = args(json!({ "post_id": "xyz" }));
        let params = extract_comments_args(Some(&map), &defaults).unwrap();
        assert_eq!(params.sort, CommentSort::Top);
        assert_eq!(params.limit, 25);

        let map = args(json!({ "post_id": "t3_xyz", "sort": "qa", "limit": 1000 }));
        let params = extract_comments_args(Some(&map), &defaults).unwrap();
        assert_eq!(params.post_id, "xyz");
        assert_eq!(params.sort, CommentSort::Qa);
        assert_eq!(params.limit, 100);
    }

    #[test]
    fn test_comments_invalid_sort() {
        let map = args(json!({ "post_id": "xyz", "sort": "relevance" }));
        let err = extract_comments_args(Some(&map), &CommentsDefaults::default()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidChoice { name: "sort", .. }));
    }

    #[test]
    fn test_search_rejects_bad_subreddit() {
        let map = args(json!({ "query": "cats", "subreddit": "aww/../../api" }));
        assert!(matches!(
            extract_search_args(Some(&map), &SearchDefaults::default()),
            Err(ValidationError::InvalidSubreddit(_))
        ));
    }

    #[test]
    fn test_normalize_subreddit() {
        assert_eq!(normalize_subreddit("rust"), "rust");
        assert_eq!(normalize_subreddit("r/rust"), "rust");
        assert_eq!(normalize_subreddit("/r/rust/"), "rust");
        assert_eq!(normalize_subreddit("  "), "");
    }
}
