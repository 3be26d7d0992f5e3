//! Plain-text rendering of Reddit API responses
//!
//! Each formatter is a single pass from one decoded [`Payload`] to one string.
//! The overall shape of the response must match or the call fails with a
//! [`FormatError`]; individual listing entries that do not decode are skipped
//! so one odd child does not sink the whole result.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::model::{Comment, PostDetail, PostSummary, MORE_KIND};
use super::payload::{DecodeError, Fields, Payload};

pub const NO_RESULTS_MESSAGE: &str = "No results found for this query.";
pub const NO_COMMENTS_MESSAGE: &str = "No comments found for this post.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("unexpected response format")]
    UnexpectedFormat,

    #[error("post not found")]
    PostNotFound,

    #[error("unexpected post data format")]
    UnexpectedPostData,

    #[error("comments data not found")]
    CommentsDataNotFound,

    #[error("comments object not found")]
    CommentsObjectNotFound,

    #[error("no comments found")]
    NoComments,

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Render `/search.json` results
///
/// Expects `data.children[*].data`. Hits that do not decode are left out and
/// the header counts only the hits that are printed.
pub fn format_search_results(payload: &Payload) -> Result<String, FormatError> {
    let root = payload.as_object().ok_or(FormatError::UnexpectedFormat)?;
    let children = Fields::new(root, "")
        .nested("data")
        .and_then(|data| data.array("children"))
        .map_err(|_| FormatError::UnexpectedFormat)?;

    let posts: Vec<PostSummary> = children
        .iter()
        .enumerate()
        .filter_map(|(idx, child)| {
            decode_entry(child, format!("data.children[{idx}]"), PostSummary::decode)
        })
        .collect();

    if posts.is_empty() {
        return Ok(NO_RESULTS_MESSAGE.to_string());
    }

    let mut result = String::new();
    result.push_str(&format!("Found {} results:\n\n", posts.len()));

    for (idx, post) in posts.iter().enumerate() {
        result.push_str(&format!("{}. Title: {}\n", idx + 1, post.title));
        result.push_str(&format!("   Author: u/{}\n", post.author));
        result.push_str(&format!("   Score: {}\n", post.score));
        result.push_str(&format!("   Post ID: {}\n\n", post.id));
    }

    Ok(result)
}

/// Render the first post of an `/api/info.json` listing
pub fn format_post_details(payload: &Payload, site_domain: &str) -> Result<String, FormatError> {
    let root = payload.as_object().ok_or(FormatError::UnexpectedFormat)?;
    let data = Fields::new(root, "")
        .nested("data")
        .map_err(|_| FormatError::UnexpectedFormat)?;

    let first = match data.array("children") {
        Ok([first, ..]) => first,
        _ => return Err(FormatError::PostNotFound),
    };

    let post_fields = Fields::from_value(first, "data.children[0]")
        .and_then(|child| child.nested("data"))
        .map_err(|_| FormatError::UnexpectedPostData)?;

    let post = PostDetail::decode(&post_fields)?;

    let mut result = String::new();
    result.push_str(&format!("Title: {}\n\n", post.title));
    result.push_str(&format!("Author: u/{}\n", post.author));
    // `{:.0}` rounds ties to even: a ratio of 0.125 reads as 12%.
    result.push_str(&format!(
        "Score: {} ({:.0}% upvoted)\n",
        post.score,
        post.upvote_ratio * 100.0
    ));
    result.push_str(&format!("Comments: {}\n", post.num_comments));
    result.push_str(&format!(
        "Created: {}\n\n",
        format_timestamp(post.created_utc)
    ));

    if let Some(selftext) = &post.selftext {
        result.push_str(&format!("Content:\n{selftext}\n\n"));
    }

    if let Some(url) = &post.url {
        if !is_self_link(url, site_domain) {
            result.push_str(&format!("URL: {url}\n\n"));
        }
    }

    Ok(result)
}

/// Render the top-level comments of a `/comments/<id>.json` response
///
/// The response is `[post_listing, comment_listing]`. Only direct children of
/// the comment listing are shown; `more` placeholders are skipped.
pub fn format_comments(payload: &Payload) -> Result<String, FormatError> {
    let listing = match payload.as_sequence() {
        Some([_, listing, ..]) => listing,
        _ => return Err(FormatError::UnexpectedFormat),
    };

    let listing =
        Fields::from_value(listing, "[1]").map_err(|_| FormatError::CommentsDataNotFound)?;
    let data = listing
        .nested("data")
        .map_err(|_| FormatError::CommentsObjectNotFound)?;
    let children = data.array("children").map_err(|_| FormatError::NoComments)?;

    let comments: Vec<Comment> = children
        .iter()
        .enumerate()
        .filter(|(idx, child)| is_renderable_comment(child, *idx))
        .filter_map(|(idx, child)| {
            decode_entry(child, format!("[1].data.children[{idx}]"), Comment::decode)
        })
        .collect();

    if comments.is_empty() {
        return Ok(NO_COMMENTS_MESSAGE.to_string());
    }

    let mut result = String::new();
    result.push_str(&format!("Found {} comments:\n\n", comments.len()));

    for (idx, comment) in comments.iter().enumerate() {
        result.push_str(&format!(
            "{}. u/{} ({} points):\n",
            idx + 1,
            comment.author,
            comment.score
        ));
        result.push_str(&format!("   {}\n\n", indent_body(&comment.body)));
    }

    Ok(result)
}

/// Render epoch seconds as `YYYY-MM-DD HH:MM:SS UTC`
///
/// Values chrono cannot represent fall back to `timestamp: <secs>`.
pub fn format_timestamp(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| format!("timestamp: {secs}"))
}

/// Whether `url` points back at `site_domain` (or one of its subdomains)
///
/// Site-relative paths such as `/r/rust/comments/...` count as self-links.
pub fn is_self_link(url: &str, site_domain: &str) -> bool {
    let url = url.trim();
    if url.starts_with('/') && !url.starts_with("//") {
        return true;
    }

    let without_scheme = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(url)
        .trim_start_matches('/');
    let authority = without_scheme
        .split(|c: char| matches!(c, '/' | '?' | '#'))
        .next()
        .unwrap_or_default();
    let host_port = authority.rsplit('@').next().unwrap_or_default();
    let host = host_port
        .split(':')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    let domain = site_domain.trim().to_ascii_lowercase();
    !domain.is_empty() && (host == domain || host.ends_with(&format!(".{domain}")))
}

/// Hang continuation lines of a comment body under a three-space indent
pub fn indent_body(body: &str) -> String {
    body.replace('\n', "\n   ")
}

/// Comment children need a string `kind` that is not the `more` placeholder
fn is_renderable_comment(child: &Value, idx: usize) -> bool {
    match child.get("kind").and_then(Value::as_str) {
        Some(MORE_KIND) => {
            log::debug!("skipping 'more' placeholder at [1].data.children[{idx}]");
            false
        }
        Some(_) => true,
        None => {
            log::debug!("skipping comment without kind at [1].data.children[{idx}]");
            false
        }
    }
}

/// Decode one listing child (`{ kind, data }`) or log why it was skipped
fn decode_entry<T>(
    child: &Value,
    path: String,
    decode: impl Fn(&Fields<'_>) -> Result<T, DecodeError>,
) -> Option<T> {
    let decoded =
        Fields::from_value(child, path).and_then(|entry| decode(&entry.nested("data")?));

    match decoded {
        Ok(value) => Some(value),
        Err(err) => {
            log::debug!("skipping listing entry: {err}");
            None
        }
    }
}
