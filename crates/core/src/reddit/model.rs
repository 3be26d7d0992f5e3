//! Typed views of the Reddit "thing" objects the formatters render

use super::payload::{DecodeError, Fields};

/// Discriminator Reddit uses for "load more comments" placeholders
pub const MORE_KIND: &str = "more";

/// One search hit (`t3` thing)
#[derive(Debug, Clone, PartialEq)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub author: String,
    pub score: i64,
}

impl PostSummary {
    pub fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: fields.str("id")?.to_string(),
            title: fields.str("title")?.to_string(),
            author: fields.str("author")?.to_string(),
            score: fields.int("score")?,
        })
    }
}

/// A post as returned by `/api/info.json`
#[derive(Debug, Clone, PartialEq)]
pub struct PostDetail {
    pub title: String,
    pub author: String,
    pub score: i64,
    pub upvote_ratio: f64,
    pub num_comments: i64,
    pub created_utc: i64,
    pub selftext: Option<String>,
    pub url: Option<String>,
}

impl PostDetail {
    pub fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            title: fields.str("title")?.to_string(),
            author: fields.str("author")?.to_string(),
            score: fields.int("score")?,
            upvote_ratio: fields.float("upvote_ratio")?,
            num_comments: fields.int("num_comments")?,
            created_utc: fields.int("created_utc")?,
            selftext: fields.optional_str("selftext").map(str::to_string),
            url: fields.optional_str("url").map(str::to_string),
        })
    }
}

/// A top-level comment (`t1` thing)
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub author: String,
    pub body: String,
    pub score: i64,
}

impl Comment {
    pub fn decode(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            author: fields.str("author")?.to_string(),
            body: fields.str("body")?.to_string(),
            score: fields.int("score")?,
        })
    }
}
