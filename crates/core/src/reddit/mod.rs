//! Pure transformations for the Reddit JSON API
//!
//! A tool call flows through these modules in order:
//!
//! 1. [`args`]: untyped arguments to typed parameters
//! 2. [`request`]: parameters to an endpoint path and query
//! 3. [`payload`]: response body to a [`Payload`](payload::Payload)
//! 4. [`format`]: payload to plain text, via the typed views in [`model`]

pub mod args;
pub mod format;
pub mod model;
pub mod payload;
pub mod request;

pub use args::{
    extract_comments_args, extract_post_args, extract_search_args, CommentSort, CommentsParams,
    PostParams, SearchParams, SearchSort, ValidationError,
};
pub use format::{
    format_comments, format_post_details, format_search_results, format_timestamp, FormatError,
};
pub use payload::{DecodeError, Payload};
pub use request::{comments_request, post_request, search_request, RedditRequest};
