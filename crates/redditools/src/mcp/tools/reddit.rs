use crate::prelude::{eprintln, *};
use serde_json::{Map, Value};

use super::{tool_result, JsonRpcError};

pub async fn handle_reddit_search(
    arguments: Option<Map<String, Value>>,
    global: &crate::Global,
) -> Result<Value, JsonRpcError> {
    if global.verbose {
        eprintln!("Calling reddit_search: arguments={arguments:?}");
    }

    let outcome = crate::reddit::search_data(arguments.as_ref(), &global.config).await;
    tool_result("reddit_search", outcome)
}

pub async fn handle_reddit_post(
    arguments: Option<Map<String, Value>>,
    global: &crate::Global,
) -> Result<Value, JsonRpcError> {
    if global.verbose {
        eprintln!("Calling reddit_post: arguments={arguments:?}");
    }

    let outcome = crate::reddit::post_data(arguments.as_ref(), &global.config).await;
    tool_result("reddit_post", outcome)
}

pub async fn handle_reddit_comments(
    arguments: Option<Map<String, Value>>,
    global: &crate::Global,
) -> Result<Value, JsonRpcError> {
    if global.verbose {
        eprintln!("Calling reddit_comments: arguments={arguments:?}");
    }

    let outcome = crate::reddit::comments_data(arguments.as_ref(), &global.config).await;
    tool_result("reddit_comments", outcome)
}
