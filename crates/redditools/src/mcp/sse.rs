use crate::prelude::{eprintln, *};
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use futures::stream::{self, Stream};
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub async fn run_sse(options: super::cli::SseOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!(
            "Starting MCP server with SSE transport on {}:{}...",
            options.host, options.port
        );
    }

    let addr = options.bind_addr();
    let verbose = global.verbose;
    let app_router = router(Arc::new(global));

    if verbose {
        eprintln!("MCP server listening on http://{}", addr);
        eprintln!("SSE endpoint: http://{}/sse", addr);
        eprintln!("Message endpoint: http://{}/message", addr);
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("listening on {addr}");

    axum::serve(listener, app_router)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

fn router(global: Arc<crate::Global>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/sse", get(sse_handler))
        .route("/message", post(message_handler))
        .layer(cors)
        .with_state(global)
}

async fn sse_handler(
    State(_global): State<Arc<crate::Global>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = stream::once(async { Ok(Event::default().data("MCP SSE endpoint ready")) });
    Sse::new(stream)
}

/// Takes the raw body so malformed JSON gets a JSON-RPC parse error
async fn message_handler(State(global): State<Arc<crate::Global>>, body: String) -> Response {
    match super::handle_request(&body, &global).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redditools_core::config::RedditConfig;
    use serde_json::Value;

    async fn serve() -> String {
        let global = crate::Global::with_config(RedditConfig::default());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, router(Arc::new(global))).await.unwrap();
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_message_endpoint() {
        let base = serve().await;

        let response = reqwest::Client::new()
            .post(format!("{base}/message"))
            .body(r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["id"], 1);
        assert_eq!(body["result"]["tools"][0]["name"], "reddit_search");
    }

    #[tokio::test]
    async fn test_message_endpoint_notification() {
        let base = serve().await;

        let response = reqwest::Client::new()
            .post(format!("{base}/message"))
            .body(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_message_endpoint_parse_error() {
        let base = serve().await;

        let body: Value = reqwest::Client::new()
            .post(format!("{base}/message"))
            .body("{oops")
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["error"]["code"], -32700);
    }

    #[tokio::test]
    async fn test_sse_endpoint_announces_itself() {
        let base = serve().await;

        let text = reqwest::get(format!("{base}/sse"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert!(text.contains("data: MCP SSE endpoint ready"));
    }
}
