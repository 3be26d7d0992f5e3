use crate::prelude::{eprintln, *};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub async fn run_stdio(global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Starting MCP server with stdio transport...");
        eprintln!();
    }

    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();

    serve_lines(reader, writer, &global).await
}

/// One JSON-RPC message per line in, one response per line out
///
/// Requests are handled in order. Blank lines and notifications produce no
/// output; a line that is not UTF-8 gets a parse error and the loop goes on.
pub async fn serve_lines<R, W>(mut reader: R, mut writer: W, global: &crate::Global) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = Vec::new();

    loop {
        line.clear();
        let bytes_read = reader.read_until(b'\n', &mut line).await?;

        if bytes_read == 0 {
            break; // EOF
        }

        let response = match std::str::from_utf8(&line) {
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    continue;
                }

                if global.verbose {
                    eprintln!("Received: {trimmed}");
                }

                super::handle_request(trimmed, global).await
            }
            Err(e) => {
                log::warn!("discarding line that is not UTF-8: {e}");
                Some(super::JsonRpcResponse::parse_error(f!("invalid UTF-8: {e}")))
            }
        };

        let Some(response) = response else {
            continue;
        };
        let response_json = serde_json::to_string(&response)?;

        if global.verbose {
            eprintln!("Sending: {response_json}");
        }

        writer.write_all(response_json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    Ok(())
}
