//! Parallel tool invocation.
//!
//! [`call_many`] issues every call of a batch at once and waits for all of
//! them. Outcomes come back in input order, one per input, and a failing call
//! never affects its siblings.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mcp_client::{parallel, McpClient, ServerProfile};
//! use serde_json::json;
//!
//! # async fn run() -> mcp_client::McpResult<()> {
//! let client = McpClient::new(ServerProfile::new("http://localhost:8080/mcp"))?;
//! let calls = ["react", "vue"].into_iter().map(|library| {
//!     let args = json!({"libraryName": library}).as_object().cloned();
//!     ("resolve-library-id".to_string(), args)
//! });
//!
//! let outcomes = parallel::call_many(&client, calls).await;
//! let summary = parallel::BatchSummary::from_outcomes(&outcomes);
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

use futures::future::join_all;
use tracing::debug;

use crate::client::McpClient;
use crate::error::McpResult;
use crate::messages::{CallToolResponse, JsonObject};

/// Call every `(tool, arguments)` pair concurrently.
///
/// The returned vector has one entry per input, in input order. If the
/// client is not yet initialized the calls share a single handshake.
pub async fn call_many<I>(client: &McpClient, calls: I) -> Vec<McpResult<CallToolResponse>>
where
    I: IntoIterator<Item = (String, Option<JsonObject>)>,
{
    let futures: Vec<_> = calls
        .into_iter()
        .map(|(name, arguments)| async move { client.call_tool(&name, arguments).await })
        .collect();

    debug!("Dispatching {} tool call(s) in parallel", futures.len());
    join_all(futures).await
}

/// Aggregate counts over the outcomes of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Number of calls in the batch
    pub total: usize,

    /// Calls that returned a result the tool did not flag as an error
    pub succeeded: usize,

    /// Calls that returned a result flagged `isError`
    pub tool_errors: usize,

    /// Calls that failed before producing a result
    pub failed: usize,
}

impl BatchSummary {
    /// Count the outcomes of a batch.
    pub fn from_outcomes(outcomes: &[McpResult<CallToolResponse>]) -> Self {
        outcomes
            .iter()
            .fold(Self::default(), |mut summary, outcome| {
                summary.total += 1;
                match outcome {
                    Ok(result) if result.is_error() => summary.tool_errors += 1,
                    Ok(_) => summary.succeeded += 1,
                    Err(_) => summary.failed += 1,
                }
                summary
            })
    }

    /// Whether every call succeeded without a tool error.
    pub fn all_succeeded(&self) -> bool {
        self.succeeded == self.total
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} call(s): {} succeeded, {} tool error(s), {} failed",
            self.total, self.succeeded, self.tool_errors, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;
    use crate::error::McpError;
    use crate::session::INITIALIZE_METHOD;
    use crate::testing::{server_reply, ScriptedTransport};
    use crate::transport::Transport;
    use serde_json::json;
    use std::time::{Duration, Instant};

    fn echo(message: &str) -> (String, Option<JsonObject>) {
        (
            "echo".to_string(),
            json!({"message": message}).as_object().cloned(),
        )
    }

    #[tokio::test]
    async fn test_results_follow_input_order() {
        let transport = ScriptedTransport::server();
        let client = McpClient::with_transport(transport.clone(), ClientConfig::default());

        let outcomes = call_many(&client, vec![echo("a"), echo("b"), echo("c")]).await;

        let texts: Vec<_> = outcomes.into_iter().map(|o| o.unwrap().text()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(transport.count(INITIALIZE_METHOD), 1);
        assert_eq!(transport.count("tools/call"), 3);
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let client = McpClient::with_transport(ScriptedTransport::server(), ClientConfig::default());

        let outcomes = call_many(
            &client,
            vec![
                echo("ok"),
                ("missing".to_string(), None),
                ("fail".to_string(), None),
                echo("also ok"),
            ],
        )
        .await;

        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes[0].as_ref().unwrap().text(), "ok");
        assert!(matches!(outcomes[1], Err(McpError::Protocol(_))));
        assert!(outcomes[2].as_ref().unwrap().is_error());
        assert_eq!(outcomes[3].as_ref().unwrap().text(), "also ok");

        let summary = BatchSummary::from_outcomes(&outcomes);
        assert_eq!(
            summary,
            BatchSummary {
                total: 4,
                succeeded: 2,
                tool_errors: 1,
                failed: 1
            }
        );
        assert!(!summary.all_succeeded());
        assert_eq!(
            summary.to_string(),
            "4 call(s): 2 succeeded, 1 tool error(s), 1 failed"
        );
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let transport = ScriptedTransport::server();
        let client = McpClient::with_transport(transport.clone(), ClientConfig::default());

        let outcomes = call_many(&client, Vec::<(String, Option<JsonObject>)>::new()).await;
        assert!(outcomes.is_empty());
        assert!(transport.requests().is_empty());
        assert!(BatchSummary::from_outcomes(&outcomes).all_succeeded());
    }

    #[tokio::test]
    async fn test_calls_run_concurrently() {
        let transport = ScriptedTransport::delayed(Duration::from_millis(100), server_reply);
        let client = McpClient::with_transport(transport.clone(), ClientConfig::default());
        client.initialize().await.unwrap();

        let started = Instant::now();
        let outcomes = call_many(&client, (0..5).map(|i| echo(&i.to_string()))).await;

        assert!(outcomes.iter().all(Result::is_ok));
        assert!(started.elapsed() < Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_closed_client_fails_every_item() {
        let transport = ScriptedTransport::server();
        let client = McpClient::with_transport(transport.clone(), ClientConfig::default());
        transport.close().await;

        let outcomes = call_many(&client, vec![echo("a"), echo("b")]).await;
        assert!(outcomes
            .iter()
            .all(|o| matches!(o, Err(McpError::State(_)))));
        assert_eq!(BatchSummary::from_outcomes(&outcomes).failed, 2);
    }
}
