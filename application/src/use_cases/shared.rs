//! Shared utilities for use cases.

use crate::use_cases::run_group_chat::OrchestrationError;
use tokio_util::sync::CancellationToken;

/// Check if cancellation has been requested.
///
/// Returns `Err(OrchestrationError::Cancelled)` if the token exists and is cancelled.
pub(crate) fn check_cancelled(token: &Option<CancellationToken>) -> Result<(), OrchestrationError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(OrchestrationError::Cancelled);
    }
    Ok(())
}

/// Run an external call under the cancellation token.
///
/// Cancellation is checked before the call starts, raced against the call
/// while it is in flight, and checked again once it returns, so a result
/// that arrives after cancellation is dropped.
pub(crate) async fn cancellable<T, E, F>(
    token: &Option<CancellationToken>,
    call: F,
) -> Result<T, OrchestrationError>
where
    F: Future<Output = Result<T, E>>,
    OrchestrationError: From<E>,
{
    check_cancelled(token)?;
    let result = match token {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => return Err(OrchestrationError::Cancelled),
            result = call => result,
        },
        None => call.await,
    };
    check_cancelled(token)?;
    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;

    #[test]
    fn test_check_cancelled() {
        assert!(check_cancelled(&None).is_ok());

        let token = CancellationToken::new();
        assert!(check_cancelled(&Some(token.clone())).is_ok());
        token.cancel();
        assert!(matches!(
            check_cancelled(&Some(token)),
            Err(OrchestrationError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn test_late_result_is_discarded() {
        let token = CancellationToken::new();
        let inner = token.clone();
        let result = cancellable(&Some(token), async move {
            inner.cancel();
            Ok::<_, GatewayError>("too late")
        })
        .await;
        assert!(matches!(result, Err(OrchestrationError::Cancelled)));
    }

    #[tokio::test]
    async fn test_errors_convert() {
        let result: Result<(), _> =
            cancellable(&None, async { Err(GatewayError::Timeout) }).await;
        assert!(matches!(
            result,
            Err(OrchestrationError::Capability(GatewayError::Timeout))
        ));
    }
}
