use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Returns a child of `parent` that also cancels itself once `timeout` has
/// elapsed. Cancelling the returned token stops the timer; the parent is
/// never cancelled by it.
pub(crate) fn deadline_token(parent: &CancellationToken, timeout: Option<Duration>) -> CancellationToken {
    let token = parent.child_token();
    if let Some(timeout) = timeout {
        let timer = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = timer.cancelled() => {}
                _ = tokio::time::sleep(timeout) => {
                    tracing::debug!(timeout_ms = timeout.as_millis() as u64, "deadline expired");
                    timer.cancel();
                }
            }
        });
    }
    token
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;
    use crate::utils::cancel::deadline_token;

    #[tokio::test]
    async fn test_should_cancel_after_deadline() {
        let parent = CancellationToken::new();
        let token = deadline_token(&parent, Some(Duration::from_millis(50)));
        assert!(!token.is_cancelled());
        tokio::time::timeout(Duration::from_secs(2), token.cancelled()).await.expect("should expire");
        assert!(!parent.is_cancelled());
    }

    #[tokio::test]
    async fn test_should_follow_parent() {
        let parent = CancellationToken::new();
        let token = deadline_token(&parent, None);
        parent.cancel();
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_should_not_expire_without_timeout() {
        let token = deadline_token(&CancellationToken::new(), None);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!token.is_cancelled());
    }
}
