//! Binding of in-flight requests to a view's lifetime

use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Lifetime of one mounted view.
///
/// Every request a view issues runs through [`ViewScope::run`]. Closing the
/// scope (explicitly, through a [`ScopeHandle`], or by dropping the view)
/// abandons in-flight requests and makes any later ones resolve to `None`.
#[derive(Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

/// Detached handle that lets the host tear a view down while it is busy
#[derive(Debug, Clone)]
pub struct ScopeHandle {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> ScopeHandle {
        ScopeHandle {
            token: self.token.clone(),
        }
    }

    /// Scope for a view embedded in this one; closing this scope closes it too
    pub fn child(&self) -> ViewScope {
        ViewScope {
            token: self.token.child_token(),
        }
    }

    pub fn close(&self) {
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drive `fut` unless the scope closes first
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.token.is_cancelled() {
            return None;
        }

        tokio::select! {
            biased;
            () = self.token.cancelled() => None,
            output = fut => Some(output),
        }
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

impl ScopeHandle {
    pub fn close(&self) {
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_completes_while_open() {
        let scope = ViewScope::new();
        assert_eq!(scope.run(async { 5 }).await, Some(5));
    }

    #[tokio::test]
    async fn test_closed_scope_discards_result() {
        let scope = ViewScope::new();
        scope.close();

        let result = scope.run(async { "ready" }).await;
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_handle_closes_in_flight_request() {
        let scope = ViewScope::new();
        let handle = scope.handle();

        let (result, ()) = tokio::join!(
            scope.run(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                "late"
            }),
            async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                handle.close();
            }
        );

        assert_eq!(result, None);
        assert!(scope.is_closed());
    }

    #[tokio::test]
    async fn test_closing_parent_closes_child() {
        let parent = ViewScope::new();
        let child = parent.child();

        parent.handle().close();
        assert!(child.is_closed());
        assert_eq!(child.run(async { 1 }).await, None);
    }

    #[test]
    fn test_closing_child_leaves_parent_open() {
        let parent = ViewScope::new();
        let child = parent.child();

        drop(child);
        assert!(!parent.is_closed());
    }

    #[test]
    fn test_drop_closes_handles() {
        let scope = ViewScope::new();
        let handle = scope.handle();
        drop(scope);
        assert!(handle.is_closed());
    }
}
