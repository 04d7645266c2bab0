//! Remote API module
//!
//! # Components
//!
//! - `traits` - Collaborator traits the screen logic depends on
//! - `signer` - Request signing (bearer token or legacy admin headers)
//! - `http_client` - `reqwest` implementation of [`AccountsApi`]

pub mod http_client;
pub mod signer;
pub mod traits;

pub use http_client::HttpApiClient;
pub use signer::{AdminHeaders, BearerToken, RequestSigner};
pub use traits::{AccountsApi, AttendanceAnalytics};

use crate::types::ClientError;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Run `future` unless `cancel` fires first
///
/// A token that is already cancelled wins without polling `future`.
pub async fn cancellable<T, F>(cancel: &CancellationToken, future: F) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ClientError::Cancelled),
        result = future => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancellable_passes_result_through() {
        let cancel = CancellationToken::new();
        let result = cancellable(&cancel, async { Ok::<_, ClientError>(7) }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_cancellable_prefers_cancellation() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = cancellable(&cancel, async { Ok::<_, ClientError>(7) }).await;
        assert_eq!(result, Err(ClientError::Cancelled));
    }

    #[tokio::test]
    async fn test_cancel_interrupts_pending_future() {
        let cancel = CancellationToken::new();
        let child = cancel.clone();

        let pending = cancellable(&child, async {
            futures::future::pending::<()>().await;
            Ok::<_, ClientError>(())
        });
        cancel.cancel();

        assert_eq!(pending.await, Err(ClientError::Cancelled));
    }
}
