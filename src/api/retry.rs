use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::api::error::ApiError;

/// Retries an async operation on transport failures with linearly
/// increasing delay (base, 2x base, ...).
///
/// # Parameters
/// - `operation`: Closure returning a future
/// - `retries`: Number of retry attempts (total runs = 1 initial + retries)
/// - `base_delay`: Delay before the first retry; multiplied by the attempt
///   number for subsequent retries
///
/// # Returns
/// Either the successful result or the first non-retryable error, or the
/// last error once all attempts are exhausted.
pub async fn with_retry<F, Fut, T>(
    mut operation: F,
    retries: usize,
    base_delay: Duration,
) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(val) => return Ok(val),
            Err(err) => {
                if !err.is_retryable() || attempt > retries {
                    return Err(err);
                }
                warn!(
                    "Request failed, retrying ({}/{}): {}",
                    attempt, retries, err
                );
                tokio::time::sleep(base_delay * attempt as u32).await;
                attempt += 1;
            }
        }
    }
}
