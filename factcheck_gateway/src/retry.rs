use std::fmt::Display;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Retry an async operation, sleeping `delays[i]` seconds before retry `i`.
///
/// The operation runs once plus once per delay. An empty `delays` slice means
/// a single attempt.
///
/// # Returns
/// The result of the first successful attempt, or the last error
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, delays: &[u64]) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: Display,
{
    let total = delays.len() + 1;
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                let Some(delay_secs) = delays.get(attempt - 1) else {
                    return Err(e);
                };
                warn!(
                    "Request failed (attempt {attempt}/{total}): {e}. \
                     Retrying after {delay_secs}s..."
                );
                sleep(Duration::from_secs(*delay_secs)).await;
                attempt += 1;
            }
        }
    }
}
