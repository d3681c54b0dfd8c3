use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use log::{debug, warn};

/// Polls until a value becomes available or the timeout is reached.
///
/// # Arguments
/// * `check` - Closure returning `Ok(Some(value))` when done, `Ok(None)` to keep polling
/// * `max_wait` - Maximum time to wait before giving up
/// * `poll_interval` - Time to sleep between polls
/// * `operation_name` - Name of the operation for logging
///
/// # Returns
/// * `Some(value)` - The check produced a value within the timeout
/// * `None` - Timeout reached (errors are logged and polling continues)
pub async fn poll_until<T, E, F, Fut>(
    check: F,
    max_wait: Duration,
    poll_interval: Duration,
    operation_name: &str,
) -> Option<T>
where
    E: Display,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    let start = std::time::Instant::now();

    loop {
        match check().await {
            Ok(Some(value)) => {
                debug!("{} completed", operation_name);
                return Some(value);
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Error checking {} status while waiting: {}", operation_name, e);
            }
        }

        if start.elapsed() > max_wait {
            warn!("Timed out waiting for {} to complete", operation_name);
            return None;
        }

        tokio::time::sleep(poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_poll_until_value_available_immediately() {
        let result = poll_until(
            || async { Ok::<_, String>(Some(7)) },
            Duration::from_millis(100),
            Duration::from_millis(10),
            "immediate_test",
        )
        .await;

        assert_eq!(result, Some(7));
    }

    #[tokio::test]
    async fn test_poll_until_value_after_multiple_polls() {
        let poll_count = Arc::new(AtomicU32::new(0));
        let poll_count_clone = Arc::clone(&poll_count);

        let result = poll_until(
            move || {
                let count = poll_count_clone.fetch_add(1, Ordering::SeqCst);
                async move { Ok::<_, String>((count >= 2).then_some(count)) }
            },
            Duration::from_secs(1),
            Duration::from_millis(10),
            "delayed_value_test",
        )
        .await;

        assert_eq!(result, Some(2));
        assert_eq!(poll_count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_poll_until_timeout_reached() {
        let result = poll_until(
            || async { Ok::<Option<u32>, String>(None) },
            Duration::from_millis(50),
            Duration::from_millis(10),
            "timeout_test",
        )
        .await;

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_poll_until_continues_polling_after_errors() {
        let poll_count = Arc::new(AtomicU32::new(0));
        let poll_count_clone = Arc::clone(&poll_count);

        let result = poll_until(
            move || {
                let count = poll_count_clone.fetch_add(1, Ordering::SeqCst);
                async move {
                    if count < 2 {
                        Err("temporary error".to_string())
                    } else {
                        Ok(Some("receipt"))
                    }
                }
            },
            Duration::from_secs(1),
            Duration::from_millis(10),
            "error_recovery_test",
        )
        .await;

        assert_eq!(result, Some("receipt"));
        assert!(poll_count.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn test_poll_until_timeout_after_persistent_errors() {
        let poll_count = Arc::new(AtomicU32::new(0));
        let poll_count_clone = Arc::clone(&poll_count);

        let result = poll_until(
            move || {
                poll_count_clone.fetch_add(1, Ordering::SeqCst);
                async { Err::<Option<u32>, _>("persistent error") }
            },
            Duration::from_millis(50),
            Duration::from_millis(10),
            "persistent_error_test",
        )
        .await;

        assert!(result.is_none());
        assert!(poll_count.load(Ordering::SeqCst) >= 2);
    }
}
