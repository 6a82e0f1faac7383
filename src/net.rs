//! Rate-limit friendly sending for indexer requests.

use anyhow::{anyhow, Result};
use rand::{thread_rng, Rng};

/// Statuses worth another attempt.
pub fn is_transient(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Send `rb`, retrying transport errors and transient statuses up to
/// `max_retries` times with jittered exponential backoff. The last response
/// is returned as-is, whatever its status.
pub async fn send_with_backoff(rb: reqwest::RequestBuilder, label: &str, max_retries: u8) -> Result<reqwest::Response> {
    let mut attempt = 0u8;
    loop {
        let req = rb
            .try_clone()
            .ok_or_else(|| anyhow!("{label}: request body cannot be retried"))?;
        match req.send().await {
            Ok(r) if is_transient(r.status().as_u16()) && attempt < max_retries => {
                attempt += 1;
                let back_ms = backoff_delay_ms(attempt);
                log::warn!("[net] {} {label} retry={attempt} backoff={back_ms}ms", r.status().as_u16());
                tokio::time::sleep(std::time::Duration::from_millis(back_ms)).await;
            }
            Ok(r) => return Ok(r),
            Err(e) if attempt < max_retries => {
                attempt += 1;
                let back_ms = backoff_delay_ms(attempt);
                log::warn!("[net] err {label} retry={attempt} backoff={back_ms}ms : {e}");
                tokio::time::sleep(std::time::Duration::from_millis(back_ms)).await;
            }
            Err(e) => return Err(anyhow!(e).context(format!("{label}: request failed"))),
        }
    }
}

pub(crate) fn backoff_delay_ms(attempt: u8) -> u64 {
    let base = 300u64.saturating_mul(1u64 << (attempt.clamp(1, 5) - 1)); // 300,600,1200,2400,4800
    let jitter: u64 = thread_rng().gen_range(0..=250);
    base + jitter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_statuses() {
        assert!(is_transient(429));
        assert!(is_transient(503));
        assert!(!is_transient(400));
        assert!(!is_transient(200));
    }

    #[test]
    fn backoff_grows_and_is_bounded() {
        let first = backoff_delay_ms(1);
        assert!((300..=550).contains(&first));
        let fifth = backoff_delay_ms(5);
        assert!((4800..=5050).contains(&fifth));
        let capped = backoff_delay_ms(9);
        assert!((4800..=5050).contains(&capped));
    }
}
