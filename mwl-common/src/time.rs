//! Timestamp utilities

use chrono::{DateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Current wall-clock time in milliseconds since the Unix epoch.
///
/// Active sighting decay times are computed and compared in this unit.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert milliseconds to duration
pub fn millis_to_duration(millis: u64) -> std::time::Duration {
    std::time::Duration::from_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // Should be a reasonable timestamp (after year 2000)
        assert!(timestamp.timestamp() > 946_684_800); // 2000-01-01 00:00:00 UTC
    }

    #[test]
    fn test_now_ms_matches_now() {
        let before = now().timestamp_millis();
        let ms = now_ms();
        let after = now().timestamp_millis();
        assert!(before <= ms && ms <= after);
    }

    #[tokio::test]
    async fn test_now_ms_successive_calls_advance() {
        let t1 = now_ms();
        tokio::time::sleep(Duration::from_millis(10)).await;
        let t2 = now_ms();
        assert!(t2 > t1);
    }

    #[test]
    fn test_millis_to_duration_zero() {
        let duration = millis_to_duration(0);
        assert_eq!(duration, Duration::from_millis(0));
    }

    #[test]
    fn test_millis_to_duration_one_hour() {
        let duration = millis_to_duration(3_600_000);
        assert_eq!(duration, Duration::from_secs(3600));
    }
}
