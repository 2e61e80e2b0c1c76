//! Time utilities with clock abstraction for testability.

use chrono::{DateTime, TimeZone, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get the current UTC time
    fn now_utc(&self) -> DateTime<Utc>;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_millis: i64,
}

impl FixedClock {
    /// Create a new fixed clock from a Unix timestamp in milliseconds
    pub fn new(fixed_millis: i64) -> Self {
        Self { fixed_millis }
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.fixed_millis)
            .single()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_current_time() {
        // given:
        let clock = SystemClock;

        // when:
        let t1 = clock.now_utc();
        let t2 = clock.now_utc();

        // then:
        assert!(t1.timestamp_millis() > 0);
        assert!(t2 >= t1);
    }

    #[test]
    fn test_fixed_clock_returns_fixed_time() {
        // given:
        let fixed = 1_234_567_890_123;
        let clock = FixedClock::new(fixed);

        // when:
        let t1 = clock.now_utc();
        let t2 = clock.now_utc();

        // then:
        assert_eq!(t1.timestamp_millis(), fixed);
        assert_eq!(t2.timestamp_millis(), fixed);
    }
}
