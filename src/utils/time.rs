//! Time utilities

use chrono::{DateTime, Utc};

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Current time as whole seconds since the Unix epoch
pub fn now_unix() -> i64 {
    now_utc().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_unix_is_seconds() {
        let now = now_unix();
        // 2020-01-01 .. 2100-01-01
        assert!(now > 1_577_836_800);
        assert!(now < 4_102_444_800);
    }
}
