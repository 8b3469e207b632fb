//! Wall-clock stamps and timer sleeps for the analysis state machine.

/// Milliseconds since the Unix epoch, captured from the host clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstantStamp(f64);

impl InstantStamp {
    pub fn from_epoch_ms(ms: f64) -> Self {
        Self(ms)
    }

    pub fn epoch_ms(self) -> f64 {
        self.0
    }

    /// Whole seconds elapsed between `self` and `later`. Clock skew that
    /// puts `later` before `self` reads as zero.
    pub fn seconds_until(self, later: InstantStamp) -> u64 {
        let delta_ms = (later.0 - self.0).max(0.0);
        (delta_ms / 1000.0).floor() as u64
    }
}

pub fn now() -> InstantStamp {
    #[cfg(target_arch = "wasm32")]
    {
        InstantStamp(js_sys::Date::now())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};

        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as f64)
            .unwrap_or(0.0);
        InstantStamp(ms)
    }
}

pub async fn sleep_ms(ms: u64) {
    #[cfg(target_arch = "wasm32")]
    {
        gloo_timers::future::TimeoutFuture::new(ms as u32).await;
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_until_floors_partial_seconds() {
        let start = InstantStamp::from_epoch_ms(1_000.0);
        assert_eq!(start.seconds_until(InstantStamp::from_epoch_ms(3_999.0)), 2);
        assert_eq!(start.seconds_until(InstantStamp::from_epoch_ms(4_000.0)), 3);
    }

    #[test]
    fn seconds_until_clamps_backwards_clocks() {
        let start = InstantStamp::from_epoch_ms(5_000.0);
        assert_eq!(start.seconds_until(InstantStamp::from_epoch_ms(1_000.0)), 0);
    }
}
