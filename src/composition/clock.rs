use std::time::{Duration, Instant};

use crate::foundation::error::{MondrianError, MondrianResult};

/// Frame-interval throttle for a host-driven refresh loop.
///
/// The host calls [`FrameClock::should_render`] on every refresh callback;
/// the clock answers true only when at least one target frame interval has
/// elapsed since the last accepted tick. The first tick always renders.
#[derive(Clone, Debug)]
pub struct FrameClock {
    interval: Duration,
    last: Option<Instant>,
}

impl FrameClock {
    /// Clock targeting `fps` frames per second.
    pub fn new(fps: f64) -> MondrianResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(MondrianError::validation("fps must be > 0"));
        }
        Ok(Self {
            interval: Duration::from_secs_f64(1.0 / fps),
            last: None,
        })
    }

    /// Target frame interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a frame should render at `now`; advances the clock when it
    /// answers true.
    pub fn should_render(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the last accepted tick, so the next one renders immediately.
    pub fn restart(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/clock.rs"]
mod tests;
