//! Frame-rate independent scroll driver
//!
//! Advances a single owned offset by `speed * elapsed` on every frame and
//! wraps it into `[0, reset_threshold)`. The driver never touches a container;
//! callers take the returned offset and write it wherever it belongs.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Direction of travel as seen by the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::X,
            Direction::Up | Direction::Down => Axis::Y,
        }
    }

    /// Right and down travel against the natural scroll direction
    pub fn is_reversed(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

/// Carousel speed, either absolute or as the duration of one full cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speed {
    PxPerSec(f64),
    SecondsPerCycle(f64),
}

impl Speed {
    /// Resolve to px/sec for a cycle of `cycle_px`. Degenerate inputs yield 0.
    pub fn px_per_sec(self, cycle_px: f64) -> f64 {
        let speed = match self {
            Speed::PxPerSec(px) => px,
            Speed::SecondsPerCycle(secs) if secs > 0.0 => cycle_px / secs,
            Speed::SecondsPerCycle(_) => 0.0,
        };
        sanitize(speed)
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Wrap `position` into `[0, threshold)`, carrying any overshoot.
///
/// A threshold that is zero, negative or not finite pins the position at 0.
#[inline]
pub fn wrap_position(position: f64, threshold: f64) -> f64 {
    if !(threshold.is_finite() && threshold > 0.0) || !position.is_finite() {
        return 0.0;
    }
    let wrapped = position.rem_euclid(threshold);
    // rem_euclid can round up to the divisor itself
    if wrapped >= threshold {
        0.0
    } else {
        wrapped
    }
}

/// Mutable state owned by exactly one driver
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    /// Current offset, always within `[0, reset_threshold)`
    pub position_px: f64,
    /// Timestamp of the previous frame, `None` until the first frame after a start or resume
    pub last_frame: Option<Instant>,
    pub running: bool,
}

/// Per-frame offset updater
#[derive(Debug, Clone)]
pub struct ScrollDriver {
    state: ScrollState,
    speed_px_per_sec: f64,
    reset_threshold: f64,
}

impl ScrollDriver {
    /// Create a running driver at offset 0
    pub fn new(speed_px_per_sec: f64, reset_threshold: f64) -> Self {
        Self {
            state: ScrollState {
                position_px: 0.0,
                last_frame: None,
                running: true,
            },
            speed_px_per_sec: sanitize(speed_px_per_sec),
            reset_threshold: sanitize(reset_threshold),
        }
    }

    #[inline]
    pub fn position(&self) -> f64 {
        self.state.position_px
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn speed(&self) -> f64 {
        self.speed_px_per_sec
    }

    pub fn reset_threshold(&self) -> f64 {
        self.reset_threshold
    }

    pub fn set_speed(&mut self, speed_px_per_sec: f64) {
        self.speed_px_per_sec = sanitize(speed_px_per_sec);
    }

    /// Change the wrap point, keeping the current offset inside the new range
    pub fn set_reset_threshold(&mut self, threshold: f64) {
        self.reset_threshold = sanitize(threshold);
        self.state.position_px = wrap_position(self.state.position_px, self.reset_threshold);
    }

    /// Advance by an explicit elapsed time and return the new offset
    ///
    /// A paused driver returns its offset unchanged.
    pub fn tick(&mut self, delta: Duration) -> f64 {
        if !self.state.running {
            return self.state.position_px;
        }
        let advanced = self.state.position_px + self.speed_px_per_sec * delta.as_secs_f64();
        self.state.position_px = wrap_position(advanced, self.reset_threshold);
        self.state.position_px
    }

    /// Advance to the frame timestamp `now` and return the new offset
    ///
    /// The first frame after construction or `resume` only records the
    /// timestamp. Timestamps that go backwards count as zero elapsed time.
    pub fn frame(&mut self, now: Instant) -> f64 {
        if !self.state.running {
            return self.state.position_px;
        }
        let delta = self
            .state
            .last_frame
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.state.last_frame = Some(now);
        self.tick(delta)
    }

    /// Freeze the offset; elapsed time while paused is never applied
    pub fn pause(&mut self) {
        self.state.running = false;
        self.state.last_frame = None;
    }

    /// Continue from the frozen offset. The next frame re-establishes the time base.
    pub fn resume(&mut self) {
        if !self.state.running {
            self.state.running = true;
            self.state.last_frame = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_advances_before_wrap() {
        let mut driver = ScrollDriver::new(30.0, 90.0);
        assert!(approx(driver.tick(Duration::from_secs(2)), 60.0));
    }

    #[test]
    fn test_wrap_carries_overshoot() {
        let mut driver = ScrollDriver::new(30.0, 90.0);
        assert!(approx(driver.tick(Duration::from_millis(3500)), 15.0));
    }

    #[test]
    fn test_frame_rate_independence() {
        let start = Instant::now();

        let mut coarse = ScrollDriver::new(30.0, 90.0);
        coarse.frame(start);
        coarse.frame(start + Duration::from_millis(3500));

        let mut fine = ScrollDriver::new(30.0, 90.0);
        fine.frame(start);
        for step in 1..=350 {
            fine.frame(start + Duration::from_millis(step * 10));
        }

        assert!(approx(coarse.position(), 15.0));
        assert!((fine.position() - coarse.position()).abs() < 1e-3);
    }

    #[test]
    fn test_first_frame_does_not_move() {
        let mut driver = ScrollDriver::new(30.0, 90.0);
        assert_eq!(driver.frame(Instant::now()), 0.0);
    }

    #[test]
    fn test_pause_has_no_net_effect() {
        let start = Instant::now();
        let mut driver = ScrollDriver::new(30.0, 90.0);
        driver.frame(start);
        driver.frame(start + Duration::from_secs(1));
        assert!(approx(driver.position(), 30.0));

        driver.pause();
        driver.frame(start + Duration::from_secs(5));
        assert!(approx(driver.position(), 30.0));

        driver.resume();
        driver.frame(start + Duration::from_secs(10));
        assert!(approx(driver.position(), 30.0));
        driver.frame(start + Duration::from_secs(11));
        assert!(approx(driver.position(), 60.0));
    }

    #[test]
    fn test_position_stays_in_range() {
        let start = Instant::now();
        let mut driver = ScrollDriver::new(47.3, 90.0);
        driver.frame(start);
        for step in 1..2000u64 {
            let pos = driver.frame(start + Duration::from_millis(step * 17));
            assert!(pos >= 0.0 && pos < 90.0, "out of range: {}", pos);
        }
    }

    #[test]
    fn test_degenerate_threshold_pins_to_zero() {
        let mut driver = ScrollDriver::new(30.0, 0.0);
        assert_eq!(driver.tick(Duration::from_secs(3)), 0.0);

        let mut driver = ScrollDriver::new(30.0, f64::NAN);
        assert_eq!(driver.tick(Duration::from_secs(3)), 0.0);
    }

    #[test]
    fn test_shrinking_threshold_rewraps() {
        let mut driver = ScrollDriver::new(30.0, 90.0);
        driver.tick(Duration::from_secs(2));
        driver.set_reset_threshold(50.0);
        assert!(approx(driver.position(), 10.0));
    }

    #[test]
    fn test_speed_from_cycle() {
        assert!(approx(Speed::SecondsPerCycle(20.0).px_per_sec(400.0), 20.0));
        assert!(approx(Speed::PxPerSec(12.5).px_per_sec(400.0), 12.5));
        assert_eq!(Speed::SecondsPerCycle(0.0).px_per_sec(400.0), 0.0);
        assert_eq!(Speed::PxPerSec(-4.0).px_per_sec(400.0), 0.0);
    }

    #[test]
    fn test_direction_axis() {
        assert_eq!(Direction::Left.axis(), Axis::X);
        assert_eq!(Direction::Down.axis(), Axis::Y);
        assert!(Direction::Right.is_reversed());
        assert!(!Direction::Up.is_reversed());
    }
}
