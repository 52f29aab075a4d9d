use std::time::{Duration, Instant};

/// Animation progress in [0, 1] at `now`
#[inline]
pub fn progress(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

#[inline]
pub fn is_complete(start: Instant, duration: Duration, now: Instant) -> bool {
    now.saturating_duration_since(start) >= duration
}

#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Frame interval for a target frame rate (0 falls back to ~60fps)
#[inline]
pub fn frame_interval(fps: u32) -> Duration {
    if fps == 0 {
        Duration::from_millis(16)
    } else {
        Duration::from_millis((1000 / fps as u64).max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(-40.0, 0.0, 1.0) - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_progress() {
        let start = Instant::now();
        let duration = Duration::from_millis(300);
        assert!((progress(start, Duration::ZERO, start) - 1.0).abs() < 0.001);
        assert!((progress(start, duration, start + Duration::from_millis(150)) - 0.5).abs() < 0.001);
        assert!((progress(start, duration, start + Duration::from_secs(1)) - 1.0).abs() < 0.001);
        assert!(!is_complete(start, duration, start + Duration::from_millis(299)));
        assert!(is_complete(start, duration, start + duration));
    }

    #[test]
    fn test_frame_interval() {
        assert_eq!(frame_interval(60), Duration::from_millis(16));
        assert_eq!(frame_interval(0), Duration::from_millis(16));
        assert_eq!(frame_interval(5000), Duration::from_millis(1));
    }
}
