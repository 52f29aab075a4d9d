//! Slide controller for gallery image changes

use std::time::{Duration, Instant};

use avastore_core::config::GalleryConfig;

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};

#[derive(Debug, Clone)]
struct ActiveSlide {
    start: Instant,
    from: f64,
    duration: Duration,
    easing: EasingType,
}

/// Horizontal offset of the incoming gallery image
///
/// `start(from)` places the image `from` columns away and `update` eases it
/// back to 0.
#[derive(Debug, Clone)]
pub struct SlideAnimator {
    animation: Option<ActiveSlide>,
    duration: Duration,
    easing: EasingType,
    current: f64,
}

impl Default for SlideAnimator {
    fn default() -> Self {
        Self::new(&GalleryConfig::default())
    }
}

impl SlideAnimator {
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            animation: None,
            duration: Duration::from_millis(config.transition_ms),
            easing: config.easing,
            current: 0.0,
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Begin a slide from `from` columns; positive enters from the right
    pub fn start(&mut self, from: f64, now: Instant) {
        if self.duration.is_zero() || self.easing == EasingType::None || from == 0.0 {
            self.animation = None;
            self.current = 0.0;
            return;
        }

        self.current = from;
        self.animation = Some(ActiveSlide {
            start: now,
            from,
            duration: self.duration,
            easing: self.easing,
        });
    }

    /// Advance to `now` and return the current offset
    pub fn update(&mut self, now: Instant) -> f64 {
        let Some(slide) = self.animation.as_ref() else {
            return self.current;
        };

        if is_complete(slide.start, slide.duration, now) {
            self.animation = None;
            self.current = 0.0;
            return 0.0;
        }

        let t = slide.easing.apply(progress(slide.start, slide.duration, now));
        self.current = lerp(slide.from, 0.0, t);
        self.current
    }

    /// Jump to rest
    pub fn finish(&mut self) {
        self.animation = None;
        self.current = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(transition_ms: u64, easing: EasingType) -> GalleryConfig {
        GalleryConfig {
            transition_ms,
            easing,
            ..Default::default()
        }
    }

    #[test]
    fn test_slide_eases_to_rest() {
        let start = Instant::now();
        let mut slide = SlideAnimator::new(&config(300, EasingType::Linear));

        slide.start(40.0, start);
        assert!(slide.is_animating());
        assert!((slide.update(start + Duration::from_millis(150)) - 20.0).abs() < 0.001);
        assert_eq!(slide.update(start + Duration::from_millis(300)), 0.0);
        assert!(!slide.is_animating());
    }

    #[test]
    fn test_ease_out_moves_faster_early() {
        let start = Instant::now();
        let mut slide = SlideAnimator::new(&config(300, EasingType::EaseOut));

        slide.start(-40.0, start);
        let halfway = slide.update(start + Duration::from_millis(150));
        assert!(halfway > -20.0 && halfway < 0.0);
    }

    #[test]
    fn test_disabled_transition_jumps() {
        let now = Instant::now();
        let mut slide = SlideAnimator::new(&config(0, EasingType::EaseOut));
        slide.start(40.0, now);
        assert!(!slide.is_animating());
        assert_eq!(slide.current(), 0.0);

        let mut slide = SlideAnimator::new(&config(300, EasingType::None));
        slide.start(40.0, now);
        assert!(!slide.is_animating());
    }

    #[test]
    fn test_finish() {
        let now = Instant::now();
        let mut slide = SlideAnimator::default();
        slide.start(10.0, now);
        slide.finish();
        assert_eq!(slide.update(now + Duration::from_millis(10)), 0.0);
    }
}
