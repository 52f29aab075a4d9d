use std::time::{Duration, Instant};

/// What a finished horizontal drag should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAction {
    Previous,
    Next,
    Stay,
}

/// Classify a drag by its horizontal offset
///
/// Dragging right reveals the previous image, dragging left the next one.
pub fn classify_swipe(offset_px: f64, min_swipe_px: f64) -> SwipeAction {
    if !offset_px.is_finite() || offset_px.abs() < min_swipe_px.max(0.0) || offset_px == 0.0 {
        SwipeAction::Stay
    } else if offset_px > 0.0 {
        SwipeAction::Previous
    } else {
        SwipeAction::Next
    }
}

/// Wrap-around cursor over a product's images
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    images: Vec<String>,
    index: usize,
}

impl Gallery {
    pub fn new(images: Vec<String>) -> Self {
        Self { images, index: 0 }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&str> {
        self.images.get(self.index).map(String::as_str)
    }

    pub fn next(&mut self) -> usize {
        if !self.images.is_empty() {
            self.index = (self.index + 1) % self.images.len();
        }
        self.index
    }

    pub fn prev(&mut self) -> usize {
        if !self.images.is_empty() {
            self.index = (self.index + self.images.len() - 1) % self.images.len();
        }
        self.index
    }

    /// Jump to `index`; out-of-range requests are ignored
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.images.len() {
            self.index = index;
            true
        } else {
            false
        }
    }

    /// Apply a swipe and return whether the image changed
    pub fn apply_swipe(&mut self, action: SwipeAction) -> bool {
        if self.images.len() < 2 {
            return false;
        }
        match action {
            SwipeAction::Previous => {
                self.prev();
                true
            }
            SwipeAction::Next => {
                self.next();
                true
            }
            SwipeAction::Stay => false,
        }
    }
}

/// Timed auto-advance for the hero slider
///
/// Manual navigation holds the rotation for `resume_after` before the
/// interval timer starts again.
#[derive(Debug, Clone)]
pub struct HeroRotation {
    len: usize,
    index: usize,
    interval: Duration,
    resume_after: Duration,
    last_advance: Option<Instant>,
    held_until: Option<Instant>,
}

impl HeroRotation {
    pub fn new(len: usize, interval: Duration, resume_after: Duration) -> Self {
        Self {
            len,
            index: 0,
            interval,
            resume_after,
            last_advance: None,
            held_until: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_held(&self, now: Instant) -> bool {
        self.held_until.is_some_and(|until| now < until)
    }

    /// Advance when the interval has elapsed. Returns true if the slide changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.len == 0 || self.interval.is_zero() {
            return false;
        }
        if self.is_held(now) {
            return false;
        }
        if let Some(until) = self.held_until.take() {
            self.last_advance = Some(until);
        }

        let Some(last) = self.last_advance else {
            self.last_advance = Some(now);
            return false;
        };
        if now.saturating_duration_since(last) < self.interval {
            return false;
        }

        self.index = (self.index + 1) % self.len;
        self.last_advance = Some(now);
        true
    }

    /// Manual navigation to a slide; suspends auto-advance
    pub fn go_to(&mut self, index: usize, now: Instant) -> bool {
        if index >= self.len {
            return false;
        }
        self.index = index;
        self.held_until = Some(now + self.resume_after);
        true
    }

    pub fn next(&mut self, now: Instant) -> bool {
        if self.len == 0 {
            return false;
        }
        self.go_to((self.index + 1) % self.len, now)
    }

    pub fn prev(&mut self, now: Instant) -> bool {
        if self.len == 0 {
            return false;
        }
        self.go_to((self.index + self.len - 1) % self.len, now)
    }
}
