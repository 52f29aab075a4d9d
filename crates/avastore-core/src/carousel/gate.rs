//! Hover and touch gating for a carousel
//!
//! A touch first pauses the carousel. Once the finger leaves the dead zone the
//! gesture is classified: a mostly vertical move is a page scroll, so the
//! carousel keeps running and lets the page scroll; anything else is a
//! carousel interaction and keeps it paused until the touch ends.

/// Movement (in px) a touch may make before it is classified
pub const TOUCH_DEAD_ZONE_PX: f64 = 10.0;

/// Touch gesture state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchPhase {
    Idle,
    TouchStarted { origin_x: f64, origin_y: f64 },
    VerticalScroll,
    HorizontalInteraction,
}

/// What the host should do with a touch move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureDecision {
    /// Still inside the dead zone
    Pending,
    /// Let the page scroll natively
    YieldToPage,
    /// The carousel owns the gesture
    Capture,
    /// No touch in progress
    Ignored,
}

#[derive(Debug, Clone)]
pub struct InteractionGate {
    pause_on_hover: bool,
    hovering: bool,
    touch: TouchPhase,
}

impl InteractionGate {
    pub fn new(pause_on_hover: bool) -> Self {
        Self {
            pause_on_hover,
            hovering: false,
            touch: TouchPhase::Idle,
        }
    }

    /// Whether the driver should be advancing
    pub fn is_running(&self) -> bool {
        let hover_paused = self.pause_on_hover && self.hovering;
        let touch_paused = matches!(
            self.touch,
            TouchPhase::TouchStarted { .. } | TouchPhase::HorizontalInteraction
        );
        !(hover_paused || touch_paused)
    }

    pub fn touch_phase(&self) -> TouchPhase {
        self.touch
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Pointer entered (true) or left (false) the carousel
    pub fn on_hover_change(&mut self, is_hovering: bool) {
        self.hovering = is_hovering;
    }

    /// Touch contact began (true) or ended (false) without position information
    pub fn on_touch_change(&mut self, is_touching: bool) {
        if is_touching {
            self.on_touch_start(0.0, 0.0);
        } else {
            self.on_touch_end();
        }
    }

    pub fn on_touch_start(&mut self, x: f64, y: f64) {
        self.touch = TouchPhase::TouchStarted {
            origin_x: x,
            origin_y: y,
        };
    }

    pub fn on_touch_move(&mut self, x: f64, y: f64) -> GestureDecision {
        match self.touch {
            TouchPhase::Idle => GestureDecision::Ignored,
            TouchPhase::VerticalScroll => GestureDecision::YieldToPage,
            TouchPhase::HorizontalInteraction => GestureDecision::Capture,
            TouchPhase::TouchStarted { origin_x, origin_y } => {
                let dx = (x - origin_x).abs();
                let dy = (y - origin_y).abs();
                if dy > dx && dy > TOUCH_DEAD_ZONE_PX {
                    self.touch = TouchPhase::VerticalScroll;
                    GestureDecision::YieldToPage
                } else if dx > TOUCH_DEAD_ZONE_PX || dy > TOUCH_DEAD_ZONE_PX {
                    self.touch = TouchPhase::HorizontalInteraction;
                    GestureDecision::Capture
                } else {
                    GestureDecision::Pending
                }
            }
        }
    }

    pub fn on_touch_end(&mut self) {
        self.touch = TouchPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_only_pauses_when_enabled() {
        let mut gate = InteractionGate::new(false);
        gate.on_hover_change(true);
        assert!(gate.is_running());

        let mut gate = InteractionGate::new(true);
        gate.on_hover_change(true);
        assert!(!gate.is_running());
        gate.on_hover_change(false);
        assert!(gate.is_running());
    }

    #[test]
    fn test_vertical_gesture_yields_and_resumes() {
        let mut gate = InteractionGate::new(false);
        gate.on_touch_start(100.0, 100.0);
        assert!(!gate.is_running());

        assert_eq!(gate.on_touch_move(102.0, 105.0), GestureDecision::Pending);
        assert_eq!(gate.on_touch_move(103.0, 130.0), GestureDecision::YieldToPage);
        assert_eq!(gate.touch_phase(), TouchPhase::VerticalScroll);
        assert!(gate.is_running());

        // Classification sticks for the rest of the gesture
        assert_eq!(gate.on_touch_move(200.0, 131.0), GestureDecision::YieldToPage);

        gate.on_touch_end();
        assert_eq!(gate.touch_phase(), TouchPhase::Idle);
    }

    #[test]
    fn test_horizontal_gesture_keeps_paused() {
        let mut gate = InteractionGate::new(false);
        gate.on_touch_start(0.0, 0.0);
        assert_eq!(gate.on_touch_move(-25.0, 4.0), GestureDecision::Capture);
        assert_eq!(gate.touch_phase(), TouchPhase::HorizontalInteraction);
        assert!(!gate.is_running());

        gate.on_touch_end();
        assert!(gate.is_running());
    }

    #[test]
    fn test_move_without_touch_is_ignored() {
        let mut gate = InteractionGate::new(true);
        assert_eq!(gate.on_touch_move(50.0, 50.0), GestureDecision::Ignored);
        assert!(gate.is_running());
    }

    #[test]
    fn test_touch_change_toggles() {
        let mut gate = InteractionGate::new(false);
        gate.on_touch_change(true);
        assert!(!gate.is_running());
        gate.on_touch_change(false);
        assert!(gate.is_running());
    }

    #[test]
    fn test_hover_and_touch_combine() {
        let mut gate = InteractionGate::new(true);
        gate.on_hover_change(true);
        gate.on_touch_start(0.0, 0.0);
        gate.on_touch_move(0.0, 40.0);
        // Touch yielded, hover still holds
        assert!(!gate.is_running());
        gate.on_hover_change(false);
        assert!(gate.is_running());
    }
}
