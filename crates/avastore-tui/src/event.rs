use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

use crate::transition::timing::frame_interval;

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    animation_tick: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64, animation_fps: u32) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms.max(1)),
            animation_tick: frame_interval(animation_fps),
        }
    }

    /// Poll for the next event, waiting at most one idle tick
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll at frame rate while something is animating
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.animation_tick)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            match event::read()? {
                // Release events arrive on some platforms; only presses count
                Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(AppEvent::Key(key))),
                Event::Mouse(mouse) => Ok(Some(AppEvent::Mouse(mouse))),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// No input within the poll interval
    Tick,
}
