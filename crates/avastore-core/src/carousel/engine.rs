//! Generic carousel engine: one instance per rendered carousel
//!
//! Composes the sequencer, driver, reset policy and interaction gate. The host
//! calls `frame` from its render loop; the engine writes the offset to the
//! attached container and reports what happened.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::time::Instant;

use super::driver::{wrap_position, Axis, ScrollDriver};
use super::gate::{GestureDecision, InteractionGate};
use super::reset::{ScrollContainer, TrackGeometry};
use super::sequencer::{CarouselItem, SequencedList, Slot};
use crate::config::CarouselConfig;

/// Result of one frame callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Nothing to animate (not mounted or no items); no frame is scheduled
    Idle,
    /// Gate is closed; offset unchanged
    Paused(f64),
    /// Offset written to the container
    Rendered(f64),
    /// Container went away; the frame chain has been cancelled
    Stopped,
}

/// A slot placed inside the viewport
#[derive(Debug, Clone)]
pub struct PlacedSlot<'a, T> {
    pub slot: Slot<'a, T>,
    /// Leading edge relative to the viewport origin (may be negative)
    pub start: f64,
    pub extent: f64,
}

pub struct Carousel<T> {
    name: String,
    config: CarouselConfig,
    items: Option<SequencedList<T>>,
    driver: Option<ScrollDriver>,
    gate: InteractionGate,
    container: Option<Weak<RefCell<dyn ScrollContainer>>>,
    offset: f64,
}

impl<T> std::fmt::Debug for Carousel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("name", &self.name)
            .field("scheduled", &self.driver.is_some())
            .field("offset", &self.offset)
            .finish()
    }
}

impl<T: CarouselItem> Carousel<T> {
    pub fn new(name: impl Into<String>, config: CarouselConfig) -> Self {
        let gate = InteractionGate::new(config.pause_on_hover);
        Self {
            name: name.into(),
            config,
            items: None,
            driver: None,
            gate,
            container: None,
            offset: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn axis(&self) -> Axis {
        self.config.direction.axis()
    }

    /// Whether a frame chain is live
    #[inline]
    pub fn is_scheduled(&self) -> bool {
        self.driver.is_some()
    }

    /// True when the host should render the empty-state placeholder
    pub fn is_placeholder(&self) -> bool {
        self.items.as_ref().map_or(true, |list| list.is_empty())
    }

    /// Offset last written to the container
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn position(&self) -> Option<f64> {
        self.driver.as_ref().map(ScrollDriver::position)
    }

    pub fn reset_threshold(&self) -> Option<f64> {
        self.driver.as_ref().map(ScrollDriver::reset_threshold)
    }

    pub fn items(&self) -> Option<&SequencedList<T>> {
        self.items.as_ref()
    }

    pub fn gate(&self) -> &InteractionGate {
        &self.gate
    }

    /// Attach the surface the track is rendered into
    pub fn attach<C: ScrollContainer + 'static>(&mut self, container: &Rc<RefCell<C>>) {
        let shared: Rc<RefCell<dyn ScrollContainer>> = container.clone();
        self.container = Some(Rc::downgrade(&shared));
        self.relayout();
    }

    /// Mount with an initial item list
    pub fn mount(&mut self, items: Arc<[T]>) {
        self.items = Some(SequencedList::new(items, self.config.copies));
        self.sync_schedule();
        tracing::info!(
            carousel = %self.name,
            items = self.item_count(),
            scheduled = self.is_scheduled(),
            "Carousel mounted"
        );
    }

    /// Replace the item list. A list with the same identity is a no-op.
    pub fn set_items(&mut self, items: Arc<[T]>) {
        let changed = match self.items.as_mut() {
            Some(list) => list.refresh(&items),
            None => {
                self.items = Some(SequencedList::new(items, self.config.copies));
                true
            }
        };
        if changed {
            tracing::debug!(carousel = %self.name, items = self.item_count(), "Carousel items changed");
            self.sync_schedule();
        }
    }

    /// Cancel the frame chain and drop all state
    pub fn unmount(&mut self) {
        self.driver = None;
        self.items = None;
        self.container = None;
        self.offset = 0.0;
        tracing::info!(carousel = %self.name, "Carousel unmounted");
    }

    /// Recompute the reset threshold after container geometry changed
    pub fn relayout(&mut self) {
        let threshold = self.compute_threshold();
        let speed = self.config.speed.px_per_sec(self.geometry().period());
        if let Some(driver) = self.driver.as_mut() {
            driver.set_reset_threshold(threshold);
            driver.set_speed(speed);
        }
    }

    pub fn on_hover_change(&mut self, is_hovering: bool) {
        self.gate.on_hover_change(is_hovering);
        self.sync_gate();
    }

    pub fn on_touch_change(&mut self, is_touching: bool) {
        self.gate.on_touch_change(is_touching);
        self.sync_gate();
    }

    pub fn on_touch_start(&mut self, x: f64, y: f64) {
        self.gate.on_touch_start(x, y);
        self.sync_gate();
    }

    pub fn on_touch_move(&mut self, x: f64, y: f64) -> GestureDecision {
        let decision = self.gate.on_touch_move(x, y);
        self.sync_gate();
        decision
    }

    pub fn on_touch_end(&mut self) {
        self.gate.on_touch_end();
        self.sync_gate();
    }

    /// Per-frame callback
    pub fn frame(&mut self, now: Instant) -> FrameOutcome {
        if self.driver.is_none() {
            return FrameOutcome::Idle;
        }

        let container = match self.container.as_ref().map(|weak| weak.upgrade()) {
            Some(Some(container)) => Some(container),
            Some(None) => {
                tracing::warn!(carousel = %self.name, "Container detached, cancelling animation");
                self.driver = None;
                self.container = None;
                return FrameOutcome::Stopped;
            }
            None => None,
        };

        self.sync_gate();
        let reversed = self.config.direction.is_reversed();
        let axis = self.axis();
        let Some(driver) = self.driver.as_mut() else {
            return FrameOutcome::Idle;
        };
        if !driver.is_running() {
            return FrameOutcome::Paused(self.offset);
        }

        let position = driver.frame(now);
        let threshold = driver.reset_threshold();
        self.offset = if reversed && threshold > 0.0 {
            wrap_position(threshold - position, threshold)
        } else {
            position
        };

        if let Some(container) = container {
            match container.try_borrow_mut() {
                Ok(mut surface) => surface.apply_offset(axis, self.offset),
                Err(_) => {
                    tracing::debug!(carousel = %self.name, "Container busy, offset write skipped");
                }
            }
        }

        FrameOutcome::Rendered(self.offset)
    }

    /// Slots intersecting a viewport of `viewport_extent` at the current offset
    ///
    /// The sequenced list is tiled cyclically, so a viewport longer than the
    /// remaining track still sees a continuous run of items.
    pub fn visible_window(&self, viewport_extent: f64) -> Vec<PlacedSlot<'_, T>> {
        let Some(list) = self.items.as_ref() else {
            return Vec::new();
        };
        let extent = self.config.item_extent.max(0.0);
        let stride = extent + self.config.gap.max(0.0);
        if list.is_empty() || stride <= 0.0 || !viewport_extent.is_finite() {
            return Vec::new();
        }

        let mut placed = Vec::new();
        let mut position = (self.offset / stride).floor().max(0.0) as usize;
        loop {
            let start = position as f64 * stride - self.offset;
            if start >= viewport_extent {
                break;
            }
            if start + extent > 0.0 {
                if let Some(slot) = list.get(position % list.len()) {
                    placed.push(PlacedSlot {
                        slot,
                        start,
                        extent,
                    });
                }
            }
            position += 1;
        }
        placed
    }

    fn item_count(&self) -> usize {
        self.items.as_ref().map_or(0, SequencedList::item_count)
    }

    fn geometry(&self) -> TrackGeometry {
        TrackGeometry {
            item_count: self.item_count(),
            item_extent: self.config.item_extent,
            gap: self.config.gap,
        }
    }

    fn compute_threshold(&self) -> f64 {
        let geometry = self.geometry();
        match self.container.as_ref().and_then(Weak::upgrade) {
            Some(container) => match container.try_borrow() {
                Ok(surface) => {
                    self.config
                        .reset_policy
                        .compute_reset_threshold(&*surface, self.axis(), geometry)
                }
                Err(_) => geometry.period(),
            },
            None => geometry.period(),
        }
    }

    /// Create or cancel the driver to match the item list
    fn sync_schedule(&mut self) {
        if self.is_placeholder() {
            if self.driver.take().is_some() {
                tracing::debug!(carousel = %self.name, "Item list empty, animation cancelled");
            }
            self.offset = 0.0;
            return;
        }

        if self.driver.is_none() {
            let mut driver = ScrollDriver::new(0.0, 0.0);
            if !self.gate.is_running() {
                driver.pause();
            }
            self.driver = Some(driver);
        }
        self.relayout();
    }

    fn sync_gate(&mut self) {
        let running = self.gate.is_running();
        if let Some(driver) = self.driver.as_mut() {
            if running {
                driver.resume();
            } else if driver.is_running() {
                driver.pause();
            }
        }
    }
}
