//! Terminal surface for carousels
//!
//! One terminal cell is one unit of track extent. Mouse input is converted
//! to approximate pixels before it reaches the touch classifier so the dead
//! zone keeps its meaning.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use avastore_core::carousel::{
    Axis, Carousel, CarouselItem, FrameOutcome, GestureDecision, ScrollContainer, TrackGeometry,
};
use avastore_core::CarouselConfig;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

/// Approximate pixel size of a terminal cell
pub const CELL_WIDTH_PX: f64 = 8.0;
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// Rectangle a carousel track scrolls inside
#[derive(Debug, Clone, Default)]
pub struct TerminalViewport {
    area: Rect,
    content_extent: f64,
    offset: f64,
}

impl TerminalViewport {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            ..Default::default()
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    /// Length of the whole (repeated) track along the scroll axis
    pub fn set_content_extent(&mut self, extent: f64) {
        self.content_extent = extent.max(0.0);
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.width > 0
            && self.area.height > 0
            && column >= self.area.x
            && column < self.area.x.saturating_add(self.area.width)
            && row >= self.area.y
            && row < self.area.y.saturating_add(self.area.height)
    }

    fn client(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.area.width as f64,
            Axis::Y => self.area.height as f64,
        }
    }
}

impl ScrollContainer for TerminalViewport {
    fn scroll_extent(&self, axis: Axis) -> f64 {
        self.content_extent.max(self.client(axis))
    }

    fn client_extent(&self, axis: Axis) -> f64 {
        self.client(axis)
    }

    fn apply_offset(&mut self, _axis: Axis, offset: f64) {
        self.offset = offset;
    }
}

/// A carousel bound to its terminal viewport
#[derive(Debug)]
pub struct CarouselHost<T> {
    carousel: Carousel<T>,
    viewport: Rc<RefCell<TerminalViewport>>,
    hovering: bool,
}

impl<T: CarouselItem> CarouselHost<T> {
    pub fn new(name: impl Into<String>, config: CarouselConfig) -> Self {
        let viewport = Rc::new(RefCell::new(TerminalViewport::default()));
        let mut carousel = Carousel::new(name, config);
        carousel.attach(&viewport);
        Self {
            carousel,
            viewport,
            hovering: false,
        }
    }

    pub fn carousel(&self) -> &Carousel<T> {
        &self.carousel
    }

    pub fn area(&self) -> Rect {
        self.viewport.borrow().area()
    }

    pub fn is_scheduled(&self) -> bool {
        self.carousel.is_scheduled()
    }

    pub fn mount(&mut self, items: Arc<[T]>) {
        self.update_content_extent(items.len());
        self.carousel.mount(items);
    }

    pub fn set_items(&mut self, items: Arc<[T]>) {
        self.update_content_extent(items.len());
        self.carousel.set_items(items);
    }

    pub fn unmount(&mut self) {
        self.carousel.unmount();
    }

    /// Clamp `area` to the configured maximum size, converting pixels to cells
    pub fn constrain(&self, area: Rect) -> Rect {
        let config = self.carousel.config();
        let width = config
            .max_width_px()
            .map_or(area.width, |max| area.width.min(px_to_cells(max, CELL_WIDTH_PX)));
        let height = config
            .height_px()
            .map_or(area.height, |max| area.height.min(px_to_cells(max, CELL_HEIGHT_PX)));
        Rect {
            width,
            height,
            ..area
        }
    }

    /// Record where the track is drawn; recomputes the wrap point on change
    pub fn layout(&mut self, area: Rect) {
        let changed = {
            let mut viewport = self.viewport.borrow_mut();
            if viewport.area() == area {
                false
            } else {
                viewport.set_area(area);
                true
            }
        };
        if changed {
            self.carousel.relayout();
        }
    }

    pub fn frame(&mut self, now: Instant) -> FrameOutcome {
        self.carousel.frame(now)
    }

    /// Map mouse input onto hover and touch events
    pub fn handle_mouse(&mut self, event: &MouseEvent) -> GestureDecision {
        let inside = self.viewport.borrow().contains(event.column, event.row);
        let (x, y) = (
            event.column as f64 * CELL_WIDTH_PX,
            event.row as f64 * CELL_HEIGHT_PX,
        );

        match event.kind {
            MouseEventKind::Moved => {
                self.set_hovering(inside);
                GestureDecision::Ignored
            }
            MouseEventKind::Down(MouseButton::Left) if inside => {
                self.set_hovering(true);
                self.carousel.on_touch_start(x, y);
                GestureDecision::Pending
            }
            MouseEventKind::Drag(MouseButton::Left) => self.carousel.on_touch_move(x, y),
            MouseEventKind::Up(MouseButton::Left) => {
                self.carousel.on_touch_end();
                self.set_hovering(inside);
                GestureDecision::Ignored
            }
            _ => GestureDecision::Ignored,
        }
    }

    fn set_hovering(&mut self, hovering: bool) {
        if self.hovering != hovering {
            self.hovering = hovering;
            self.carousel.on_hover_change(hovering);
        }
    }

    fn update_content_extent(&mut self, item_count: usize) {
        let config = self.carousel.config();
        let geometry = TrackGeometry {
            item_count,
            item_extent: config.item_extent,
            gap: config.gap,
        };
        let extent = geometry.track_extent(config.copies.count());
        self.viewport.borrow_mut().set_content_extent(extent);
    }
}

/// Whole cells that fit in `px`
fn px_to_cells(px: f64, cell_px: f64) -> u16 {
    (px.max(0.0) / cell_px).floor().min(u16::MAX as f64) as u16
}
