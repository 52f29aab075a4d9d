//! Continuous auto-scroll carousel engine
//!
//! - `sequencer` - repeats the item list so the loop seam is hidden
//! - `driver` - frame-rate independent offset updates
//! - `reset` - where the offset wraps, and the container geometry contract
//! - `gate` - hover and touch pausing
//! - `engine` - the generic carousel combining the above
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Instant;
//! use avastore_core::carousel::Carousel;
//!
//! let mut carousel = Carousel::new("logos", config.carousels.logos.clone());
//! carousel.mount(Arc::from(logo_urls));
//! carousel.attach(&viewport);
//!
//! // Every frame
//! carousel.frame(Instant::now());
//! ```

pub mod driver;
pub mod engine;
pub mod gate;
pub mod reset;
pub mod sequencer;

pub use driver::{wrap_position, Axis, Direction, ScrollDriver, ScrollState, Speed};
pub use engine::{Carousel, FrameOutcome, PlacedSlot};
pub use gate::{GestureDecision, InteractionGate, TouchPhase, TOUCH_DEAD_ZONE_PX};
pub use reset::{ResetPolicy, ScrollContainer, TrackGeometry};
pub use sequencer::{sequence, CarouselItem, Copies, SequencedList, Slot, SlotKey};
