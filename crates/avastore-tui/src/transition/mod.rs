//! Gallery slide transitions
//!
//! - `easing` - pure easing curves mapping [0, 1] to [0, 1]
//! - `timing` - progress and interpolation helpers
//! - `animation` - `SlideAnimator`, the per-gallery controller
//!
//! # Usage
//!
//! ```ignore
//! use avastore_tui::transition::SlideAnimator;
//!
//! let mut slide = SlideAnimator::new(&config.gallery);
//!
//! // Image changed after a left swipe: new image enters from the right
//! slide.start(area.width as f64, Instant::now());
//!
//! // Each frame
//! let dx = slide.update(Instant::now());
//! ```

pub mod animation;
pub mod easing;
pub mod timing;

pub use animation::SlideAnimator;
pub use easing::{EasingType, EasingTypeExt};
