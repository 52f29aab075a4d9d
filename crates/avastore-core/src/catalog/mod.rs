pub mod assets;
pub mod gallery;
mod models;
pub mod ordering;
pub mod sidebar;

pub use assets::list_image_assets;
pub use gallery::{classify_swipe, Gallery, HeroRotation, SwipeAction};
pub use models::{Product, ProductDraft, ProductSummary};
pub use sidebar::select_whitelisted;
