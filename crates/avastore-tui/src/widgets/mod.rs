mod carousel;
mod dashboard;
mod hero;
mod popup;
mod product_detail;
mod status_bar;

pub use carousel::{CarouselWidget, PLACEHOLDER_TEXT};
pub use dashboard::DashboardWidget;
pub use hero::HeroWidget;
pub use popup::PopupWidget;
pub use product_detail::ProductDetailWidget;
pub use status_bar::StatusBarWidget;
