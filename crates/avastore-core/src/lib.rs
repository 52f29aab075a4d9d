pub mod carousel;
pub mod catalog;
pub mod config;
pub mod error;
pub mod storage;
pub mod upload;

pub use config::{AppConfig, CarouselConfig, EasingType};
pub use error::{Error, Result};
