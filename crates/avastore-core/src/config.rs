use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::carousel::{Copies, Direction, ResetPolicy, Speed};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub carousels: CarouselsConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
    #[serde(default)]
    pub uploads: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (database, uploaded images, logs)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while any carousel or transition is animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name ("clinic-dark" or "clinic-light")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Accept either a bare theme name or a table with 'name' and 'colors'
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "clinic-dark".to_string()
}

/// Optional color overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    pub background: Option<String>,
    pub surface: Option<String>,
    pub foreground: Option<String>,
    pub muted: Option<String>,
    pub accent: Option<String>,
    pub price: Option<String>,
    pub selection: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Options for one carousel instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// `{ px_per_sec = n }` or `{ seconds_per_cycle = n }`
    pub speed: Speed,
    pub direction: Direction,
    #[serde(default)]
    pub pause_on_hover: bool,
    #[serde(default)]
    pub copies: Copies,
    #[serde(default)]
    pub reset_policy: ResetPolicy,
    /// Extent of one item along the scroll axis
    pub item_extent: f64,
    /// Gap between consecutive items
    #[serde(default)]
    pub gap: f64,
    /// CSS-like length, e.g. "700px"
    #[serde(default)]
    pub max_width: Option<String>,
    /// CSS-like length, e.g. "400px"
    #[serde(default)]
    pub height: Option<String>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            speed: Speed::SecondsPerCycle(20.0),
            direction: Direction::Left,
            pause_on_hover: false,
            copies: Copies::Triple,
            reset_policy: ResetPolicy::FullScrollable,
            item_extent: 16.0,
            gap: 2.0,
            max_width: None,
            height: None,
        }
    }
}

impl CarouselConfig {
    /// Parsed `max_width`, ignoring values that are not plain lengths
    pub fn max_width_px(&self) -> Option<f64> {
        self.max_width.as_deref().and_then(parse_length)
    }

    /// Parsed `height`, ignoring values that are not plain lengths
    pub fn height_px(&self) -> Option<f64> {
        self.height.as_deref().and_then(parse_length)
    }
}

/// Parse "700px" or "700" into a length. Negative and non-finite values are rejected.
pub fn parse_length(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// The carousel instances the store renders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselsConfig {
    /// Team and partner logos, horizontal
    #[serde(default = "default_logos_carousel")]
    pub logos: CarouselConfig,
    /// Professional testimonials, horizontal
    #[serde(default = "default_professionals_carousel")]
    pub professionals: CarouselConfig,
    /// Product sidebar, vertical
    #[serde(default = "default_sidebar_carousel")]
    pub sidebar: CarouselConfig,
}

impl Default for CarouselsConfig {
    fn default() -> Self {
        Self {
            logos: default_logos_carousel(),
            professionals: default_professionals_carousel(),
            sidebar: default_sidebar_carousel(),
        }
    }
}

fn default_logos_carousel() -> CarouselConfig {
    CarouselConfig::default()
}

fn default_professionals_carousel() -> CarouselConfig {
    CarouselConfig {
        speed: Speed::PxPerSec(8.0),
        copies: Copies::Double,
        item_extent: 24.0,
        gap: 2.0,
        ..CarouselConfig::default()
    }
}

fn default_sidebar_carousel() -> CarouselConfig {
    CarouselConfig {
        speed: Speed::SecondsPerCycle(20.0),
        direction: Direction::Down,
        pause_on_hover: true,
        item_extent: 5.0,
        gap: 1.0,
        max_width: Some("400px".to_string()),
        height: Some("600px".to_string()),
        ..CarouselConfig::default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Products per dashboard page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Product names shown in the sidebar, in display order
    #[serde(default = "default_sidebar_whitelist")]
    pub sidebar_whitelist: Vec<String>,
    /// Thumbnail used for products without images
    #[serde(default = "default_fallback_image")]
    pub fallback_image: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            sidebar_whitelist: default_sidebar_whitelist(),
            fallback_image: default_fallback_image(),
        }
    }
}

/// Easing curve for gallery slide transitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    None,
    Linear,
    Cubic,
    #[default]
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Slide transition duration in milliseconds (0 disables the animation)
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Minimum horizontal drag that changes the image
    #[serde(default = "default_min_swipe")]
    pub min_swipe_px: f64,
    /// Hero slider auto-advance interval
    #[serde(default = "default_hero_interval")]
    pub hero_interval_secs: u64,
    /// How long manual navigation suspends auto-advance
    #[serde(default = "default_hero_resume")]
    pub hero_resume_secs: u64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            transition_ms: default_transition_ms(),
            easing: EasingType::default(),
            min_swipe_px: default_min_swipe(),
            hero_interval_secs: default_hero_interval(),
            hero_resume_secs: default_hero_resume(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Storage bucket (sub-directory of the storage root)
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Maximum accepted image size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_bytes: u64,
    /// Base URL under which buckets are served
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            max_bytes: default_max_upload_bytes(),
            public_base_url: default_public_base_url(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("avastore")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_page_size() -> usize {
    12
}

fn default_sidebar_whitelist() -> Vec<String> {
    [
        "Cryo Sport",
        "LedBoots",
        "AVABoots",
        "Actin One",
        "Warm Pro",
        "Foot massager",
        "Deep Light",
        "Bioimpedance scale",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_fallback_image() -> String {
    "/images/services/hero1.png".to_string()
}

fn default_transition_ms() -> u64 {
    300
}

fn default_min_swipe() -> f64 {
    50.0
}

fn default_hero_interval() -> u64 {
    3
}

fn default_hero_resume() -> u64 {
    10
}

fn default_bucket() -> String {
    "products".to_string()
}

fn default_max_upload_bytes() -> u64 {
    5 * 1024 * 1024
}

fn default_public_base_url() -> String {
    "http://localhost:8080/storage/".to_string()
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults when it does not exist
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Always ~/.config/avastore/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("avastore")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join("avastore.db")
    }

    /// Root directory for uploaded images; buckets live underneath
    pub fn storage_dir(&self) -> PathBuf {
        self.data_dir().join("storage")
    }

    /// Static images shown by the logo and professionals carousels
    pub fn assets_dir(&self) -> PathBuf {
        self.data_dir().join("images")
    }

    /// Log file used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("avastore.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.ui.animation_fps, 60);
        assert_eq!(config.catalog.page_size, 12);
        assert_eq!(config.catalog.sidebar_whitelist.len(), 8);
        assert_eq!(config.uploads.max_bytes, 5 * 1024 * 1024);
        assert_eq!(config.carousels.professionals.copies, Copies::Double);
        assert_eq!(config.carousels.sidebar.direction, Direction::Down);
    }

    #[test]
    fn test_carousel_section_parses() {
        let config = AppConfig::from_toml(
            r#"
            [carousels.logos]
            speed = { px_per_sec = 30.0 }
            direction = "right"
            pause_on_hover = true
            copies = 2
            reset_policy = "half_content"
            item_extent = 10.0
            gap = 0.0
            max_width = "700px"
            "#,
        )
        .unwrap();

        let logos = &config.carousels.logos;
        assert_eq!(logos.speed, Speed::PxPerSec(30.0));
        assert_eq!(logos.direction, Direction::Right);
        assert!(logos.pause_on_hover);
        assert_eq!(logos.copies, Copies::Double);
        assert_eq!(logos.reset_policy, ResetPolicy::HalfContent);
        assert_eq!(logos.max_width_px(), Some(700.0));
        // Untouched instances keep their defaults
        assert_eq!(config.carousels.sidebar.direction, Direction::Down);
    }

    #[test]
    fn test_invalid_copies_rejected() {
        let result = AppConfig::from_toml(
            r#"
            [carousels.logos]
            speed = { seconds_per_cycle = 20.0 }
            direction = "left"
            copies = 5
            item_extent = 10.0
            "#,
        );
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_theme_accepts_string_or_table() {
        let config = AppConfig::from_toml("[ui]\ntheme = \"clinic-light\"").unwrap();
        assert_eq!(config.ui.theme.name, "clinic-light");

        let config = AppConfig::from_toml(
            "[ui.theme]\nname = \"clinic-dark\"\n[ui.theme.colors]\naccent = \"#ff0000\"",
        )
        .unwrap();
        assert_eq!(config.ui.theme.colors.accent.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length("700px"), Some(700.0));
        assert_eq!(parse_length(" 42 "), Some(42.0));
        assert_eq!(parse_length("50%"), None);
        assert_eq!(parse_length("-3px"), None);
    }
}
