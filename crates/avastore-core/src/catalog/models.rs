use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::carousel::CarouselItem;
use crate::{Error, Result};

/// A product in the clinic store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Display price, stored as entered ("49.99 €")
    pub price: String,
    pub description_1: Option<String>,
    pub description_2: Option<String>,
    pub description_3: Option<String>,
    /// Public image URLs in display order
    #[serde(default)]
    pub images: Vec<String>,
    /// Admin ordering, lower first
    #[serde(default)]
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to create or update a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: String,
    pub description_1: Option<String>,
    pub description_2: Option<String>,
    pub description_3: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Compact product payload shown in carousels and the sidebar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    pub short_description: String,
    pub price: String,
    pub thumbnail: String,
}

impl Product {
    /// First non-empty description, if any
    pub fn short_description(&self) -> Option<&str> {
        [&self.description_1, &self.description_2, &self.description_3]
            .into_iter()
            .filter_map(|d| d.as_deref())
            .map(str::trim)
            .find(|d| !d.is_empty())
    }

    /// All non-empty descriptions in order
    pub fn descriptions(&self) -> Vec<&str> {
        [&self.description_1, &self.description_2, &self.description_3]
            .into_iter()
            .filter_map(|d| d.as_deref())
            .filter(|d| !d.trim().is_empty())
            .collect()
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn summary(&self, fallback_image: &str) -> ProductSummary {
        ProductSummary {
            id: self.id,
            name: self.name.clone(),
            short_description: self.short_description().unwrap_or_default().to_string(),
            price: self.price.clone(),
            thumbnail: self.thumbnail().unwrap_or(fallback_image).to_string(),
        }
    }

    /// Editable copy of this product
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            price: self.price.clone(),
            description_1: self.description_1.clone(),
            description_2: self.description_2.clone(),
            description_3: self.description_3.clone(),
            images: self.images.clone(),
        }
    }
}

impl ProductDraft {
    /// Trim fields, turn blank descriptions into `None` and check required fields
    pub fn normalized(&self) -> Result<ProductDraft> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::Validation("Product name is required".to_string()));
        }
        let price = self.price.trim().to_string();
        if price.is_empty() {
            return Err(Error::Validation("Product price is required".to_string()));
        }

        Ok(ProductDraft {
            name,
            price,
            description_1: normalize_optional(self.description_1.as_deref()),
            description_2: normalize_optional(self.description_2.as_deref()),
            description_3: normalize_optional(self.description_3.as_deref()),
            images: self
                .images
                .iter()
                .map(|url| url.trim())
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }
}

fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl CarouselItem for ProductSummary {
    fn key(&self) -> String {
        self.id.to_string()
    }
}

impl CarouselItem for Product {
    fn key(&self) -> String {
        self.id.to_string()
    }
}
