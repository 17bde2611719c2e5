//! # Catalog and Global Settings
//!
//! Price lists and catalogs an admin can edit. The last-known copy is cached
//! locally so edited pricing survives a reload before the network answers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Global application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Planting price per palm type id.
    #[serde(default)]
    pub palm_prices: BTreeMap<String, u64>,
    /// Barkat reward granted per heritage palm unit.
    pub heritage_reward_points: u64,
    /// Amount awarded by the daily mystery chest.
    pub daily_chest_amount: u64,
    /// Whether the community section is open.
    #[serde(default = "default_true")]
    pub community_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        let palm_prices = [("medjool", 120), ("barhi", 95), ("zahedi", 60)]
            .into_iter()
            .map(|(id, price)| (id.to_string(), price))
            .collect();
        Self {
            palm_prices,
            heritage_reward_points: 50,
            daily_chest_amount: 10,
            community_enabled: true,
        }
    }
}

impl AppSettings {
    /// True when nothing worth preferring over bundled defaults is present.
    pub fn is_empty(&self) -> bool {
        self.palm_prices.is_empty()
    }
}

/// A shop product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: u64,
    #[serde(default)]
    pub reward_points: u64,
    #[serde(default)]
    pub stock: u32,
}

/// A palm variety available for heritage planting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PalmType {
    pub id: String,
    pub name: String,
    pub price: u64,
    #[serde(default)]
    pub region: Option<String>,
}

/// Catalog data bundled with the application.
pub fn bundled_products() -> Vec<Product> {
    vec![
        Product {
            id: "dates-box".into(),
            name: "Heritage dates box".into(),
            price: 25,
            reward_points: 5,
            stock: 100,
        },
        Product {
            id: "palm-honey".into(),
            name: "Palm honey".into(),
            price: 18,
            reward_points: 3,
            stock: 60,
        },
    ]
}

/// Palm types bundled with the application.
pub fn bundled_palm_types() -> Vec<PalmType> {
    AppSettings::default()
        .palm_prices
        .into_iter()
        .map(|(id, price)| PalmType {
            name: capitalize(&id),
            id,
            price,
            region: None,
        })
        .collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
