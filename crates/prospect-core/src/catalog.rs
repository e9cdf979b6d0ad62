//! Category catalog and selection.
//!
//! The catalog is a fixed external table. Only enabled entries have a
//! [`Category`] variant; disabled ones exist for display and are rejected
//! when selected.

use serde::{Deserialize, Serialize};

/// Maximum number of categories active in one session.
pub const MAX_SELECTED: usize = 3;

/// Used when a selection resolves to nothing.
pub const DEFAULT_CATEGORIES: [Category; 3] =
    [Category::Bitcoin, Category::Ethereum, Category::Usdt];

/// An active category the engine can attribute a find to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bitcoin,
    Ethereum,
    Binance,
    Usdt,
    Solana,
    Litecoin,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Bitcoin,
        Category::Ethereum,
        Category::Binance,
        Category::Usdt,
        Category::Solana,
        Category::Litecoin,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Category::Bitcoin => "bitcoin",
            Category::Ethereum => "ethereum",
            Category::Binance => "binance",
            Category::Usdt => "usdt",
            Category::Solana => "solana",
            Category::Litecoin => "litecoin",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Category::Bitcoin => "BTC",
            Category::Ethereum => "ETH",
            Category::Binance => "BNB",
            Category::Usdt => "USDT",
            Category::Solana => "SOL",
            Category::Litecoin => "LTC",
        }
    }

    /// Value per unit.
    pub fn rate(self) -> f64 {
        match self {
            Category::Bitcoin => 60_000.0,
            Category::Ethereum => 3_000.0,
            Category::Binance => 300.0,
            Category::Usdt => 1.0,
            Category::Solana => 100.0,
            Category::Litecoin => 90.0,
        }
    }

    /// Look up an enabled category by catalog id.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

/// One row of the display catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub enabled: bool,
    pub rate: Option<f64>,
}

const CATALOG: [(&str, &str, &str); 9] = [
    ("bitcoin", "Bitcoin", "BTC"),
    ("ethereum", "Ethereum", "ETH"),
    ("binance", "Binance Coin", "BNB"),
    ("usdt", "USDT", "USDT"),
    ("solana", "Solana", "SOL"),
    ("litecoin", "Litecoin", "LTC"),
    ("toncoin", "Toncoin", "TON"),
    ("polygon", "Polygon", "MATIC"),
    ("avalanche", "Avalanche", "AVAX"),
];

/// Full catalog, enabled and disabled entries, in display order.
pub fn catalog() -> Vec<CategoryInfo> {
    CATALOG
        .iter()
        .map(|&(id, name, symbol)| {
            let active = Category::from_id(id);
            CategoryInfo {
                id,
                name,
                symbol,
                enabled: active.is_some(),
                rate: active.map(Category::rate),
            }
        })
        .collect()
}

/// The resolved, non-empty set of categories a session draws from.
///
/// Deserializes from a list of ids through [`CategorySelection::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct CategorySelection(Vec<Category>);

impl CategorySelection {
    /// Resolve caller-supplied ids.
    ///
    /// Unknown, disabled and repeated ids are dropped, at most
    /// [`MAX_SELECTED`] are kept, and an empty result falls back to
    /// [`DEFAULT_CATEGORIES`].
    pub fn resolve<S: AsRef<str>>(ids: &[S]) -> Self {
        let mut picked = Vec::with_capacity(MAX_SELECTED);
        for id in ids {
            let Some(category) = Category::from_id(id.as_ref()) else {
                tracing::debug!(id = id.as_ref(), "ignoring unknown or disabled category");
                continue;
            };
            if picked.contains(&category) {
                continue;
            }
            picked.push(category);
            if picked.len() == MAX_SELECTED {
                break;
            }
        }
        if picked.is_empty() {
            return Self::default();
        }
        Self(picked)
    }

    pub fn categories(&self) -> &[Category] {
        &self.0
    }
}

impl From<Vec<String>> for CategorySelection {
    fn from(ids: Vec<String>) -> Self {
        Self::resolve(&ids)
    }
}

impl Default for CategorySelection {
    fn default() -> Self {
        Self(DEFAULT_CATEGORIES.to_vec())
    }
}
