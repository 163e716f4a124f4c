//! Purchasable cosmetics: cars and garage themes.
//!
//! The catalog is immutable once built. Prices are non-negative; a price of
//! zero marks a starter item that every session owns from the start.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::SeedError;

/// Unique catalog identifier (e.g. `"lexus-lc"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Car,
    Theme,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Car => "car",
            Category::Theme => "theme",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Car rarity tier, shown as the shop tabs and card glow colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
}

impl Rarity {
    pub fn color(&self) -> &'static str {
        match self {
            Rarity::Common => "#3b82f6",
            Rarity::Rare => "#8b5cf6",
            Rarity::Legendary => "#f59e0b",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "common" => Some(Rarity::Common),
            "rare" => Some(Rarity::Rare),
            "legendary" => Some(Rarity::Legendary),
            _ => None,
        }
    }
}

/// Category-specific presentation data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum ItemKind {
    Car { brand: String, rarity: Rarity },
    Theme { accent_color: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub price: u64,
    #[serde(flatten)]
    pub kind: ItemKind,
    #[serde(default)]
    pub description: String,
    /// Opaque asset path, resolved by whatever renders the item.
    #[serde(default)]
    pub asset: Option<String>,
}

impl CatalogItem {
    pub fn car(id: &str, name: &str, brand: &str, rarity: Rarity, price: u64) -> Self {
        Self {
            id: ItemId::from(id),
            name: name.to_string(),
            price,
            kind: ItemKind::Car {
                brand: brand.to_string(),
                rarity,
            },
            description: String::new(),
            asset: None,
        }
    }

    pub fn theme(id: &str, name: &str, accent_color: &str, price: u64) -> Self {
        Self {
            id: ItemId::from(id),
            name: name.to_string(),
            price,
            kind: ItemKind::Theme {
                accent_color: accent_color.to_string(),
            },
            description: String::new(),
            asset: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_asset(mut self, asset: &str) -> Self {
        self.asset = Some(asset.to_string());
        self
    }

    pub fn category(&self) -> Category {
        match self.kind {
            ItemKind::Car { .. } => Category::Car,
            ItemKind::Theme { .. } => Category::Theme,
        }
    }

    pub fn rarity(&self) -> Option<Rarity> {
        match self.kind {
            ItemKind::Car { rarity, .. } => Some(rarity),
            ItemKind::Theme { .. } => None,
        }
    }

    pub fn is_free(&self) -> bool {
        self.price == 0
    }

    /// Path to the item's asset under `root`, or `placeholder` when the item
    /// has none or the file is missing.
    pub fn resolve_asset(&self, root: &Path, placeholder: &Path) -> PathBuf {
        match &self.asset {
            Some(rel) => {
                let path = root.join(rel);
                if path.is_file() {
                    path
                } else {
                    tracing::debug!("asset {} missing for {}, using placeholder", path.display(), self.id);
                    placeholder.to_path_buf()
                }
            }
            None => placeholder.to_path_buf(),
        }
    }
}

/// Immutable item list, iterated in seed order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    items: IndexMap<ItemId, CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, SeedError> {
        let mut map = IndexMap::with_capacity(items.len());
        for item in items {
            if map.contains_key(&item.id) {
                return Err(SeedError::DuplicateItem(item.id.to_string()));
            }
            map.insert(item.id.clone(), item);
        }
        Ok(Self { items: map })
    }

    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.items.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.values()
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &CatalogItem> {
        self.iter().filter(move |i| i.category() == category)
    }

    pub fn cars(&self) -> impl Iterator<Item = &CatalogItem> {
        self.by_category(Category::Car)
    }

    pub fn themes(&self) -> impl Iterator<Item = &CatalogItem> {
        self.by_category(Category::Theme)
    }

    /// Shop tab filter: all cars, or only one rarity.
    pub fn cars_with_rarity(&self, rarity: Option<Rarity>) -> Vec<&CatalogItem> {
        self.cars()
            .filter(|c| rarity.is_none() || c.rarity() == rarity)
            .collect()
    }

    /// Items every session starts out owning.
    pub fn free_items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.iter().filter(|i| i.is_free())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(vec![
            CatalogItem::car("civic", "Civic", "Honda", Rarity::Common, 0),
            CatalogItem::car("lc", "LC 500", "Lexus", Rarity::Rare, 8000),
            CatalogItem::car("huracan", "Huracan", "Lamborghini", Rarity::Legendary, 10000),
            CatalogItem::theme("showroom", "Showroom", "#e5e7eb", 0),
        ])
        .unwrap()
    }

    #[test]
    fn rarity_filter_matches_shop_tabs() {
        let catalog = sample();
        assert_eq!(catalog.cars_with_rarity(None).len(), 3);
        let rare: Vec<_> = catalog
            .cars_with_rarity(Some(Rarity::Rare))
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(rare, ["lc"]);
    }

    #[test]
    fn free_items_are_price_zero() {
        let catalog = sample();
        let free: Vec<_> = catalog.free_items().map(|i| i.id.as_str()).collect();
        assert_eq!(free, ["civic", "showroom"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Catalog::new(vec![
            CatalogItem::theme("cyber", "Cyber", "#00ffff", 1),
            CatalogItem::car("cyber", "Cyber", "X", Rarity::Common, 1),
        ])
        .unwrap_err();
        assert!(matches!(err, SeedError::DuplicateItem(id) if id == "cyber"));
    }

    #[test]
    fn item_kind_serializes_with_category_tag() {
        let item = CatalogItem::theme("cyber", "Cyber", "#00ffff", 50000);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["category"], "theme");
        assert_eq!(json["accent_color"], "#00ffff");
    }

    #[test]
    fn missing_asset_falls_back_to_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let placeholder = dir.path().join("placeholder.svg");
        let item = CatalogItem::car("lc", "LC", "Lexus", Rarity::Rare, 1).with_asset("cars/lc.png");
        assert_eq!(item.resolve_asset(dir.path(), &placeholder), placeholder);

        std::fs::create_dir_all(dir.path().join("cars")).unwrap();
        std::fs::write(dir.path().join("cars/lc.png"), b"png").unwrap();
        assert_eq!(
            item.resolve_asset(dir.path(), &placeholder),
            dir.path().join("cars/lc.png")
        );
    }

    #[test]
    fn rarity_colors() {
        assert_eq!(Rarity::Legendary.color(), "#f59e0b");
        assert_eq!(Rarity::from_str_loose(" Rare "), Some(Rarity::Rare));
        assert_eq!(Rarity::from_str_loose("mythic"), None);
    }
}
