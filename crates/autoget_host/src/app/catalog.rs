use std::collections::HashMap;

use autoget::{AutogetItem, EvalContext, HostRules, InventoryCategory};
use serde::Deserialize;

const SCRAP_TAG: &str = "Scrap";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CatalogItem {
    pub blueprint: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_true")]
    pub identified: bool,
    #[serde(default)]
    pub special: bool,
    #[serde(default)]
    pub complexity: Option<u32>,
    #[serde(default)]
    pub fresh_water: bool,
    #[serde(default = "default_true")]
    pub liftable: bool,
}

fn default_true() -> bool {
    true
}

impl AutogetItem for CatalogItem {
    fn blueprint(&self) -> &str {
        &self.blueprint
    }

    fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.blueprint)
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn inventory_category(&self) -> Option<InventoryCategory> {
        InventoryCategory::from_label(&self.category)
    }

    fn has_tag_or_property(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag == name)
    }

    fn is_identified(&self) -> bool {
        self.identified
    }

    fn is_special(&self) -> bool {
        self.special
    }

    fn examination_complexity(&self) -> Option<u32> {
        self.complexity
    }

    fn contains_fresh_water(&self) -> bool {
        self.fresh_water
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CatalogFile {
    #[serde(default)]
    pub items: Vec<CatalogItem>,
}

#[derive(Debug, Default)]
pub(crate) struct ItemCatalog {
    items: Vec<CatalogItem>,
    index_by_blueprint: HashMap<String, usize>,
}

impl ItemCatalog {
    /// Later entries with the same blueprint replace earlier ones.
    pub(crate) fn from_items(items: Vec<CatalogItem>) -> Self {
        let mut catalog = Self::default();
        for item in items {
            match catalog.index_by_blueprint.get(&item.blueprint) {
                Some(&index) => catalog.items[index] = item,
                None => {
                    catalog
                        .index_by_blueprint
                        .insert(item.blueprint.clone(), catalog.items.len());
                    catalog.items.push(item);
                }
            }
        }
        catalog
    }

    pub(crate) fn get(&self, blueprint: &str) -> Option<&CatalogItem> {
        let index = self.index_by_blueprint.get(blueprint)?;
        self.items.get(*index)
    }

    pub(crate) fn items(&self) -> &[CatalogItem] {
        &self.items
    }
}

/// Eligibility rules for catalog items: fixed-in-place items never lift and
/// the player's own drops stay put unless provenance is ignored.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct CatalogRules;

impl HostRules for CatalogRules {
    type Item = CatalogItem;

    fn can_autoget(&self, item: &CatalogItem, ctx: &EvalContext<'_>) -> bool {
        if !item.liftable {
            return false;
        }
        !(item.dropped_by_player() && !ctx.ignore_drop_provenance())
    }

    fn consider_scrap(&self, item: &CatalogItem) -> bool {
        item.has_tag_or_property(SCRAP_TAG)
    }
}
