// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::{Catalog, Item, ItemId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectorKind {
    Brand,
    Crop,
    Operation,
    Stage,
}

impl SelectorKind {
    pub const ALL: [Self; 4] = [Self::Brand, Self::Crop, Self::Operation, Self::Stage];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Brand => "merk",
            Self::Crop => "gewas",
            Self::Operation => "handeling",
            Self::Stage => "ontwikkeling",
        }
    }

    /// Whether two selector values name the same option. Stages compare
    /// trimmed and case-insensitively; the other selectors are exact.
    pub fn same_value(self, left: &str, right: &str) -> bool {
        match self {
            Self::Stage => left.trim().to_lowercase() == right.trim().to_lowercase(),
            Self::Brand | Self::Crop | Self::Operation => left == right,
        }
    }
}

/// Active filter constraints. `None` selectors and an empty query constrain
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    pub query: String,
    pub brand: Option<String>,
    pub crop: Option<String>,
    pub operation: Option<String>,
    pub stage: Option<String>,
}

impl Criteria {
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
            && self.brand.is_none()
            && self.crop.is_none()
            && self.operation.is_none()
            && self.stage.is_none()
    }

    pub fn selector(&self, kind: SelectorKind) -> Option<&str> {
        match kind {
            SelectorKind::Brand => self.brand.as_deref(),
            SelectorKind::Crop => self.crop.as_deref(),
            SelectorKind::Operation => self.operation.as_deref(),
            SelectorKind::Stage => self.stage.as_deref(),
        }
    }

    pub fn set_selector(&mut self, kind: SelectorKind, value: Option<String>) {
        let value = value.filter(|value| !value.is_empty());
        match kind {
            SelectorKind::Brand => self.brand = value,
            SelectorKind::Crop => self.crop = value,
            SelectorKind::Operation => self.operation = value,
            SelectorKind::Stage => self.stage = value,
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        if let Some(brand) = &self.brand
            && item.brand != *brand
        {
            return false;
        }
        if let Some(crop) = &self.crop
            && !item.crop_targets.iter().any(|tag| tag == crop)
        {
            return false;
        }
        if let Some(operation) = &self.operation
            && !item.operations.iter().any(|tag| tag == operation)
        {
            return false;
        }
        if let Some(stage) = &self.stage
            && !SelectorKind::Stage.same_value(&item.development_stage, stage)
        {
            return false;
        }

        let query = self.query.trim();
        query.is_empty() || haystack(item).contains(&query.to_lowercase())
    }
}

/// Lowercased text the free-text query searches through.
pub fn haystack(item: &Item) -> String {
    let mut parts = Vec::with_capacity(6);
    parts.push(item.brand.as_str());
    parts.push(item.name.as_str());
    parts.extend(item.crop_targets.iter().map(String::as_str));
    parts.extend(item.operations.iter().map(String::as_str));
    parts.push(item.development_stage.as_str());
    parts.push(item.remarks_text());
    parts.join(" ").to_lowercase()
}

/// Items satisfying every active constraint, in catalog order.
pub fn filter(catalog: &Catalog, criteria: &Criteria) -> Vec<ItemId> {
    catalog
        .iter()
        .filter(|(_, item)| criteria.matches(item))
        .map(|(id, _)| id)
        .collect()
}
