// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::BTreeSet;

use crate::{Item, ItemId, collate};

/// The full dataset, loaded once and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Parses a JSON array of item records. Array elements that are not
    /// objects become empty items so positions stay stable; a document that
    /// is not an array is rejected outright.
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).context("parse catalog JSON")?;
        let Value::Array(values) = value else {
            bail!(
                "catalog JSON must be a top-level array of robot records, got {}",
                json_kind(&value)
            );
        };

        let mut skipped = 0usize;
        let items = values
            .into_iter()
            .map(|value| {
                serde_json::from_value::<Item>(value).unwrap_or_else(|_| {
                    skipped += 1;
                    Item::default()
                })
            })
            .collect::<Vec<_>>();
        if skipped > 0 {
            tracing::warn!(skipped, "catalog contained non-object records");
        }
        Ok(Self::new(items))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.get())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| (ItemId::new(index), item))
    }

    pub fn ids(&self) -> Vec<ItemId> {
        (0..self.items.len()).map(ItemId::new).collect()
    }

    pub fn brands(&self) -> Vec<String> {
        distinct_sorted(self.items.iter().map(|item| item.brand.as_str()))
    }

    pub fn crops(&self) -> Vec<String> {
        distinct_sorted(
            self.items
                .iter()
                .flat_map(|item| item.crop_targets.iter().map(String::as_str)),
        )
    }

    pub fn operations(&self) -> Vec<String> {
        distinct_sorted(
            self.items
                .iter()
                .flat_map(|item| item.operations.iter().map(String::as_str)),
        )
    }

    /// Stage options are compared case-insensitively, so `Prototype` and
    /// `prototype` collapse into one option (the first spelling seen wins).
    pub fn stages(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut stages = Vec::new();
        for item in &self.items {
            let stage = item.development_stage.trim();
            if stage.is_empty() {
                continue;
            }
            if seen.insert(stage.to_lowercase()) {
                stages.push(stage.to_owned());
            }
        }
        stages.sort_by(|left, right| collate::compare(left, right));
        stages
    }
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut distinct = values
        .filter(|value| !value.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect::<Vec<_>>();
    distinct.sort_by(|left, right| collate::compare(left, right));
    distinct
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
