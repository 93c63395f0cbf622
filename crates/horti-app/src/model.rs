// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One robot record as published in the catalog dataset.
///
/// Every field is optional in the source data. Values that are missing or of
/// the wrong JSON type deserialize to their empty form instead of failing the
/// whole record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "merk", alias = "brand", default, deserialize_with = "lenient_text")]
    pub brand: String,
    #[serde(rename = "robot", alias = "name", default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(
        rename = "gewassen",
        alias = "cropTargets",
        alias = "crops",
        default,
        deserialize_with = "lenient_tags"
    )]
    pub crop_targets: Vec<String>,
    #[serde(
        rename = "handelingen",
        alias = "operations",
        default,
        deserialize_with = "lenient_tags"
    )]
    pub operations: Vec<String>,
    #[serde(
        rename = "ontwikkeling",
        alias = "developmentStage",
        alias = "stage",
        default,
        deserialize_with = "lenient_text"
    )]
    pub development_stage: String,
    #[serde(rename = "kostprijs", alias = "price", default, deserialize_with = "lenient_text")]
    pub price: String,
    #[serde(
        rename = "foto",
        alias = "photo",
        alias = "photoUrl",
        default,
        deserialize_with = "lenient_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_links")]
    pub links: Vec<Link>,
    #[serde(
        rename = "opmerkingen",
        alias = "remarks",
        default,
        deserialize_with = "lenient_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub remarks: Option<String>,
}

impl Item {
    pub fn stage(&self) -> DevelopmentStage {
        DevelopmentStage::parse(&self.development_stage)
    }

    /// Display name with a fallback so empty records still render a title.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "(naamloos)"
        } else {
            &self.name
        }
    }

    pub fn remarks_text(&self) -> &str {
        self.remarks.as_deref().unwrap_or("")
    }

    /// Links that point somewhere. A label without a url is kept in the model
    /// but is not something a user can open.
    pub fn openable_links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(|link| link.is_openable())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default, deserialize_with = "lenient_text")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: String,
}

impl Link {
    pub fn is_openable(&self) -> bool {
        !self.url.trim().is_empty()
    }

    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            &self.url
        } else {
            &self.label
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DevelopmentStage {
    Onderzoek,
    Prototype,
    StartUp,
    ScaleUp,
    Commercieel,
    Unknown,
}

impl DevelopmentStage {
    pub const KNOWN: [Self; 5] = [
        Self::Onderzoek,
        Self::Prototype,
        Self::StartUp,
        Self::ScaleUp,
        Self::Commercieel,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Onderzoek => "onderzoek",
            Self::Prototype => "prototype",
            Self::StartUp => "start-up",
            Self::ScaleUp => "scale-up",
            Self::Commercieel => "commercieel",
            Self::Unknown => "",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "onderzoek" => Self::Onderzoek,
            "prototype" => Self::Prototype,
            "start-up" | "startup" => Self::StartUp,
            "scale-up" | "scaleup" => Self::ScaleUp,
            "commercieel" => Self::Commercieel,
            _ => Self::Unknown,
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Onderzoek => "🔬",
            Self::Prototype => "🧪",
            Self::StartUp => "🚀",
            Self::ScaleUp => "📈",
            Self::Commercieel => "🛒",
            Self::Unknown => "❓",
        }
    }
}

fn text_from_value(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text_from_value(value).unwrap_or_default())
}

fn lenient_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text_from_value(value).filter(|text| !text.trim().is_empty()))
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let tags = match value {
        Value::Array(values) => values
            .into_iter()
            .filter_map(text_from_value)
            .filter(|tag| !tag.trim().is_empty())
            .collect(),
        other => text_from_value(other)
            .filter(|tag| !tag.trim().is_empty())
            .into_iter()
            .collect(),
    };
    Ok(tags)
}

fn lenient_links<'de, D>(deserializer: D) -> Result<Vec<Link>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(values) = value else {
        return Ok(Vec::new());
    };
    values
        .into_iter()
        .filter(Value::is_object)
        .map(|value| serde_json::from_value(value).map_err(de::Error::custom))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{DevelopmentStage, Item, Link};
    use anyhow::Result;

    #[test]
    fn dutch_field_names_deserialize() -> Result<()> {
        let item: Item = serde_json::from_str(
            r#"{
                "merk": "Naïo",
                "robot": "Oz",
                "gewassen": ["sla", "prei"],
                "handelingen": ["wieden"],
                "ontwikkeling": "commercieel",
                "kostprijs": "€30.000",
                "links": [{"label": "site", "url": "https://example.test"}],
                "opmerkingen": "elektrisch"
            }"#,
        )?;
        assert_eq!(item.brand, "Naïo");
        assert_eq!(item.name, "Oz");
        assert_eq!(item.crop_targets, vec!["sla", "prei"]);
        assert_eq!(item.operations, vec!["wieden"]);
        assert_eq!(item.stage(), DevelopmentStage::Commercieel);
        assert_eq!(item.price, "€30.000");
        assert_eq!(item.remarks.as_deref(), Some("elektrisch"));
        assert_eq!(item.links.len(), 1);
        Ok(())
    }

    #[test]
    fn english_aliases_deserialize() -> Result<()> {
        let item: Item = serde_json::from_str(
            r#"{"brand": "A", "name": "B", "cropTargets": ["x"], "operations": ["y"],
                "developmentStage": "Prototype", "price": "n/a", "photoUrl": "p.jpg",
                "remarks": "r"}"#,
        )?;
        assert_eq!(item.brand, "A");
        assert_eq!(item.crop_targets, vec!["x"]);
        assert_eq!(item.stage(), DevelopmentStage::Prototype);
        assert_eq!(item.photo_url.as_deref(), Some("p.jpg"));
        Ok(())
    }

    #[test]
    fn malformed_fields_become_empty() -> Result<()> {
        let item: Item = serde_json::from_str(
            r#"{"merk": null, "robot": 42, "gewassen": "sla", "handelingen": {"x": 1},
                "kostprijs": 12000, "links": [{"label": "no url"}, "junk", null],
                "opmerkingen": "  "}"#,
        )?;
        assert_eq!(item.brand, "");
        assert_eq!(item.name, "42");
        assert_eq!(item.crop_targets, vec!["sla"]);
        assert!(item.operations.is_empty());
        assert_eq!(item.price, "12000");
        assert_eq!(item.links, vec![Link {
            label: "no url".to_owned(),
            url: String::new(),
        }]);
        assert_eq!(item.openable_links().count(), 0);
        assert_eq!(item.remarks, None);
        Ok(())
    }

    #[test]
    fn empty_object_is_default_item() -> Result<()> {
        let item: Item = serde_json::from_str("{}")?;
        assert_eq!(item, Item::default());
        assert_eq!(item.display_name(), "(naamloos)");
        assert_eq!(item.stage(), DevelopmentStage::Unknown);
        Ok(())
    }

    #[test]
    fn stage_parse_is_case_insensitive_and_accepts_spellings() {
        assert_eq!(DevelopmentStage::parse(" Commercieel "), DevelopmentStage::Commercieel);
        assert_eq!(DevelopmentStage::parse("STARTUP"), DevelopmentStage::StartUp);
        assert_eq!(DevelopmentStage::parse("scale-up"), DevelopmentStage::ScaleUp);
        assert_eq!(DevelopmentStage::parse("beta"), DevelopmentStage::Unknown);
        assert_eq!(DevelopmentStage::Unknown.icon(), "❓");
    }
}
