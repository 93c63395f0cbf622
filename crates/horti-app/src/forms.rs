// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};

use crate::{DevelopmentStage, Item, Link};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Brand,
    Name,
    Crops,
    Operations,
    Stage,
    Price,
    Photo,
    Links,
    Remarks,
}

impl DraftField {
    pub const ALL: [Self; 9] = [
        Self::Brand,
        Self::Name,
        Self::Crops,
        Self::Operations,
        Self::Stage,
        Self::Price,
        Self::Photo,
        Self::Links,
        Self::Remarks,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Brand => "merk",
            Self::Name => "robot",
            Self::Crops => "gewassen",
            Self::Operations => "handelingen",
            Self::Stage => "ontwikkeling",
            Self::Price => "kostprijs",
            Self::Photo => "foto",
            Self::Links => "links",
            Self::Remarks => "opmerkingen",
        }
    }

    pub const fn hint(self) -> &'static str {
        match self {
            Self::Crops | Self::Operations => "komma-gescheiden",
            Self::Stage => "onderzoek, prototype, start-up, scale-up, commercieel",
            Self::Links => "label=url; label=url",
            _ => "",
        }
    }
}

/// Raw text of the "new robot" form, one string per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItemDraft {
    pub brand: String,
    pub name: String,
    pub crops: String,
    pub operations: String,
    pub stage: String,
    pub price: String,
    pub photo: String,
    pub links: String,
    pub remarks: String,
}

impl NewItemDraft {
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Brand => &self.brand,
            DraftField::Name => &self.name,
            DraftField::Crops => &self.crops,
            DraftField::Operations => &self.operations,
            DraftField::Stage => &self.stage,
            DraftField::Price => &self.price,
            DraftField::Photo => &self.photo,
            DraftField::Links => &self.links,
            DraftField::Remarks => &self.remarks,
        }
    }

    pub fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Brand => &mut self.brand,
            DraftField::Name => &mut self.name,
            DraftField::Crops => &mut self.crops,
            DraftField::Operations => &mut self.operations,
            DraftField::Stage => &mut self.stage,
            DraftField::Price => &mut self.price,
            DraftField::Photo => &mut self.photo,
            DraftField::Links => &mut self.links,
            DraftField::Remarks => &mut self.remarks,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("robot name is required -- enter a name and retry");
        }
        if self.brand.trim().is_empty() {
            bail!("brand is required -- enter a brand and retry");
        }
        let stage = self.stage.trim();
        if !stage.is_empty() && DevelopmentStage::parse(stage) == DevelopmentStage::Unknown {
            bail!(
                "unknown development stage {stage:?}; use one of onderzoek, prototype, start-up, scale-up, commercieel"
            );
        }
        for entry in split_list(&self.links, ';') {
            if let Some((_, url)) = entry.split_once('=')
                && url.trim().is_empty()
            {
                bail!("link {entry:?} has no url -- use label=url");
            }
        }
        Ok(())
    }

    /// The record the proposal asks maintainers to add.
    pub fn to_item(&self) -> Item {
        let optional = |value: &str| Some(value.trim().to_owned()).filter(|value| !value.is_empty());
        Item {
            brand: self.brand.trim().to_owned(),
            name: self.name.trim().to_owned(),
            crop_targets: split_list(&self.crops, ','),
            operations: split_list(&self.operations, ','),
            development_stage: self.stage.trim().to_owned(),
            price: self.price.trim().to_owned(),
            photo_url: optional(&self.photo),
            links: split_list(&self.links, ';')
                .into_iter()
                .map(|entry| match entry.split_once('=') {
                    Some((label, url)) => Link {
                        label: label.trim().to_owned(),
                        url: url.trim().to_owned(),
                    },
                    None => Link {
                        label: String::new(),
                        url: entry,
                    },
                })
                .collect(),
            remarks: optional(&self.remarks),
        }
    }
}

fn split_list(raw: &str, separator: char) -> Vec<String> {
    raw.split(separator)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{DraftField, NewItemDraft};
    use crate::Link;
    use anyhow::Result;

    fn draft() -> NewItemDraft {
        NewItemDraft {
            brand: " AgXeed ".to_owned(),
            name: "AgBot".to_owned(),
            crops: "sla, prei,, ".to_owned(),
            operations: "wieden".to_owned(),
            stage: "Commercieel".to_owned(),
            price: "€ 200.000".to_owned(),
            photo: String::new(),
            links: "site=https://agxeed.test; https://video.test".to_owned(),
            remarks: "  ".to_owned(),
        }
    }

    #[test]
    fn to_item_splits_lists_and_links() -> Result<()> {
        let draft = draft();
        draft.validate()?;
        let item = draft.to_item();
        assert_eq!(item.brand, "AgXeed");
        assert_eq!(item.crop_targets, vec!["sla", "prei"]);
        assert_eq!(item.photo_url, None);
        assert_eq!(item.remarks, None);
        assert_eq!(item.links, vec![
            Link {
                label: "site".to_owned(),
                url: "https://agxeed.test".to_owned(),
            },
            Link {
                label: String::new(),
                url: "https://video.test".to_owned(),
            },
        ]);
        Ok(())
    }

    #[test]
    fn validate_requires_name_and_brand() {
        let mut missing_name = draft();
        missing_name.name = " ".to_owned();
        let error = missing_name.validate().expect_err("blank name should fail");
        assert!(error.to_string().contains("robot name is required"));

        let mut missing_brand = draft();
        missing_brand.brand.clear();
        let error = missing_brand.validate().expect_err("blank brand should fail");
        assert!(error.to_string().contains("brand is required"));
    }

    #[test]
    fn validate_rejects_unknown_stage_and_empty_link_url() {
        let mut bad_stage = draft();
        bad_stage.stage = "beta".to_owned();
        assert!(bad_stage.validate().is_err());

        let mut bad_link = draft();
        bad_link.links = "site=".to_owned();
        let error = bad_link.validate().expect_err("empty url should fail");
        assert!(error.to_string().contains("label=url"));
    }

    #[test]
    fn field_accessors_cover_every_field() {
        let mut draft = NewItemDraft::default();
        for field in DraftField::ALL {
            draft.field_mut(field).push_str(field.label());
        }
        for field in DraftField::ALL {
            assert_eq!(draft.field(field), field.label());
        }
    }
}
