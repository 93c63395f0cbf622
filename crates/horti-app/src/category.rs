// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

/// Crop and operation tags the catalog gives a dedicated colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Wieden,
    Scouten,
    Zaaien,
    Oogsten,
    Spuiten,
    Sla,
    Prei,
    Wortel,
    Bieten,
    Spinazie,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChipColor {
    Blue,
    Purple,
    Orange,
    Green,
    Red,
    Gray,
}

impl Category {
    /// Exact, case-insensitive tag match. Partial matches fall through to
    /// `Other` so overlapping stems never pick the wrong colour.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "wieden" => Self::Wieden,
            "scouten" => Self::Scouten,
            "zaaien" => Self::Zaaien,
            "oogsten" => Self::Oogsten,
            "spuiten" | "spuit" => Self::Spuiten,
            "sla" => Self::Sla,
            "prei" => Self::Prei,
            "wortel" | "wortelen" => Self::Wortel,
            "bieten" => Self::Bieten,
            "spinazie" => Self::Spinazie,
            _ => Self::Other,
        }
    }

    pub const fn color(self) -> ChipColor {
        match self {
            Self::Wieden => ChipColor::Blue,
            Self::Scouten => ChipColor::Purple,
            Self::Zaaien | Self::Wortel => ChipColor::Orange,
            Self::Oogsten | Self::Sla | Self::Prei | Self::Spinazie => ChipColor::Green,
            Self::Bieten => ChipColor::Red,
            Self::Spuiten => ChipColor::Purple,
            Self::Other => ChipColor::Gray,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, ChipColor};

    #[test]
    fn known_tags_map_case_insensitively() {
        assert_eq!(Category::from_tag("Wieden"), Category::Wieden);
        assert_eq!(Category::from_tag(" SLA "), Category::Sla);
        assert_eq!(Category::from_tag("bieten").color(), ChipColor::Red);
        assert_eq!(Category::from_tag("zaaien").color(), ChipColor::Orange);
    }

    #[test]
    fn spraying_spellings_share_one_variant() {
        assert_eq!(Category::from_tag("spuit"), Category::Spuiten);
        assert_eq!(Category::from_tag("Spuiten"), Category::Spuiten);
    }

    #[test]
    fn unknown_and_partial_tags_fall_back_to_gray() {
        assert_eq!(Category::from_tag("aardappel"), Category::Other);
        assert_eq!(Category::from_tag("wied"), Category::Other);
        assert_eq!(Category::from_tag(""), Category::Other);
        assert_eq!(Category::Other.color(), ChipColor::Gray);
    }
}
