// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::{Catalog, Item, ItemId, collate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    Brand,
    Name,
    Crops,
    Operations,
    Stage,
    Price,
}

impl SortKey {
    pub const ALL: [Self; 6] = [
        Self::Brand,
        Self::Name,
        Self::Crops,
        Self::Operations,
        Self::Stage,
        Self::Price,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Brand => "Merk",
            Self::Name => "Robot",
            Self::Crops => "Gewassen",
            Self::Operations => "Handelingen",
            Self::Stage => "Ontwikkeling",
            Self::Price => "Kostprijs",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Name => "name",
            Self::Crops => "crops",
            Self::Operations => "operations",
            Self::Stage => "stage",
            Self::Price => "price",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "brand" | "merk" => Some(Self::Brand),
            "name" | "robot" => Some(Self::Name),
            "crops" | "gewassen" => Some(Self::Crops),
            "operations" | "handelingen" => Some(Self::Operations),
            "stage" | "ontwikkeling" => Some(Self::Stage),
            "price" | "kostprijs" => Some(Self::Price),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    fn apply(self, order: Ordering) -> Ordering {
        match self {
            Self::Asc => order,
            Self::Desc => order.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub const fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    /// Sorting on the active key flips direction; any other key starts
    /// ascending.
    pub fn toggled(current: Option<Self>, key: SortKey) -> Self {
        match current {
            Some(spec) if spec.key == key => Self {
                key,
                direction: spec.direction.flipped(),
            },
            _ => Self::ascending(key),
        }
    }
}

/// Orders `visible` in place. Stable: equal keys keep their relative order.
///
/// Each item's `SortValue` is extracted once before sorting.
pub fn sort(catalog: &Catalog, visible: &mut [ItemId], spec: SortSpec) {
    let mut keyed = visible
        .iter()
        .map(|id| (catalog.get(*id).and_then(|item| sort_value(item, spec.key)), *id))
        .collect::<Vec<_>>();
    keyed.sort_by(|(left, _), (right, _)| {
        missing_last(left.as_ref(), right.as_ref(), spec.direction, SortValue::compare)
    });
    for (slot, (_, id)) in visible.iter_mut().zip(keyed) {
        *slot = id;
    }
}

pub fn compare_items(left: &Item, right: &Item, spec: SortSpec) -> Ordering {
    missing_last(
        sort_value(left, spec.key).as_ref(),
        sort_value(right, spec.key).as_ref(),
        spec.direction,
        SortValue::compare,
    )
}

/// The comparable form of one item's sort column.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    Text(String),
}

impl SortValue {
    fn compare(left: &Self, right: &Self) -> Ordering {
        match (left, right) {
            (Self::Number(left), Self::Number(right)) => left.total_cmp(right),
            (Self::Text(left), Self::Text(right)) => collate::compare(left, right),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

/// `None` when the column is blank or, for prices, holds no number.
pub fn sort_value(item: &Item, key: SortKey) -> Option<SortValue> {
    let text = match key {
        SortKey::Price => return parse_price(&item.price).map(SortValue::Number),
        SortKey::Brand => item.brand.clone(),
        SortKey::Name => item.name.clone(),
        SortKey::Crops => item.crop_targets.join(", "),
        SortKey::Operations => item.operations.join(", "),
        SortKey::Stage => item.development_stage.clone(),
    };
    Some(text)
        .filter(|text| !text.trim().is_empty())
        .map(SortValue::Text)
}

fn missing_last<T>(
    left: Option<T>,
    right: Option<T>,
    direction: SortDirection,
    compare: impl FnOnce(T, T) -> Ordering,
) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => direction.apply(compare(left, right)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Representative number for a free-text price: the mean of every number in
/// the text, so a range sorts by its midpoint. `None` when there is no digit.
///
/// `.` and `,` both act as decimal separators. A separator followed by
/// exactly three digits is read as a thousands separator instead, which is
/// how the dataset writes whole euro amounts (`€10.000`). That rule wins over
/// the plain decimal reading, so `€10,500` is ten thousand five hundred and
/// never ten and a half.
pub fn parse_price(text: &str) -> Option<f64> {
    let chars = text.chars().collect::<Vec<_>>();
    let mut numbers = Vec::new();
    let mut index = 0;
    while index < chars.len() {
        if chars[index].is_ascii_digit() {
            let (value, end) = parse_number_token(&chars, index);
            numbers.push(value);
            index = end;
        } else {
            index += 1;
        }
    }

    if numbers.is_empty() {
        return None;
    }
    Some(numbers.iter().sum::<f64>() / numbers.len() as f64)
}

fn parse_number_token(chars: &[char], start: usize) -> (f64, usize) {
    let digits_from = |from: usize| {
        chars[from..]
            .iter()
            .take_while(|ch| ch.is_ascii_digit())
            .count()
    };

    let mut integer = String::new();
    let mut index = start;
    let run = digits_from(index);
    integer.extend(&chars[index..index + run]);
    index += run;

    let mut fraction = String::new();
    while index + 1 < chars.len() && matches!(chars[index], '.' | ',') {
        let run = digits_from(index + 1);
        if run == 0 {
            break;
        }
        let group = &chars[index + 1..index + 1 + run];
        index += 1 + run;
        if run == 3 {
            integer.extend(group);
        } else {
            fraction.extend(group);
            break;
        }
    }

    let literal = if fraction.is_empty() {
        integer
    } else {
        format!("{integer}.{fraction}")
    };
    (literal.parse().unwrap_or(0.0), index)
}
