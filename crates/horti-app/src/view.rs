// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Presentation-neutral view records. Renderers draw these; they never reach
//! into the catalog or the criteria themselves.

use crate::{
    AppState, Category, ChipColor, ContributionLink, DevelopmentStage, IssueTracker, Item, ItemId,
    LoadState, Link, SelectorKind, SortDirection, SortKey, contribution_links,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub text: String,
    pub color: ChipColor,
}

impl Chip {
    pub fn for_tag(tag: &str) -> Self {
        Self {
            text: tag.to_owned(),
            color: Category::from_tag(tag).color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageBadge {
    pub stage: DevelopmentStage,
    pub icon: &'static str,
    /// Raw stage text, shown as-is (also for unknown stages).
    pub text: String,
}

impl StageBadge {
    pub fn for_item(item: &Item) -> Self {
        let stage = item.stage();
        Self {
            stage,
            icon: stage.icon(),
            text: item.development_stage.trim().to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: ItemId,
    pub brand: String,
    pub name: String,
    pub crops: Vec<Chip>,
    pub operations: Vec<Chip>,
    pub stage: StageBadge,
    pub price: String,
}

impl RowView {
    pub fn for_item(id: ItemId, item: &Item) -> Self {
        Self {
            id,
            brand: item.brand.clone(),
            name: item.name.clone(),
            crops: item.crop_targets.iter().map(|tag| Chip::for_tag(tag)).collect(),
            operations: item.operations.iter().map(|tag| Chip::for_tag(tag)).collect(),
            stage: StageBadge::for_item(item),
            price: item.price.clone(),
        }
    }

    /// Cell text per column, in `SortKey::ALL` order.
    pub fn cells(&self) -> [String; 6] {
        [
            self.brand.clone(),
            self.name.clone(),
            join_chips(&self.crops),
            join_chips(&self.operations),
            format!("{} {}", self.stage.icon, self.stage.text)
                .trim_end()
                .to_owned(),
            self.price.clone(),
        ]
    }
}

fn join_chips(chips: &[Chip]) -> String {
    chips
        .iter()
        .map(|chip| chip.text.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnView {
    pub key: SortKey,
    pub label: &'static str,
    pub sorted: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    Loading,
    Failed(String),
    Empty { filtered: bool },
    Rows(Vec<RowView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<ColumnView>,
    pub body: TableBody,
    pub selected_row: Option<usize>,
}

pub fn table_view(state: &AppState) -> TableView {
    let columns = SortKey::ALL
        .into_iter()
        .map(|key| ColumnView {
            key,
            label: key.label(),
            sorted: state
                .sort()
                .filter(|spec| spec.key == key)
                .map(|spec| spec.direction),
        })
        .collect();

    let body = match state.load_state() {
        LoadState::Loading => TableBody::Loading,
        LoadState::Failed(message) => TableBody::Failed(message.clone()),
        LoadState::Loaded if state.visible().is_empty() => TableBody::Empty {
            filtered: !state.criteria().is_empty(),
        },
        LoadState::Loaded => TableBody::Rows(
            state
                .visible()
                .iter()
                .filter_map(|id| {
                    state
                        .catalog()
                        .get(*id)
                        .map(|item| RowView::for_item(*id, item))
                })
                .collect(),
        ),
    };

    TableView {
        columns,
        body,
        selected_row: state.selected_row(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: ItemId,
    pub title: String,
    pub subtitle: String,
    pub stage: StageBadge,
    pub crops: Vec<Chip>,
    pub operations: Vec<Chip>,
    pub photo_url: Option<String>,
    pub links: Vec<Link>,
    pub remarks: Option<String>,
    pub contributions: Vec<ContributionLink>,
}

/// Detail panel for the selected item; `None` when nothing is selected.
pub fn detail_view(state: &AppState, tracker: &IssueTracker) -> Option<DetailView> {
    let id = state.selected()?;
    let item = state.catalog().get(id)?;

    let subtitle = [item.brand.trim(), item.price.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" – ");

    Some(DetailView {
        id,
        title: item.display_name().to_owned(),
        subtitle,
        stage: StageBadge::for_item(item),
        crops: item.crop_targets.iter().map(|tag| Chip::for_tag(tag)).collect(),
        operations: item.operations.iter().map(|tag| Chip::for_tag(tag)).collect(),
        photo_url: item.photo_url.clone(),
        links: item.openable_links().cloned().collect(),
        remarks: item.remarks.clone(),
        contributions: contribution_links(tracker, item),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorView {
    pub kind: SelectorKind,
    pub label: &'static str,
    pub value: Option<String>,
    pub option_count: usize,
}

pub fn selector_views(state: &AppState) -> Vec<SelectorView> {
    SelectorKind::ALL
        .into_iter()
        .map(|kind| SelectorView {
            kind,
            label: kind.label(),
            value: state.criteria().selector(kind).map(str::to_owned),
            option_count: state.options(kind).len(),
        })
        .collect()
}
