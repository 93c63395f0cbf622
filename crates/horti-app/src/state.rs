// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{
    Catalog, Criteria, ItemId, SelectorKind, SortDirection, SortKey, SortSpec, filter, sort,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SelectorOptions {
    brands: Vec<String>,
    crops: Vec<String>,
    operations: Vec<String>,
    stages: Vec<String>,
}

impl SelectorOptions {
    fn for_catalog(catalog: &Catalog) -> Self {
        Self {
            brands: catalog.brands(),
            crops: catalog.crops(),
            operations: catalog.operations(),
            stages: catalog.stages(),
        }
    }

    fn get(&self, kind: SelectorKind) -> &[String] {
        match kind {
            SelectorKind::Brand => &self.brands,
            SelectorKind::Crop => &self.crops,
            SelectorKind::Operation => &self.operations,
            SelectorKind::Stage => &self.stages,
        }
    }
}

/// Catalog plus everything derived from user input. The visible set and the
/// selection are only ever rebuilt together, inside `dispatch`.
///
/// Selection is kept by identity: if the selected item survives a refilter or
/// resort it stays selected wherever it moved; otherwise the first visible
/// item is selected, or nothing when the visible set is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    catalog: Catalog,
    options: SelectorOptions,
    load_state: LoadState,
    criteria: Criteria,
    sort: Option<SortSpec>,
    visible: Vec<ItemId>,
    selected: Option<ItemId>,
    status_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    SetQuery(String),
    PushQueryChar(char),
    PopQueryChar,
    SetSelector(SelectorKind, Option<String>),
    CycleSelector(SelectorKind, isize),
    ClearFilters,
    SortBy(SortKey),
    ClearSort,
    SelectRow(usize),
    MoveSelection(isize),
    SelectFirst,
    SelectLast,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    VisibleChanged { count: usize },
    SortChanged(Option<SortSpec>),
    SelectionChanged(Option<ItemId>),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn load(&mut self, catalog: Catalog) -> Vec<AppEvent> {
        tracing::info!(items = catalog.len(), "catalog loaded");
        self.options = SelectorOptions::for_catalog(&catalog);
        self.catalog = catalog;
        self.load_state = LoadState::Loaded;
        self.selected = None;
        let mut events = self.recompute();
        events.push(self.set_status(format!("{} robots loaded", self.catalog.len())));
        events
    }

    /// Records a load failure. No partial data is kept.
    pub fn fail_load(&mut self, message: impl Into<String>) -> Vec<AppEvent> {
        let message = message.into();
        tracing::warn!(%message, "catalog load failed");
        self.catalog = Catalog::default();
        self.options = SelectorOptions::default();
        self.load_state = LoadState::Failed(message);
        self.visible.clear();
        let mut events = Vec::new();
        if self.selected.take().is_some() {
            events.push(AppEvent::SelectionChanged(None));
        }
        events.push(self.set_status("failed to load catalog"));
        events
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn visible(&self) -> &[ItemId] {
        &self.visible
    }

    pub fn selected(&self) -> Option<ItemId> {
        self.selected
    }

    /// Row of the selected item in the visible ordering.
    pub fn selected_row(&self) -> Option<usize> {
        let selected = self.selected?;
        self.visible.iter().position(|id| *id == selected)
    }

    pub fn options(&self, kind: SelectorKind) -> &[String] {
        self.options.get(kind)
    }

    pub fn status_line(&self) -> Option<&str> {
        self.status_line.as_deref()
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::SetQuery(query) => {
                self.criteria.query = query;
                self.recompute()
            }
            AppCommand::PushQueryChar(ch) => {
                self.criteria.query.push(ch);
                self.recompute()
            }
            AppCommand::PopQueryChar => {
                if self.criteria.query.pop().is_none() {
                    return Vec::new();
                }
                self.recompute()
            }
            AppCommand::SetSelector(kind, value) => {
                self.criteria.set_selector(kind, value);
                let mut events = self.recompute();
                events.push(self.selector_status(kind));
                events
            }
            AppCommand::CycleSelector(kind, delta) => self.cycle_selector(kind, delta),
            AppCommand::ClearFilters => {
                self.criteria = Criteria::default();
                let mut events = self.recompute();
                events.push(self.set_status("filters cleared"));
                events
            }
            AppCommand::SortBy(key) => {
                let spec = SortSpec::toggled(self.sort, key);
                self.sort = Some(spec);
                let mut events = vec![AppEvent::SortChanged(self.sort)];
                events.extend(self.recompute());
                let direction = match spec.direction {
                    SortDirection::Asc => "asc",
                    SortDirection::Desc => "desc",
                };
                events.push(self.set_status(format!("sort {} {direction}", key.label())));
                events
            }
            AppCommand::ClearSort => {
                self.sort = None;
                let mut events = vec![AppEvent::SortChanged(None)];
                events.extend(self.recompute());
                events.push(self.set_status("sort cleared"));
                events
            }
            AppCommand::SelectRow(row) => match self.visible.get(row).copied() {
                Some(id) => self.select(Some(id)),
                None => Vec::new(),
            },
            AppCommand::MoveSelection(delta) => self.move_selection(delta),
            AppCommand::SelectFirst => self.select(self.visible.first().copied()),
            AppCommand::SelectLast => self.select(self.visible.last().copied()),
            AppCommand::SetStatus(message) => vec![self.set_status(message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn recompute(&mut self) -> Vec<AppEvent> {
        let mut visible = filter(&self.catalog, &self.criteria);
        if let Some(spec) = self.sort {
            sort(&self.catalog, &mut visible, spec);
        }
        self.visible = visible;

        let mut events = vec![AppEvent::VisibleChanged {
            count: self.visible.len(),
        }];
        let kept = self.selected.filter(|id| self.visible.contains(id));
        events.extend(self.select(kept.or_else(|| self.visible.first().copied())));
        events
    }

    fn select(&mut self, id: Option<ItemId>) -> Vec<AppEvent> {
        if self.selected == id {
            return Vec::new();
        }
        self.selected = id;
        vec![AppEvent::SelectionChanged(id)]
    }

    fn move_selection(&mut self, delta: isize) -> Vec<AppEvent> {
        if self.visible.is_empty() {
            return Vec::new();
        }
        let current = self.selected_row().unwrap_or(0);
        let next = if delta.is_negative() {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            current.saturating_add(delta as usize)
        };
        let next = next.min(self.visible.len() - 1);
        self.select(Some(self.visible[next]))
    }

    /// Steps through "no constraint" followed by each option of the selector.
    fn cycle_selector(&mut self, kind: SelectorKind, delta: isize) -> Vec<AppEvent> {
        let options = self.options.get(kind);
        let slots = options.len() as isize + 1;
        let current = self
            .criteria
            .selector(kind)
            .and_then(|value| {
                options
                    .iter()
                    .position(|option| kind.same_value(option, value))
            })
            .map_or(0, |index| index as isize + 1);
        let next = (current + delta).rem_euclid(slots);
        let value = (next > 0).then(|| options[(next - 1) as usize].clone());

        self.criteria.set_selector(kind, value);
        let mut events = self.recompute();
        events.push(self.selector_status(kind));
        events
    }

    fn selector_status(&mut self, kind: SelectorKind) -> AppEvent {
        let value = self.criteria.selector(kind).unwrap_or("all").to_owned();
        self.set_status(format!("{}: {value}", kind.label()))
    }

    fn set_status(&mut self, message: impl Into<String>) -> AppEvent {
        let message = message.into();
        self.status_line = Some(message.clone());
        AppEvent::StatusUpdated(message)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState, LoadState};
    use crate::{Catalog, Item, ItemId, SelectorKind, SortDirection, SortKey, SortSpec};

    fn robot(brand: &str, name: &str, price: &str) -> Item {
        Item {
            brand: brand.to_owned(),
            name: name.to_owned(),
            price: price.to_owned(),
            ..Item::default()
        }
    }

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.load(Catalog::new(vec![
            robot("Naïo", "Oz", "€20"),
            robot("FarmDroid", "FD20", "€5"),
            robot("Naïo", "Dino", "n/a"),
            robot("Ecorobotix", "ARA", "€12"),
        ]));
        state
    }

    #[test]
    fn load_selects_first_visible_item() {
        let mut state = AppState::default();
        assert_eq!(state.load_state(), &LoadState::Loading);
        let events = state.load(Catalog::new(vec![robot("A", "a", "")]));
        assert_eq!(state.load_state(), &LoadState::Loaded);
        assert_eq!(state.selected(), Some(ItemId::new(0)));
        assert_eq!(events, vec![
            AppEvent::VisibleChanged { count: 1 },
            AppEvent::SelectionChanged(Some(ItemId::new(0))),
            AppEvent::StatusUpdated("1 robots loaded".to_owned()),
        ]);
    }

    #[test]
    fn failed_load_leaves_empty_catalog_and_no_selection() {
        let mut state = loaded();
        state.fail_load("timeout");
        assert!(state.catalog().is_empty());
        assert!(state.visible().is_empty());
        assert_eq!(state.selected(), None);
        assert_eq!(state.load_state(), &LoadState::Failed("timeout".to_owned()));
        assert_eq!(state.status_line(), Some("failed to load catalog"));
    }

    #[test]
    fn selection_survives_refilter_when_item_stays_visible() {
        let mut state = loaded();
        state.dispatch(AppCommand::SelectRow(2));
        assert_eq!(state.selected(), Some(ItemId::new(2)));

        state.dispatch(AppCommand::SetSelector(
            SelectorKind::Brand,
            Some("Naïo".to_owned()),
        ));
        assert_eq!(state.visible(), &[ItemId::new(0), ItemId::new(2)]);
        assert_eq!(state.selected(), Some(ItemId::new(2)));
        assert_eq!(state.selected_row(), Some(1));
    }

    #[test]
    fn selection_falls_back_to_first_visible_when_filtered_out() {
        let mut state = loaded();
        state.dispatch(AppCommand::SelectRow(1));
        assert_eq!(state.selected(), Some(ItemId::new(1)));

        let events = state.dispatch(AppCommand::SetQuery("naïo".to_owned()));
        assert_eq!(state.selected(), Some(ItemId::new(0)));
        assert_eq!(state.selected_row(), Some(0));
        assert!(events.contains(&AppEvent::SelectionChanged(Some(ItemId::new(0)))));
    }

    #[test]
    fn selection_clears_when_nothing_is_visible_and_returns_after() {
        let mut state = loaded();
        state.dispatch(AppCommand::SetQuery("bestaat niet".to_owned()));
        assert_eq!(state.selected(), None);
        assert_eq!(state.selected_row(), None);

        state.dispatch(AppCommand::SetQuery(String::new()));
        assert_eq!(state.selected(), Some(ItemId::new(0)));
    }

    #[test]
    fn sort_keeps_selected_item_and_toggles_direction() {
        let mut state = loaded();
        state.dispatch(AppCommand::SelectRow(3));

        state.dispatch(AppCommand::SortBy(SortKey::Price));
        assert_eq!(state.sort(), Some(SortSpec::ascending(SortKey::Price)));
        assert_eq!(state.visible(), &[
            ItemId::new(1),
            ItemId::new(3),
            ItemId::new(0),
            ItemId::new(2),
        ]);
        assert_eq!(state.selected(), Some(ItemId::new(3)));
        assert_eq!(state.selected_row(), Some(1));
        assert_eq!(state.status_line(), Some("sort Kostprijs asc"));

        state.dispatch(AppCommand::SortBy(SortKey::Price));
        assert_eq!(state.sort().map(|spec| spec.direction), Some(SortDirection::Desc));
        assert_eq!(state.visible(), &[
            ItemId::new(0),
            ItemId::new(3),
            ItemId::new(1),
            ItemId::new(2),
        ]);

        state.dispatch(AppCommand::SortBy(SortKey::Name));
        assert_eq!(state.sort(), Some(SortSpec::ascending(SortKey::Name)));

        state.dispatch(AppCommand::ClearSort);
        assert_eq!(state.visible(), state.catalog().ids().as_slice());
    }

    #[test]
    fn filtered_view_stays_sorted() {
        let mut state = loaded();
        state.dispatch(AppCommand::SortBy(SortKey::Name));
        state.dispatch(AppCommand::SetSelector(
            SelectorKind::Brand,
            Some("Naïo".to_owned()),
        ));
        assert_eq!(state.visible(), &[ItemId::new(2), ItemId::new(0)]);
    }

    #[test]
    fn move_selection_clamps_to_visible_rows() {
        let mut state = loaded();
        state.dispatch(AppCommand::MoveSelection(10));
        assert_eq!(state.selected_row(), Some(3));
        state.dispatch(AppCommand::MoveSelection(-2));
        assert_eq!(state.selected_row(), Some(1));
        state.dispatch(AppCommand::MoveSelection(-5));
        assert_eq!(state.selected_row(), Some(0));
        state.dispatch(AppCommand::SelectLast);
        assert_eq!(state.selected(), Some(ItemId::new(3)));
        state.dispatch(AppCommand::SelectFirst);
        assert_eq!(state.selected(), Some(ItemId::new(0)));
    }

    #[test]
    fn select_row_out_of_range_is_ignored() {
        let mut state = loaded();
        assert!(state.dispatch(AppCommand::SelectRow(9)).is_empty());
        assert_eq!(state.selected(), Some(ItemId::new(0)));
    }

    #[test]
    fn cycle_selector_walks_options_then_wraps_to_all() {
        let mut state = loaded();
        assert_eq!(state.options(SelectorKind::Brand), &[
            "Ecorobotix".to_owned(),
            "FarmDroid".to_owned(),
            "Naïo".to_owned(),
        ]);

        state.dispatch(AppCommand::CycleSelector(SelectorKind::Brand, 1));
        assert_eq!(state.criteria().brand.as_deref(), Some("Ecorobotix"));
        assert_eq!(state.status_line(), Some("merk: Ecorobotix"));

        state.dispatch(AppCommand::CycleSelector(SelectorKind::Brand, -1));
        assert_eq!(state.criteria().brand, None);
        assert_eq!(state.status_line(), Some("merk: all"));

        state.dispatch(AppCommand::CycleSelector(SelectorKind::Brand, -1));
        assert_eq!(state.criteria().brand.as_deref(), Some("Naïo"));
        assert_eq!(state.visible().len(), 2);
    }

    #[test]
    fn cycle_selector_continues_from_stage_set_in_other_case() {
        let mut state = AppState::default();
        state.load(Catalog::new(
            ["onderzoek", "prototype", "scale-up"]
                .into_iter()
                .map(|stage| Item {
                    development_stage: stage.to_owned(),
                    ..Item::default()
                })
                .collect(),
        ));
        assert_eq!(state.options(SelectorKind::Stage), &[
            "onderzoek".to_owned(),
            "prototype".to_owned(),
            "scale-up".to_owned(),
        ]);

        state.dispatch(AppCommand::SetSelector(
            SelectorKind::Stage,
            Some("PROTOTYPE".to_owned()),
        ));
        assert_eq!(state.visible(), &[ItemId::new(1)]);

        state.dispatch(AppCommand::CycleSelector(SelectorKind::Stage, 1));
        assert_eq!(state.criteria().stage.as_deref(), Some("scale-up"));
        assert_eq!(state.visible(), &[ItemId::new(2)]);
    }

    #[test]
    fn query_editing_commands_recompute() {
        let mut state = loaded();
        for ch in "fd".chars() {
            state.dispatch(AppCommand::PushQueryChar(ch));
        }
        assert_eq!(state.visible(), &[ItemId::new(1)]);
        state.dispatch(AppCommand::PopQueryChar);
        state.dispatch(AppCommand::PopQueryChar);
        assert_eq!(state.visible().len(), 4);
        assert!(state.dispatch(AppCommand::PopQueryChar).is_empty());
    }

    #[test]
    fn clear_filters_resets_every_constraint() {
        let mut state = loaded();
        state.dispatch(AppCommand::SetQuery("oz".to_owned()));
        state.dispatch(AppCommand::SetSelector(
            SelectorKind::Stage,
            Some("prototype".to_owned()),
        ));
        assert!(state.visible().is_empty());

        state.dispatch(AppCommand::ClearFilters);
        assert!(state.criteria().is_empty());
        assert_eq!(state.visible().len(), 4);
        assert_eq!(state.status_line(), Some("filters cleared"));
    }

    #[test]
    fn status_can_be_set_and_cleared() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::SetStatus("opened".to_owned()));
        assert_eq!(state.status_line(), Some("opened"));
        assert_eq!(state.dispatch(AppCommand::ClearStatus), vec![
            AppEvent::StatusCleared
        ]);
        assert_eq!(state.status_line(), None);
    }
}
