// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use horti_app::{
    AppCommand, AppEvent, AppState, Chip, ChipColor, ColumnView, ContributionKind,
    ContributionLink, DetailView, DraftField, IssueTracker, LoadState, NewItemDraft, SelectorKind,
    SortDirection, SortKey, TableBody, contribution_link, detail_view, new_item_link,
    selector_views, table_view,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

const PAGE_ROWS: isize = 10;
const SORT_MARK_ASC: &str = "▲";
const SORT_MARK_DESC: &str = "▼";
const FILTER_MARK_ACTIVE: &str = "●";
const LINK_ARROW: &str = "→";
const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);

/// Side effects the browser asks of its host.
pub trait CatalogRuntime {
    fn open_url(&mut self, url: &Url) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum InputMode {
    #[default]
    Nav,
    Search,
    NewItem,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct NewItemForm {
    draft: NewItemDraft,
    field_index: usize,
}

impl NewItemForm {
    fn field(&self) -> DraftField {
        DraftField::ALL[self.field_index % DraftField::ALL.len()]
    }

    fn step(&mut self, delta: isize) {
        let len = DraftField::ALL.len() as isize;
        self.field_index = (self.field_index as isize + delta).rem_euclid(len) as usize;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    mode: InputMode,
    help_visible: bool,
    form: Option<NewItemForm>,
    status_token: u64,
    link_pending: bool,
}

pub fn run_app<R: CatalogRuntime>(
    state: &mut AppState,
    tracker: &IssueTracker,
    runtime: &mut R,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    if state.status_line().is_some() {
        track_status(&mut view_data, &internal_tx);
    }

    let mut result = Ok(());
    loop {
        process_internal_events(state, &view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, tracker, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if !has_event {
            continue;
        }
        match event::read().context("read event") {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if handle_key_event(state, runtime, &mut view_data, tracker, &internal_tx, key) {
                    break;
                }
            }
            Ok(_) => {}
            Err(error) => {
                result = Err(error);
                break;
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn track_status(view_data: &mut ViewData, internal_tx: &Sender<InternalEvent>) {
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

/// Dispatches and arms the status clear timer when the command set a status.
fn apply(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) {
    debug!(?command, "dispatch");
    let events = state.dispatch(command);
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        track_status(view_data, internal_tx);
    }
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    apply(
        state,
        view_data,
        internal_tx,
        AppCommand::SetStatus(message.into()),
    );
}

fn handle_key_event<R: CatalogRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tracker: &IssueTracker,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
    {
        return true;
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            view_data.help_visible = false;
            emit_status(state, view_data, internal_tx, "help hidden");
        }
        return false;
    }

    match view_data.mode {
        InputMode::Search => {
            handle_search_key(state, view_data, internal_tx, key);
            false
        }
        InputMode::NewItem => {
            handle_form_key(state, runtime, view_data, tracker, internal_tx, key);
            false
        }
        InputMode::Nav => handle_nav_key(state, runtime, view_data, tracker, internal_tx, key),
    }
}

fn handle_nav_key<R: CatalogRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tracker: &IssueTracker,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }

    if view_data.link_pending {
        view_data.link_pending = false;
        match key.code {
            KeyCode::Char(ch @ '1'..='9') => {
                let index = ch as usize - '1' as usize;
                open_item_link(state, runtime, view_data, internal_tx, index);
            }
            _ => emit_status(state, view_data, internal_tx, "link cancelled"),
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('l') => begin_link_choice(state, view_data, internal_tx),
        KeyCode::Char('?') => {
            view_data.help_visible = true;
            emit_status(state, view_data, internal_tx, "help open");
        }
        KeyCode::Char('/') => view_data.mode = InputMode::Search,
        KeyCode::Char('n') => {
            view_data.form = Some(NewItemForm::default());
            view_data.mode = InputMode::NewItem;
        }
        code => {
            if let Some(kind) = contribution_kind_for_key(code) {
                open_contribution(state, runtime, view_data, tracker, internal_tx, kind);
            } else if let Some(command) = nav_command(key) {
                apply(state, view_data, internal_tx, command);
            }
        }
    }
    false
}

fn nav_command(key: KeyEvent) -> Option<AppCommand> {
    let command = match key.code {
        KeyCode::Char('j') | KeyCode::Down => AppCommand::MoveSelection(1),
        KeyCode::Char('k') | KeyCode::Up => AppCommand::MoveSelection(-1),
        KeyCode::PageDown => AppCommand::MoveSelection(PAGE_ROWS),
        KeyCode::PageUp => AppCommand::MoveSelection(-PAGE_ROWS),
        KeyCode::Char('g') | KeyCode::Home => AppCommand::SelectFirst,
        KeyCode::Char('G') | KeyCode::End => AppCommand::SelectLast,
        KeyCode::Char('x') => AppCommand::ClearFilters,
        KeyCode::Char('0') => AppCommand::ClearSort,
        KeyCode::Char(ch @ '1'..='9') => {
            let index = ch as usize - '1' as usize;
            AppCommand::SortBy(SortKey::ALL.get(index).copied()?)
        }
        KeyCode::Char(ch) => {
            let kind = selector_for_key(ch.to_ascii_lowercase())?;
            let delta = if ch.is_ascii_uppercase() { -1 } else { 1 };
            AppCommand::CycleSelector(kind, delta)
        }
        _ => return None,
    };
    Some(command)
}

fn selector_for_key(ch: char) -> Option<SelectorKind> {
    match ch {
        'b' => Some(SelectorKind::Brand),
        'c' => Some(SelectorKind::Crop),
        'o' => Some(SelectorKind::Operation),
        't' => Some(SelectorKind::Stage),
        _ => None,
    }
}

fn contribution_kind_for_key(code: KeyCode) -> Option<ContributionKind> {
    match code {
        KeyCode::Char('e') => Some(ContributionKind::Edit),
        KeyCode::Char('p') => Some(ContributionKind::PriceUpdate),
        KeyCode::Char('v') => Some(ContributionKind::AddVideo),
        KeyCode::Char('a') => Some(ContributionKind::AddArticle),
        KeyCode::Char('r') => Some(ContributionKind::AddRemark),
        _ => None,
    }
}

const fn contribution_key(kind: ContributionKind) -> char {
    match kind {
        ContributionKind::Edit => 'e',
        ContributionKind::PriceUpdate => 'p',
        ContributionKind::AddVideo => 'v',
        ContributionKind::AddArticle => 'a',
        ContributionKind::AddRemark => 'r',
        ContributionKind::NewItem => 'n',
    }
}

fn handle_search_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let command = match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            view_data.mode = InputMode::Nav;
            return;
        }
        KeyCode::Backspace => AppCommand::PopQueryChar,
        KeyCode::Down => AppCommand::MoveSelection(1),
        KeyCode::Up => AppCommand::MoveSelection(-1),
        KeyCode::Char('u') if ctrl => AppCommand::SetQuery(String::new()),
        KeyCode::Char(ch) if !ctrl => AppCommand::PushQueryChar(ch),
        _ => return,
    };
    apply(state, view_data, internal_tx, command);
}

fn handle_form_key<R: CatalogRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tracker: &IssueTracker,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let Some(form) = view_data.form.as_mut() else {
        view_data.mode = InputMode::Nav;
        return;
    };

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let field = form.field();
    match key.code {
        KeyCode::Esc => {
            close_form(view_data);
            emit_status(state, view_data, internal_tx, "new robot cancelled");
        }
        KeyCode::Tab | KeyCode::Down => form.step(1),
        KeyCode::BackTab | KeyCode::Up => form.step(-1),
        KeyCode::Backspace => {
            form.draft.field_mut(field).pop();
        }
        KeyCode::Char('u') if ctrl => form.draft.field_mut(field).clear(),
        KeyCode::Enter => {
            let draft = form.draft.clone();
            submit_new_item(state, runtime, view_data, tracker, internal_tx, &draft);
        }
        KeyCode::Char('s') if ctrl => {
            let draft = form.draft.clone();
            submit_new_item(state, runtime, view_data, tracker, internal_tx, &draft);
        }
        KeyCode::Char(ch) if !ctrl => form.draft.field_mut(field).push(ch),
        _ => {}
    }
}

fn close_form(view_data: &mut ViewData) {
    view_data.form = None;
    view_data.mode = InputMode::Nav;
}

fn submit_new_item<R: CatalogRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tracker: &IssueTracker,
    internal_tx: &Sender<InternalEvent>,
    draft: &NewItemDraft,
) {
    match new_item_link(tracker, draft) {
        Ok(link) => {
            close_form(view_data);
            open_link(state, runtime, view_data, internal_tx, &link);
        }
        Err(error) => emit_status(state, view_data, internal_tx, format!("{error:#}")),
    }
}

fn open_contribution<R: CatalogRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tracker: &IssueTracker,
    internal_tx: &Sender<InternalEvent>,
    kind: ContributionKind,
) {
    let link = state
        .selected()
        .and_then(|id| state.catalog().get(id))
        .map(|item| contribution_link(tracker, kind, item));
    let Some(link) = link else {
        emit_status(state, view_data, internal_tx, "no robot selected");
        return;
    };
    open_link(state, runtime, view_data, internal_tx, &link);
}

fn selected_link_count(state: &AppState) -> usize {
    state
        .selected()
        .and_then(|id| state.catalog().get(id))
        .map_or(0, |item| item.openable_links().count())
}

fn begin_link_choice(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    if state.selected().is_none() {
        emit_status(state, view_data, internal_tx, "no robot selected");
        return;
    }
    match selected_link_count(state) {
        0 => emit_status(state, view_data, internal_tx, "no links for this robot"),
        count => {
            view_data.link_pending = true;
            let range = if count == 1 {
                "1".to_owned()
            } else {
                format!("1-{}", count.min(9))
            };
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("open link: press {range}"),
            );
        }
    }
}

/// Opens the `index`-th openable link of the selected robot, numbered as in
/// the detail panel.
fn open_item_link<R: CatalogRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    index: usize,
) {
    let link = state
        .selected()
        .and_then(|id| state.catalog().get(id))
        .and_then(|item| item.openable_links().nth(index))
        .cloned();
    let Some(link) = link else {
        emit_status(
            state,
            view_data,
            internal_tx,
            format!("no link {}", index + 1),
        );
        return;
    };

    let label = link.display_label().to_owned();
    match Url::parse(link.url.trim()).with_context(|| format!("invalid link url {:?}", link.url))
    {
        Ok(url) => open_in_browser(state, runtime, view_data, internal_tx, &url, &label),
        Err(error) => {
            warn!(label = %label, error = %format!("{error:#}"), "open failed");
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("open failed: {error:#}"),
            );
        }
    }
}

fn open_link<R: CatalogRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    link: &ContributionLink,
) {
    open_in_browser(
        state,
        runtime,
        view_data,
        internal_tx,
        &link.url,
        link.kind.issue_label(),
    );
}

fn open_in_browser<R: CatalogRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    url: &Url,
    label: &str,
) {
    match runtime.open_url(url) {
        Ok(()) => {
            info!(label, %url, "opened link");
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("opened {label} in browser"),
            );
        }
        Err(error) => {
            warn!(label, error = %format!("{error:#}"), "open failed");
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("open failed: {error:#}"),
            );
        }
    }
}

fn render(
    frame: &mut ratatui::Frame<'_>,
    state: &AppState,
    tracker: &IssueTracker,
    view_data: &ViewData,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(header_text(state)).block(
        Block::default()
            .title("horti robot catalog")
            .borders(Borders::ALL),
    );
    frame.render_widget(header, layout[0]);

    let filter_style = if view_data.mode == InputMode::Search {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let filters = Paragraph::new(filter_bar_text(state, view_data))
        .style(filter_style)
        .block(Block::default().title("filters").borders(Borders::ALL));
    frame.render_widget(filters, layout[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(layout[2]);
    render_table(frame, body[0], state);
    render_detail(frame, body[1], state, tracker);

    let status = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[3]);

    if let Some(form) = &view_data.form {
        let area = centered_rect(70, 80, frame.area());
        frame.render_widget(Clear, area);
        let modal = Paragraph::new(new_item_form_lines(form))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title("nieuwe robot voorstellen")
                    .borders(Borders::ALL),
            );
        frame.render_widget(modal, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 70, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .wrap(Wrap { trim: false })
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_table(frame: &mut ratatui::Frame<'_>, area: Rect, state: &AppState) {
    let view = table_view(state);
    let block = Block::default().title("robots").borders(Borders::ALL);

    let rows = match &view.body {
        TableBody::Rows(rows) => rows,
        body => {
            let message = Paragraph::new(body_message(body))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(message, area);
            return;
        }
    };

    let header = Row::new(view.columns.iter().enumerate().map(|(index, column)| {
        Cell::from(column_header_label(index, column)).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let body_rows = rows.iter().map(|row| {
        let [brand, name, _, _, stage, price] = row.cells();
        Row::new(vec![
            Cell::from(brand),
            Cell::from(name),
            Cell::from(chip_line(&row.crops)),
            Cell::from(chip_line(&row.operations)),
            Cell::from(stage),
            Cell::from(price),
        ])
    });

    let widths = [
        Constraint::Percentage(16),
        Constraint::Percentage(14),
        Constraint::Percentage(20),
        Constraint::Percentage(18),
        Constraint::Percentage(15),
        Constraint::Percentage(17),
    ];
    let table = Table::new(body_rows, widths)
        .header(header)
        .column_spacing(1)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .block(block);

    let mut table_state = TableState::default().with_selected(view.selected_row);
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_detail(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    tracker: &IssueTracker,
) {
    let lines = match detail_view(state, tracker) {
        Some(detail) => detail_lines(&detail),
        None => vec![Line::from("no robot selected")],
    };
    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("detail").borders(Borders::ALL));
    frame.render_widget(detail, area);
}

fn header_text(state: &AppState) -> String {
    match state.load_state() {
        LoadState::Loading => "loading catalog...".to_owned(),
        LoadState::Failed(_) => "catalog unavailable".to_owned(),
        LoadState::Loaded => format!(
            "{} of {} robots shown",
            state.visible().len(),
            state.catalog().len()
        ),
    }
}

fn filter_bar_text(state: &AppState, view_data: &ViewData) -> String {
    let cursor = if view_data.mode == InputMode::Search {
        "_"
    } else {
        ""
    };
    let mut parts = vec![format!("/ {}{cursor}", state.criteria().query)];
    for selector in selector_views(state) {
        let (mark, value) = match &selector.value {
            Some(value) => (FILTER_MARK_ACTIVE, value.as_str()),
            None => (" ", "all"),
        };
        parts.push(format!(
            "{mark}{}: {value} ({})",
            selector.label, selector.option_count
        ));
    }
    parts.join(" | ")
}

fn column_header_label(index: usize, column: &ColumnView) -> String {
    let mut label = format!("{} {}", index + 1, column.label);
    match column.sorted {
        Some(SortDirection::Asc) => {
            label.push(' ');
            label.push_str(SORT_MARK_ASC);
        }
        Some(SortDirection::Desc) => {
            label.push(' ');
            label.push_str(SORT_MARK_DESC);
        }
        None => {}
    }
    label
}

fn body_message(body: &TableBody) -> String {
    match body {
        TableBody::Loading => "loading catalog...".to_owned(),
        TableBody::Failed(message) => format!("could not load the catalog: {message}"),
        TableBody::Empty { filtered: true } => {
            "no robots match the current filters (x clears them)".to_owned()
        }
        TableBody::Empty { filtered: false } => "the catalog is empty".to_owned(),
        TableBody::Rows(_) => String::new(),
    }
}

const fn chip_color(color: ChipColor) -> Color {
    match color {
        ChipColor::Blue => Color::Blue,
        ChipColor::Purple => Color::Magenta,
        ChipColor::Orange => Color::Rgb(230, 140, 40),
        ChipColor::Green => Color::Green,
        ChipColor::Red => Color::Red,
        ChipColor::Gray => Color::Gray,
    }
}

fn chip_spans(chips: &[Chip]) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(chips.len() * 2);
    for (index, chip) in chips.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            chip.text.clone(),
            Style::default().fg(chip_color(chip.color)),
        ));
    }
    spans
}

fn chip_line(chips: &[Chip]) -> Line<'static> {
    Line::from(chip_spans(chips))
}

fn labeled_chips(label: &'static str, chips: &[Chip]) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("{label}: "),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if chips.is_empty() {
        spans.push(Span::raw("-"));
    } else {
        spans.extend(chip_spans(chips));
    }
    Line::from(spans)
}

fn detail_lines(detail: &DetailView) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from(Span::styled(
        detail.title.clone(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))];
    if !detail.subtitle.is_empty() {
        lines.push(Line::from(detail.subtitle.clone()));
    }
    lines.push(Line::default());

    let stage = if detail.stage.text.is_empty() {
        "-".to_owned()
    } else {
        format!("{} {}", detail.stage.icon, detail.stage.text)
    };
    lines.push(Line::from(vec![
        Span::styled("ontwikkeling: ", bold),
        Span::raw(stage),
    ]));
    lines.push(labeled_chips("gewassen", &detail.crops));
    lines.push(labeled_chips("handelingen", &detail.operations));

    if let Some(photo) = &detail.photo_url {
        lines.push(Line::from(vec![
            Span::styled("foto: ", bold),
            Span::raw(photo.clone()),
        ]));
    }

    if !detail.links.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("links", bold)));
        for (index, link) in detail.links.iter().enumerate() {
            lines.push(Line::from(format!(
                "  {} {} {LINK_ARROW} {}",
                index + 1,
                link.display_label(),
                link.url
            )));
        }
    }

    if let Some(remarks) = &detail.remarks {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("opmerkingen", bold)));
        lines.push(Line::from(remarks.clone()));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("bijdragen", bold)));
    for contribution in &detail.contributions {
        lines.push(Line::from(format!(
            "  {} {}",
            contribution_key(contribution.kind),
            contribution.label()
        )));
    }
    lines
}

fn new_item_form_lines(form: &NewItemForm) -> Vec<Line<'static>> {
    let active = form.field();
    let mut lines = Vec::with_capacity(DraftField::ALL.len() + 2);
    for field in DraftField::ALL {
        let value = form.draft.field(field);
        let line = if field == active {
            Line::from(Span::styled(
                format!("> {}: {value}_", field.label()),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(format!("  {}: {value}", field.label()))
        };
        lines.push(line);
    }
    lines.push(Line::default());
    let hint = active.hint();
    if !hint.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("{}: {hint}", active.label()),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(
        "tab/shift+tab field | enter or ctrl+s open proposal | ctrl+u clear field | esc cancel",
    ));
    lines
}

fn help_overlay_text() -> &'static str {
    "global: q quit | ctrl+q/ctrl+c quit | ? help\n\
nav: j/k or up/down move | g/G first/last | pgup/pgdn page\n\
search: / edit query | enter/esc leave | backspace delete | ctrl+u clear\n\
filters: b/c/o/t cycle merk/gewas/handeling/ontwikkeling | B/C/O/T backwards | x clear\n\
sort: 1-6 sort by column (repeat flips direction) | 0 clear sort\n\
links: l then 1-9 open the numbered link in the browser\n\
contribute: e edit | p price | v video | a article | r remark | n new robot\n\
new robot: tab/shift+tab field | enter or ctrl+s open proposal | ctrl+u clear field | esc cancel"
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if view_data.help_visible || view_data.form.is_some() {
        return state.status_line().unwrap_or_default().to_owned();
    }

    let mode = match view_data.mode {
        InputMode::Nav => "NAV",
        InputMode::Search => "SEARCH",
        InputMode::NewItem => "FORM",
    };
    let default = "j/k g/G | / search | b/c/o/t x | 1-6 0 sort | l# link | e/p/v/a/r n | ? help | q";
    match state.status_line() {
        Some(status) => format!("{mode} | {status} | {default}"),
        None => format!("{mode} | {default}"),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
