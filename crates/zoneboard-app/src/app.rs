#![forbid(unsafe_code)]

//! Application model and message routing.
//!
//! `AppModel` implements the Elm architecture via [`Model`]: terminal
//! events arrive as [`Msg::Terminal`], the keymap and mouse hit-testing
//! translate them into the widget's semantic events (add/remove/reorder/
//! edit/set-date/toggles), and those mutate the [`ZoneBoard`] owned by the
//! model. The view caches hit-test rectangles through interior mutability
//! so mouse routing works against the frame the user actually saw.

use std::cell::{Cell, RefCell};

use jiff::civil::Date;
use tracing::{debug, warn};

use zoneboard_core::{format, ZoneBoard, ZoneCatalog, ZoneKey, MINUTES_PER_DAY};
use zoneboard_style::Theme;
use zoneboard_tui::widgets::{Input, TimeSlider};
use zoneboard_tui::{
    Buffer, Cmd, Event, KeyCode, KeyEvent, Model, MouseButton, MouseEvent, MouseEventKind,
    Preferences, Rect, StorageBackend,
};

use crate::theme;

/// The external calendar-event-creation link the book control opens.
pub const BOOKING_URL: &str = "https://calendar.google.com/calendar/u/0/r/eventedit";

/// Minutes per keyboard nudge.
const NUDGE_MINUTES: u16 = 15;
/// Minutes per shifted keyboard nudge.
const NUDGE_MINUTES_COARSE: u16 = 60;
/// Visible rows in the add-zone picker list.
pub(crate) const PICKER_ROWS: usize = 10;

/// Semantic application messages, plus the raw terminal feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A terminal event to be routed by keymap/hit-testing.
    Terminal(Event),
    /// Track a new timezone by IANA identifier.
    AddZone(String),
    /// Stop tracking a zone.
    RemoveZone(ZoneKey),
    /// Move a row between display positions (stable move).
    Reorder {
        /// Source display index.
        from: usize,
        /// Destination display index.
        to: usize,
    },
    /// Set a zone's wall-clock time; every other row re-projects.
    EditZone {
        /// The edited zone.
        key: ZoneKey,
        /// Minutes since midnight on the reference date (0–1440).
        minutes: u16,
    },
    /// Replace the reference date.
    SetDate(Date),
    /// Flip the display order.
    ToggleReverse,
    /// Flip dark mode and persist the preference.
    ToggleDarkMode,
    /// Open the external booking link.
    OpenBookingLink,
    /// Show/hide the share strip.
    ToggleShare,
    /// Leave the program.
    Quit,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        Msg::Terminal(event)
    }
}

/// Which modal overlay is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    /// No overlay; the board has focus.
    #[default]
    None,
    /// Searchable add-zone picker.
    AddZone,
    /// Reference date entry.
    EditDate,
    /// Exact time entry for the selected row.
    EditTime,
    /// Keybinding help.
    Help,
}

/// An in-progress mouse drag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    /// No drag.
    #[default]
    None,
    /// Slider drag: the dragged row shows `value` locally; the board is
    /// synchronized once on release.
    Slider {
        /// The dragged row.
        key: ZoneKey,
        /// Uncommitted minutes.
        value: u16,
    },
    /// Row drag by the grip.
    Row {
        /// Display index where the drag started.
        from: usize,
        /// Display index currently hovered.
        current: usize,
    },
}

/// Clickable chrome controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Open the add-zone picker.
    AddZone,
    /// Open the date entry.
    EditDate,
    /// Open the booking link.
    Book,
    /// Reverse the display order.
    Reverse,
    /// Toggle the share strip.
    Share,
    /// Toggle dark mode.
    DarkMode,
}

/// Hit-test rectangles for one rendered zone row.
#[derive(Debug, Clone)]
pub struct RowHit {
    /// The row's zone.
    pub key: ZoneKey,
    /// Index in display order.
    pub display_index: usize,
    /// The whole row card.
    pub area: Rect,
    /// The drag grip.
    pub grip: Rect,
    /// The remove button.
    pub remove: Rect,
    /// The slider track.
    pub slider: Rect,
}

/// Hit-test map for the last rendered frame.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    /// Chrome controls.
    pub controls: Vec<(Control, Rect)>,
    /// Zone rows, in display order.
    pub rows: Vec<RowHit>,
}

/// Modal text-entry state.
#[derive(Debug, Clone, Default)]
pub(crate) struct EntryState {
    pub(crate) input: Input,
    pub(crate) invalid: bool,
}

/// Add-zone picker state.
#[derive(Debug, Clone, Default)]
pub(crate) struct PickerState {
    pub(crate) input: Input,
    pub(crate) matches: Vec<String>,
    pub(crate) selected: usize,
    pub(crate) scroll: usize,
}

impl PickerState {
    fn refilter(&mut self, catalog: &ZoneCatalog) {
        self.matches = catalog
            .filter(self.input.value())
            .into_iter()
            .map(String::from)
            .collect();
        self.selected = 0;
        self.scroll = 0;
    }

    fn select(&mut self, index: usize) {
        self.selected = index.min(self.matches.len().saturating_sub(1));
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + PICKER_ROWS {
            self.scroll = self.selected + 1 - PICKER_ROWS;
        }
    }
}

/// Startup options distilled from the CLI.
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    /// Reference date; today when absent.
    pub date: Option<Date>,
    /// Extra zones to track after the defaults.
    pub extra_zones: Vec<String>,
    /// Dark/light override for this run (not persisted until toggled).
    pub dark_override: Option<bool>,
}

/// The application model.
pub struct AppModel {
    /// The tracked zones and their synchronized times.
    pub board: ZoneBoard,
    /// Display rows in reverse insertion order.
    pub reverse_order: bool,
    /// Dark mode flag (persisted on toggle).
    pub is_dark: bool,
    /// Whether the share strip is shown.
    pub is_sharing: bool,

    pub(crate) theme: Theme,
    pub(crate) overlay: Overlay,
    pub(crate) selected: usize,
    pub(crate) grabbed: bool,
    pub(crate) drag: DragState,
    pub(crate) picker: PickerState,
    pub(crate) date_entry: EntryState,
    pub(crate) time_entry: EntryState,
    pub(crate) hits: RefCell<HitMap>,
    pub(crate) row_scroll: Cell<usize>,

    catalog: ZoneCatalog,
    prefs: Box<dyn StorageBackend>,
}

impl AppModel {
    /// Build a model with default zones, today's date, and the stored
    /// preferences.
    #[must_use]
    pub fn new(prefs: Box<dyn StorageBackend>) -> Self {
        Self::with_options(prefs, AppOptions::default())
    }

    /// Build a model from startup options.
    #[must_use]
    pub fn with_options(prefs: Box<dyn StorageBackend>, options: AppOptions) -> Self {
        let date = options.date.unwrap_or_else(|| jiff::Zoned::now().date());
        let mut board = ZoneBoard::with_default_zones(date);
        for zone in &options.extra_zones {
            if let Err(e) = board.add_zone(zone) {
                warn!(zone = %zone, error = %e, "startup zone ignored");
            }
        }

        let stored = prefs.load().unwrap_or_else(|e| {
            warn!(error = %e, "preferences unreadable, using defaults");
            Preferences::default()
        });
        let is_dark = options.dark_override.unwrap_or(stored.dark_mode);

        Self {
            board,
            reverse_order: false,
            is_dark,
            is_sharing: false,
            theme: theme::palette(),
            overlay: Overlay::None,
            selected: 0,
            grabbed: false,
            drag: DragState::None,
            picker: PickerState::default(),
            date_entry: EntryState::default(),
            time_entry: EntryState::default(),
            hits: RefCell::new(HitMap::default()),
            row_scroll: Cell::new(0),
            catalog: ZoneCatalog::load(),
            prefs,
        }
    }

    /// The active theme.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// The selected display index.
    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The active overlay.
    #[must_use]
    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    /// A snapshot of the hit-test map for the last rendered frame.
    #[must_use]
    pub fn hit_map(&self) -> HitMap {
        self.hits.borrow().clone()
    }

    /// Zone keys in display order.
    #[must_use]
    pub fn display_keys(&self) -> Vec<ZoneKey> {
        self.board
            .display_rows(self.reverse_order)
            .map(|r| r.key().clone())
            .collect()
    }

    fn board_index(&self, display_index: usize) -> usize {
        if self.reverse_order && !self.board.is_empty() {
            self.board.len() - 1 - display_index
        } else {
            display_index
        }
    }

    fn display_index(&self, board_index: usize) -> usize {
        // Symmetric mapping.
        self.board_index(board_index)
    }

    fn selected_key(&self) -> Option<ZoneKey> {
        self.display_keys().get(self.selected).cloned()
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.board.len().saturating_sub(1));
    }

    /// The minutes a row currently displays: the uncommitted drag value
    /// for a row mid-drag, the synchronized board value otherwise.
    #[must_use]
    pub fn display_minutes(&self, key: &ZoneKey) -> u16 {
        if let DragState::Slider { key: dragged, value } = &self.drag
            && dragged == key
        {
            return *value;
        }
        self.board.get(key).map_or(0, |row| row.minutes())
    }

    // ── terminal routing ────────────────────────────────────────────────

    fn on_terminal(&mut self, event: Event) -> Cmd<Msg> {
        match event {
            Event::Key(key) => match self.overlay {
                Overlay::None => self.on_key_board(key),
                Overlay::AddZone => self.on_key_picker(key),
                Overlay::EditDate => self.on_key_date(key),
                Overlay::EditTime => self.on_key_time(key),
                Overlay::Help => self.on_key_help(key),
            },
            Event::Mouse(mouse) => self.on_mouse(mouse),
            Event::Resize { .. } | Event::Tick => Cmd::none(),
        }
    }

    fn on_key_board(&mut self, key: KeyEvent) -> Cmd<Msg> {
        match key.code {
            KeyCode::Char('q') => return Cmd::msg(Msg::Quit),
            KeyCode::Char('c') if key.ctrl() => return Cmd::msg(Msg::Quit),
            KeyCode::Char('a') => {
                self.picker.input.clear();
                self.picker.refilter(&self.catalog);
                self.overlay = Overlay::AddZone;
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(key) = self.selected_key() {
                    return Cmd::msg(Msg::RemoveZone(key));
                }
            }
            KeyCode::Char('d') => {
                self.date_entry.input.set_value(self.board.reference_date().to_string());
                self.date_entry.invalid = false;
                self.overlay = Overlay::EditDate;
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(key) = self.selected_key() {
                    let minutes = self.display_minutes(&key);
                    self.time_entry.input.set_value(format::format_hm(minutes));
                    self.time_entry.invalid = false;
                    self.overlay = Overlay::EditTime;
                }
            }
            KeyCode::Char('r') => return Cmd::msg(Msg::ToggleReverse),
            KeyCode::Char('t') => return Cmd::msg(Msg::ToggleDarkMode),
            KeyCode::Char('b') => return Cmd::msg(Msg::OpenBookingLink),
            KeyCode::Char('s') => return Cmd::msg(Msg::ToggleShare),
            KeyCode::Char('?') => self.overlay = Overlay::Help,
            KeyCode::Char(' ') | KeyCode::Char('g') => {
                if !self.board.is_empty() {
                    self.grabbed = !self.grabbed;
                }
            }
            KeyCode::Escape => self.grabbed = false,
            KeyCode::Up => {
                if self.grabbed && self.selected > 0 {
                    let from = self.selected;
                    self.selected -= 1;
                    return Cmd::msg(Msg::Reorder {
                        from,
                        to: self.selected,
                    });
                }
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                let last = self.board.len().saturating_sub(1);
                if self.grabbed && self.selected < last {
                    let from = self.selected;
                    self.selected += 1;
                    return Cmd::msg(Msg::Reorder {
                        from,
                        to: self.selected,
                    });
                }
                self.selected = (self.selected + 1).min(last);
            }
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.board.len().saturating_sub(1),
            KeyCode::Left | KeyCode::Right => return self.nudge_selected(key),
            KeyCode::Char('[') => {
                if let Ok(prev) = self.board.reference_date().yesterday() {
                    return Cmd::msg(Msg::SetDate(prev));
                }
            }
            KeyCode::Char(']') => {
                if let Ok(next) = self.board.reference_date().tomorrow() {
                    return Cmd::msg(Msg::SetDate(next));
                }
            }
            _ => {}
        }
        Cmd::none()
    }

    fn nudge_selected(&mut self, key: KeyEvent) -> Cmd<Msg> {
        let Some(zone) = self.selected_key() else {
            return Cmd::none();
        };
        let step = if key.shift() {
            NUDGE_MINUTES_COARSE
        } else {
            NUDGE_MINUTES
        };
        let current = self.display_minutes(&zone);
        let minutes = match key.code {
            KeyCode::Left => current.saturating_sub(step),
            KeyCode::Right => (current + step).min(MINUTES_PER_DAY),
            _ => return Cmd::none(),
        };
        if minutes == current {
            return Cmd::none();
        }
        Cmd::msg(Msg::EditZone { key: zone, minutes })
    }

    fn on_key_picker(&mut self, key: KeyEvent) -> Cmd<Msg> {
        match key.code {
            KeyCode::Escape => self.overlay = Overlay::None,
            KeyCode::Enter => {
                if let Some(name) = self.picker.matches.get(self.picker.selected).cloned() {
                    self.overlay = Overlay::None;
                    return Cmd::msg(Msg::AddZone(name));
                }
            }
            KeyCode::Up => self.picker.select(self.picker.selected.saturating_sub(1)),
            KeyCode::Down => self.picker.select(self.picker.selected + 1),
            KeyCode::PageUp => self
                .picker
                .select(self.picker.selected.saturating_sub(PICKER_ROWS)),
            KeyCode::PageDown => self.picker.select(self.picker.selected + PICKER_ROWS),
            _ => {
                if self.picker.input.handle_key(&key) {
                    self.picker.refilter(&self.catalog);
                }
            }
        }
        Cmd::none()
    }

    fn on_key_date(&mut self, key: KeyEvent) -> Cmd<Msg> {
        match key.code {
            KeyCode::Escape => self.overlay = Overlay::None,
            KeyCode::Enter => match self.date_entry.input.value().trim().parse::<Date>() {
                Ok(date) => {
                    self.overlay = Overlay::None;
                    return Cmd::msg(Msg::SetDate(date));
                }
                Err(e) => {
                    debug!(input = self.date_entry.input.value(), error = %e, "date not parsed");
                    self.date_entry.invalid = true;
                }
            },
            _ => {
                if self.date_entry.input.handle_key(&key) {
                    self.date_entry.invalid = false;
                }
            }
        }
        Cmd::none()
    }

    fn on_key_time(&mut self, key: KeyEvent) -> Cmd<Msg> {
        match key.code {
            KeyCode::Escape => self.overlay = Overlay::None,
            KeyCode::Enter => match format::parse_hm(self.time_entry.input.value()) {
                Some(minutes) => {
                    if let Some(zone) = self.selected_key() {
                        self.overlay = Overlay::None;
                        return Cmd::msg(Msg::EditZone { key: zone, minutes });
                    }
                    self.overlay = Overlay::None;
                }
                None => self.time_entry.invalid = true,
            },
            _ => {
                if self.time_entry.input.handle_key(&key) {
                    self.time_entry.invalid = false;
                }
            }
        }
        Cmd::none()
    }

    fn on_key_help(&mut self, key: KeyEvent) -> Cmd<Msg> {
        if matches!(key.code, KeyCode::Escape | KeyCode::Char('?') | KeyCode::Char('q')) {
            self.overlay = Overlay::None;
        }
        Cmd::none()
    }

    // ── mouse routing ───────────────────────────────────────────────────

    fn on_mouse(&mut self, mouse: MouseEvent) -> Cmd<Msg> {
        if self.overlay != Overlay::None {
            return self.on_mouse_overlay(mouse);
        }
        let hits = self.hits.borrow().clone();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.on_mouse_down(&hits, mouse.column, mouse.row)
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.on_mouse_drag(&hits, mouse.column, mouse.row);
                Cmd::none()
            }
            MouseEventKind::Up(MouseButton::Left) => self.on_mouse_up(),
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                self.on_scroll(&hits, mouse)
            }
            _ => Cmd::none(),
        }
    }

    fn on_mouse_overlay(&mut self, mouse: MouseEvent) -> Cmd<Msg> {
        if self.overlay == Overlay::AddZone {
            match mouse.kind {
                MouseEventKind::ScrollUp => {
                    self.picker.select(self.picker.selected.saturating_sub(1));
                }
                MouseEventKind::ScrollDown => self.picker.select(self.picker.selected + 1),
                _ => {}
            }
        }
        Cmd::none()
    }

    fn on_mouse_down(&mut self, hits: &HitMap, x: u16, y: u16) -> Cmd<Msg> {
        if let Some((control, _)) = hits.controls.iter().find(|(_, r)| r.contains(x, y)) {
            return match control {
                Control::AddZone => {
                    self.picker.input.clear();
                    self.picker.refilter(&self.catalog);
                    self.overlay = Overlay::AddZone;
                    Cmd::none()
                }
                Control::EditDate => {
                    self.date_entry.input.set_value(self.board.reference_date().to_string());
                    self.date_entry.invalid = false;
                    self.overlay = Overlay::EditDate;
                    Cmd::none()
                }
                Control::Book => Cmd::msg(Msg::OpenBookingLink),
                Control::Reverse => Cmd::msg(Msg::ToggleReverse),
                Control::Share => Cmd::msg(Msg::ToggleShare),
                Control::DarkMode => Cmd::msg(Msg::ToggleDarkMode),
            };
        }

        for hit in &hits.rows {
            if hit.remove.contains(x, y) {
                return Cmd::msg(Msg::RemoveZone(hit.key.clone()));
            }
            if hit.grip.contains(x, y) {
                self.selected = hit.display_index;
                self.drag = DragState::Row {
                    from: hit.display_index,
                    current: hit.display_index,
                };
                return Cmd::none();
            }
            if hit.slider.contains(x, y) {
                self.selected = hit.display_index;
                self.drag = DragState::Slider {
                    key: hit.key.clone(),
                    value: TimeSlider::value_at(hit.slider, x),
                };
                return Cmd::none();
            }
            if hit.area.contains(x, y) {
                self.selected = hit.display_index;
                return Cmd::none();
            }
        }
        Cmd::none()
    }

    fn on_mouse_drag(&mut self, hits: &HitMap, x: u16, y: u16) {
        match &mut self.drag {
            DragState::Slider { key, value } => {
                if let Some(hit) = hits.rows.iter().find(|h| h.key == *key) {
                    *value = TimeSlider::value_at(hit.slider, x);
                }
            }
            DragState::Row { current, .. } => {
                if let Some(hit) = hits.rows.iter().find(|h| h.area.contains(x, y)) {
                    *current = hit.display_index;
                }
            }
            DragState::None => {}
        }
    }

    fn on_mouse_up(&mut self) -> Cmd<Msg> {
        match std::mem::take(&mut self.drag) {
            DragState::Slider { key, value } => Cmd::msg(Msg::EditZone {
                key,
                minutes: value,
            }),
            DragState::Row { from, current } if from != current => Cmd::msg(Msg::Reorder {
                from,
                to: current,
            }),
            // Dropping a row onto itself is a no-op.
            _ => Cmd::none(),
        }
    }

    fn on_scroll(&mut self, hits: &HitMap, mouse: MouseEvent) -> Cmd<Msg> {
        let Some(hit) = hits
            .rows
            .iter()
            .find(|h| h.area.contains(mouse.column, mouse.row))
        else {
            return Cmd::none();
        };
        let current = self.display_minutes(&hit.key);
        let minutes = match mouse.kind {
            MouseEventKind::ScrollUp => (current + NUDGE_MINUTES).min(MINUTES_PER_DAY),
            MouseEventKind::ScrollDown => current.saturating_sub(NUDGE_MINUTES),
            _ => return Cmd::none(),
        };
        if minutes == current {
            return Cmd::none();
        }
        self.selected = hit.display_index;
        Cmd::msg(Msg::EditZone {
            key: hit.key.clone(),
            minutes,
        })
    }

    // ── semantic transitions ────────────────────────────────────────────

    fn apply(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Terminal(event) => self.on_terminal(event),
            Msg::AddZone(name) => {
                match self.board.add_zone(&name) {
                    Ok(key) => {
                        if let Some(pos) = self.board.position(&key) {
                            self.selected = self.display_index(pos);
                        }
                    }
                    Err(e) => warn!(zone = %name, error = %e, "add zone absorbed"),
                }
                Cmd::none()
            }
            Msg::RemoveZone(key) => {
                self.board.remove_zone(&key);
                self.grabbed = false;
                self.clamp_selection();
                Cmd::none()
            }
            Msg::Reorder { from, to } => {
                let (bf, bt) = (self.board_index(from), self.board_index(to));
                if self.board.reorder(bf, bt) {
                    self.selected = to.min(self.board.len().saturating_sub(1));
                }
                Cmd::none()
            }
            Msg::EditZone { key, minutes } => {
                if let Err(e) = self.board.edit_zone(&key, minutes) {
                    warn!(key = %key, minutes, error = %e, "edit absorbed");
                }
                Cmd::none()
            }
            Msg::SetDate(date) => {
                self.board.set_reference_date(date);
                Cmd::none()
            }
            Msg::ToggleReverse => {
                self.reverse_order = !self.reverse_order;
                if !self.board.is_empty() {
                    self.selected = self.board.len() - 1 - self.selected.min(self.board.len() - 1);
                }
                Cmd::none()
            }
            Msg::ToggleDarkMode => {
                self.is_dark = !self.is_dark;
                if let Err(e) = self.prefs.save(&Preferences {
                    dark_mode: self.is_dark,
                }) {
                    warn!(error = %e, "preference write absorbed");
                }
                Cmd::none()
            }
            Msg::OpenBookingLink => Cmd::open_url(BOOKING_URL),
            Msg::ToggleShare => {
                self.is_sharing = !self.is_sharing;
                Cmd::none()
            }
            Msg::Quit => Cmd::quit(),
        }
    }
}

impl Model for AppModel {
    type Message = Msg;

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        self.apply(msg)
    }

    fn view(&self, buffer: &mut Buffer) {
        crate::view::draw(self, buffer);
    }
}
