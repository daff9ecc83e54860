#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! These mirror what the terminal backend delivers, reduced to what the
//! application routes on. All events derive `Clone`, `PartialEq`, and `Eq`
//! for use in tests and pattern matching. Mouse coordinates are 0-indexed.
//! Key release events from backends that report them are dropped at the
//! mapping boundary so a keypress is handled exactly once.

use bitflags::bitflags;
use crossterm::event as cte;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),
    /// A mouse event.
    Mouse(MouseEvent),
    /// Terminal was resized.
    Resize {
        /// New terminal width in columns.
        width: u16,
        /// New terminal height in rows.
        height: u16,
    },
    /// A tick from the runtime's poll interval.
    Tick,
}

impl Event {
    /// Convert a crossterm event into a canonical [`Event`].
    ///
    /// Returns `None` for events the application has no use for (focus,
    /// paste, key releases, unsupported key codes).
    #[must_use]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        match event {
            cte::Event::Key(key) => map_key_event(key).map(Event::Key),
            cte::Event::Mouse(mouse) => Some(Event::Mouse(map_mouse_event(mouse))),
            cte::Event::Resize(width, height) => Some(Event::Resize { width, height }),
            _ => None,
        }
    }
}

bitflags! {
    /// Modifier keys held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const ALT = 1 << 1;
        const CTRL = 1 << 2;
        const SUPER = 1 << 3;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::empty()
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    /// Attach modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Alt is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Check if Shift is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Backspace key.
    Backspace,
    /// Tab key.
    Tab,
    /// Shift+Tab (back-tab).
    BackTab,
    /// Delete key.
    Delete,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Function key.
    F(u8),
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left button.
    Left,
    /// Right button.
    Right,
    /// Middle button.
    Middle,
}

/// The kind of a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Button pressed.
    Down(MouseButton),
    /// Button released.
    Up(MouseButton),
    /// Cursor moved with a button held.
    Drag(MouseButton),
    /// Cursor moved with no button held.
    Moved,
    /// Wheel scrolled up.
    ScrollUp,
    /// Wheel scrolled down.
    ScrollDown,
}

/// A mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// The kind of event.
    pub kind: MouseEventKind,
    /// Column (0-indexed).
    pub column: u16,
    /// Row (0-indexed).
    pub row: u16,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a new mouse event with no modifiers.
    #[must_use]
    pub const fn new(kind: MouseEventKind, column: u16, row: u16) -> Self {
        Self {
            kind,
            column,
            row,
            modifiers: Modifiers::empty(),
        }
    }

    /// Attach modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

fn map_key_event(event: cte::KeyEvent) -> Option<KeyEvent> {
    if event.kind == cte::KeyEventKind::Release {
        return None;
    }
    let code = map_key_code(event.code)?;
    Some(KeyEvent {
        code,
        modifiers: map_modifiers(event.modifiers),
    })
}

fn map_key_code(code: cte::KeyCode) -> Option<KeyCode> {
    match code {
        cte::KeyCode::Backspace => Some(KeyCode::Backspace),
        cte::KeyCode::Enter => Some(KeyCode::Enter),
        cte::KeyCode::Left => Some(KeyCode::Left),
        cte::KeyCode::Right => Some(KeyCode::Right),
        cte::KeyCode::Up => Some(KeyCode::Up),
        cte::KeyCode::Down => Some(KeyCode::Down),
        cte::KeyCode::Home => Some(KeyCode::Home),
        cte::KeyCode::End => Some(KeyCode::End),
        cte::KeyCode::PageUp => Some(KeyCode::PageUp),
        cte::KeyCode::PageDown => Some(KeyCode::PageDown),
        cte::KeyCode::Tab => Some(KeyCode::Tab),
        cte::KeyCode::BackTab => Some(KeyCode::BackTab),
        cte::KeyCode::Delete => Some(KeyCode::Delete),
        cte::KeyCode::F(n) => Some(KeyCode::F(n)),
        cte::KeyCode::Char(c) => Some(KeyCode::Char(c)),
        cte::KeyCode::Esc => Some(KeyCode::Escape),
        _ => None,
    }
}

fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
    let mut mapped = Modifiers::empty();
    if modifiers.contains(cte::KeyModifiers::SHIFT) {
        mapped |= Modifiers::SHIFT;
    }
    if modifiers.contains(cte::KeyModifiers::ALT) {
        mapped |= Modifiers::ALT;
    }
    if modifiers.contains(cte::KeyModifiers::CONTROL) {
        mapped |= Modifiers::CTRL;
    }
    if modifiers.contains(cte::KeyModifiers::SUPER)
        || modifiers.contains(cte::KeyModifiers::HYPER)
        || modifiers.contains(cte::KeyModifiers::META)
    {
        mapped |= Modifiers::SUPER;
    }
    mapped
}

fn map_mouse_event(event: cte::MouseEvent) -> MouseEvent {
    let kind = match event.kind {
        cte::MouseEventKind::Down(b) => MouseEventKind::Down(map_mouse_button(b)),
        cte::MouseEventKind::Up(b) => MouseEventKind::Up(map_mouse_button(b)),
        cte::MouseEventKind::Drag(b) => MouseEventKind::Drag(map_mouse_button(b)),
        cte::MouseEventKind::Moved
        | cte::MouseEventKind::ScrollLeft
        | cte::MouseEventKind::ScrollRight => MouseEventKind::Moved,
        cte::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
        cte::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
    };
    MouseEvent::new(kind, event.column, event.row).with_modifiers(map_modifiers(event.modifiers))
}

fn map_mouse_button(button: cte::MouseButton) -> MouseButton {
    match button {
        cte::MouseButton::Left => MouseButton::Left,
        cte::MouseButton::Right => MouseButton::Right,
        cte::MouseButton::Middle => MouseButton::Middle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_keys_map_through() {
        let event = cte::Event::Key(cte::KeyEvent::new(
            cte::KeyCode::Char('q'),
            cte::KeyModifiers::NONE,
        ));
        let mapped = Event::from_crossterm(event).unwrap();
        assert_eq!(mapped, Event::Key(KeyEvent::new(KeyCode::Char('q'))));
    }

    #[test]
    fn ctrl_modifier_maps() {
        let event = cte::Event::Key(cte::KeyEvent::new(
            cte::KeyCode::Char('c'),
            cte::KeyModifiers::CONTROL,
        ));
        let Some(Event::Key(key)) = Event::from_crossterm(event) else {
            panic!("expected key event");
        };
        assert!(key.ctrl());
        assert!(key.is_char('c'));
    }

    #[test]
    fn key_release_is_dropped() {
        let mut release = cte::KeyEvent::new(cte::KeyCode::Char('x'), cte::KeyModifiers::NONE);
        release.kind = cte::KeyEventKind::Release;
        assert_eq!(Event::from_crossterm(cte::Event::Key(release)), None);
    }

    #[test]
    fn resize_maps_dimensions() {
        let mapped = Event::from_crossterm(cte::Event::Resize(120, 40)).unwrap();
        assert_eq!(
            mapped,
            Event::Resize {
                width: 120,
                height: 40
            }
        );
    }

    #[test]
    fn mouse_down_maps_coordinates() {
        let event = cte::Event::Mouse(cte::MouseEvent {
            kind: cte::MouseEventKind::Down(cte::MouseButton::Left),
            column: 7,
            row: 3,
            modifiers: cte::KeyModifiers::NONE,
        });
        let mapped = Event::from_crossterm(event).unwrap();
        assert_eq!(
            mapped,
            Event::Mouse(MouseEvent::new(
                MouseEventKind::Down(MouseButton::Left),
                7,
                3
            ))
        );
    }

    #[test]
    fn focus_events_are_ignored() {
        assert_eq!(Event::from_crossterm(cte::Event::FocusGained), None);
    }
}
