#![forbid(unsafe_code)]

//! Terminal plumbing for zoneboard: session lifecycle, canonical input
//! events, a cell buffer with a diffing writer, an Elm-style program
//! runtime, preference storage, and the reusable widgets the app renders
//! with.

pub mod buffer;
pub mod event;
pub mod geometry;
pub mod program;
pub mod storage;
pub mod terminal;
pub mod widgets;
pub mod writer;

pub use buffer::{Buffer, Cell};
pub use event::{Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind};
pub use geometry::Rect;
pub use program::{Cmd, Model, Program, ProgramConfig};
pub use storage::{FilePrefs, MemoryPrefs, Preferences, StorageBackend, StorageError, StorageResult};
pub use terminal::{SessionOptions, TerminalSession};
