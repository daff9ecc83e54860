#![forbid(unsafe_code)]

//! Elm-style runtime for the application.
//!
//! The program runtime manages the update/view loop: it polls the terminal
//! for events, maps them into the model's message type, applies the
//! resulting state transition, and presents the re-rendered frame. State
//! (Model) is separated from rendering (view), and side effects are
//! requested through the command pattern.
//!
//! # Example
//!
//! ```ignore
//! struct Counter { count: i32 }
//!
//! enum Msg { Terminal(Event) }
//!
//! impl From<Event> for Msg {
//!     fn from(event: Event) -> Self { Msg::Terminal(event) }
//! }
//!
//! impl Model for Counter {
//!     type Message = Msg;
//!     fn update(&mut self, msg: Msg) -> Cmd<Msg> { /* ... */ Cmd::none() }
//!     fn view(&self, buffer: &mut Buffer) { /* ... */ }
//! }
//!
//! Program::new(Counter { count: 0 }).run()?;
//! ```

use std::io;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::buffer::Buffer;
use crate::event::Event;
use crate::terminal::{SessionOptions, TerminalSession};
use crate::writer::TerminalWriter;

/// The Model trait defines application state and behavior.
pub trait Model: Sized {
    /// The message type for this model. Must be convertible from terminal
    /// events.
    type Message: From<Event>;

    /// Initialize the model with startup commands.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Update the model in response to a message.
    ///
    /// This is the core state transition function. Returns commands for
    /// side effects the runtime should execute.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render the current state into a frame buffer.
    fn view(&self, buffer: &mut Buffer);
}

/// Commands represent side effects to be executed by the runtime.
#[derive(Debug)]
pub enum Cmd<M> {
    /// No side effect.
    None,
    /// Terminate the program loop.
    Quit,
    /// Feed another message through `update`.
    Msg(M),
    /// Execute several commands in order.
    Batch(Vec<Cmd<M>>),
    /// Open a URL in the default browser, fire-and-forget.
    OpenUrl(String),
}

impl<M> Cmd<M> {
    /// No side effect.
    #[must_use]
    pub fn none() -> Self {
        Cmd::None
    }

    /// Terminate the program loop.
    #[must_use]
    pub fn quit() -> Self {
        Cmd::Quit
    }

    /// Feed another message through `update`.
    #[must_use]
    pub fn msg(msg: M) -> Self {
        Cmd::Msg(msg)
    }

    /// Execute several commands in order.
    #[must_use]
    pub fn batch(cmds: Vec<Cmd<M>>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Open a URL in the default browser.
    #[must_use]
    pub fn open_url(url: impl Into<String>) -> Self {
        Cmd::OpenUrl(url.into())
    }
}

/// Program configuration.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Capture mouse events.
    pub mouse: bool,
    /// Use the alternate screen buffer.
    pub alternate_screen: bool,
    /// Poll interval; a `Tick` event fires when it elapses without input.
    pub tick_rate: Duration,
    /// Exit automatically after this long (harness runs).
    pub exit_after: Option<Duration>,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            mouse: true,
            alternate_screen: true,
            tick_rate: Duration::from_millis(250),
            exit_after: None,
        }
    }
}

/// The program runtime: owns the terminal session and drives the loop.
pub struct Program<M: Model> {
    model: M,
    config: ProgramConfig,
}

impl<M: Model> Program<M> {
    /// Create a program with the default configuration.
    pub fn new(model: M) -> Self {
        Self::with_config(model, ProgramConfig::default())
    }

    /// Create a program with an explicit configuration.
    pub fn with_config(model: M, config: ProgramConfig) -> Self {
        Self { model, config }
    }

    /// Run the update/view loop until the model quits or the terminal
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns terminal I/O errors; the session guard restores the
    /// terminal on every exit path.
    pub fn run(&mut self) -> io::Result<()> {
        let session = TerminalSession::new(SessionOptions {
            alternate_screen: self.config.alternate_screen,
            mouse_capture: self.config.mouse,
        })?;
        session.hide_cursor()?;

        let (width, height) = session.size()?;
        let mut buffer = Buffer::new(width, height);
        let mut writer = TerminalWriter::new();

        let started = Instant::now();
        let mut quit = false;

        let init = self.model.init();
        execute_cmd(&mut self.model, init, &mut quit);

        self.model.view(&mut buffer);
        writer.present(&buffer)?;

        while !quit {
            if let Some(limit) = self.config.exit_after
                && started.elapsed() >= limit
            {
                debug!("auto-exit interval elapsed");
                break;
            }

            let event = if session.poll_event(self.config.tick_rate)? {
                match session.read_event()? {
                    Some(event) => event,
                    None => continue,
                }
            } else {
                Event::Tick
            };

            if let Event::Resize { width, height } = event {
                buffer.resize(width, height);
                writer.invalidate();
            }

            let cmd = self.model.update(event.into());
            execute_cmd(&mut self.model, cmd, &mut quit);

            buffer.reset();
            self.model.view(&mut buffer);
            writer.present(&buffer)?;
        }

        Ok(())
    }
}

fn execute_cmd<M: Model>(model: &mut M, cmd: Cmd<M::Message>, quit: &mut bool) {
    match cmd {
        Cmd::None => {}
        Cmd::Quit => *quit = true,
        Cmd::Msg(msg) => {
            let next = model.update(msg);
            execute_cmd(model, next, quit);
        }
        Cmd::Batch(cmds) => {
            for cmd in cmds {
                execute_cmd(model, cmd, quit);
            }
        }
        Cmd::OpenUrl(url) => open_url(&url),
    }
}

/// Open a URL in the platform's default browser, fire-and-forget.
///
/// Failures are logged and otherwise absorbed; nothing waits on the
/// spawned process.
pub fn open_url(url: &str) {
    #[cfg(target_os = "macos")]
    let opener = "open";
    #[cfg(target_os = "windows")]
    let opener = "explorer";
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let opener = "xdg-open";

    match Command::new(opener)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(_) => debug!(url, "opened external link"),
        Err(e) => warn!(url, error = %e, "failed to open external link"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        count: i32,
        saw_tick: bool,
    }

    enum Msg {
        Terminal(Event),
        Bump,
    }

    impl From<Event> for Msg {
        fn from(event: Event) -> Self {
            Msg::Terminal(event)
        }
    }

    impl Model for Counter {
        type Message = Msg;

        fn update(&mut self, msg: Msg) -> Cmd<Msg> {
            match msg {
                Msg::Terminal(Event::Tick) => {
                    self.saw_tick = true;
                    Cmd::msg(Msg::Bump)
                }
                Msg::Terminal(_) => Cmd::none(),
                Msg::Bump => {
                    self.count += 1;
                    if self.count >= 3 {
                        Cmd::quit()
                    } else {
                        Cmd::batch(vec![Cmd::none(), Cmd::msg(Msg::Bump)])
                    }
                }
            }
        }

        fn view(&self, _buffer: &mut Buffer) {}
    }

    #[test]
    fn commands_chain_and_quit() {
        let mut model = Counter {
            count: 0,
            saw_tick: false,
        };
        let mut quit = false;
        let cmd = model.update(Msg::from(Event::Tick));
        execute_cmd(&mut model, cmd, &mut quit);
        assert!(model.saw_tick);
        assert_eq!(model.count, 3);
        assert!(quit);
    }

    #[test]
    fn default_config_polls_with_mouse() {
        let config = ProgramConfig::default();
        assert!(config.mouse);
        assert!(config.alternate_screen);
        assert_eq!(config.tick_rate, Duration::from_millis(250));
        assert!(config.exit_after.is_none());
    }
}
