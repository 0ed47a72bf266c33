use std::io::{self, Write};

use capture_core::{update, AppState, AppViewModel, Msg, TrackerPhase};
use client_logging::client_debug;

use super::effects::EffectRunner;
use super::ui::constants::PROMPT;
use super::ui::input::{parse_line, Command, HELP};
use super::ui::render::render;

/// Everything the app loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    /// A core message produced by the client runtime.
    Msg(Msg),
    /// A line typed by the user.
    Line(String),
    /// Standard input reached end of file.
    InputClosed,
}

/// Owns the core state and drives it with messages.
pub struct App<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
    render_on_change: bool,
    prompt: bool,
}

impl<W: Write> App<W> {
    pub fn new(runner: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::new(),
            runner,
            out,
            render_on_change: true,
            prompt: false,
        }
    }

    /// Show an input prompt after every screen.
    pub fn with_prompt(mut self) -> Self {
        self.prompt = true;
        self
    }

    /// Only render when [`App::render`] is called explicitly.
    pub fn quiet(mut self) -> Self {
        self.render_on_change = false;
        self
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn dispatch_msg(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        for target in self.runner.enqueue(effects) {
            writeln!(self.out, "{}: {}", target.label, target.url)?;
        }
        if was_dirty && self.render_on_change {
            self.render()?;
        }
        Ok(())
    }

    pub fn render(&mut self) -> io::Result<()> {
        for line in render(&self.state.view()) {
            writeln!(self.out, "{line}")?;
        }
        self.show_prompt()
    }

    fn show_prompt(&mut self) -> io::Result<()> {
        if self.prompt {
            write!(self.out, "{PROMPT}")?;
        }
        self.out.flush()
    }

    /// Handles one typed line; returns `false` when the user asked to leave.
    pub fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        match parse_line(line, &self.state.view()) {
            Ok(Command::Send(msgs)) => {
                for msg in msgs {
                    self.dispatch_msg(msg)?;
                }
            }
            Ok(Command::Redraw) => self.render()?,
            Ok(Command::Help) => {
                writeln!(self.out, "{HELP}")?;
                self.show_prompt()?;
            }
            Ok(Command::Quit) => return Ok(false),
            Err(usage) => {
                writeln!(self.out, "{usage}")?;
                self.show_prompt()?;
            }
        }
        Ok(true)
    }

    /// Final result of a one-shot capture, once there is one.
    pub fn capture_outcome(&self) -> Option<Result<(), String>> {
        let notice = || {
            self.state
                .view()
                .notice
                .map(|notice| notice.message)
                .unwrap_or_default()
        };
        match self.state.tracker().phase() {
            TrackerPhase::Completed => Some(Ok(())),
            TrackerPhase::Failed => Some(Err(notice())),
            // Rejected before anything was submitted.
            TrackerPhase::Idle if self.state.view().notice.is_some() => Some(Err(notice())),
            TrackerPhase::Idle | TrackerPhase::Submitting | TrackerPhase::Polling => None,
        }
    }

    /// Page teardown: stop local tracking of any job in flight.
    pub fn shutdown(&mut self) -> io::Result<()> {
        client_debug!("Shutting down app loop");
        self.dispatch_msg(Msg::PageClosing)
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &AppState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn output(&self) -> &W {
        &self.out
    }
}
