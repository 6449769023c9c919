//! Raw-mode terminal owned by the shell for the lifetime of `run`

use crate::{ChallengeError, ChallengeResult};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, IsTerminal, Stdout};
use std::panic;

type Backend = CrosstermBackend<Stdout>;

/// The alternate screen with mouse capture. Dropping it hands the terminal back.
pub struct Tui {
    terminal: Terminal<Backend>,
}

impl Tui {
    /// Take over stdout. Fails without a TTY, before touching terminal modes.
    pub fn init() -> ChallengeResult<Self> {
        if !io::stdout().is_terminal() {
            return Err(ChallengeError::RuntimeError(
                "The showcase needs an interactive terminal; stdout is not a TTY.".into(),
            ));
        }

        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        install_panic_restore();

        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        tracing::debug!("alternate screen entered");
        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut Terminal<Backend> {
        &mut self.terminal
    }

    /// Leave the alternate screen with the cursor visible
    pub fn exit(&mut self) -> ChallengeResult<()> {
        leave()?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = leave() {
            eprintln!("Could not restore the terminal: {e}");
        }
    }
}

fn leave() -> ChallengeResult<()> {
    terminal::disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// A panic message printed inside raw mode is unreadable; restore first.
fn install_panic_restore() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = leave();
        previous(info);
    }));
}
