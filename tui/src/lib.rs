//! chute-tui
//!
//! The application's single visible screen: a bordered status region
//! that invites the user to drop a file, hands the drop to the transfer
//! backend, and shows whatever status message comes back.
//!
//! Terminals deliver a file dropped onto the window as a bracketed
//! paste carrying the file's path, so the event loop treats paste
//! events as the native drop notification channel.

use std::io;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode,
        KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use tokio::time::Duration;

mod app;
mod paste;
mod ui;

pub use app::App;

pub async fn run_tui() -> Result<()> {
    // App construction can fail (config load); do it before raw mode.
    let mut app = App::new()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        break;
                    }
                }
                Event::Paste(text) => app.on_paste(&text),
                _ => {}
            }
        }

        // Update app state
        app.update();
    }

    Ok(())
}

fn should_quit(key: KeyEvent) -> bool {
    matches!(
        (key.code, key.modifiers),
        (KeyCode::Char('q') | KeyCode::Char('Q'), _)
            | (KeyCode::Char('c'), KeyModifiers::CONTROL)
    )
}
