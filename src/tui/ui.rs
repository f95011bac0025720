use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use crate::constants::UI_REFRESH_INTERVAL_MS;
use crate::tui::input::to_key_input;
use crate::tui::render::render_ui;
use crate::tui::App;

/// Run the terminal UI
pub async fn run_ui(mut app: App) -> Result<()> {
    // Check if we have an interactive terminal
    if !crossterm::tty::IsTty::is_tty(&io::stdout()) {
        eprintln!("Agora requires an interactive terminal.");
        eprintln!("   Cannot run in non-interactive mode (pipes, redirects, etc.)");
        eprintln!("   Try running directly in your terminal: agora");
        return Err(anyhow::anyhow!("No interactive terminal available"));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Clear terminal
    terminal.clear()?;

    // Run the UI loop
    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    // Session creation runs in the background; the first frame draws
    // immediately even when the backend is slow to answer
    app.begin_session();

    loop {
        app.poll_session().await;

        // Draw UI
        terminal.draw(|f| render_ui(f, app))?;

        // Handle input events; the short poll interval keeps the blink and
        // the reveal visible between key presses
        if event::poll(Duration::from_millis(UI_REFRESH_INTERVAL_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C quits from anywhere
                if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
                    app.controller.close();
                    app.quit();
                    break;
                }

                if app.controller.is_open() {
                    handle_dialogue_key(app, key);
                } else {
                    handle_roster_key(app, key).await;
                }
            }
        }

        if !app.running {
            break;
        }
    }

    // Cancel any blink or reveal task still running
    app.controller.close();
    Ok(())
}

/// Forward a key to the dialogue controller
fn handle_dialogue_key(app: &mut App, key: KeyEvent) {
    if let Some(input) = to_key_input(key) {
        app.controller.handle_key(input);
        if !app.controller.is_open() {
            app.set_status("You step back from the conversation.");
        }
    }
}

/// Roster navigation while no dialogue is open
async fn handle_roster_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Enter => {
            let philosopher = app.selected_philosopher();
            if app.controller.open(philosopher) {
                app.clear_status();
            }
        }
        KeyCode::Char('r') => match app.gateway.reset_memory().await {
            Ok(outcome) => {
                let message = outcome
                    .message
                    .unwrap_or_else(|| "Conversation memory reset.".to_string());
                app.set_status(message);
            }
            Err(err) => app.set_status(format!("Reset failed: {err}")),
        },
        _ => {}
    }
}
