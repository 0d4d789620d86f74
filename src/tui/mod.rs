//! Interactive terminal view of a listing.

mod app;
mod colors;
mod input;
mod layout;

pub use app::App;
pub use colors::ColorScheme;
pub use input::{handle_key, Command, InputMode};
pub use layout::render_ui;

use std::io::{self, Write};
use std::panic;
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

/// Take over the terminal and run `app` until the user quits.
pub fn run(app: &mut App) -> io::Result<()> {
    // Restore the terminal before the panic message prints
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    info!("terminal view started");
    let result = run_app(&mut terminal, app);
    let cleanup_result = cleanup_terminal(&mut terminal);

    result.and(cleanup_result)
}

/// Clean up terminal state.
fn cleanup_terminal<B: ratatui::backend::Backend + Write>(
    terminal: &mut Terminal<B>,
) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render_ui(frame, app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press, not release
                    if key.kind == KeyEventKind::Press {
                        let command = handle_key(key, app.input_mode);
                        app.handle_command(command);
                    }
                }
                Event::Mouse(mouse_event) => match mouse_event.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        app.click_header(mouse_event.column, mouse_event.row);
                    }
                    MouseEventKind::ScrollDown => app.handle_command(Command::MoveDown),
                    MouseEventKind::ScrollUp => app.handle_command(Command::MoveUp),
                    _ => {}
                },
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
