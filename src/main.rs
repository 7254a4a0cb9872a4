mod ui;

use anyhow::Result;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;

use truecost_app::{init_logging, App};
use truecost_config::Config;
use truecost_talk::HttpTalkApi;

fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config: {}. Using defaults.", e);
        Config::default()
    });
    init_logging(&config);

    let api = Arc::new(HttpTalkApi::from_settings(&config.api)?);

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();

    // Kitty protocol lets Ctrl+Q arrive as a key event instead of a flow-control byte
    let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);

    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    if keyboard_enhanced {
        // Note: REPORT_ALL_KEYS_AS_ESCAPE_CODES causes modifier keys (Shift, Ctrl, Alt)
        // to generate separate events, which breaks combinations.
        // We only use DISAMBIGUATE_ESCAPE_CODES and REPORT_ALTERNATE_KEYS.
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Get terminal size and use it to initialize app with correct dimensions
    let size = terminal.size()?;
    let mut app = App::new_with_size(config, api, size.width, size.height);

    // Run application
    let result = app.run(&mut terminal, ui::render_frame);

    // Restore terminal
    disable_raw_mode()?;
    if keyboard_enhanced {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Print error if there was one
    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
