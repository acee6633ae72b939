//! Campus Chat TUI (Terminal User Interface)
//!
//! A terminal client for Campus Chat running against seeded demo data.

use campus_chat::auth::StaticAuth;
use campus_chat::clock::{Clock, SystemClock};
use campus_chat::storage::{ReadMarkers, Settings, SqliteKeyValueStore};
use campus_chat::tui::{demo, ui::ui, App, Screen};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use std::io;
use std::sync::Arc;

const SETTINGS_PATH: &str = "campus_settings.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Keep log output off the terminal the UI draws on
    tracing_subscriber::fmt().with_writer(io::sink).init();

    let settings = Settings::load(SETTINGS_PATH)?;
    let kv = SqliteKeyValueStore::new_in_dir(&settings.storage_path)?;
    let markers = ReadMarkers::new(Arc::new(kv));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = Arc::new(demo::seeded_store(clock.clone()));
    let auth = StaticAuth::signed_in(demo::demo_viewer());

    let mut app = App::new(store, &auth, clock, markers, settings)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run main loop
    let res = run_app(&mut terminal, &mut app);

    // Release listeners and go offline before exit
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        app.tick();
        terminal.draw(|f| ui(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                match key.code {
                    KeyCode::Char('c') if ctrl => {
                        app.should_quit = true;
                    }
                    KeyCode::Tab => {
                        app.next_tab();
                    }
                    _ => match app.current_screen {
                        Screen::GroupChat | Screen::PrivateChat => {
                            match key.code {
                                KeyCode::Esc => {
                                    if app.current_screen == Screen::PrivateChat {
                                        app.close_private_chat();
                                    }
                                }
                                KeyCode::Char('r') if ctrl => {
                                    app.retry_current();
                                }
                                KeyCode::Char(c) if !c.is_control() && !ctrl => {
                                    app.input_char(c);
                                }
                                KeyCode::Backspace => {
                                    app.input_backspace();
                                }
                                KeyCode::Enter => {
                                    app.send_message_in_chat();
                                }
                                KeyCode::PageUp | KeyCode::Up => {
                                    let max_offset = match app.current_screen {
                                        Screen::GroupChat => app.group.messages().len(),
                                        _ => app.private.as_ref().map_or(0, |v| v.messages().len()),
                                    }
                                    .saturating_sub(1);
                                    let screen = if app.current_screen == Screen::GroupChat {
                                        &mut app.group_screen
                                    } else {
                                        &mut app.private_screen
                                    };
                                    screen.scroll_up(max_offset);
                                }
                                KeyCode::PageDown | KeyCode::Down => {
                                    let screen = if app.current_screen == Screen::GroupChat {
                                        &mut app.group_screen
                                    } else {
                                        &mut app.private_screen
                                    };
                                    screen.scroll_down();
                                }
                                _ => {}
                            }
                        }
                        Screen::Roster => {
                            let row_count = app.roster.len();
                            match key.code {
                                KeyCode::Char('q') | KeyCode::Esc => {
                                    app.should_quit = true;
                                }
                                KeyCode::Down | KeyCode::Char('j') => {
                                    app.roster_screen.next(row_count);
                                }
                                KeyCode::Up | KeyCode::Char('k') => {
                                    app.roster_screen.previous(row_count);
                                }
                                KeyCode::Enter => {
                                    app.open_selected_chat();
                                }
                                KeyCode::Char('r') | KeyCode::F(5) => {
                                    app.retry_current();
                                }
                                _ => {}
                            }
                        }
                        Screen::Profile => {
                            match key.code {
                                KeyCode::Esc => {
                                    app.show_tab(campus_chat::tui::Tab::Group);
                                }
                                KeyCode::Up | KeyCode::Down => {
                                    app.profile_screen.toggle_field();
                                }
                                KeyCode::Char(c) if !c.is_control() && !ctrl => {
                                    app.input_char(c);
                                }
                                KeyCode::Backspace => {
                                    app.input_backspace();
                                }
                                KeyCode::Delete => {
                                    app.profile_screen.clear_input();
                                }
                                KeyCode::Enter => {
                                    app.save_profile();
                                }
                                _ => {}
                            }
                        }
                    },
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
