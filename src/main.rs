use cull::app::Session;
use cull::cli::Args;
use cull::config::UserConfig;
use cull::domain::{Decision, SortCriterion};
use cull::gesture::SwipeCommand;
use cull::opener::open_with_default;
use cull::preview_manager::PreviewManager;
use cull::tui::{
    handle_confirm_input, handle_key_event, handle_mouse_event, render,
    render_confirm_trash_overlay, render_help_overlay, render_summary, render_welcome_overlay,
    KeyAction, ViewState,
};
use cull::DragTracker;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::LevelFilter;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};

fn main() -> io::Result<()> {
    let args = Args::parse_args();

    init_logging(args.verbose, args.quiet);

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Build the session before touching the terminal so listing errors
    // print as plain messages.
    let mut session = match Session::open(&args.directory, args.sort.into()) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if session.total() == 0 {
        println!("Nothing to review in {}", args.directory.display());
        return Ok(());
    }

    let mut preview_manager = PreviewManager::new();

    let mut user_config = UserConfig::load().unwrap_or_else(|e| {
        log::warn!("failed to load user config: {}", e);
        UserConfig::default()
    });

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(
        &mut terminal,
        &mut session,
        &mut preview_manager,
        &args,
        &mut user_config,
    );

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    let tally = session.tally();
    log::info!(
        "session over: {} kept, {} trashed, {} undecided",
        tally.kept,
        tally.discarded,
        session.remaining()
    );

    result
}

/// Log level comes from RUST_LOG when set, otherwise from the CLI flags.
fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        let level = if quiet {
            LevelFilter::Error
        } else {
            match verbose {
                0 => LevelFilter::Info,
                1 => LevelFilter::Debug,
                _ => LevelFilter::Trace,
            }
        };
        builder.filter_level(level);
    }

    builder.format_timestamp(None);
    builder.init();
}

/// Suspends the TUI terminal to allow external programs to run
fn suspend_terminal<B: ratatui::backend::Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Resumes the TUI terminal after an external program exits
fn resume_terminal<B: ratatui::backend::Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> io::Result<()> {
    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen, EnableMouseCapture)?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(())
}

fn next_criterion(criterion: SortCriterion) -> SortCriterion {
    match criterion {
        SortCriterion::Name => SortCriterion::OldestFirst,
        SortCriterion::OldestFirst => SortCriterion::LargestFirst,
        SortCriterion::LargestFirst => SortCriterion::Name,
    }
}

/// Main application loop
fn run_loop<B: ratatui::backend::Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
    session: &mut Session,
    preview_manager: &mut PreviewManager,
    args: &Args,
    user_config: &mut UserConfig,
) -> io::Result<()> {
    let should_show_welcome = args.show_welcome || !user_config.welcome_shown;
    let mut view_state = if should_show_welcome {
        ViewState::Welcome
    } else {
        ViewState::Browsing
    };
    let mut drag_tracker = DragTracker::new();

    loop {
        terminal.draw(|frame| {
            render(frame, session, preview_manager);

            match view_state {
                ViewState::Help => render_help_overlay(frame),
                ViewState::Summary => {
                    render_summary(frame, &session.tally(), session.total());
                }
                ViewState::ConfirmTrash => {
                    if let Some(entry) = session.current() {
                        render_confirm_trash_overlay(frame, entry);
                    }
                }
                ViewState::Welcome => render_welcome_overlay(frame),
                ViewState::Browsing => {}
            }
        })?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                match view_state {
                    ViewState::Help => {
                        let action = handle_key_event(key);
                        if matches!(action, KeyAction::Help | KeyAction::Quit | KeyAction::None) {
                            view_state = ViewState::Browsing;
                        }
                        continue;
                    }
                    ViewState::Summary => {
                        // Any key exits from summary
                        break;
                    }
                    ViewState::ConfirmTrash => {
                        match handle_confirm_input(key) {
                            KeyAction::ConfirmTrash => {
                                decide(session, Decision::Discard, preview_manager);
                                view_state = if session.is_complete() {
                                    ViewState::Summary
                                } else {
                                    ViewState::Browsing
                                };
                            }
                            KeyAction::CancelTrash => {
                                view_state = ViewState::Browsing;
                            }
                            _ => {}
                        }
                        continue;
                    }
                    ViewState::Welcome => {
                        // Any key dismisses welcome and starts browsing
                        view_state = ViewState::Browsing;

                        user_config.welcome_shown = true;
                        if let Err(e) = user_config.save() {
                            log::warn!("failed to save user config: {}", e);
                        }
                        continue;
                    }
                    ViewState::Browsing => {}
                }

                match handle_key_event(key) {
                    KeyAction::Quit => {
                        if session.tally().decided() > 0 {
                            view_state = ViewState::Summary;
                        } else {
                            break;
                        }
                    }
                    KeyAction::Keep => {
                        decide(session, Decision::Keep, preview_manager);
                        if session.is_complete() {
                            view_state = ViewState::Summary;
                        }
                    }
                    KeyAction::Trash => {
                        if args.skip_confirm {
                            decide(session, Decision::Discard, preview_manager);
                            if session.is_complete() {
                                view_state = ViewState::Summary;
                            }
                        } else if session.current().is_some() {
                            view_state = ViewState::ConfirmTrash;
                        }
                    }
                    KeyAction::CycleSort => {
                        session.set_criterion(next_criterion(session.criterion()));
                    }
                    KeyAction::Open => {
                        if let Some(entry) = session.current() {
                            let path = entry.path.clone();

                            if let Err(e) = suspend_terminal(terminal) {
                                log::error!("failed to suspend terminal: {}", e);
                                continue;
                            }

                            let open_result = open_with_default(&path, session.grant());

                            if let Err(e) = resume_terminal(terminal) {
                                log::error!("failed to resume terminal: {}", e);
                                return Err(e);
                            }

                            if let Err(e) = open_result {
                                log::warn!("{}", e);
                            }
                        }
                    }
                    KeyAction::ConfirmTrash | KeyAction::CancelTrash => {
                        // Only meaningful in the confirmation dialog
                    }
                    KeyAction::Help => {
                        view_state = ViewState::Help;
                    }
                    KeyAction::None => {}
                }
            }
            Event::Mouse(mouse) => {
                if view_state != ViewState::Browsing {
                    drag_tracker.reset();
                    continue;
                }

                match handle_mouse_event(&mut drag_tracker, mouse) {
                    SwipeCommand::CommitKeep => {
                        decide(session, Decision::Keep, preview_manager);
                        if session.is_complete() {
                            view_state = ViewState::Summary;
                        }
                    }
                    SwipeCommand::CommitDiscard => {
                        if args.skip_confirm {
                            decide(session, Decision::Discard, preview_manager);
                            if session.is_complete() {
                                view_state = ViewState::Summary;
                            }
                        } else if session.current().is_some() {
                            view_state = ViewState::ConfirmTrash;
                        }
                    }
                    SwipeCommand::None => {}
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// Applies a decision and drops the decided entry's cached preview.
fn decide(session: &mut Session, decision: Decision, preview_manager: &mut PreviewManager) {
    let path = session.current().map(|e| e.path.clone());
    session.decide(decision);
    if let Some(path) = path {
        preview_manager.invalidate(&path);
    }
}
