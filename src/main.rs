use jpgcull::cli::{AppConfig, Args};
use jpgcull::config::UserConfig;
use jpgcull::controller::DisplayController;
use jpgcull::domain::JpegWalker;
use jpgcull::logging;
use jpgcull::tui::{
    after_command, handle_key_event, on_key, render, render_help_overlay, render_summary,
    render_welcome_overlay, Transition, ViewState,
};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let config: AppConfig = args.into();

    logging::init_default();

    run_app_with_config(&config)
}

/// Runs the TUI application with configuration
pub fn run_app_with_config(config: &AppConfig) -> io::Result<()> {
    // Load user configuration
    let mut user_config = UserConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load user config: {}", e);
        UserConfig::default()
    });

    log::info!(
        "Culling {} (dry run: {}, on conflict: {:?})",
        config.directory.display(),
        config.dry_run,
        user_config.on_conflict
    );

    let walker = JpegWalker::new(&config.directory);
    let mut controller =
        DisplayController::new(walker, config.controller_options(user_config.on_conflict));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut controller, &mut user_config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    print_session_report(&controller);

    result
}

/// Main application loop
fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    controller: &mut DisplayController,
    user_config: &mut UserConfig,
) -> io::Result<()> {
    let mut view_state = if user_config.welcome_shown {
        ViewState::Browsing
    } else {
        ViewState::Welcome
    };

    loop {
        terminal.draw(|frame| {
            render(frame, controller);

            match view_state {
                ViewState::Help => render_help_overlay(frame),
                ViewState::Finished => render_summary(
                    frame,
                    controller.statistics(),
                    controller.is_exhausted(),
                    controller.is_dry_run(),
                ),
                ViewState::Welcome => render_welcome_overlay(frame),
                ViewState::Browsing => {}
            }
        })?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };
        let action = handle_key_event(key);

        match on_key(&view_state, &action, controller.statistics().shown) {
            Transition::Exit => break,
            Transition::Show(next) => {
                if view_state == ViewState::Welcome {
                    user_config.welcome_shown = true;
                    if let Err(e) = user_config.save() {
                        log::warn!("Failed to save user config: {}", e);
                    }
                }
                view_state = next;
            }
            Transition::Advance => {
                let outcome = controller.advance();
                view_state = finish_command(outcome);
            }
            Transition::DeleteThenAdvance => {
                let outcome = controller.delete_then_advance();
                view_state = finish_command(outcome);
            }
        }
    }

    Ok(())
}

fn finish_command(outcome: jpgcull::Result<()>) -> ViewState {
    if let Err(e) = &outcome {
        if !e.is_exhausted() {
            log::error!("Command failed: {}", e);
        }
    }
    after_command(&outcome)
}

/// Prints what happened to the files once the terminal is restored
fn print_session_report(controller: &DisplayController) {
    let stats = controller.statistics();
    if stats.shown == 0 && stats.skipped_unreadable == 0 {
        return;
    }

    if controller.is_dry_run() {
        println!("[DRY RUN] Complete");
        println!("   Would have kept:  {} images", stats.kept());
        println!("   Would have moved: {} images", stats.moved);
        return;
    }

    for record in controller.journal() {
        println!(
            "{}  {} -> {}",
            record.moved_at.format("%Y-%m-%d %H:%M:%S"),
            record.from.display(),
            record.to.display()
        );
    }

    println!(
        "Shown {} images: kept {}, moved {}",
        stats.shown,
        stats.kept(),
        stats.moved
    );
    if stats.skipped_unreadable > 0 {
        println!("   {} unreadable images skipped", stats.skipped_unreadable);
    }
    if stats.failed_moves > 0 {
        println!("   {} moves failed (see log)", stats.failed_moves);
    }
}
