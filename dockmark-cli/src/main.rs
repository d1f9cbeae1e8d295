mod app;
mod tui;
mod ui;

use std::fs::{self, OpenOptions};
use std::io::{self, stdout};
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use color_eyre::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dockmark_core::{BatchConfig, Category, DockerCli};
use ratatui::{Terminal, backend::CrosstermBackend, style::Style, widgets::Widget};
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::{Action, AppMode, AppState};
use tui::{AppEvent, EventHandler, handle_key};
use ui::{
    AppLayout, BatchProgressView, ConfirmView, ErrorView, Footer, Header, HelpView,
    ResourceListView, Theme, list_height,
};

/// DOCKMARK - Mark Docker resources across panels and remove them in one batch
#[derive(Parser, Debug)]
#[command(name = "dockmark")]
#[command(about = "Interactive terminal tool for marking and batch-removing Docker resources")]
#[command(version)]
struct Args {
    /// Docker executable to invoke
    #[arg(long, default_value = "docker")]
    docker: PathBuf,

    /// Removal workers per category (1 removes strictly one at a time)
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,

    /// Keep untagged parent images when removing images
    #[arg(long)]
    no_prune: bool,

    /// Log file (defaults to the user cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. `info` or `dockmark_core=debug`
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            workers: self.jobs.max(1),
            prune_images: !self.no_prune,
        }
    }

    fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::cache_dir().map(|d| d.join("dockmark").join("dockmark.log"))
        })
    }
}

/// Log to a file; the terminal belongs to the TUI
fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = args.log_path() else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(EnvFilter::try_new(&args.log_level)?)
        .init();
    Ok(())
}

/// Restore the terminal before the panic report is printed
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    if let Err(e) = init_logging(&args) {
        eprintln!("Warning: logging disabled: {}", e);
    }
    install_panic_hook();

    info!(docker = %args.docker.display(), jobs = args.jobs, "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app
    let result = run_app(&mut terminal, &args);

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, args: &Args) -> Result<()> {
    let theme = Theme::default();
    let mut state = AppState::new(DockerCli::new(&args.docker), args.batch_config());
    let event_handler = EventHandler::new(50); // 50ms tick rate

    state.refresh();

    loop {
        // Pick up batch progress and completion
        state.poll_batch();

        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();
            let layout = AppLayout::new(area);

            // Background
            frame
                .buffer_mut()
                .set_style(area, Style::default().bg(theme.bg));

            Header::new(&state, &theme).render(layout.header, frame.buffer_mut());

            for category in Category::ALL {
                let rect = layout.panels[category.index()];
                // Update visible height for scrolling
                state.panel_mut(category).set_visible_height(list_height(rect));
                ResourceListView::new(
                    state.panel(category),
                    &state.selection,
                    state.focus == category,
                    &theme,
                )
                .render(rect, frame.buffer_mut());
            }

            match state.mode {
                AppMode::Help => HelpView::new(&theme).render(area, frame.buffer_mut()),
                AppMode::ConfirmDelete => {
                    if let Some(batch) = &state.pending_batch {
                        let message = batch.message();
                        ConfirmView::new(batch.title(), &message, &theme)
                            .render(area, frame.buffer_mut());
                    }
                }
                AppMode::Deleting => {
                    if let Some(progress) = &state.batch_progress {
                        BatchProgressView::new(progress, state.spinner_frame, &theme)
                            .render(area, frame.buffer_mut());
                    }
                }
                AppMode::ShowError => {
                    if let Some(message) = &state.error_message {
                        ErrorView::new(message, &theme).render(area, frame.buffer_mut());
                    }
                }
                AppMode::Browsing | AppMode::Filtering => {}
            }

            Footer::new(state.mode, &theme, &state.session_stats)
                .render(layout.footer, frame.buffer_mut());
        })?;

        // Handle events
        match event_handler.next()? {
            AppEvent::Key(key) => {
                let action = handle_key(key, state.mode);
                handle_action(&mut state, action);
            }
            AppEvent::Resize(_, _) => {
                // Terminal will redraw on next loop
            }
            AppEvent::Tick => {
                state.tick_spinner();
            }
        }

        if state.should_quit {
            break;
        }
    }

    info!(
        removed = state.session_stats.items_removed,
        failed = state.session_stats.items_failed,
        "session finished"
    );

    Ok(())
}

fn handle_action(state: &mut AppState, action: Action) {
    match action {
        Action::MoveUp => state.move_up(),
        Action::MoveDown => state.move_down(),
        Action::PageUp => state.page_up(),
        Action::PageDown => state.page_down(),
        Action::GoToFirst => state.go_to_first(),
        Action::GoToLast => state.go_to_last(),
        Action::NextPanel => state.next_panel(),
        Action::PrevPanel => state.prev_panel(),
        Action::ToggleSelect => state.toggle_select(),
        Action::SelectAll => state.select_all(),
        Action::DeselectAll => state.deselect_all(),
        Action::ClearSelection => state.clear_selection(),
        Action::DeleteSelected => state.request_delete(),
        Action::ConfirmDelete => state.confirm_delete(),
        Action::CancelDelete => state.cancel_delete(),
        Action::StartFilter => state.start_filter(),
        Action::FilterInput(c) => state.filter_input(c),
        Action::FilterBackspace => state.filter_backspace(),
        Action::ApplyFilter => state.apply_filter(),
        Action::ClearFilter => state.clear_filter(),
        Action::Refresh => state.refresh(),
        Action::ShowHelp => state.show_help(),
        Action::HideHelp => state.hide_help(),
        Action::DismissError => state.dismiss_error(),
        Action::Quit => state.quit(),
        Action::Tick => {}
    }
}
