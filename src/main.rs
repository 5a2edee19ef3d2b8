use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use ratatui::layout::{Constraint, Layout};
use tokio::sync::mpsc;

use annals::action::Action;
use annals::app::{App, Effect, InputMode, Overlay, View};
use annals::client::ParseTransport;
use annals::config::{Cli, ConfigFile, Settings};
use annals::domain::FetchEventsUseCase;
use annals::event::{key_to_action, AppEvent, EventHandler};
use annals::repository::RemoteEventRepository;
use annals::source::RemoteEventSource;
use annals::widgets;
use annals::worker::{FetchHandle, FetchRequest, FetchWorker};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Set up logging
    if let Some(ref log_file) = cli.log_file {
        let file = std::fs::File::create(log_file)?;
        tracing_subscriber::fmt()
            .with_writer(file)
            .with_ansi(false)
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }

    let settings = Settings::resolve(&cli, ConfigFile::load())?;
    tracing::info!(
        "Fetching events via function {} with up to {} retries",
        settings.function,
        settings.max_retries
    );

    run_tui(settings).await
}

fn build_use_case(settings: &Settings) -> Result<FetchEventsUseCase> {
    let transport = ParseTransport::new(
        &settings.server_url,
        settings.app_id.clone(),
        settings.client_key.clone(),
    )
    .map_err(|e| eyre!("failed to set up Parse client: {}", e))?;

    let source = RemoteEventSource::new(Arc::new(transport)).with_function(&settings.function);
    let repository = RemoteEventRepository::new(source).with_max_retries(settings.max_retries);
    Ok(FetchEventsUseCase::new(Arc::new(repository)))
}

async fn run_tui(settings: Settings) -> Result<()> {
    let use_case = Arc::new(build_use_case(&settings)?);

    let mut app = App::new();

    // Set up channels
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Create worker
    let (worker, fetch_handle) = FetchWorker::new(use_case, action_tx);
    tokio::spawn(worker.run());

    // Initial data load
    let effects = app.update(Action::Refresh);
    handle_effects(effects, &fetch_handle);

    let mut terminal = annals::tui::init()?;
    let mut events = EventHandler::new(Duration::from_millis(250));

    loop {
        terminal.draw(|frame| render(&mut app, frame))?;

        tokio::select! {
            Some(event) = events.next() => {
                let action = match event {
                    AppEvent::Key(key) => key_to_action(
                        key,
                        &app.view,
                        &app.input_mode,
                        &app.overlay,
                        &app.input_buffer,
                    ),
                    AppEvent::Tick => Some(Action::Tick),
                };
                if let Some(action) = action {
                    let effects = app.update(action);
                    handle_effects(effects, &fetch_handle);
                }
            }
            Some(action) = action_rx.recv() => {
                let effects = app.update(action);
                handle_effects(effects, &fetch_handle);
            }
        }

        if app.should_quit {
            break;
        }
    }

    annals::tui::restore()?;

    Ok(())
}

fn render(app: &mut App, frame: &mut ratatui::Frame) {
    let area = frame.area();

    frame.render_widget(
        ratatui::widgets::Block::default().style(
            ratatui::style::Style::default().bg(annals::theme::BG_DARK),
        ),
        area,
    );

    let layout = Layout::vertical([
        Constraint::Length(1), // Status bar
        Constraint::Fill(1),   // Content
        Constraint::Length(1), // Search input
        Constraint::Length(1), // Footer
    ])
    .split(area);

    widgets::status_bar::render(app, frame, layout[0]);

    match app.view {
        View::EventList => widgets::event_list::render(app, frame, layout[1]),
        View::EventDetail => widgets::event_detail::render(app, frame, layout[1]),
    }

    if app.input_mode == InputMode::Search {
        widgets::search_input::render(app, frame, layout[2]);
    }

    widgets::footer::render(app, frame, layout[3]);

    if app.overlay == Overlay::Help {
        widgets::help_overlay::render(&app.view, frame, area);
    }

    widgets::error_toast::render(app, frame, area);
}

fn handle_effects(effects: Vec<Effect>, fetch_handle: &FetchHandle) {
    for effect in effects {
        match effect {
            Effect::FetchEvents => fetch_handle.send(FetchRequest::FetchEvents),
            Effect::Quit => {}
        }
    }
}
