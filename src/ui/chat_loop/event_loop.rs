//! Event polling, dispatching, and UI rendering loop.
//!
//! The loop polls terminal input on a background task, routes keys through
//! [`keybindings`](super::keybindings), applies queued actions to the shared
//! [`App`](crate::core::app::App), spawns backend calls for the commands the
//! reducers return, and redraws at most once per frame.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::prelude::Size;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::core::app::{
    apply_actions, AppAction, AppActionContext, AppActionDispatcher, AppActionEnvelope,
};
use crate::ui::renderer::ui;

use super::executors::spawn_command;
use super::keybindings::{handle_key, handle_paste};
use super::lifecycle::{restore_terminal, setup_terminal, SharedTerminal};
use super::setup::bootstrap_app;
use super::AppHandle;

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

async fn is_exit_requested(app: &AppHandle) -> bool {
    app.read(|app| app.ui.exit_requested).await
}

async fn current_terminal_size(terminal: &SharedTerminal) -> Size {
    let terminal_guard = terminal.lock().await;
    terminal_guard.size().unwrap_or_default()
}

async fn try_draw_frame(
    app: &AppHandle,
    terminal: &SharedTerminal,
    request_redraw: &mut bool,
    last_draw: &mut Instant,
    frame_duration: Duration,
) -> io::Result<()> {
    if !*request_redraw {
        return Ok(());
    }

    let now = Instant::now();
    if now.duration_since(*last_draw) < frame_duration {
        return Ok(());
    }

    let mut terminal_guard = terminal.lock().await;
    app.update(|app| terminal_guard.draw(|f| ui(f, app)).map(|_| ()))
        .await?;
    *last_draw = now;
    *request_redraw = false;
    Ok(())
}

struct EventProcessingOutcome {
    events_processed: bool,
    request_redraw: bool,
    exit_requested: bool,
}

async fn process_ui_events(
    app: &AppHandle,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    dispatcher: &AppActionDispatcher,
    term_size: Size,
) -> EventProcessingOutcome {
    let mut outcome = EventProcessingOutcome {
        events_processed: false,
        request_redraw: false,
        exit_requested: false,
    };
    let ctx = AppActionContext {
        term_width: term_size.width,
        term_height: term_size.height,
    };

    while let Ok(ev) = event_rx.try_recv() {
        outcome.events_processed = true;
        match ev {
            UiEvent::Crossterm(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                let key_outcome = app.update(|app| handle_key(app, key)).await;
                if key_outcome.exit {
                    app.update(|app| app.ui.exit_requested = true).await;
                    outcome.exit_requested = true;
                    break;
                }
                if !key_outcome.actions.is_empty() {
                    dispatcher.dispatch_many(key_outcome.actions, ctx);
                }
                if key_outcome.redraw {
                    outcome.request_redraw = true;
                }
            }
            UiEvent::Crossterm(Event::Paste(text)) => {
                app.update(|app| handle_paste(app, &text)).await;
                outcome.request_redraw = true;
            }
            UiEvent::Crossterm(Event::Resize(_, _)) => {
                outcome.request_redraw = true;
            }
            UiEvent::Crossterm(_) => {}
        }
    }

    if outcome.events_processed {
        outcome.request_redraw = true;
    }

    outcome
}

/// Queue an expiry pass once the oldest banner has outlived its timeout.
async fn schedule_expired_notifications(app: &AppHandle, dispatcher: &AppActionDispatcher) {
    let now = Instant::now();
    let due = app
        .read(|app| app.ui.notifications.next_deadline())
        .await
        .is_some_and(|deadline| deadline <= now);
    if due {
        dispatcher.dispatch_many(
            [AppAction::ExpireNotifications { now }],
            AppActionContext::default(),
        );
    }
}

async fn drain_action_queue(
    app: &AppHandle,
    dispatcher: &AppActionDispatcher,
    action_rx: &mut mpsc::UnboundedReceiver<AppActionEnvelope>,
) -> bool {
    let mut pending = Vec::new();
    while let Ok(envelope) = action_rx.try_recv() {
        pending.push(envelope);
    }

    if pending.is_empty() {
        return false;
    }

    let (commands, backend, term_size) = app
        .update(|app| {
            let commands = apply_actions(app, pending);
            (commands, app.session.backend.clone(), app.ui.last_term_size)
        })
        .await;
    let ctx = AppActionContext {
        term_width: term_size.width,
        term_height: term_size.height,
    };
    for cmd in commands {
        debug!(?cmd, "spawning backend command");
        spawn_command(backend.clone(), dispatcher.clone(), cmd, ctx);
    }
    true
}

fn spawn_event_reader(
    event_tx: mpsc::UnboundedSender<UiEvent>,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while !cancel_token.is_cancelled() {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        continue;
                    }
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

pub async fn run_chat(base_url: String, log: Option<String>) -> Result<(), Box<dyn Error>> {
    let app = bootstrap_app(&base_url, log)?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppActionEnvelope>();
    let action_dispatcher = AppActionDispatcher::new(action_tx);
    action_dispatcher.dispatch_many([AppAction::ProbeRequested], AppActionContext::default());

    let terminal = setup_terminal()?;

    let cancel_token = CancellationToken::new();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let event_reader_handle = spawn_event_reader(event_tx, cancel_token.clone());

    const MAX_FPS: u64 = 60;
    let frame_duration = Duration::from_millis(1000 / MAX_FPS);
    let mut last_draw = Instant::now() - frame_duration;
    let mut request_redraw = true;
    let mut indicator_visible = false;
    let mut last_indicator_frame = Instant::now() - frame_duration;

    let result: Result<(), Box<dyn Error>> = 'main_loop: loop {
        if is_exit_requested(&app).await {
            break 'main_loop Ok(());
        }

        if let Err(err) = try_draw_frame(
            &app,
            &terminal,
            &mut request_redraw,
            &mut last_draw,
            frame_duration,
        )
        .await
        {
            break 'main_loop Err(err.into());
        }

        let term_size = current_terminal_size(&terminal).await;
        app.update(|app| {
            app.ui.last_term_size = term_size;
        })
        .await;

        let event_outcome =
            process_ui_events(&app, &mut event_rx, &action_dispatcher, term_size).await;
        if event_outcome.exit_requested {
            break 'main_loop Ok(());
        }
        if event_outcome.request_redraw {
            request_redraw = true;
        }

        schedule_expired_notifications(&app, &action_dispatcher).await;

        let actions_applied = drain_action_queue(&app, &action_dispatcher, &mut action_rx).await;
        if actions_applied {
            request_redraw = true;
        }

        let indicator_now = app.read(|app| app.ui.loading.is_visible()).await;
        if indicator_now != indicator_visible {
            indicator_visible = indicator_now;
            request_redraw = true;
        }

        // Keep the spinner moving while requests are outstanding
        if indicator_now {
            let now = Instant::now();
            if now.duration_since(last_indicator_frame) >= frame_duration {
                request_redraw = true;
                last_indicator_frame = now;
            }
        }

        let idle = !event_outcome.events_processed && !actions_applied && !request_redraw;
        if idle {
            tokio::time::sleep(Duration::from_millis(16)).await;
        }
    };

    cancel_token.cancel();
    let _ = event_reader_handle.await;
    restore_terminal(&terminal).await?;
    info!("session ended");

    result
}
