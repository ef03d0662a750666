use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use engine_logging::{engine_info, engine_warn};
use jobboard_core::{update, AppState, Msg, QueryParams};
use jobboard_engine::SessionStore;

use super::effects::EffectRunner;
use super::persistence;
use super::ui::commands::{parse_line, Command, HELP};
use super::ui::render;
use crate::cli::Args;

/// Everything the event loop reacts to.
pub(crate) enum LoopEvent {
    Msg(Msg),
    Input(Result<Command, String>),
    InputClosed,
}

pub fn run_app(args: Args) -> anyhow::Result<()> {
    let store = SessionStore::new(args.state_dir.clone());
    let session = persistence::load_session(&store);

    let (loop_tx, loop_rx) = mpsc::channel::<LoopEvent>();
    let runner = EffectRunner::new(args.engine_config(), store, loop_tx.clone())
        .context("starting job engine")?;
    spawn_stdin_reader(loop_tx);

    let mut app = App {
        state: AppState::with_page_size(args.page_size),
        runner,
    };

    let (initial_query, recent_searches) = match (args.query.as_deref(), session) {
        (Some(query), session) => (
            QueryParams::parse(query),
            session.map(|s| s.recent_searches).unwrap_or_default(),
        ),
        (None, Some(session)) => (session.query, session.recent_searches),
        (None, None) => (QueryParams::new(), Vec::new()),
    };
    engine_info!(
        "Starting with query '{}' against {}",
        initial_query.to_query_string(),
        args.api_url
    );

    println!("{HELP}\n");
    app.dispatch_msg(Msg::RestoreRecentSearches(recent_searches));
    app.dispatch_msg(Msg::Mounted(initial_query));

    while let Ok(event) = loop_rx.recv() {
        match event {
            LoopEvent::Msg(msg) | LoopEvent::Input(Ok(Command::Dispatch(msg))) => {
                app.dispatch_msg(msg)
            }
            LoopEvent::Input(Ok(Command::Help)) => println!("{HELP}"),
            LoopEvent::Input(Ok(Command::ShowUrl)) => {
                println!("?{}", app.state.query().to_query_string())
            }
            LoopEvent::Input(Err(message)) => eprintln!("{message}"),
            LoopEvent::Input(Ok(Command::Quit)) | LoopEvent::InputClosed => break,
        }
    }

    engine_info!("Exiting");
    app.runner.shutdown();
    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.run(effects);

        if was_dirty {
            let screen = render::render(&self.state.view(), chrono::Utc::now());
            let mut stdout = io::stdout().lock();
            let _ = writeln!(stdout, "{screen}");
            let _ = stdout.flush();
        }
    }
}

fn spawn_stdin_reader(loop_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    engine_warn!("Failed to read input: {}", err);
                    break;
                }
            };
            let event = match parse_line(&line) {
                Ok(Some(command)) => LoopEvent::Input(Ok(command)),
                Ok(None) => continue,
                Err(message) => LoopEvent::Input(Err(message)),
            };
            if loop_tx.send(event).is_err() {
                return;
            }
        }
        let _ = loop_tx.send(LoopEvent::InputClosed);
    });
}
