use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use fetch_logging::{fetch_info, fetch_warn};
use mediafetch_core::{update, AppState, Effect, Msg};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui;
use super::ui::input::Command;

/// Everything the main loop reacts to: user commands and engine settlements.
#[derive(Debug)]
pub enum AppEvent {
    Msg(Msg),
    Help,
    Unknown(String),
    Quit,
}

/// Owns the core state and turns each message into effects plus, when the
/// state changed, a freshly rendered frame.
#[derive(Default)]
pub struct App {
    state: AppState,
}

impl App {
    pub fn apply(&mut self, msg: Msg) -> (Vec<Effect>, Option<String>) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let frame = state
            .consume_dirty()
            .then(|| ui::render::render(&state.view()));
        self.state = state;
        (effects, frame)
    }

    pub fn in_flight(&self) -> usize {
        self.state.in_flight_count()
    }
}

pub fn run_app(config: &AppConfig) -> anyhow::Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let effects = EffectRunner::new(config, event_tx.clone())?;
    spawn_stdin_reader(event_tx)?;

    let mut app = App::default();
    print(&format!(
        "Paste a URL or type a search. MP3 files go to {}. /help for commands.\n",
        config.output_dir.display()
    ))?;

    for event in event_rx {
        match event {
            AppEvent::Msg(msg) => {
                let (new_effects, frame) = app.apply(msg);
                if let Some(frame) = frame {
                    print(&format!("\n{frame}"))?;
                }
                effects.enqueue(new_effects);
            }
            AppEvent::Help => print(&format!("{}\n", ui::input::HELP))?,
            AppEvent::Unknown(line) => print(&format!("Unknown command: {line} (try /help)\n"))?,
            AppEvent::Quit => break,
        }
    }

    let abandoned = app.in_flight();
    if abandoned > 0 {
        fetch_info!("Exiting with {} operation(s) still in flight", abandoned);
    }
    Ok(())
}

// The lock is held per write only; terminal loggers on engine threads share stdout.
fn print(text: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(text.as_bytes())?;
    out.flush()
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<AppEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("mediafetch-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        fetch_warn!("Failed to read stdin: {}", err);
                        break;
                    }
                };
                let events = match ui::input::parse_line(&line) {
                    Command::Messages(msgs) => msgs.into_iter().map(AppEvent::Msg).collect(),
                    Command::Help => vec![AppEvent::Help],
                    Command::Unknown(line) => vec![AppEvent::Unknown(line)],
                    Command::Quit => vec![AppEvent::Quit],
                };
                for event in events {
                    let quit = matches!(event, AppEvent::Quit);
                    if event_tx.send(event).is_err() || quit {
                        return;
                    }
                }
            }
            let _ = event_tx.send(AppEvent::Quit);
        })?;
    Ok(())
}
