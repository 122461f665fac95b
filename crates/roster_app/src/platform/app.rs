use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use roster_core::{update, Msg, RosterState};
use roster_logging::{roster_info, roster_warn};

use super::commands::{parse_command, Command};
use super::config::RosterConfig;
use super::effects::EffectRunner;
use super::{logging, render};

pub fn run_app() -> anyhow::Result<()> {
    let config = RosterConfig::load()?;
    logging::initialize(config.log_destination, config.level_filter()?)?;

    let runner = EffectRunner::new(config.feed_settings())?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    spawn_stdin_reader(cmd_tx);

    let mut app = App::new(runner);
    while app.step(&cmd_rx) {
        thread::sleep(Duration::from_millis(20));
    }
    roster_info!("Shutting down");
    Ok(())
}

/// Owns the roster state; every message goes through [`update`] here and nowhere else.
struct App {
    state: RosterState,
    runner: EffectRunner,
}

impl App {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: RosterState::new(),
            runner,
        }
    }

    /// Processes everything pending. Returns `false` once the user asked to quit.
    fn step(&mut self, cmd_rx: &mpsc::Receiver<Command>) -> bool {
        for msg in self.runner.pending_messages() {
            self.dispatch_msg(msg);
        }

        loop {
            match cmd_rx.try_recv() {
                Ok(Command::Dispatch(msg)) => self.dispatch_msg(msg),
                Ok(Command::Show) => self.print_view(),
                Ok(Command::Quit) => {
                    self.dispatch_msg(Msg::StopPolling);
                    return false;
                }
                // A closed stdin only ends the command surface; polling carries on.
                Err(_) => return true,
            }
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            let view = state.view();
            roster_info!(
                "Roster updated: {} of {} players shown",
                view.players.len(),
                view.total_players
            );
        }
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn print_view(&self) {
        for line in render::render(&self.state.view()) {
            println!("{line}");
        }
    }
}

fn spawn_stdin_reader(cmd_tx: mpsc::Sender<Command>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match parse_command(&line) {
                Some(Ok(command)) => {
                    if cmd_tx.send(command).is_err() {
                        break;
                    }
                }
                Some(Err(err)) => roster_warn!("{}", err),
                None => {}
            }
        }
    });
}
