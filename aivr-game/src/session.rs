//! Single-owner game session
//!
//! The controller is moved into one tokio task. Callers only send commands
//! and watch snapshots, so the one-guess-per-round rule holds no matter how
//! many threads submit guesses. Guesses that arrive while an image is loading
//! are consumed and dropped, the same as clicks on disabled buttons.

use std::future::Future;

use aivr_common::Label;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::round::{RoundController, RoundView};
use crate::source::ImageSource;

/// Buffered commands before `guess` starts waiting
const COMMAND_BUFFER: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Guess(Label),
    Shutdown,
}

/// Handle to a running session
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
    views: watch::Receiver<RoundView>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    /// Submit a guess; `false` if the session has ended
    pub async fn guess(&self, label: Label) -> bool {
        self.commands.send(Command::Guess(label)).await.is_ok()
    }

    /// Receiver that sees every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<RoundView> {
        self.views.clone()
    }

    pub fn current(&self) -> RoundView {
        self.views.borrow().clone()
    }

    /// Stop the session task and wait for it
    pub async fn shutdown(self) {
        let _ = self.commands.send(Command::Shutdown).await;
        let _ = self.task.await;
    }
}

/// Spawns the task that owns a [`RoundController`]
pub struct GameSession;

impl GameSession {
    /// Start the game in a new task
    pub fn spawn<S>(controller: RoundController<S>) -> SessionHandle
    where
        S: ImageSource + 'static,
    {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (view_tx, view_rx) = watch::channel(controller.view());
        let task = tokio::spawn(run(controller, command_rx, view_tx));

        SessionHandle {
            commands: command_tx,
            views: view_rx,
            task,
        }
    }
}

/// Drive `work` to completion while dropping guesses
///
/// Returns `None` if a shutdown arrives (or every handle is gone) first.
async fn drop_guesses_while<F: Future>(
    work: F,
    commands: &mut mpsc::Receiver<Command>,
) -> Option<F::Output> {
    tokio::pin!(work);
    loop {
        tokio::select! {
            output = &mut work => return Some(output),
            command = commands.recv() => match command {
                Some(Command::Guess(label)) => debug!(%label, "Guess dropped while loading"),
                Some(Command::Shutdown) | None => return None,
            },
        }
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

async fn run<S: ImageSource>(
    mut controller: RoundController<S>,
    mut commands: mpsc::Receiver<Command>,
    views: watch::Sender<RoundView>,
) {
    let publish = |controller: &RoundController<S>| {
        views.send_replace(controller.view());
    };

    controller.enter_loading();
    publish(&controller);
    if drop_guesses_while(controller.start(), &mut commands).await.is_none() {
        info!("Session stopped during startup");
        return;
    }
    publish(&controller);

    loop {
        let deadline = controller.pending_reload().map(|timer| timer.deadline());

        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Guess(label)) => {
                    if controller.guess(label, Instant::now()).is_some() {
                        publish(&controller);
                    }
                }
                Some(Command::Shutdown) | None => break,
            },
            _ = sleep_until_deadline(deadline) => {
                if controller.begin_reload(Instant::now()) {
                    publish(&controller);
                    if drop_guesses_while(controller.load_next(), &mut commands).await.is_none() {
                        break;
                    }
                    publish(&controller);
                }
            }
        }
    }

    info!("Session ended ({})", controller.score().render());
}
