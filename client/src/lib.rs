pub mod api;
pub mod config;
mod error;
pub mod poller;

use common::event::client::ActionRequest;
use futures::future;
use tokio::{select, sync::mpsc, time};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use view::ViewModel;

pub use api::{Api, HttpApi};
pub use error::Error;
use poller::StatePoller;

/// Requests from the user interface to the running client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch and render now, even if nothing changed.
    Refresh,
    Submit(ActionRequest),
    /// The user is choosing cards; hold renders until [`Command::Resume`].
    Pause,
    Resume,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Rejected,
    Network,
    Protocol,
}

/// A transient message for the user. Each alert replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl From<&Error> for Alert {
    fn from(e: &Error) -> Self {
        let (kind, message) = match e {
            Error::ActionRejected(message) => (AlertKind::Rejected, message.clone()),
            Error::Network(_) => (AlertKind::Network, e.to_string()),
            Error::Protocol { .. } | Error::Config(_) => (AlertKind::Protocol, e.to_string()),
        };
        Alert { kind, message }
    }
}

/// Applies views to whatever the user is looking at.
pub trait Render {
    /// Replaces everything previously rendered.
    fn render(&mut self, view: &ViewModel);

    fn alert(&mut self, alert: &Alert);
}

pub struct GameClient<A> {
    poller: StatePoller<A>,
    view: Option<ViewModel>,
}

impl<A: Api> GameClient<A> {
    pub fn new(api: A, config: &config::Config) -> Self {
        Self {
            poller: StatePoller::new(api, config.change_detection, config.poll_interval()),
            view: None,
        }
    }

    /// The most recently rendered view.
    pub fn view(&self) -> Option<&ViewModel> {
        self.view.as_ref()
    }

    pub fn poller(&self) -> &StatePoller<A> {
        &self.poller
    }

    /// Polls and handles commands until cancelled, told to quit, or every
    /// command sender is gone.
    pub async fn start<R: Render>(
        mut self,
        renderer: &mut R,
        mut commands: mpsc::Receiver<Command>,
        token: CancellationToken,
    ) {
        self.poller.start();

        loop {
            let deadline = self.poller.deadline();

            select! {
                _ = token.cancelled() => {
                    info!("leaving game");
                    break;
                }
                _ = wait_until(deadline) => {
                    self.tick(renderer, false).await;
                }
                command = commands.recv() => match command {
                    Some(Command::Quit) | None => {
                        info!("client quit");
                        break;
                    }
                    Some(command) => self.handle(command, renderer).await,
                },
            }
        }

        self.poller.stop();
    }

    async fn handle<R: Render>(&mut self, command: Command, renderer: &mut R) {
        debug!(?command, "handling command");

        match command {
            Command::Refresh => self.tick(renderer, true).await,
            Command::Submit(action) => self.submit(action, renderer).await,
            Command::Pause => self.poller.stop(),
            Command::Resume => self.poller.start(),
            Command::Quit => (),
        }
    }

    /// One poll: fetch, render, then decide whether to poll again.
    ///
    /// The timer is disarmed for the whole fetch so polls never overlap.
    async fn tick<R: Render>(&mut self, renderer: &mut R, force: bool) {
        self.poller.stop();

        match self.poller.poll(force).await {
            Ok(Some(snapshot)) => {
                let view = view::build(&snapshot);
                renderer.render(&view);

                if view.keep_polling() {
                    self.poller.rearm();
                } else {
                    info!("game over, polling stopped");
                }
                self.view = Some(view);
            }
            Ok(None) => self.poller.rearm(),
            Err(e) => {
                // keep showing the last good view
                error!("poll failed: {e}");
                renderer.alert(&Alert::from(&e));
                // a finished game stays stopped
                if self.view.as_ref().map_or(true, ViewModel::keep_polling) {
                    self.poller.rearm();
                }
            }
        }
    }

    async fn submit<R: Render>(&mut self, action: ActionRequest, renderer: &mut R) {
        self.poller.stop();

        let cards = action
            .cards()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        info!(action = action.name(), ?cards, "submitting action");

        let result = match self.poller.api().submit(&action).await {
            Ok(response) if response.action_result => Ok(()),
            Ok(response) => Err(Error::ActionRejected(
                response
                    .action_message
                    .unwrap_or_else(|| format!("{} was not allowed", action.name())),
            )),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => self.tick(renderer, true).await,
            Err(e) => {
                warn!("action failed: {e}");
                renderer.alert(&Alert::from(&e));
                self.poller.start();
            }
        }
    }
}

async fn wait_until(deadline: Option<time::Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => future::pending().await,
    }
}
