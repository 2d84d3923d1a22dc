//! Reads commands from stdin and turns them into [`Command`]s for the client.
//!
//! Runs on its own thread: stdin and the card selector both block.

use std::io::{self, BufRead as _};

use client::Command;
use common::event::client::ActionRequest;
use common::selection::CardSelection;
use dialoguer::MultiSelect;
use tokio::sync::{mpsc, watch};
use tracing::debug;
use view::{Button, ViewModel};

use crate::render::HELP;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Input {
    Play(Vec<String>),
    Swap(Vec<String>),
    Ready,
    Pick,
    Refresh,
    Quit,
    Help,
}

impl Input {
    /// The button that has to be on offer before this input is sent.
    fn button(&self) -> Option<Button> {
        match self {
            Input::Play(_) => Some(Button::Play),
            Input::Swap(_) => Some(Button::Swap),
            Input::Ready => Some(Button::Ready),
            Input::Pick => Some(Button::PickUp),
            Input::Refresh | Input::Quit | Input::Help => None,
        }
    }

    /// Play or swap with no cards named yet.
    fn needs_selection(&self) -> bool {
        matches!(self, Input::Play(ids) | Input::Swap(ids) if ids.is_empty())
    }
}

/// Parses one prompt line, `None` for a blank line.
pub(crate) fn parse_line(line: &str) -> anyhow::Result<Option<Input>> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };
    let ids = words.map(str::to_owned).collect::<Vec<_>>();
    let has_ids = !ids.is_empty();

    let input = match word {
        "play" => Input::Play(ids),
        "swap" => Input::Swap(ids),
        "ready" => Input::Ready,
        "pick" => Input::Pick,
        "refresh" => Input::Refresh,
        "quit" | "exit" => Input::Quit,
        "help" | "?" => Input::Help,
        other => anyhow::bail!("unknown command `{other}`, type `help`"),
    };

    if has_ids && !matches!(input, Input::Play(_) | Input::Swap(_)) {
        anyhow::bail!("`{word}` takes no cards");
    }

    Ok(Some(input))
}

/// Builds the command for a complete input, checking it against what the
/// current view offers.
pub(crate) fn command(input: &Input, view: Option<&ViewModel>) -> anyhow::Result<Command> {
    if let Some(button) = input.button() {
        if !view.is_some_and(|v| v.offers(button)) {
            anyhow::bail!("{button} is not available right now");
        }
    }

    let command = match input {
        Input::Play(ids) => {
            let request = ActionRequest::play(ids.iter().map(String::as_str))?;
            Command::Submit(offered_only(request, view)?)
        }
        Input::Swap(ids) => {
            let request = ActionRequest::swap(ids.iter().map(String::as_str))?;
            Command::Submit(offered_only(request, view)?)
        }
        Input::Ready => Command::Submit(ActionRequest::NoSwap),
        Input::Pick => Command::Submit(ActionRequest::Pick),
        Input::Refresh => Command::Refresh,
        Input::Quit => Command::Quit,
        Input::Help => anyhow::bail!("{HELP}"),
    };

    Ok(command)
}

/// Refuses requests naming a card no selector in the view offers.
fn offered_only(request: ActionRequest, view: Option<&ViewModel>) -> anyhow::Result<ActionRequest> {
    let offered = view.map(ViewModel::selectable).unwrap_or_default();
    if let Some(card) = request
        .cards()
        .iter()
        .find(|card| !offered.iter().any(|o| o.value == **card))
    {
        anyhow::bail!("{card} cannot be selected");
    }

    Ok(request)
}

/// Builds the request from cards picked in the selector.
fn picked(input: &Input, cards: Vec<CardSelection>) -> ActionRequest {
    match input {
        Input::Swap(_) => ActionRequest::Swap {
            action_cards: cards,
        },
        _ => ActionRequest::Play {
            action_cards: cards,
        },
    }
}

/// Lets the user pick cards with polling paused, so no render throws the
/// selection away. `None` when nothing was picked.
fn choose(
    input: &Input,
    view: Option<&ViewModel>,
    commands: &mpsc::Sender<Command>,
) -> anyhow::Result<Option<Command>> {
    // runs the button check before anything is shown
    command(input, view)?;

    let options = view.map(ViewModel::selectable).unwrap_or_default();
    if options.is_empty() {
        anyhow::bail!("there are no cards to choose from");
    }

    commands.blocking_send(Command::Pause)?;

    let labels = options
        .iter()
        .map(|o| format!("{}  {}  ({})", o.value, o.card, o.card.describe()))
        .collect::<Vec<_>>();
    let chosen = MultiSelect::new()
        .with_prompt("Choose cards (space to select, enter to confirm)")
        .items(&labels)
        .interact_opt();

    let cards = match &chosen {
        Ok(Some(indices)) => indices.iter().map(|&i| options[i].value).collect(),
        _ => Vec::new(),
    };

    if cards.is_empty() {
        commands.blocking_send(Command::Resume)?;
        chosen?;
        return Ok(None);
    }

    Ok(Some(Command::Submit(picked(input, cards))))
}

/// Reads lines until `quit` or end of input.
pub(crate) fn run(
    commands: mpsc::Sender<Command>,
    views: watch::Receiver<Option<ViewModel>>,
) -> anyhow::Result<()> {
    println!("{HELP}");

    for line in io::stdin().lock().lines() {
        let line = line?;

        let input = match parse_line(&line) {
            Ok(Some(input)) => input,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        debug!(?input, "prompt input");

        // the selector blocks, so work from a copy of the current view
        let view = views.borrow().clone();

        let command = if input.needs_selection() {
            choose(&input, view.as_ref(), &commands)
        } else {
            command(&input, view.as_ref()).map(Some)
        };

        match command {
            Ok(Some(command)) => {
                let quit = command == Command::Quit;
                commands.blocking_send(command)?;
                if quit {
                    break;
                }
            }
            Ok(None) => (),
            Err(e) => println!("{e}"),
        }
    }

    Ok(())
}
