use std::fmt;
use std::io::{self, Write as _};

use client::{Alert, AlertKind, Render};
use itertools::Itertools as _;
use tokio::sync::watch;
use view::{GameView, PlayedPile, PlayerPanel, ViewModel, ZoneDisplay};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub(crate) const HELP: &str =
    "commands: play [h-0 ...] | swap [f-0 h-1 ...] | ready | pick | refresh | quit";

/// Draws views on stdout and shares the latest one with the prompt.
pub(crate) struct Terminal {
    views: watch::Sender<Option<ViewModel>>,
}

impl Terminal {
    pub(crate) fn new(views: watch::Sender<Option<ViewModel>>) -> Self {
        Self { views }
    }
}

impl Render for Terminal {
    fn render(&mut self, view: &ViewModel) {
        let mut stdout = io::stdout().lock();
        // a closed stdout leaves nothing to draw on
        let _ = write!(stdout, "{CLEAR_SCREEN}{}\n{HELP}\n", Board(view));
        let _ = stdout.flush();

        self.views.send_replace(Some(view.clone()));
    }

    fn alert(&mut self, alert: &Alert) {
        println!("{}", alert_line(alert));
    }
}

pub(crate) fn alert_line(alert: &Alert) -> String {
    let kind = match alert.kind {
        AlertKind::Rejected => "not allowed",
        AlertKind::Network => "connection problem",
        AlertKind::Protocol => "server problem",
    };

    format!("! {kind}: {}", alert.message)
}

/// Text layout of a whole view.
pub(crate) struct Board<'a>(pub &'a ViewModel);

impl fmt::Display for Board<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ViewModel::NoActiveGame => writeln!(f, "There is no active game."),
            ViewModel::Game(game) => draw_game(f, game),
        }
    }
}

fn draw_game(f: &mut fmt::Formatter<'_>, game: &GameView) -> fmt::Result {
    writeln!(f, "{}", game.summary)?;
    writeln!(f)?;

    for player in &game.players {
        draw_player(f, player)?;
    }

    let piles = &game.piles;
    write!(f, "Deck: {}   Burn: {}   ", piles.deck, piles.burn)?;
    match &piles.played {
        PlayedPile::Closed { count } => writeln!(f, "Played: {count}")?,
        PlayedPile::Open { count, top } => {
            let top = top
                .iter()
                .format_with(" ", |c, f| f(&format_args!("{} ({})", c.card, c.offset)));
            writeln!(f, "Played: {count}  [{top}]")?;
        }
    }

    for rule in &game.rules {
        writeln!(f, "{}: {}", rule.name, rule.value)?;
    }
    writeln!(f)?;

    if let Some(counts) = &game.my_counts {
        writeln!(
            f,
            "Your cards: {} face down, {} face up, {} in hand",
            counts.face_down, counts.face_up, counts.in_hand
        )?;
    }

    let actions = &game.actions;
    if actions.buttons.is_empty() {
        writeln!(f, "Actions: none")?;
    } else {
        let buttons = actions.buttons.iter().format_with(" ", |b, f| f(&format_args!("[{b}]")));
        writeln!(f, "Actions: {buttons}")?;
    }
    if let Some(message) = &actions.message {
        writeln!(f, "{message}")?;
    }

    Ok(())
}

fn draw_player(f: &mut fmt::Formatter<'_>, player: &PlayerPanel) -> fmt::Result {
    let tags = [(player.is_local, "you"), (player.is_next, "next to play")]
        .into_iter()
        .filter_map(|(set, tag)| set.then_some(tag))
        .join(", ");

    if tags.is_empty() {
        writeln!(f, "Player {}", player.player_id)?;
    } else {
        writeln!(f, "Player {} ({tags})", player.player_id)?;
    }

    for zone in &player.zones {
        let cards = match &zone.display {
            ZoneDisplay::Static(cards) => cards.iter().join(" "),
            ZoneDisplay::Selector(options) => options
                .iter()
                .format_with(" ", |o, f| f(&format_args!("{}:{}", o.value, o.card)))
                .to_string(),
        };
        writeln!(f, "  {:<10} {cards}", format!("{}:", zone.zone))?;
    }

    writeln!(f)
}
