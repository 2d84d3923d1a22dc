pub mod data;
pub mod event;
pub mod moves;
pub mod selection;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A card as the server reports it.
///
/// Cards the viewer is not allowed to see arrive as [`Suit::None`] with [`Face::Back`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    #[serde(rename = "rank")]
    pub face: Face,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("suit {0} is outside 0..=4")]
    Suit(u8),
    #[error("rank {0} is outside 1..=14")]
    Rank(u8),
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Suit {
    None = 0,
    Hearts = 1,
    Diamonds = 2,
    Clubs = 3,
    Spades = 4,
}

impl Suit {
    pub const fn name(&self) -> &'static str {
        match self {
            Suit::None => "a card",
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        }
    }

    /// Letter used in card image names, `B` being the back.
    pub const fn key(&self) -> char {
        match self {
            Suit::None => 'B',
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Spades => 'S',
        }
    }

    pub const fn symbol(&self) -> char {
        match self {
            Suit::None => '?',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

impl TryFrom<u8> for Suit {
    type Error = CardError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        let suit = match n {
            0 => Suit::None,
            1 => Suit::Hearts,
            2 => Suit::Diamonds,
            3 => Suit::Clubs,
            4 => Suit::Spades,
            _ => return Err(CardError::Suit(n)),
        };
        Ok(suit)
    }
}

impl From<Suit> for u8 {
    fn from(suit: Suit) -> Self {
        suit as u8
    }
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Face {
    /// The back of a card, used in place of cards hidden from the viewer.
    Back = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Face {
    pub const fn from_number(n: u8) -> Option<Self> {
        let face = match n {
            1 => Face::Back,
            2 => Face::Two,
            3 => Face::Three,
            4 => Face::Four,
            5 => Face::Five,
            6 => Face::Six,
            7 => Face::Seven,
            8 => Face::Eight,
            9 => Face::Nine,
            10 => Face::Ten,
            11 => Face::Jack,
            12 => Face::Queen,
            13 => Face::King,
            14 => Face::Ace,
            _ => return None,
        };
        Some(face)
    }

    pub const fn number(&self) -> u8 {
        *self as u8
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Face::Back => "back",
            Face::Two => "two",
            Face::Three => "three",
            Face::Four => "four",
            Face::Five => "five",
            Face::Six => "six",
            Face::Seven => "seven",
            Face::Eight => "eight",
            Face::Nine => "nine",
            Face::Ten => "ten",
            Face::Jack => "jack",
            Face::Queen => "queen",
            Face::King => "king",
            Face::Ace => "ace",
        }
    }

    /// Rank part of a card image name.
    pub fn key(&self) -> String {
        match self {
            Face::Ten => "T".to_owned(),
            Face::Jack => "J".to_owned(),
            Face::Queen => "Q".to_owned(),
            Face::King => "K".to_owned(),
            Face::Ace => "A".to_owned(),
            face => face.number().to_string(),
        }
    }

    fn label(&self) -> String {
        match self {
            Face::Back => "?".to_owned(),
            Face::Ten => "10".to_owned(),
            face => face.key(),
        }
    }
}

impl TryFrom<u8> for Face {
    type Error = CardError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Face::from_number(n).ok_or(CardError::Rank(n))
    }
}

impl From<Face> for u8 {
    fn from(face: Face) -> Self {
        face.number()
    }
}

impl Card {
    /// The generic back shown for cards that are only known by count.
    pub const BACK: Card = Card {
        suit: Suit::None,
        face: Face::Back,
    };

    pub const fn new(suit: Suit, face: Face) -> Self {
        Self { suit, face }
    }

    pub const fn is_back(&self) -> bool {
        matches!(self.face, Face::Back)
    }

    /// Image name without extension, e.g. `TH` for the ten of hearts.
    pub fn image_key(&self) -> String {
        format!("{}{}", self.face.key(), self.suit.key())
    }

    pub fn image_path(&self) -> String {
        format!("cards/{}.svg", self.image_key())
    }

    /// Human readable name, e.g. `ten of hearts`.
    pub fn describe(&self) -> String {
        format!("{} of {}", self.face.name(), self.suit.name())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_back() {
            return f.write_str("??");
        }
        write!(f, "{}{}", self.face.label(), self.suit.symbol())
    }
}
