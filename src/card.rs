//! Card types and presentation codes.

extern crate alloc;

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::error::ParseCardError;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    /// Spades.
    Spades,
    /// Clubs.
    Clubs,
    /// Hearts.
    Hearts,
    /// Diamonds.
    Diamonds,
}

impl Suit {
    /// All four suits.
    pub const ALL: [Self; 4] = [Self::Spades, Self::Clubs, Self::Hearts, Self::Diamonds];

    /// Single lowercase letter used in card codes.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Spades => 's',
            Self::Clubs => 'c',
            Self::Hearts => 'h',
            Self::Diamonds => 'd',
        }
    }

    /// Suit glyph for terminal output.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Spades => '♠',
            Self::Clubs => '♣',
            Self::Hearts => '♥',
            Self::Diamonds => '♦',
        }
    }

    const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            's' => Some(Self::Spades),
            'c' => Some(Self::Clubs),
            'h' => Some(Self::Hearts),
            'd' => Some(Self::Diamonds),
            _ => None,
        }
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    /// Ace, worth 1 or 11.
    Ace,
    /// Two.
    Two,
    /// Three.
    Three,
    /// Four.
    Four,
    /// Five.
    Five,
    /// Six.
    Six,
    /// Seven.
    Seven,
    /// Eight.
    Eight,
    /// Nine.
    Nine,
    /// Ten.
    Ten,
    /// Jack.
    Jack,
    /// Queen.
    Queen,
    /// King.
    King,
}

impl Rank {
    /// All thirteen ranks, Ace first.
    pub const ALL: [Self; 13] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
    ];

    /// Scoring contribution of a non-Ace rank. Aces return `None` since their
    /// value depends on the rest of the hand.
    #[must_use]
    pub const fn fixed_value(self) -> Option<u8> {
        match self {
            Self::Ace => None,
            Self::Two => Some(2),
            Self::Three => Some(3),
            Self::Four => Some(4),
            Self::Five => Some(5),
            Self::Six => Some(6),
            Self::Seven => Some(7),
            Self::Eight => Some(8),
            Self::Nine => Some(9),
            Self::Ten | Self::Jack | Self::Queen | Self::King => Some(10),
        }
    }

    /// Short label: `A`, `2`..`10`, `J`, `Q`, `K`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ace => "A",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|rank| rank.label().eq_ignore_ascii_case(label))
    }
}

/// A playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    /// The rank of the card.
    pub rank: Rank,
    /// The suit of the card.
    pub suit: Suit,
}

impl Card {
    /// Creates a new card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Presentation identifier: suit letter followed by the lowercase rank,
    /// e.g. `sa`, `h10`, `dk`. Adapters map it to glyphs or image files.
    ///
    /// ```
    /// use twentyone::{Card, Rank, Suit};
    ///
    /// assert_eq!(Card::new(Rank::Ten, Suit::Hearts).code(), "h10");
    /// assert_eq!(Card::new(Rank::Ace, Suit::Spades).code(), "sa");
    /// ```
    #[must_use]
    pub fn code(&self) -> String {
        let mut code = String::with_capacity(3);
        code.push(self.suit.letter());
        for ch in self.rank.label().chars() {
            code.push(ch.to_ascii_lowercase());
        }
        code
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses a card code as produced by [`Card::code`]. Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars.next().ok_or(ParseCardError::Empty)?;
        let suit =
            Suit::from_letter(letter.to_ascii_lowercase()).ok_or(ParseCardError::UnknownSuit)?;
        let rank = Rank::from_label(chars.as_str()).ok_or(ParseCardError::UnknownRank)?;
        Ok(Self::new(rank, suit))
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;

/// Code reserved for a face-down card. Never produced by [`Card::code`].
pub const HIDDEN_CARD_CODE: &str = "back";
