//! Player decisions and the fixed dealer policy.

use core::fmt;
use core::str::FromStr;

use crate::card::Card;
use crate::error::ParseDecisionError;
use crate::hand::Hand;

/// Score at which the dealer stops drawing.
pub const DEALER_STANDS_ON: u8 = 17;

/// A player decision during the player's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Draw one more card.
    Hit,
    /// Keep the current hand.
    Stand,
}

impl FromStr for Decision {
    type Err = ParseDecisionError;

    /// Accepts `h`/`hit` and `s`/`stand`, case-insensitive and trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("h") || s.eq_ignore_ascii_case("hit") {
            Ok(Self::Hit)
        } else if s.eq_ignore_ascii_case("s") || s.eq_ignore_ascii_case("stand") {
            Ok(Self::Stand)
        } else {
            Err(ParseDecisionError)
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => f.write_str("hit"),
            Self::Stand => f.write_str("stand"),
        }
    }
}

/// Source of player decisions.
///
/// The round asks for a decision each time the player may act. Implementors
/// range from a human at a prompt to a fixed threshold rule.
pub trait PlayerPolicy {
    /// Decides whether to hit or stand given the player's hand and the
    /// dealer's up card.
    fn decide(&mut self, hand: &Hand, dealer_up: Card) -> Decision;
}

impl<P: PlayerPolicy + ?Sized> PlayerPolicy for &mut P {
    fn decide(&mut self, hand: &Hand, dealer_up: Card) -> Decision {
        (**self).decide(hand, dealer_up)
    }
}

/// Hits while the hand scores below a threshold, then stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdPolicy {
    stand_on: u8,
}

impl ThresholdPolicy {
    /// Creates a policy that stands once the score reaches `stand_on`.
    #[must_use]
    pub const fn new(stand_on: u8) -> Self {
        Self { stand_on }
    }

    /// Returns the score at which the policy stands.
    #[must_use]
    pub const fn stand_on(&self) -> u8 {
        self.stand_on
    }
}

impl Default for ThresholdPolicy {
    /// Mirrors the dealer: stand on 17.
    fn default() -> Self {
        Self::new(DEALER_STANDS_ON)
    }
}

impl PlayerPolicy for ThresholdPolicy {
    fn decide(&mut self, hand: &Hand, _dealer_up: Card) -> Decision {
        if hand.value() < self.stand_on {
            Decision::Hit
        } else {
            Decision::Stand
        }
    }
}

/// Whether the dealer must draw at this score.
#[must_use]
pub const fn dealer_should_hit(value: u8) -> bool {
    value < DEALER_STANDS_ON
}
