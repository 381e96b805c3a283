//! Round outcome types.

use core::fmt;

/// Who won a settled round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    /// The player won.
    PlayerWin,
    /// The dealer (computer) won.
    DealerWin,
    /// Equal scores (push).
    Tie,
}

impl Outcome {
    /// All outcomes in tally order.
    pub const ALL: [Self; 3] = [Self::PlayerWin, Self::DealerWin, Self::Tie];

    /// Tally label: `Player`, `Computer` or `Tie`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PlayerWin => "Player",
            Self::DealerWin => "Computer",
            Self::Tie => "Tie",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a round came to be settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Settlement {
    /// At least one side was dealt a natural blackjack.
    Natural,
    /// The player went over 21.
    PlayerBust,
    /// The dealer went over 21.
    DealerBust,
    /// Both stood at 21 or less and the scores were compared.
    Comparison,
}

/// Result of a settled round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    /// Who won.
    pub outcome: Outcome,
    /// How the round was decided.
    pub settlement: Settlement,
    /// The player's final hand value.
    pub player_value: u8,
    /// The dealer's final hand value.
    pub dealer_value: u8,
}

impl RoundResult {
    /// Human-readable summary of the result.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match (self.settlement, self.outcome) {
            (Settlement::Natural, Outcome::Tie) => "Both have blackjack! It's a tie!",
            (Settlement::Natural, Outcome::PlayerWin) => "Blackjack! Player wins!",
            (Settlement::Natural, Outcome::DealerWin) => "Dealer has blackjack! Dealer wins!",
            (Settlement::PlayerBust, _) => "Player busted! Dealer wins.",
            (Settlement::DealerBust, _) => "Dealer busted! Player wins!",
            (Settlement::Comparison, Outcome::PlayerWin) => "Player wins with the higher score!",
            (Settlement::Comparison, Outcome::DealerWin) => "Dealer wins with the higher score!",
            (Settlement::Comparison, Outcome::Tie) => "It's a tie! Push.",
        }
    }
}

impl fmt::Display for RoundResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
