//! Round controller.

use rand::Rng;
use tracing::debug;

use crate::card::Card;
use crate::deck::Deck;
use crate::error::{DealError, DealerError, RoundError};
use crate::hand::{DealerHand, Hand};
use crate::policy::PlayerPolicy;
use crate::result::{Outcome, RoundResult, Settlement};

mod actions;
mod dealer;
pub mod state;
pub mod view;

pub use state::RoundState;
pub use view::{CardFace, TableView};

/// One round of blackjack between the player and the dealer.
///
/// The round owns its deck and both hands. It holds no hidden global state:
/// an adapter can keep a `Round` between requests and call the next
/// operation on it, and a fresh `Round` starts with a fresh deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    /// Cards not yet dealt.
    deck: Deck,
    /// The player's hand.
    player: Hand,
    /// The dealer's hand.
    dealer: DealerHand,
    /// Current round state.
    state: RoundState,
    /// Set once the round is settled.
    result: Option<RoundResult>,
}

impl Round {
    /// Creates an undealt round drawing from `deck`.
    #[must_use]
    pub const fn new(deck: Deck) -> Self {
        Self {
            deck,
            player: Hand::new(),
            dealer: DealerHand::new(),
            state: RoundState::Dealing,
            result: None,
        }
    }

    /// Creates a round with a full deck and deals it.
    ///
    /// # Example
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    /// use twentyone::{Round, RoundState};
    ///
    /// let mut rng = ChaCha8Rng::seed_from_u64(7);
    /// let round = Round::start(&mut rng).unwrap();
    /// assert_ne!(round.state(), RoundState::Dealing);
    /// assert_eq!(round.player_hand().len(), 2);
    /// ```
    ///
    /// # Errors
    ///
    /// Never fails with a full deck; the error type is shared with
    /// [`Round::deal`].
    pub fn start<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, DealError> {
        let mut round = Self::new(Deck::new());
        round.deal(rng)?;
        Ok(round)
    }

    /// Resumes a round from hands that were already dealt, then checks for
    /// naturals exactly as [`Round::deal`] does.
    ///
    /// `deck` holds the cards not present in either hand.
    ///
    /// # Errors
    ///
    /// Returns [`DealError::InvalidHands`] unless both hands hold exactly two
    /// cards, and [`DealError::DuplicateCard`] if a card appears twice across
    /// the hands or in both a hand and the deck.
    pub fn from_hands(deck: Deck, player: Hand, dealer: DealerHand) -> Result<Self, DealError> {
        if player.len() != 2 || dealer.len() != 2 {
            return Err(DealError::InvalidHands);
        }

        let dealt = [player.cards(), dealer.cards()].concat();
        for (index, card) in dealt.iter().enumerate() {
            if dealt[index + 1..].contains(card) || deck.contains(card) {
                return Err(DealError::DuplicateCard);
            }
        }

        let mut round = Self {
            deck,
            player,
            dealer,
            state: RoundState::Dealing,
            result: None,
        };
        round.check_naturals();
        Ok(round)
    }

    /// Deals two cards each, alternating player then dealer, then checks for
    /// naturals.
    ///
    /// # Errors
    ///
    /// Returns an error if the round was already dealt or the deck holds
    /// fewer than four cards. The round is left untouched on error.
    pub fn deal<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), DealError> {
        if self.state != RoundState::Dealing {
            return Err(DealError::InvalidState);
        }
        if self.deck.len() < 4 {
            return Err(DealError::NotEnoughCards);
        }

        for _ in 0..2 {
            let card = self.deck.draw(rng).ok_or(DealError::NotEnoughCards)?;
            self.player.add_card(card);
            let card = self.deck.draw(rng).ok_or(DealError::NotEnoughCards)?;
            self.dealer.add_card(card);
        }

        debug!(
            player_value = self.player.value(),
            up_card = ?self.dealer.up_card(),
            "dealt round"
        );

        self.check_naturals();
        Ok(())
    }

    /// Plays a whole round with a fresh deck, taking player decisions from
    /// `policy`.
    ///
    /// # Errors
    ///
    /// Only fails if the deck runs out, which a single deck cannot do for one
    /// player and one dealer.
    pub fn play<P, R>(policy: P, rng: &mut R) -> Result<Self, RoundError>
    where
        P: PlayerPolicy,
        R: Rng + ?Sized,
    {
        let mut round = Self::new(Deck::new());
        round.play_out(policy, rng)?;
        Ok(round)
    }

    /// Drives this round from its current state to settlement.
    ///
    /// # Errors
    ///
    /// Returns an error if the deck runs out mid-round.
    pub fn play_out<P, R>(&mut self, mut policy: P, rng: &mut R) -> Result<RoundResult, RoundError>
    where
        P: PlayerPolicy,
        R: Rng + ?Sized,
    {
        if self.state == RoundState::Dealing {
            self.deal(rng)?;
        }

        while self.state == RoundState::PlayerTurn {
            let Some(&up_card) = self.dealer.up_card() else {
                return Err(DealerError::InvalidState.into());
            };
            let decision = policy.decide(&self.player, up_card);
            self.apply(decision, rng)?;
        }

        if self.state == RoundState::DealerTurn {
            self.dealer_play(rng)?;
        }

        self.result.ok_or(RoundError::Dealer(DealerError::InvalidState))
    }

    /// Settles on naturals, or hands the turn to the player.
    fn check_naturals(&mut self) {
        let player_natural = self.player.is_blackjack();
        let dealer_natural = self.dealer.is_blackjack();

        match (player_natural, dealer_natural) {
            (true, true) => self.settle(Outcome::Tie, Settlement::Natural),
            (true, false) => self.settle(Outcome::PlayerWin, Settlement::Natural),
            (false, true) => self.settle(Outcome::DealerWin, Settlement::Natural),
            (false, false) => self.state = RoundState::PlayerTurn,
        }
    }

    /// Records the result and reveals the dealer's hand.
    fn settle(&mut self, outcome: Outcome, settlement: Settlement) {
        self.dealer.reveal_hole();
        let result = RoundResult {
            outcome,
            settlement,
            player_value: self.player.value(),
            dealer_value: self.dealer.value(),
        };
        debug!(
            ?outcome,
            ?settlement,
            player_value = result.player_value,
            dealer_value = result.dealer_value,
            "round settled"
        );
        self.result = Some(result);
        self.state = RoundState::Settled;
    }

    /// Returns the current round state.
    #[must_use]
    pub const fn state(&self) -> RoundState {
        self.state
    }

    /// Returns whether the round has a result.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self.state, RoundState::Settled)
    }

    /// Returns the result once the round is settled.
    #[must_use]
    pub const fn result(&self) -> Option<RoundResult> {
        self.result
    }

    /// Returns the outcome once the round is settled.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.result.map(|result| result.outcome)
    }

    /// Returns the player's hand.
    #[must_use]
    pub const fn player_hand(&self) -> &Hand {
        &self.player
    }

    /// Returns the dealer's hand.
    #[must_use]
    pub const fn dealer_hand(&self) -> &DealerHand {
        &self.dealer
    }

    /// Returns the dealer's up card, if dealt.
    #[must_use]
    pub fn dealer_up_card(&self) -> Option<Card> {
        self.dealer.up_card().copied()
    }

    /// Returns the undealt cards.
    #[must_use]
    pub const fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Returns the number of cards remaining in the deck.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.deck.len()
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::new(Deck::new())
    }
}
