//! Simulation configuration options.
//!
//! The table rules themselves are fixed (single deck, dealer stands on 17);
//! only the batch run is configurable.

use crate::policy::{DEALER_STANDS_ON, ThresholdPolicy};

/// Configuration for a batch of simulated rounds.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use twentyone::SimulationOptions;
///
/// let options = SimulationOptions::default()
///     .with_rounds(10_000)
///     .with_seed(42)
///     .with_player_stands_on(15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationOptions {
    /// Number of rounds to play.
    pub rounds: u32,
    /// Seed for the random source. Equal seeds give equal tallies.
    pub seed: u64,
    /// Score at which the automated player stands.
    pub player_stands_on: u8,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            rounds: 1000,
            seed: 0,
            player_stands_on: DEALER_STANDS_ON,
        }
    }
}

impl SimulationOptions {
    /// Sets the number of rounds.
    ///
    /// # Example
    ///
    /// ```
    /// use twentyone::SimulationOptions;
    ///
    /// let options = SimulationOptions::default().with_rounds(500);
    /// assert_eq!(options.rounds, 500);
    /// ```
    #[must_use]
    pub const fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Sets the seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the score at which the automated player stands.
    ///
    /// # Example
    ///
    /// ```
    /// use twentyone::SimulationOptions;
    ///
    /// let options = SimulationOptions::default().with_player_stands_on(12);
    /// assert_eq!(options.player_stands_on, 12);
    /// ```
    #[must_use]
    pub const fn with_player_stands_on(mut self, score: u8) -> Self {
        self.player_stands_on = score;
        self
    }

    /// The automated player policy these options describe.
    #[must_use]
    pub const fn player_policy(&self) -> ThresholdPolicy {
        ThresholdPolicy::new(self.player_stands_on)
    }
}
