//! Batch runner: plays many independent rounds and tallies the outcomes.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::deck::Deck;
use crate::error::RoundError;
use crate::game::Round;
use crate::options::SimulationOptions;
use crate::policy::PlayerPolicy;
use crate::result::{Outcome, RoundResult, Settlement};

/// Count of settled rounds per outcome.
///
/// Every outcome is present from the start with a count of zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    counts: HashMap<Outcome, u32>,
}

impl Tally {
    /// Creates a tally with every outcome at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            counts: Outcome::ALL.into_iter().map(|outcome| (outcome, 0)).collect(),
        }
    }

    /// Counts one settled round.
    pub fn record(&mut self, outcome: Outcome) {
        *self.counts.entry(outcome).or_insert(0) += 1;
    }

    /// Returns the count for an outcome.
    #[must_use]
    pub fn count(&self, outcome: Outcome) -> u32 {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Returns the number of rounds recorded.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Fraction of recorded rounds with this outcome, 0.0 when empty.
    #[must_use]
    pub fn share(&self, outcome: Outcome) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.count(outcome)) / f64::from(total)
    }

    /// Iterates outcomes and counts in a fixed order: player, computer, tie.
    pub fn iter(&self) -> impl Iterator<Item = (Outcome, u32)> + '_ {
        Outcome::ALL
            .into_iter()
            .map(|outcome| (outcome, self.count(outcome)))
    }

    /// Adds another tally's counts to this one.
    pub fn merge(&mut self, other: &Self) {
        for (outcome, count) in other.iter() {
            *self.counts.entry(outcome).or_insert(0) += count;
        }
    }
}

impl Default for Tally {
    fn default() -> Self {
        Self::new()
    }
}

/// Plays `rounds` rounds, each with a fresh deck and fresh hands, and tallies
/// the outcomes.
///
/// # Errors
///
/// Returns the first round error. A single deck never runs out for one player
/// and one dealer, so this does not happen in practice.
pub fn run_batch<P, R>(rounds: u32, policy: &mut P, rng: &mut R) -> Result<Tally, RoundError>
where
    P: PlayerPolicy + ?Sized,
    R: Rng + ?Sized,
{
    let mut tally = Tally::new();
    for _ in 0..rounds {
        let result = Round::new(Deck::new()).play_out(&mut *policy, rng)?;
        tally.record(result.outcome);
    }
    Ok(tally)
}

/// Outcome tally plus how the rounds were decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    /// Rounds per outcome.
    pub tally: Tally,
    /// Rounds where the player was dealt a natural.
    pub player_naturals: u32,
    /// Rounds where the dealer was dealt a natural.
    pub dealer_naturals: u32,
    /// Rounds lost by the player going over 21.
    pub player_busts: u32,
    /// Rounds won because the dealer went over 21.
    pub dealer_busts: u32,
}

impl SimulationReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tally: Tally::new(),
            player_naturals: 0,
            dealer_naturals: 0,
            player_busts: 0,
            dealer_busts: 0,
        }
    }

    /// Adds one settled round.
    pub fn record(&mut self, result: &RoundResult) {
        self.tally.record(result.outcome);
        match (result.settlement, result.outcome) {
            (Settlement::Natural, Outcome::Tie) => {
                self.player_naturals += 1;
                self.dealer_naturals += 1;
            }
            (Settlement::Natural, Outcome::PlayerWin) => self.player_naturals += 1,
            (Settlement::Natural, Outcome::DealerWin) => self.dealer_naturals += 1,
            (Settlement::PlayerBust, _) => self.player_busts += 1,
            (Settlement::DealerBust, _) => self.dealer_busts += 1,
            (Settlement::Comparison, _) => {}
        }
    }

    /// Combines two reports.
    #[must_use]
    pub fn merged(mut self, other: &Self) -> Self {
        self.tally.merge(&other.tally);
        self.player_naturals += other.player_naturals;
        self.dealer_naturals += other.dealer_naturals;
        self.player_busts += other.player_busts;
        self.dealer_busts += other.dealer_busts;
        self
    }

    /// Number of rounds in the report.
    #[must_use]
    pub fn rounds(&self) -> u32 {
        self.tally.total()
    }
}

impl Default for SimulationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Seeded, reproducible batch runner.
///
/// Round `i` draws from its own ChaCha8 stream `i` under the configured
/// seed, so a report depends only on the options and not on the order the
/// rounds run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Simulator {
    options: SimulationOptions,
}

impl Simulator {
    /// Creates a simulator with the given options.
    #[must_use]
    pub const fn new(options: SimulationOptions) -> Self {
        Self { options }
    }

    /// Returns the options.
    #[must_use]
    pub const fn options(&self) -> &SimulationOptions {
        &self.options
    }

    fn round_rng(&self, index: u32) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(self.options.seed);
        rng.set_stream(u64::from(index));
        rng
    }

    fn play_round(&self, index: u32) -> Result<RoundResult, RoundError> {
        let mut rng = self.round_rng(index);
        let mut round = Round::new(Deck::new());
        round.play_out(self.options.player_policy(), &mut rng)
    }

    /// Runs every round on the current thread.
    ///
    /// # Errors
    ///
    /// Returns the first round error; see [`run_batch`].
    pub fn run(&self) -> Result<SimulationReport, RoundError> {
        debug!(
            rounds = self.options.rounds,
            seed = self.options.seed,
            stands_on = self.options.player_stands_on,
            "running simulation"
        );
        let mut report = SimulationReport::new();
        for index in 0..self.options.rounds {
            report.record(&self.play_round(index)?);
        }
        Ok(report)
    }

    /// Runs the rounds on the rayon thread pool. Produces the same report as
    /// [`Simulator::run`].
    ///
    /// # Errors
    ///
    /// Returns a round error if any round fails.
    #[cfg(feature = "parallel")]
    pub fn run_parallel(&self) -> Result<SimulationReport, RoundError> {
        use rayon::prelude::*;

        debug!(
            rounds = self.options.rounds,
            seed = self.options.seed,
            threads = rayon::current_num_threads(),
            "running parallel simulation"
        );
        (0..self.options.rounds)
            .into_par_iter()
            .map(|index| self.play_round(index))
            .try_fold(SimulationReport::new, |mut report, result| {
                report.record(&result?);
                Ok(report)
            })
            .try_reduce(SimulationReport::new, |a, b| Ok(a.merged(&b)))
    }
}
