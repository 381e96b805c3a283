//! Batch runner integration tests.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use twentyone::{Outcome, SimulationOptions, Simulator, ThresholdPolicy, run_batch};

#[test]
fn thousand_rounds_sum_to_thousand() {
    let report = Simulator::new(SimulationOptions::default()).run().unwrap();

    assert_eq!(report.rounds(), 1000);
    let total: u32 = report.tally.iter().map(|(_, count)| count).sum();
    assert_eq!(total, 1000);
    assert_eq!(
        report.tally.count(Outcome::PlayerWin)
            + report.tally.count(Outcome::DealerWin)
            + report.tally.count(Outcome::Tie),
        1000
    );
}

#[test]
fn run_batch_with_injected_rng() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut policy = ThresholdPolicy::default();
    let tally = run_batch(1000, &mut policy, &mut rng).unwrap();
    assert_eq!(tally.total(), 1000);

    let mut again = ChaCha8Rng::seed_from_u64(5);
    assert_eq!(run_batch(1000, &mut policy, &mut again).unwrap(), tally);
}

#[test]
fn same_seed_same_report() {
    let options = SimulationOptions::default().with_rounds(300).with_seed(9);
    let a = Simulator::new(options).run().unwrap();
    let b = Simulator::new(options).run().unwrap();
    assert_eq!(a, b);
}

#[test]
fn zero_rounds_gives_empty_tally() {
    let report = Simulator::new(SimulationOptions::default().with_rounds(0))
        .run()
        .unwrap();
    assert_eq!(report.rounds(), 0);
    for (_, count) in report.tally.iter() {
        assert_eq!(count, 0);
    }
}

#[test]
fn player_that_never_hits_never_busts() {
    let options = SimulationOptions::default()
        .with_rounds(500)
        .with_player_stands_on(0);
    let report = Simulator::new(options).run().unwrap();
    assert_eq!(report.player_busts, 0);
    assert_eq!(report.rounds(), 500);
}

#[test]
fn player_that_always_hits_busts_often() {
    let options = SimulationOptions::default()
        .with_rounds(500)
        .with_player_stands_on(22);
    let report = Simulator::new(options).run().unwrap();
    assert!(report.player_busts > 0);
    assert!(report.player_busts <= report.tally.count(Outcome::DealerWin));
}

#[test]
fn shares_sum_to_one() {
    let report = Simulator::new(SimulationOptions::default().with_seed(1))
        .run()
        .unwrap();
    let sum: f64 = Outcome::ALL
        .into_iter()
        .map(|outcome| report.tally.share(outcome))
        .sum();
    assert!((sum - 1.0).abs() < 1e-9);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_run_matches_sequential() {
    let options = SimulationOptions::default().with_rounds(2000).with_seed(77);
    let simulator = Simulator::new(options);
    assert_eq!(simulator.run_parallel().unwrap(), simulator.run().unwrap());
}
