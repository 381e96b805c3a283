//! Round integration tests.

use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use twentyone::{
    ActionError, Card, CardFace, DECK_SIZE, DealError, DealerError, DealerHand, Deck, Decision,
    HIDDEN_CARD_CODE, Hand, Outcome, PlayerPolicy, Rank, Round, RoundState, Settlement,
    ThresholdPolicy,
};

fn card(code: &str) -> Card {
    code.parse().unwrap()
}

fn cards(codes: &[&str]) -> Vec<Card> {
    codes.iter().map(|code| card(code)).collect()
}

/// A round already dealt, with the deck restricted to `remaining`.
fn round(player: &[&str], dealer: &[&str], remaining: &[&str]) -> Round {
    try_round(player, dealer, remaining).unwrap()
}

fn try_round(player: &[&str], dealer: &[&str], remaining: &[&str]) -> Result<Round, DealError> {
    Round::from_hands(
        Deck::from_cards(cards(remaining)),
        Hand::from_cards(cards(player)),
        DealerHand::from_cards(cards(dealer)),
    )
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

/// Replays a fixed list of decisions, then stands.
struct Scripted(Vec<Decision>);

impl PlayerPolicy for Scripted {
    fn decide(&mut self, _hand: &Hand, _dealer_up: Card) -> Decision {
        if self.0.is_empty() {
            Decision::Stand
        } else {
            self.0.remove(0)
        }
    }
}

#[test]
fn player_natural_wins_without_dealer_drawing() {
    let round = round(&["sa", "sk"], &["h7", "h9"], &["c5", "c6"]);

    assert_eq!(round.state(), RoundState::Settled);
    let result = round.result().unwrap();
    assert_eq!(result.outcome, Outcome::PlayerWin);
    assert_eq!(result.settlement, Settlement::Natural);
    assert_eq!(result.player_value, 21);
    assert_eq!(result.dealer_value, 16);
    assert_eq!(round.dealer_hand().len(), 2);
    assert_eq!(round.cards_remaining(), 2);
}

#[test]
fn dealer_natural_wins() {
    let round = round(&["s9", "s8"], &["ha", "hq"], &[]);
    assert_eq!(round.outcome(), Some(Outcome::DealerWin));
    assert_eq!(round.result().unwrap().settlement, Settlement::Natural);
}

#[test]
fn double_natural_is_a_tie() {
    let round = round(&["sa", "sj"], &["ha", "h10"], &[]);
    assert_eq!(round.outcome(), Some(Outcome::Tie));
}

#[test]
fn player_stands_on_18_and_dealer_draws_to_19() {
    let mut round = round(&["s10", "s8"], &["h10", "h2"], &["c7"]);
    let mut rng = rng();

    assert_eq!(round.state(), RoundState::PlayerTurn);
    round.stand().unwrap();
    assert_eq!(round.state(), RoundState::DealerTurn);

    let drawn = round.dealer_play(&mut rng).unwrap();
    assert_eq!(drawn, cards(&["c7"]));

    let result = round.result().unwrap();
    assert_eq!(result.outcome, Outcome::DealerWin);
    assert_eq!(result.settlement, Settlement::Comparison);
    assert_eq!(result.player_value, 18);
    assert_eq!(result.dealer_value, 19);
}

#[test]
fn dealer_draws_until_seventeen() {
    let mut round = round(&["s10", "s9"], &["h2", "h3"], &["s4", "c4", "h4", "d4"]);
    let mut rng = rng();

    round.stand().unwrap();
    let drawn = round.dealer_play(&mut rng).unwrap();

    assert_eq!(drawn.len(), 3);
    assert_eq!(round.dealer_hand().value(), 17);
    assert_eq!(round.cards_remaining(), 1);
    assert_eq!(round.outcome(), Some(Outcome::PlayerWin));
}

#[test]
fn dealer_stands_on_soft_seventeen() {
    let mut round = round(&["s10", "s8"], &["ha", "h6"], &["c5"]);
    let mut rng = rng();

    round.stand().unwrap();
    let drawn = round.dealer_play(&mut rng).unwrap();

    assert!(drawn.is_empty());
    assert_eq!(round.outcome(), Some(Outcome::PlayerWin));
}

#[test]
fn dealer_bust_pays_player() {
    let mut round = round(&["s10", "s9"], &["h10", "h6"], &["ck"]);
    let mut rng = rng();

    round.stand().unwrap();
    round.dealer_play(&mut rng).unwrap();

    let result = round.result().unwrap();
    assert_eq!(result.outcome, Outcome::PlayerWin);
    assert_eq!(result.settlement, Settlement::DealerBust);
    assert_eq!(result.dealer_value, 26);
}

#[test]
fn player_bust_settles_immediately() {
    let mut round = round(&["s10", "s6"], &["h10", "h2"], &["ck"]);
    let mut rng = rng();

    let drawn = round.hit(&mut rng).unwrap();
    assert_eq!(drawn, card("ck"));

    let result = round.result().unwrap();
    assert_eq!(result.outcome, Outcome::DealerWin);
    assert_eq!(result.settlement, Settlement::PlayerBust);
    assert_eq!(round.dealer_hand().len(), 2);
    assert_eq!(
        round.dealer_play(&mut rng).unwrap_err(),
        DealerError::InvalidState
    );
}

#[test]
fn hitting_to_21_ends_the_player_turn() {
    let mut round = round(&["s10", "s6"], &["h10", "h6"], &["c5", "d5"]);
    let mut rng = rng();

    round.hit(&mut rng).unwrap();
    assert_eq!(round.player_hand().value(), 21);
    assert_eq!(round.state(), RoundState::DealerTurn);
    assert_eq!(round.stand().unwrap_err(), ActionError::InvalidState);

    round.dealer_play(&mut rng).unwrap();
    assert_eq!(round.outcome(), Some(Outcome::Tie));
}

#[test]
fn actions_on_wrong_state_leave_round_untouched() {
    let mut rng = rng();

    let mut settled = round(&["sa", "sk"], &["h7", "h9"], &["c5"]);
    let before = settled.clone();
    assert_eq!(settled.hit(&mut rng).unwrap_err(), ActionError::InvalidState);
    assert_eq!(settled.stand().unwrap_err(), ActionError::InvalidState);
    assert_eq!(settled, before);

    let mut undealt = Round::new(Deck::new());
    assert_eq!(undealt.hit(&mut rng).unwrap_err(), ActionError::InvalidState);
    assert_eq!(
        undealt.dealer_play(&mut rng).unwrap_err(),
        DealerError::InvalidState
    );
}

#[test]
fn hit_with_empty_deck_returns_error() {
    let mut round = round(&["s10", "s6"], &["h10", "h2"], &[]);
    let mut rng = rng();

    assert_eq!(round.hit(&mut rng).unwrap_err(), ActionError::NoCards);
    assert_eq!(round.player_hand().len(), 2);
    assert_eq!(round.state(), RoundState::PlayerTurn);

    round.stand().unwrap();
    let before = round.clone();
    assert_eq!(
        round.dealer_play(&mut rng).unwrap_err(),
        DealerError::NoCards
    );
    assert_eq!(round, before);
    assert_eq!(round.state(), RoundState::DealerTurn);
    assert!(!round.dealer_hand().is_hole_revealed());
    assert_eq!(round.result(), None);
}

#[test]
fn dealer_running_out_mid_turn_keeps_the_deck() {
    // 12 + 2 = 14 still has to draw, and the deck is then empty.
    let mut round = round(&["s10", "s8"], &["h10", "h2"], &["c2"]);
    let mut rng = rng();
    round.stand().unwrap();
    let before = round.clone();

    assert_eq!(
        round.dealer_play(&mut rng).unwrap_err(),
        DealerError::NoCards
    );
    assert_eq!(round, before);
    assert_eq!(round.cards_remaining(), 1);
    assert_eq!(round.dealer_hand().len(), 2);
}

#[test]
fn resumed_hands_must_hold_two_cards_each() {
    assert_eq!(
        try_round(&["sk", "sq", "s5"], &["h10", "h7"], &[]).unwrap_err(),
        DealError::InvalidHands
    );
    assert_eq!(
        try_round(&["s7", "h7", "d7"], &["h10", "h9"], &[]).unwrap_err(),
        DealError::InvalidHands
    );
    assert_eq!(
        try_round(&["s10", "s6"], &["h10"], &[]).unwrap_err(),
        DealError::InvalidHands
    );
    assert_eq!(
        try_round(&[], &[], &["s2"]).unwrap_err(),
        DealError::InvalidHands
    );
}

#[test]
fn resumed_round_rejects_repeated_cards() {
    assert_eq!(
        try_round(&["s2", "s2"], &["h10", "h7"], &[]).unwrap_err(),
        DealError::DuplicateCard
    );
    assert_eq!(
        try_round(&["s2", "s3"], &["s3", "h7"], &[]).unwrap_err(),
        DealError::DuplicateCard
    );
    assert_eq!(
        try_round(&["s2", "s3"], &["h10", "h7"], &["c4", "s2"]).unwrap_err(),
        DealError::DuplicateCard
    );
    assert!(try_round(&["s2", "s3"], &["h10", "h7"], &["c4", "d2"]).is_ok());
}

#[test]
fn triple_ace_then_nine_is_twelve_not_bust() {
    let remaining = ["da", "s9"];
    // A seed whose first draw is the third Ace.
    let mut rng = (0..)
        .map(ChaCha8Rng::seed_from_u64)
        .find(|rng| {
            Deck::from_cards(cards(&remaining)).draw(&mut rng.clone()) == Some(card("da"))
        })
        .unwrap();
    let mut round = round(&["sa", "ha"], &["h10", "h7"], &remaining);

    round.hit(&mut rng).unwrap();
    round.hit(&mut rng).unwrap();
    assert_eq!(round.player_hand().len(), 4);
    assert_eq!(round.player_hand().value(), 12);
    assert_eq!(round.state(), RoundState::PlayerTurn);
}

#[test]
fn deal_errors() {
    let mut rng = rng();

    let mut short = Round::new(Deck::from_cards(cards(&["s2", "s3", "s4"])));
    assert_eq!(short.deal(&mut rng).unwrap_err(), DealError::NotEnoughCards);
    assert_eq!(short.state(), RoundState::Dealing);
    assert_eq!(short.cards_remaining(), 3);

    let mut round = Round::start(&mut rng).unwrap();
    assert_eq!(round.deal(&mut rng).unwrap_err(), DealError::InvalidState);
}

#[test]
fn deal_gives_two_cards_each_from_the_deck() {
    let mut rng = rng();
    let round = Round::start(&mut rng).unwrap();

    assert_eq!(round.player_hand().len(), 2);
    assert_eq!(round.dealer_hand().len(), 2);
    assert_eq!(round.cards_remaining(), DECK_SIZE - 4);
    for dealt in round
        .player_hand()
        .cards()
        .iter()
        .chain(round.dealer_hand().cards())
    {
        assert!(!round.deck().contains(dealt));
    }
}

#[test]
fn view_hides_hole_card_until_settled() {
    let mut round = round(&["s10", "s8"], &["h10", "h2"], &["c7"]);
    let mut rng = rng();

    let view = round.view();
    assert_eq!(view.player_value, 18);
    assert_eq!(
        view.dealer_cards,
        vec![CardFace::Up(card("h10")), CardFace::Down]
    );
    assert_eq!(view.dealer_cards[1].code(), HIDDEN_CARD_CODE);
    assert_eq!(view.dealer_value, None);
    assert_eq!(view.result, None);

    round.stand().unwrap();
    assert_eq!(round.view().dealer_value, None);

    round.dealer_play(&mut rng).unwrap();
    let view = round.view();
    assert_eq!(view.state, RoundState::Settled);
    assert_eq!(view.dealer_value, Some(19));
    assert!(view.dealer_cards.iter().all(|face| matches!(face, CardFace::Up(_))));
    assert_eq!(view.dealer_cards.len(), 3);
    assert!(view.result.is_some());
}

#[test]
fn apply_routes_decisions() {
    let mut round = round(&["s2", "s3"], &["h10", "h7"], &["c4", "c5"]);
    let mut rng = rng();

    let drawn = round.apply(Decision::Hit, &mut rng).unwrap();
    assert!(drawn.is_some());
    assert_eq!(round.apply(Decision::Stand, &mut rng).unwrap(), None);
    assert_eq!(round.state(), RoundState::DealerTurn);
}

#[test]
fn play_out_follows_the_policy() {
    let mut round = round(&["s2", "s3"], &["h10", "h7"], &["c4", "d4", "h4"]);
    let mut rng = rng();

    let result = round
        .play_out(Scripted(vec![Decision::Hit, Decision::Hit]), &mut rng)
        .unwrap();

    assert_eq!(round.player_hand().value(), 13);
    assert_eq!(result.outcome, Outcome::DealerWin);
    assert_eq!(result.dealer_value, 17);
    assert_eq!(round.cards_remaining(), 1);
}

#[test]
fn seeded_rounds_are_reproducible() {
    let a = Round::play(ThresholdPolicy::default(), &mut rng()).unwrap();
    let b = Round::play(ThresholdPolicy::default(), &mut rng()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn many_rounds_respect_the_invariants() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    for stand_on in [12, 17, 21] {
        for _ in 0..500 {
            let round = Round::play(ThresholdPolicy::new(stand_on), &mut rng).unwrap();
            let result = round.result().unwrap();
            let player = round.player_hand();
            let dealer = round.dealer_hand();

            let all: HashSet<Card> = player
                .cards()
                .iter()
                .chain(dealer.cards())
                .chain(round.deck().cards())
                .copied()
                .collect();
            assert_eq!(all.len(), DECK_SIZE);
            assert_eq!(
                player.len() + dealer.len() + round.cards_remaining(),
                DECK_SIZE
            );

            match result.settlement {
                Settlement::Natural => {
                    assert_eq!(player.len(), 2);
                    assert_eq!(dealer.len(), 2);
                    assert!(player.value() == 21 || dealer.value() == 21);
                }
                Settlement::PlayerBust => {
                    assert!(player.value() > 21);
                    assert_eq!(dealer.len(), 2);
                    assert_eq!(result.outcome, Outcome::DealerWin);
                }
                Settlement::DealerBust => {
                    assert!(player.value() <= 21);
                    assert!(dealer.value() > 21);
                    assert_eq!(result.outcome, Outcome::PlayerWin);
                }
                Settlement::Comparison => {
                    assert!(player.value() <= 21);
                    assert!((17..=21).contains(&dealer.value()));
                    let expected = match player.value().cmp(&dealer.value()) {
                        core::cmp::Ordering::Greater => Outcome::PlayerWin,
                        core::cmp::Ordering::Less => Outcome::DealerWin,
                        core::cmp::Ordering::Equal => Outcome::Tie,
                    };
                    assert_eq!(result.outcome, expected);
                }
            }

            if !matches!(
                result.settlement,
                Settlement::Natural | Settlement::PlayerBust
            ) && player.value() < 21
            {
                assert!(player.value() >= stand_on);
            }
        }
    }
}

#[test]
fn ace_ranks_in_hands_score_softly() {
    let hand = Hand::from_cards(cards(&["sa", "ha", "da"]));
    assert_eq!(hand.value(), 13);
    assert!(hand.is_soft());
    assert_eq!(card("ca").rank, Rank::Ace);
}
