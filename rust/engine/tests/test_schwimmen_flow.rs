use cardroom_engine::action::Action;
use cardroom_engine::cards::{parse_cards, Card};
use cardroom_engine::engine::{apply_action, begin_round};
use cardroom_engine::game::{GameKind, GameState, GameStatus, Variant};
use cardroom_engine::player::{PlayerId, Seat};
use cardroom_engine::rules::{RoundConfig, RuleOptions};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

fn pid(i: usize) -> PlayerId {
    PlayerId::new(format!("p{i}"))
}

fn rigged(hands: &[&str], table: &str, rules: RuleOptions) -> (GameState, ChaCha20Rng) {
    let seats: Vec<Seat> = (0..hands.len())
        .map(|i| Seat::new(format!("p{i}"), format!("Player {i}")))
        .collect();
    let config = RoundConfig {
        rules,
        ..RoundConfig::default()
    };
    let mut rng = ChaCha20Rng::seed_from_u64(4);
    let mut state = begin_round(GameKind::Schwimmen, &seats, config, 1, &mut rng).unwrap();
    for (p, h) in state.players.iter_mut().zip(hands) {
        p.hand = cards(h);
    }
    state.pile = cards(table);
    (state, rng)
}

#[test]
fn deal_gives_three_cards_and_three_on_the_table() {
    let seats: Vec<Seat> = (0..4).map(|i| Seat::new(format!("p{i}"), "x")).collect();
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let state =
        begin_round(GameKind::Schwimmen, &seats, RoundConfig::default(), 1, &mut rng).unwrap();
    assert!(state.players.iter().all(|p| p.hand.len() == 3));
    assert_eq!(state.pile.len(), 3);
    assert_eq!(state.deck.len(), 52 - 15);
}

#[test]
fn single_swap_exchanges_one_card() {
    let (mut state, mut rng) = rigged(&["2c 3d 4h", "5c 6d 8h"], "As Ks Qs", RuleOptions::default());
    apply_action(&mut state, &pid(0), &Action::swap_one(1, 2), &mut rng).unwrap();
    let hand: Vec<_> = state.players[0].hand.iter().map(|c| c.to_string()).collect();
    assert_eq!(hand, ["2♣", "Q♠", "4♥"]);
    assert_eq!(state.pile[2].to_string(), "3♦");
    assert_eq!(state.turn.current, 1);
}

#[test]
fn full_swap_exchanges_the_whole_hand() {
    let (mut state, mut rng) = rigged(&["2c 3d 4h", "5c 6d 8h"], "As Ks Qs", RuleOptions::default());
    apply_action(&mut state, &pid(0), &Action::swap_all(), &mut rng).unwrap();
    assert!(state.players[0].hand.iter().all(|c| c.suit == cardroom_engine::cards::Suit::Spades));
    assert_eq!(state.pile.len(), 3);
    assert_eq!(state.pile[0].to_string(), "2♣");
}

#[test]
fn half_specified_swap_is_malformed() {
    let (mut state, mut rng) = rigged(&["2c 3d 4h", "5c 6d 8h"], "As Ks Qs", RuleOptions::default());
    let swap = Action::Swap {
        hand_index: Some(0),
        table_index: None,
    };
    let err = apply_action(&mut state, &pid(0), &swap, &mut rng).unwrap_err();
    assert_eq!(err.code(), "malformed_action");
    let err = apply_action(&mut state, &pid(0), &Action::swap_one(3, 0), &mut rng).unwrap_err();
    assert_eq!(err.code(), "malformed_action");
}

#[test]
fn knock_ends_the_round_when_play_returns() {
    let (mut state, mut rng) = rigged(
        &["Ac Kc 9c", "2d 3h 5s", "Qh Jh 4d"],
        "7s 8d 9h",
        RuleOptions::default(),
    );
    apply_action(&mut state, &pid(0), &Action::Knock, &mut rng).unwrap();
    let err = apply_action(&mut state, &pid(1), &Action::Knock, &mut rng).unwrap_err();
    assert_eq!(err.code(), "illegal_action");

    apply_action(&mut state, &pid(1), &Action::swap_one(0, 0), &mut rng).unwrap();
    assert_eq!(state.status, GameStatus::Playing);
    apply_action(&mut state, &pid(2), &Action::swap_one(2, 2), &mut rng).unwrap();

    assert_eq!(state.status, GameStatus::Finished);
    assert_eq!(state.winner, Some(pid(0)));
    match &state.variant {
        Variant::Schwimmen(sw) => {
            assert_eq!(sw.scores.len(), 3);
            assert_eq!(sw.scores[0].score, 33.0);
            // p1 holds 7s 3h 5s: spades 12
            assert_eq!(sw.scores[1].score, 12.0);
            // p2 holds Qh Jh 9h: hearts 32
            assert_eq!(sw.scores[2].score, 32.0);
            assert_eq!(sw.loser, Some(pid(1)));
        }
        other => panic!("unexpected variant {other:?}"),
    }
}

#[test]
fn fire_ends_the_round_when_enabled() {
    let rules = RuleOptions {
        schwimmen_fire_ends_round: true,
        ..RuleOptions::default()
    };
    let (mut state, mut rng) = rigged(&["7c 7d 2h", "2d 3h 5s"], "7h 8d 9h", rules);
    apply_action(&mut state, &pid(0), &Action::swap_one(2, 0), &mut rng).unwrap();
    assert_eq!(state.status, GameStatus::Finished);
    assert_eq!(state.winner, Some(pid(0)));
}

#[test]
fn fire_keeps_playing_by_default() {
    let (mut state, mut rng) = rigged(&["7c 7d 2h", "2d 3h 5s"], "7h 8d 9h", RuleOptions::default());
    apply_action(&mut state, &pid(0), &Action::swap_one(2, 0), &mut rng).unwrap();
    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.turn.current, 1);
}

#[test]
fn poker_actions_are_rejected() {
    let (mut state, mut rng) = rigged(&["7c 7d 2h", "2d 3h 5s"], "7h 8d 9h", RuleOptions::default());
    let err = apply_action(&mut state, &pid(0), &Action::Check, &mut rng).unwrap_err();
    assert_eq!(err.code(), "illegal_action");
}
