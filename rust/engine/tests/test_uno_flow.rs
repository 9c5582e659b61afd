use cardroom_engine::action::Action;
use cardroom_engine::cards::{Card, Rank, Suit};
use cardroom_engine::deck::Deck;
use cardroom_engine::engine::{apply_action, begin_round, legal_actions};
use cardroom_engine::errors::GameError;
use cardroom_engine::game::{GameKind, GameState, GameStatus, Variant};
use cardroom_engine::games::uno::UnoState;
use cardroom_engine::player::{PlayerId, Seat};
use cardroom_engine::rules::RoundConfig;
use cardroom_engine::turn::Direction;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn seats(n: usize) -> Vec<Seat> {
    (0..n)
        .map(|i| Seat::new(format!("p{i}"), format!("Player {i}")))
        .collect()
}

fn pid(i: usize) -> PlayerId {
    PlayerId::new(format!("p{i}"))
}

fn start(n: usize, seed: u64) -> (GameState, ChaCha20Rng) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let state = begin_round(GameKind::Uno, &seats(n), RoundConfig::default(), 1, &mut rng).unwrap();
    (state, rng)
}

/// Replaces the discard pile with `top` and sets the color and draw stack.
fn rig(state: &mut GameState, top: Card, pending_draw: u32) {
    state.pile = vec![top];
    state.variant = Variant::Uno(UnoState {
        color: top.suit,
        pending_draw,
    });
}

fn card(id: u16, suit: Suit, rank: Rank) -> Card {
    Card::new(1000 + id, suit, rank)
}

#[test]
fn three_player_deal_leaves_86_cards() {
    let (state, _) = start(3, 11);
    assert_eq!(state.status, GameStatus::Playing);
    assert!(state.players.iter().all(|p| p.hand.len() == 7));
    assert_eq!(state.pile.len(), 1);
    assert!(!state.pile[0].is_wild());
    assert_eq!(state.deck.len(), 86);
    assert_eq!(state.turn.current, 0);
    assert_eq!(state.winner, None);
}

#[test]
fn emptying_the_hand_wins() {
    let (mut state, mut rng) = start(3, 12);
    rig(&mut state, card(0, Suit::Red, Rank::Five), 0);
    let last = card(1, Suit::Red, Rank::Seven);
    state.players[0].hand = vec![last];
    apply_action(&mut state, &pid(0), &Action::play(last.id), &mut rng).unwrap();
    assert_eq!(state.status, GameStatus::Finished);
    assert_eq!(state.winner, Some(pid(0)));
    assert_eq!(state.top_of_pile().map(|c| c.id), Some(last.id));
}

#[test]
fn only_stacking_cards_are_playable_under_a_draw_stack() {
    let (mut state, _) = start(3, 13);
    rig(&mut state, card(0, Suit::Blue, Rank::DrawTwo), 2);
    let draw_two = card(1, Suit::Green, Rank::DrawTwo);
    let red_five = card(2, Suit::Red, Rank::Five);
    state.players[0].hand = vec![draw_two, red_five];

    let plays: Vec<Action> = legal_actions(&state, &pid(0))
        .into_iter()
        .filter(|a| matches!(a, Action::Play { .. }))
        .collect();
    assert_eq!(plays, vec![Action::play(draw_two.id)]);
}

#[test]
fn playing_off_color_is_illegal_and_does_nothing() {
    let (mut state, mut rng) = start(3, 14);
    rig(&mut state, card(0, Suit::Blue, Rank::Three), 0);
    let red_five = card(1, Suit::Red, Rank::Five);
    state.players[0].hand.push(red_five);
    let before = state.players[0].hand.len();
    let err = apply_action(&mut state, &pid(0), &Action::play(red_five.id), &mut rng).unwrap_err();
    assert!(matches!(err, GameError::IllegalCard(_)));
    assert_eq!(state.players[0].hand.len(), before);
}

#[test]
fn skip_passes_over_the_next_player() {
    let (mut state, mut rng) = start(3, 15);
    rig(&mut state, card(0, Suit::Green, Rank::Four), 0);
    let skip = card(1, Suit::Green, Rank::Skip);
    state.players[0].hand.push(skip);
    apply_action(&mut state, &pid(0), &Action::play(skip.id), &mut rng).unwrap();
    assert_eq!(state.turn.current, 2);
}

#[test]
fn reverse_flips_direction() {
    let (mut state, mut rng) = start(4, 16);
    rig(&mut state, card(0, Suit::Yellow, Rank::Four), 0);
    let reverse = card(1, Suit::Yellow, Rank::Reverse);
    state.players[0].hand.push(reverse);
    apply_action(&mut state, &pid(0), &Action::play(reverse.id), &mut rng).unwrap();
    assert_eq!(state.turn.direction, Direction::CounterClockwise);
    assert_eq!(state.turn.current, 3);
}

#[test]
fn stacked_draws_are_taken_together() {
    let (mut state, mut rng) = start(3, 17);
    rig(&mut state, card(0, Suit::Red, Rank::Nine), 0);
    let d2 = card(1, Suit::Red, Rank::DrawTwo);
    let d4 = card(2, Suit::Wild, Rank::DrawFour);
    state.players[0].hand.push(d2);
    state.players[1].hand.push(d4);

    apply_action(&mut state, &pid(0), &Action::play(d2.id), &mut rng).unwrap();
    apply_action(&mut state, &pid(1), &Action::play_wild(d4.id, Suit::Blue), &mut rng).unwrap();
    match &state.variant {
        Variant::Uno(u) => {
            assert_eq!(u.pending_draw, 6);
            assert_eq!(u.color, Suit::Blue);
        }
        other => panic!("unexpected variant {other:?}"),
    }

    let before = state.players[2].hand.len();
    apply_action(&mut state, &pid(2), &Action::Draw, &mut rng).unwrap();
    assert_eq!(state.players[2].hand.len(), before + 6);
    assert_eq!(state.turn.current, 0);
    match &state.variant {
        Variant::Uno(u) => assert_eq!(u.pending_draw, 0),
        other => panic!("unexpected variant {other:?}"),
    }
}

#[test]
fn wild_needs_a_color() {
    let (mut state, mut rng) = start(2, 18);
    rig(&mut state, card(0, Suit::Red, Rank::Nine), 0);
    let wild = card(1, Suit::Wild, Rank::Wild);
    state.players[0].hand.push(wild);
    let err = apply_action(&mut state, &pid(0), &Action::play(wild.id), &mut rng).unwrap_err();
    assert_eq!(err.code(), "malformed_action");
    let err = apply_action(&mut state, &pid(0), &Action::play_wild(wild.id, Suit::Spades), &mut rng)
        .unwrap_err();
    assert_eq!(err.code(), "malformed_action");
}

#[test]
fn acting_out_of_turn_is_rejected() {
    let (mut state, mut rng) = start(3, 19);
    let err = apply_action(&mut state, &pid(1), &Action::Draw, &mut rng).unwrap_err();
    assert_eq!(
        err,
        GameError::InvalidTurn {
            expected: "p0".into(),
            actual: "p1".into()
        }
    );
    let err = apply_action(&mut state, &pid(0), &Action::Knock, &mut rng).unwrap_err();
    assert_eq!(err.code(), "illegal_action");
}

#[test]
fn empty_deck_recycles_the_discard_pile() {
    let (mut state, mut rng) = start(2, 20);
    let pile: Vec<Card> = (0..5).map(|i| card(i, Suit::Red, Rank::Two)).collect();
    let top = pile[4];
    state.pile = pile;
    state.deck = Deck::from_cards(Vec::new());

    apply_action(&mut state, &pid(0), &Action::Draw, &mut rng).unwrap();
    assert_eq!(state.pile, vec![top]);
    assert_eq!(state.deck.len(), 3);
}

#[test]
fn exhausted_deck_without_recycling_fails() {
    let mut rng = ChaCha20Rng::seed_from_u64(21);
    let config = RoundConfig {
        reshuffle_discard: false,
        ..RoundConfig::default()
    };
    let mut state = begin_round(GameKind::Uno, &seats(2), config, 1, &mut rng).unwrap();
    state.deck = Deck::from_cards(Vec::new());
    let err = apply_action(&mut state, &pid(0), &Action::Draw, &mut rng).unwrap_err();
    assert_eq!(
        err,
        GameError::InsufficientCards {
            requested: 1,
            available: 0
        }
    );
}
