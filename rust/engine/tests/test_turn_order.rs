use cardroom_engine::errors::GameError;
use cardroom_engine::player::{Player, Seat};
use cardroom_engine::turn::{Direction, TurnTracker};

fn players(n: usize) -> Vec<Player> {
    (0..n)
        .map(|i| Player::from_seat(&Seat::new(format!("p{i}"), format!("Player {i}")), 100))
        .collect()
}

#[test]
fn reversed_direction_wraps_to_last_seat() {
    let ps = players(4);
    let mut t = TurnTracker::new(0);
    t.reverse();
    assert_eq!(t.direction, Direction::CounterClockwise);
    assert_eq!(t.advance(&ps).unwrap(), 3);
}

#[test]
fn folded_player_is_skipped() {
    let mut ps = players(4);
    ps[3].folded = true;
    let mut t = TurnTracker::new(2);
    assert_eq!(t.advance(&ps).unwrap(), 0);
}

#[test]
fn skip_jumps_one_live_player() {
    let mut ps = players(4);
    let mut t = TurnTracker::new(0);
    assert_eq!(t.skip(&ps).unwrap(), 2);
    ps[3].eliminated = true;
    assert_eq!(t.skip(&ps).unwrap(), 1);
}

#[test]
fn no_live_players_is_an_error() {
    let mut ps = players(2);
    ps[0].folded = true;
    ps[1].folded = true;
    let mut t = TurnTracker::new(1);
    assert_eq!(t.advance(&ps), Err(GameError::NoActivePlayers));
}
