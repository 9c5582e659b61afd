/// Rejections reach the log with their structured fields
use cardroom_engine::action::Action;
use cardroom_engine::game::GameKind;
use cardroom_engine::player::Seat;
use cardroom_room::{init_test_logging, EventBus, RoomRegistry};
use std::sync::Arc;
use tracing::Level;

#[test]
fn rejected_action_is_logged_as_warning() {
    let logs = init_test_logging();
    let rooms = RoomRegistry::new(Arc::new(EventBus::new()));
    let room = rooms.create_room().unwrap();
    let seats = vec![Seat::new("a", "Ann"), Seat::new("b", "Bob")];
    rooms
        .begin_round_seeded(&room, GameKind::Blackjack, &seats, 2)
        .unwrap();

    rooms
        .apply_action(&room, &"ghost".into(), Action::Hit)
        .unwrap_err();

    let entries = logs.entries();
    let started = entries
        .iter()
        .find(|e| e.message == "round started" && e.field("room_id") == Some(room.as_str()))
        .expect("round start logged");
    assert_eq!(started.level, Level::INFO);
    assert_eq!(started.field("seed"), Some("2"));

    let rejected = entries
        .iter()
        .find(|e| e.message == "action rejected" && e.field("room_id") == Some(room.as_str()))
        .expect("rejection logged");
    assert_eq!(rejected.level, Level::WARN);
    assert_eq!(rejected.field("player_id"), Some("ghost"));
    assert_eq!(rejected.field("action"), Some("hit"));
}
