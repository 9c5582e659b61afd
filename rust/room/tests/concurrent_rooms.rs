/// Races on the room gate from several threads
use cardroom_engine::action::Action;
use cardroom_engine::game::GameKind;
use cardroom_engine::player::Seat;
use cardroom_room::{EventBus, RoomRegistry};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

fn seats() -> Vec<Seat> {
    vec![Seat::new("a", "Ann"), Seat::new("b", "Bob")]
}

#[test]
fn two_clients_claiming_one_turn_apply_once() {
    let rooms = Arc::new(RoomRegistry::new(Arc::new(EventBus::new())));
    let room = rooms.create_room().unwrap();
    rooms
        .begin_round_seeded(&room, GameKind::Poker, &seats(), 17)
        .unwrap();

    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let rooms = Arc::clone(&rooms);
                let room = room.clone();
                s.spawn(move || rooms.apply_action(&room, &"a".into(), Action::Check))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert_eq!(err.code(), "invalid_turn");
    }
    assert_eq!(rooms.round_record(&room).unwrap().actions.len(), 1);
    let state = rooms.snapshot(&room).unwrap();
    assert_eq!(state.current_player().unwrap().id.as_str(), "b");
}

#[test]
fn rooms_progress_independently() {
    let rooms = Arc::new(RoomRegistry::new(Arc::new(EventBus::new())));
    let ids: Vec<_> = (0..10).map(|_| rooms.create_room().unwrap()).collect();
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());

    thread::scope(|s| {
        for (i, room) in ids.iter().enumerate() {
            let rooms = Arc::clone(&rooms);
            s.spawn(move || {
                rooms
                    .begin_round_seeded(room, GameKind::Poker, &seats(), i as u64)
                    .unwrap();
                rooms.apply_action(room, &"a".into(), Action::Fold).unwrap();
            });
        }
    });

    for room in &ids {
        let state = rooms.snapshot(room).unwrap();
        assert!(state.is_finished());
        assert_eq!(state.winner.as_ref().unwrap().as_str(), "b");
    }
}
