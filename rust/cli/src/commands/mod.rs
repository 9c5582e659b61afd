//! One module per subcommand. Each exposes a `handle_*_command` that writes
//! to the given streams and returns `Result<(), CliError>`.

pub mod cfg;
pub mod deal;
pub mod eval;
pub mod replay;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use replay::handle_replay_command;
pub use sim::handle_sim_command;

use cardroom_engine::player::Seat;

/// Seats `p1`..`pN`, named "Player 1".. in seat order.
pub(crate) fn default_seats(players: usize) -> Vec<Seat> {
    (1..=players)
        .map(|i| Seat::new(format!("p{i}"), format!("Player {i}")))
        .collect()
}
