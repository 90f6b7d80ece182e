/*!
`signaling_games` — evolution of conventions in sender/receiver signaling games.

What it does
- Models a signaling game: a Sender sees a hidden state t and sends a
  message m; a Receiver sees m and picks an action x; both are paid
  `utility(t, x)`.
- Repeats one update rule on the strategy pair
  `(S, R) ↦ dynamics(S, R, game)` (optionally blurred by limited perception)
  until two consecutive pairs differ by less than a fixed tolerance.
- Records per-step scalar metrics alongside an append-only strategy history.

How to use (call surface only)
- Build a [`Game`] from a [`Specification`] via [`create_game`], or directly
  with [`Game::sim_max`].
- Pick a rule: [`DynamicsKind::BestResponse`] or [`DynamicsKind::Replicator`].
- `Simulation::new(game, dynamics, options)?`, then
  `run_until_converged(max_steps)?` and inspect
  `state()`, `current_sender_strategy()`, `measurements("expected utility")`.
- Export final strategies with [`export::export_strategies`].

What it does NOT do
- No plotting, no stochastic sampling, no learning-rate schedules. The only
  randomness is the seeded draw of initial strategies.
*/

pub mod analysis;
pub mod config;
pub mod dynamics;
pub mod error;
pub mod export;
pub mod game;
pub mod mechanics;
pub mod simulation;
pub mod specification;
pub mod strategy;

pub use config::RunConfig;
pub use dynamics::{Confusion, Dynamics, DynamicsKind, UpdateOrder};
pub use error::{Error, Result, SpecificationError};
pub use game::{ActionSpace, Element, Game, GameKind, MessageSpace, StateSpace, create_game};
pub use simulation::{Metric, MetricKind, RunState, Simulation, SimulationOptions};
pub use specification::Specification;
pub use strategy::{ReceiverStrategy, SenderStrategy};
