// tests/core.rs
use nalgebra::DMatrix;
use serde_json::json;
use signaling_games::mechanics::{is_row_stochastic, l1_distance};
use signaling_games::simulation::Snapshot;
use signaling_games::{
    Confusion, Dynamics, DynamicsKind, Error, Game, MessageSpace, Metric, ReceiverStrategy,
    RunState, SenderStrategy, Simulation, SimulationOptions, Specification, StateSpace,
    UpdateOrder, create_game,
};

/* ──────────────────────────────────────────────────────────────────────────
Fixtures
────────────────────────────────────────────────────────────────────────── */

/// 2×2 sim-max game from a spec: uniform priors, identity similarity.
fn game_2x2() -> Game {
    let spec = Specification::from_value(json!({
        "type": "sim-max",
        "states": { "elements": { "type": "numbered labels", "size": 2 } },
        "messages": { "elements": { "type": "numbered labels", "size": 2 } },
    }));
    create_game(&spec).unwrap()
}

/// 2×2 sim-max game with an asymmetric similarity and priors 0.6 / 0.4.
fn sim_max_game() -> Game {
    let states = StateSpace::new(vec!["t1", "t2"], vec![0.6, 0.4]).unwrap();
    let messages = MessageSpace::new(vec!["m1", "m2"]).unwrap();
    let similarity = DMatrix::from_row_slice(2, 2, &[2.0, 0.5, 0.1, 1.0]);
    Game::sim_max(states, messages, similarity).unwrap()
}

fn m2(v: [f64; 4]) -> DMatrix<f64> {
    DMatrix::from_row_slice(2, 2, &v)
}

fn options(
    game: &Game,
    sender: [f64; 4],
    receiver: [f64; 4],
    metrics: &[&str],
) -> SimulationOptions {
    let sender = SenderStrategy::new(game.states(), game.messages(), m2(sender)).unwrap();
    let receiver = ReceiverStrategy::new(game.messages(), game.actions(), m2(receiver)).unwrap();
    SimulationOptions {
        sender: Some(sender),
        receiver: Some(receiver),
        metrics: metrics.iter().map(|m| m.to_string()).collect(),
        ..Default::default()
    }
}

const SEPARATING: ([f64; 4], [f64; 4]) = ([1.0, 0.0, 0.0, 1.0], [1.0, 0.0, 0.0, 1.0]);
const ALMOST: ([f64; 4], [f64; 4]) = ([0.9, 0.1, 0.05, 0.95], [0.95, 0.05, 0.13, 0.87]);

fn step_delta(sim: &Simulation, step: usize) -> f64 {
    l1_distance(
        sim.sender_strategy(step).unwrap().values(),
        sim.sender_strategy(step - 1).unwrap().values(),
    ) + l1_distance(
        sim.receiver_strategy(step).unwrap().values(),
        sim.receiver_strategy(step - 1).unwrap().values(),
    )
}

/* ──────────────────────────────────────────────────────────────────────────
1) Convergence detector
────────────────────────────────────────────────────────────────────────── */

#[test]
fn not_converged_at_step_zero() {
    for (s, r) in [SEPARATING, ALMOST] {
        let game = game_2x2();
        let opts = options(&game, s, r, &[]);
        let sim = Simulation::new(game, DynamicsKind::BestResponse, opts).unwrap();
        assert_eq!(sim.current_step(), 0);
        assert!(!sim.converged(), "step 0 must never count as converged");
        assert_eq!(sim.state(), RunState::Initialized);
    }

    for seed in [0, 1, 42] {
        let sim = Simulation::new(
            game_2x2(),
            DynamicsKind::Replicator,
            SimulationOptions { seed, ..Default::default() },
        )
        .unwrap();
        assert!(!sim.converged());
    }
}

/* ──────────────────────────────────────────────────────────────────────────
2) Best response
────────────────────────────────────────────────────────────────────────── */

#[test]
fn separating_equilibrium_is_a_best_response_fixed_point() {
    let game = sim_max_game();
    let opts = options(&game, SEPARATING.0, SEPARATING.1, &[]);
    let mut sim = Simulation::new(game, DynamicsKind::BestResponse, opts).unwrap();

    sim.step().unwrap();

    assert_eq!(sim.state(), RunState::Stepping);
    assert_eq!(sim.current_sender_strategy(), sim.sender_strategy(0).unwrap());
    assert_eq!(sim.current_receiver_strategy(), sim.receiver_strategy(0).unwrap());
    assert!(sim.converged(), "a fixed point must be detected after one step");
}

#[test]
fn best_response_from_near_equilibrium_converges_in_two_steps() {
    let game = game_2x2();
    let opts = options(&game, ALMOST.0, ALMOST.1, &[]);
    let mut sim = Simulation::new(game, DynamicsKind::BestResponse, opts).unwrap();

    let state = sim.run_until_converged(100).unwrap();

    assert_eq!(state, RunState::Converged);
    assert_eq!(sim.current_step(), 2);
    assert_eq!(sim.current_sender_strategy().values(), &DMatrix::identity(2, 2));
    assert_eq!(sim.current_receiver_strategy().values(), &DMatrix::identity(2, 2));
}

/* ──────────────────────────────────────────────────────────────────────────
3) Replicator
────────────────────────────────────────────────────────────────────────── */

#[test]
fn replicator_step_shrinks_total_change() {
    for game in [game_2x2(), sim_max_game()] {
        let opts = options(&game, ALMOST.0, ALMOST.1, &[]);
        let mut sim = Simulation::new(game, DynamicsKind::Replicator, opts).unwrap();
        sim.step().unwrap();
        sim.step().unwrap();

        let first = step_delta(&sim, 1);
        let second = step_delta(&sim, 2);
        assert!(second < first, "delta did not shrink: {first} -> {second}");
    }
}

#[test]
fn expected_utility_non_decreasing_under_replicator() {
    for game in [game_2x2(), sim_max_game()] {
        let opts = options(&game, ALMOST.0, ALMOST.1, &["expected utility"]);
        let mut sim = Simulation::new(game, DynamicsKind::Replicator, opts).unwrap();

        let state = sim.run_until_converged(100).unwrap();
        assert_eq!(state, RunState::Converged);

        let eu = sim.measurements("expected utility").unwrap();
        assert_eq!(eu.len(), sim.current_step() + 1, "one measurement per step");
        for w in eu.windows(2) {
            assert!(w[1] >= w[0] - 1e-12, "expected utility decreased: {eu:?}");
        }
    }
}

#[test]
fn replicator_keeps_rows_stochastic() {
    let game = game_2x2();
    let opts = options(&game, ALMOST.0, ALMOST.1, &[]);
    let mut sim = Simulation::new(game, DynamicsKind::Replicator, opts).unwrap();
    for _ in 0..5 {
        sim.step().unwrap();
        assert!(is_row_stochastic(sim.current_sender_strategy().values(), 1e-9));
        assert!(is_row_stochastic(sim.current_receiver_strategy().values(), 1e-9));
    }
}

/* ──────────────────────────────────────────────────────────────────────────
4) Driver budget and state machine
────────────────────────────────────────────────────────────────────────── */

#[test]
fn zero_budget_performs_no_steps() {
    let game = game_2x2();
    let opts = options(&game, ALMOST.0, ALMOST.1, &["expected utility"]);
    let mut sim = Simulation::new(game, DynamicsKind::Replicator, opts).unwrap();

    let state = sim.run_until_converged(0).unwrap();

    assert_eq!(state, RunState::Exhausted);
    assert_eq!(sim.current_step(), 0);
    assert_eq!(sim.measurements("expected utility").unwrap().len(), 1);
}

#[test]
fn small_budget_ends_exhausted() {
    let game = game_2x2();
    let opts = options(&game, ALMOST.0, ALMOST.1, &[]);
    let mut sim = Simulation::new(game, DynamicsKind::Replicator, opts).unwrap();

    assert_eq!(sim.run_until_converged(1u32).unwrap(), RunState::Exhausted);
    assert_eq!(sim.current_step(), 1);
    assert!(!sim.converged());
}

#[test]
fn negative_budget_is_an_argument_error() {
    let game = game_2x2();
    let opts = options(&game, ALMOST.0, ALMOST.1, &[]);
    let mut sim = Simulation::new(game, DynamicsKind::Replicator, opts).unwrap();

    let err = sim.run_until_converged(-1i64).unwrap_err();
    assert!(matches!(err, Error::Argument(_)), "got {err:?}");
    assert_eq!(sim.current_step(), 0);
    assert_eq!(sim.state(), RunState::Initialized);
}

#[test]
fn unknown_metric_is_rejected() {
    let game = game_2x2();
    let opts = options(&game, ALMOST.0, ALMOST.1, &["expected utility", "happiness"]);
    let err = Simulation::new(game, DynamicsKind::Replicator, opts).err().unwrap();
    assert!(
        matches!(err, Error::UnsupportedMetric(ref name) if name == "happiness"),
        "got {err:?}"
    );
}

#[test]
fn mismatched_initial_strategy_is_rejected() {
    let game = game_2x2();
    let three = StateSpace::uniform(vec!["a", "b", "c"]).unwrap();
    let sender =
        SenderStrategy::new(&three, game.messages(), DMatrix::from_element(3, 2, 0.5)).unwrap();
    let opts = SimulationOptions { sender: Some(sender), ..Default::default() };
    let err = Simulation::new(game, DynamicsKind::BestResponse, opts).err().unwrap();
    assert!(matches!(err, Error::Argument(_)), "got {err:?}");
}

#[test]
fn history_is_append_only() {
    let game = game_2x2();
    let opts = options(&game, ALMOST.0, ALMOST.1, &[]);
    let mut sim = Simulation::new(game, DynamicsKind::Replicator, opts).unwrap();
    let first = sim.sender_strategy(0).unwrap().clone();

    sim.run_until_converged(10).unwrap();

    assert_eq!(sim.sender_strategy(0).unwrap(), &first);
    assert!(sim.sender_strategy(sim.current_step() + 1).is_none());
}

/* ──────────────────────────────────────────────────────────────────────────
5) Random initialization and metrics
────────────────────────────────────────────────────────────────────────── */

#[test]
fn seeded_initial_strategies_are_reproducible() {
    let make = |seed| {
        let opts = SimulationOptions { seed, ..Default::default() };
        Simulation::new(game_2x2(), DynamicsKind::Replicator, opts).unwrap()
    };
    let (a, b, c) = (make(7), make(7), make(8));

    assert_eq!(a.current_sender_strategy(), b.current_sender_strategy());
    assert_eq!(a.current_receiver_strategy(), b.current_receiver_strategy());
    assert_ne!(a.current_sender_strategy(), c.current_sender_strategy());
    assert!(is_row_stochastic(a.current_sender_strategy().values(), 1e-9));
    assert!(is_row_stochastic(a.current_receiver_strategy().values(), 1e-9));
}

#[test]
fn builtin_metrics_track_every_step() {
    let game = game_2x2();
    let opts = options(
        &game,
        ALMOST.0,
        ALMOST.1,
        &["expected utility", "normalized expected utility", "strategy change"],
    );
    let mut sim = Simulation::new(game, DynamicsKind::Replicator, opts).unwrap();
    sim.run_until_converged(100).unwrap();

    let eu = sim.measurements("expected utility").unwrap();
    let neu = sim.measurements("normalized expected utility").unwrap();
    let change = sim.measurements("strategy change").unwrap();

    // Σutility of the identity game is 2.
    for (a, b) in eu.iter().zip(neu) {
        assert!((a / 2.0 - b).abs() < 1e-12);
    }
    assert!((eu[0] - 0.8485).abs() < 1e-12, "eu[0] = {}", eu[0]);
    assert_eq!(change[0], 0.0);
    assert!((change[1] - step_delta(&sim, 1)).abs() < 1e-12);
}

struct StepCounter;

impl Metric for StepCounter {
    fn name(&self) -> &str {
        "step"
    }

    fn calculate(&self, snapshot: &Snapshot<'_>) -> f64 {
        snapshot.step() as f64
    }
}

#[test]
fn custom_metrics_are_recorded() {
    let game = game_2x2();
    let opts = options(&game, ALMOST.0, ALMOST.1, &[]);
    let custom: Vec<Box<dyn Metric>> = vec![Box::new(StepCounter)];
    let mut sim =
        Simulation::with_metrics(game, DynamicsKind::BestResponse, opts, custom).unwrap();
    sim.run_until_converged(100).unwrap();

    assert_eq!(sim.measurements("step").unwrap(), &[0.0, 1.0, 2.0]);
}

/* ──────────────────────────────────────────────────────────────────────────
6) Turn order and limited perception
────────────────────────────────────────────────────────────────────────── */

/// Three numeric states on a line, two messages, identity utility.
fn line_game() -> Game {
    let spec = Specification::from_value(json!({
        "states": {
            "elements": { "type": "numeric range", "size": 3 },
            "metric": { "type": "euclidean" },
        },
        "messages": { "elements": { "size": 2 } },
    }));
    create_game(&spec).unwrap()
}

fn line_pair(game: &Game, sender: &[f64], receiver: &[f64]) -> (SenderStrategy, ReceiverStrategy) {
    let s = DMatrix::from_row_slice(3, 2, sender);
    let r = DMatrix::from_row_slice(2, 3, receiver);
    let s = SenderStrategy::new(game.states(), game.messages(), s);
    let r = ReceiverStrategy::new(game.messages(), game.actions(), r);
    (s.unwrap(), r.unwrap())
}

const LINE_SENDER: [f64; 6] = [0.6, 0.4, 0.5, 0.5, 0.3, 0.7];
const LINE_RECEIVER: [f64; 6] = [0.7, 0.2, 0.1, 0.1, 0.2, 0.7];

#[test]
fn simultaneous_step_blurs_both_players_after_updating() {
    let game = line_game();
    let (s0, r0) = line_pair(&game, &LINE_SENDER, &LINE_RECEIVER);
    let confusion = Confusion::from_acuity(game.states(), 1.0).unwrap();

    let (s1, r1) = DynamicsKind::Replicator.update(&s0, &r0, &game).unwrap();
    let expected_sender = confusion.apply_sender(&s1).unwrap();
    let expected_receiver = confusion.apply_receiver(&r1).unwrap();

    let opts = SimulationOptions {
        sender: Some(s0),
        receiver: Some(r0),
        confusion: Some(confusion),
        ..Default::default()
    };
    let mut sim = Simulation::new(game, DynamicsKind::Replicator, opts).unwrap();
    assert_eq!(sim.order(), UpdateOrder::Simultaneous);
    sim.step().unwrap();

    assert_eq!(sim.current_sender_strategy(), &expected_sender);
    assert_eq!(sim.current_receiver_strategy(), &expected_receiver);
    assert_ne!(sim.current_sender_strategy(), &s1, "confusion must change the updated sender");
}

#[test]
fn sequential_step_blurs_sender_before_receiver_moves() {
    let game = line_game();
    let (s0, r0) = line_pair(&game, &LINE_SENDER, &LINE_RECEIVER);
    let confusion = Confusion::from_acuity(game.states(), 1.0).unwrap();

    let dynamics = DynamicsKind::Replicator;
    let s1 = confusion.apply_sender(&dynamics.update_sender(&s0, &r0, &game).unwrap()).unwrap();
    let r1 = dynamics.update_receiver(&s1, &r0, &game).unwrap();
    let r1 = confusion.apply_receiver(&r1).unwrap();

    let opts = SimulationOptions {
        sender: Some(s0),
        receiver: Some(r0),
        confusion: Some(confusion),
        order: UpdateOrder::Sequential,
        ..Default::default()
    };
    let mut sim = Simulation::new(game, dynamics, opts).unwrap();
    sim.step().unwrap();

    assert_eq!(sim.current_sender_strategy(), &s1);
    assert_eq!(sim.current_receiver_strategy(), &r1);
}

#[test]
fn sequential_receiver_answers_the_new_sender() {
    // Every state sends m1 with the same weight, so the old sender gives the
    // receiver nothing to go on; the new sender separates the end states.
    let pooling = [0.6, 0.4, 0.6, 0.4, 0.6, 0.4];
    let run = |order| {
        let game = line_game();
        let (s0, r0) = line_pair(&game, &pooling, &LINE_RECEIVER);
        let opts = SimulationOptions {
            sender: Some(s0),
            receiver: Some(r0),
            order,
            ..Default::default()
        };
        let mut sim = Simulation::new(game, DynamicsKind::BestResponse, opts).unwrap();
        sim.step().unwrap();
        sim.current_receiver_strategy().values().clone()
    };

    let third = 1.0 / 3.0;
    assert_eq!(run(UpdateOrder::Simultaneous), DMatrix::from_element(2, 3, third));
    assert_eq!(
        run(UpdateOrder::Sequential),
        DMatrix::from_row_slice(2, 3, &[1.0, 0.0, 0.0, 0.0, 0.0, 1.0])
    );
}
