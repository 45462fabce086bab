//! Property tests for invariants that must hold after every tick

use proptest::prelude::*;

use brick_breaker::consts::*;
use brick_breaker::sim::{Difficulty, GamePhase, GameState, TickInput, start_game, tick};

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), prop::bool::weighted(0.02), any::<bool>()).prop_map(
        |(left, right, pause, idle_mode)| TickInput {
            left,
            right,
            pause,
            idle_mode,
            ..Default::default()
        },
    )
}

fn difficulty_strategy() -> impl Strategy<Value = Difficulty> {
    prop::sample::select(Difficulty::ALL.to_vec())
}

fn check_invariants(state: &GameState) -> Result<(), TestCaseError> {
    prop_assert_eq!(state.active_bricks, state.bricks.active_count());
    for ball in state.active_balls() {
        prop_assert!(
            ball.vel.x.abs() >= MIN_SPEED_X,
            "horizontal speed {} below floor",
            ball.vel.x
        );
    }
    for power_up in &state.power_ups {
        prop_assert!(power_up.active);
        prop_assert!(power_up.rect.y <= SCREEN_HEIGHT);
    }
    prop_assert!(state.paddle.rect.x >= 0.0);
    prop_assert!(state.paddle.rect.right() <= SCREEN_WIDTH + 1e-3);
    if state.phase == GamePhase::GameOver {
        prop_assert_eq!(state.lives, 0);
        prop_assert!(state.balls.is_empty());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn invariants_hold_every_tick(
        seed in any::<u64>(),
        difficulty in difficulty_strategy(),
        inputs in prop::collection::vec(input_strategy(), 1..900),
    ) {
        let mut state = GameState::new(seed);
        // Frequent power-ups exercise multi-ball and speed-up paths
        state.tuning.power_up_chance = 0.5;
        start_game(&mut state, difficulty);

        for input in &inputs {
            tick(&mut state, input, FRAME_DT);
            check_invariants(&state)?;
        }
    }

    #[test]
    fn same_seed_same_game(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..300),
    ) {
        let mut a = GameState::new(seed);
        let mut b = GameState::new(seed);
        start_game(&mut a, Difficulty::Hard);
        start_game(&mut b, Difficulty::Hard);

        for input in &inputs {
            tick(&mut a, input, FRAME_DT);
            tick(&mut b, input, FRAME_DT);
        }
        prop_assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn score_never_decreases(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..600),
    ) {
        let mut state = GameState::new(seed);
        start_game(&mut state, Difficulty::Medium);
        let mut last = state.score;
        for input in &inputs {
            tick(&mut state, input, FRAME_DT);
            prop_assert!(state.score >= last);
            last = state.score;
        }
    }
}
