//! Round timing, scoring and the per-frame simulation sequence

use rand::SeedableRng;
use rand_pcg::Pcg32;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::consts::POINTS_PER_SLICE;
use crate::entities::{FruitKind, FruitManager, GameState};
use crate::settings::Settings;

/// What a call to [`RoundController::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No round is running; nothing was simulated
    Idle,
    /// The simulation advanced one frame
    Advanced { sliced: Option<FruitKind> },
    /// Time ran out this frame. Reported once per round.
    RoundOver { final_score: u32 },
}

/// Owns the session: the fruit pool, its RNG, the score and the round clock.
pub struct RoundController<C: Clock> {
    clock: C,
    rng: Pcg32,
    fruits: FruitManager,
    duration_secs: u64,
    round_start_ms: u64,
    score: u32,
    state: GameState,
    rounds_played: u32,
}

impl<C: Clock> RoundController<C> {
    pub fn new(settings: &Settings, clock: C) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        info!(seed, duration = settings.duration, "creating round controller");

        let mut rng = Pcg32::seed_from_u64(seed);
        let fruits = FruitManager::new(&settings.fruits, &mut rng);
        let round_start_ms = clock.now_millis();

        Self {
            clock,
            rng,
            fruits,
            duration_secs: settings.duration,
            round_start_ms,
            score: 0,
            state: GameState::AwaitingStart,
            rounds_played: 0,
        }
    }

    /// Zeroes the score, re-rolls every pool slot and restarts the round clock
    pub fn start_round(&mut self) {
        self.score = 0;
        self.fruits.initialize(&mut self.rng);
        self.round_start_ms = self.clock.now_millis();
        self.state = GameState::Playing;
        self.rounds_played += 1;
        info!(round = self.rounds_played, "round started");
    }

    /// Whole seconds since the round started
    pub fn elapsed_secs(&self) -> u64 {
        self.clock.now_millis().saturating_sub(self.round_start_ms) / 1000
    }

    pub fn time_remaining(&self) -> u64 {
        self.duration_secs.saturating_sub(self.elapsed_secs())
    }

    /// Runs one frame of simulation at the given logical pointer position
    pub fn step(&mut self, pointer: Option<(f32, f32)>) -> FrameOutcome {
        if self.state != GameState::Playing {
            return FrameOutcome::Idle;
        }

        if self.elapsed_secs() >= self.duration_secs {
            self.state = GameState::GameOver;
            info!(
                round = self.rounds_played,
                score = self.score,
                "round over"
            );
            return FrameOutcome::RoundOver {
                final_score: self.score,
            };
        }

        self.fruits.update(&mut self.rng);
        let recycled = self.fruits.remove_offscreen(&mut self.rng);
        if recycled > 0 {
            debug!(recycled, "fruit fell off screen");
        }

        let sliced = pointer.and_then(|(x, y)| self.fruits.check_collisions(x, y));
        if let Some(kind) = sliced {
            self.fruits.handle_hit(kind);
            self.score += POINTS_PER_SLICE;
            debug!(fruit = kind.name(), score = self.score, "fruit sliced");
        }

        FrameOutcome::Advanced { sliced }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn fruits(&self) -> &FruitManager {
        &self.fruits
    }

    pub fn fruits_mut(&mut self) -> &mut FruitManager {
        &mut self.fruits
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }
}
