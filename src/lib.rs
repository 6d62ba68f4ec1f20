//! Fruit Slice - a terminal fruit-slicing arcade game
//!
//! Core modules:
//! - `entities`: fruit physics, the fixed fruit pool and the round state enum
//! - `round`: round timing, scoring and the per-frame simulation sequence
//! - `app`: terminal driver (input, drawing, blocking title/game-over screens)
//! - `assets`: sprite resolution and loading
//! - `settings`: command-line configuration

pub mod app;
pub mod assets;
pub mod clock;
pub mod entities;
pub mod input;
pub mod renderer;
pub mod round;
pub mod settings;
pub mod viewport;

// Library exports for testing
pub use entities::{Fruit, FruitKind, FruitManager, GameState, SpriteVariant};
pub use round::{FrameOutcome, RoundController};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use std::ops::RangeInclusive;

    /// Logical playfield the terminal grid is mapped onto
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 500.0;

    /// Fruits spawn on this line and are recycled once they fall below it.
    /// Independent of `PLAYFIELD_HEIGHT`.
    pub const OFFSCREEN_Y: f32 = 800.0;

    /// Side of the square hit box anchored at a fruit's top-left corner
    pub const HIT_BOX_SIZE: f32 = 60.0;

    /// A uniform draw at or above this throws the fruit (25% of the time)
    pub const THROW_THRESHOLD: f64 = 0.75;

    /// Vertical speed gains `GRAVITY_STEP * t` on step `t`
    pub const GRAVITY_STEP: f32 = 0.3;

    /// Horizontal nudge applied when a fruit is sliced
    pub const SLICE_KNOCKBACK: f32 = 10.0;

    pub const SPAWN_X_RANGE: RangeInclusive<i32> = 100..=500;
    pub const SPEED_X_RANGE: RangeInclusive<i32> = -10..=10;
    pub const SPEED_Y_RANGE: RangeInclusive<i32> = -60..=-50;

    pub const POINTS_PER_SLICE: u32 = 1;

    pub const DEFAULT_ROUND_SECS: u64 = 60;
    pub const DEFAULT_FPS: u32 = 30;
}
