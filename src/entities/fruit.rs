use rand::Rng;

use crate::consts::{
    GRAVITY_STEP, HIT_BOX_SIZE, OFFSCREEN_Y, SLICE_KNOCKBACK, SPAWN_X_RANGE, SPEED_X_RANGE,
    SPEED_Y_RANGE, THROW_THRESHOLD,
};

/// The fixed fruit catalog. Each kind owns exactly one pool slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum FruitKind {
    Melon,
    Orange,
    Pomegranate,
    Guava,
}

impl FruitKind {
    pub const ALL: [FruitKind; 4] = [
        FruitKind::Melon,
        FruitKind::Orange,
        FruitKind::Pomegranate,
        FruitKind::Guava,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FruitKind::Melon => "melon",
            FruitKind::Orange => "orange",
            FruitKind::Pomegranate => "pomegranate",
            FruitKind::Guava => "guava",
        }
    }
}

/// Which picture the renderer should show for a fruit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteVariant {
    Whole,
    Sliced,
}

#[derive(Debug, Clone)]
pub struct Fruit {
    pub kind: FruitKind,
    pub x: f32,
    pub y: f32,
    pub speed_x: f32,
    pub speed_y: f32,
    /// Physics steps taken since the last reset; drives the growing gravity term
    pub t: u32,
    pub thrown: bool,
    pub hit: bool,
    pub sprite: SpriteVariant,
}

impl Fruit {
    /// Creates a fruit at a fresh random spawn point and rolls whether it is thrown
    pub fn new<R: Rng + ?Sized>(kind: FruitKind, rng: &mut R) -> Self {
        let mut fruit = Self {
            kind,
            x: 0.0,
            y: OFFSCREEN_Y,
            speed_x: 0.0,
            speed_y: 0.0,
            t: 0,
            thrown: false,
            hit: false,
            sprite: SpriteVariant::Whole,
        };
        fruit.reset(rng);
        fruit
    }

    /// Rolls the throw decision: thrown with probability 0.25
    pub fn decide_throw<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.thrown = rng.random::<f64>() >= THROW_THRESHOLD;
    }

    pub fn update(&mut self) {
        if !self.thrown {
            return;
        }

        self.x += self.speed_x;
        self.y += self.speed_y;
        // Gravity grows with every step rather than staying constant
        self.speed_y += GRAVITY_STEP * self.t as f32;
        self.t += 1;
    }

    pub fn is_outside_screen(&self) -> bool {
        self.y > OFFSCREEN_Y
    }

    /// Thrown fruits are only shown while at or above the off-screen line
    pub fn is_drawable(&self) -> bool {
        self.thrown && self.y <= OFFSCREEN_Y
    }

    /// Open-interval test against the hit box anchored at the fruit's top-left corner
    pub fn check_collision(&self, pointer_x: f32, pointer_y: f32) -> bool {
        !self.hit
            && pointer_x > self.x
            && pointer_x < self.x + HIT_BOX_SIZE
            && pointer_y > self.y
            && pointer_y < self.y + HIT_BOX_SIZE
    }

    pub fn on_hit(&mut self) {
        self.hit = true;
        self.sprite = SpriteVariant::Sliced;
        self.speed_x += SLICE_KNOCKBACK;
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.x = rng.random_range(SPAWN_X_RANGE) as f32;
        self.y = OFFSCREEN_Y;
        self.speed_x = rng.random_range(SPEED_X_RANGE) as f32;
        self.speed_y = rng.random_range(SPEED_Y_RANGE) as f32;
        self.t = 0;
        self.hit = false;
        self.sprite = SpriteVariant::Whole;
        self.decide_throw(rng);
    }

    /// (x, y, width, height) in logical coordinates
    pub fn hit_box(&self) -> (f32, f32, f32, f32) {
        (self.x, self.y, HIT_BOX_SIZE, HIT_BOX_SIZE)
    }
}
