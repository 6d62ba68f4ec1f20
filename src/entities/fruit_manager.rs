use rand::Rng;

use super::fruit::{Fruit, FruitKind};

/// Owns the fixed pool of fruit slots, one per configured kind.
///
/// Slots are never added or removed after construction; a fruit that leaves
/// play is reset in place. Iteration follows the configured order, which is
/// also the priority order for collision queries.
#[derive(Debug, Clone)]
pub struct FruitManager {
    fruits: Vec<Fruit>,
}

impl FruitManager {
    /// Builds one slot per kind. Repeated kinds collapse into the first slot.
    pub fn new<R: Rng + ?Sized>(kinds: &[FruitKind], rng: &mut R) -> Self {
        let mut fruits: Vec<Fruit> = Vec::with_capacity(kinds.len());
        for kind in kinds {
            if fruits.iter().any(|fruit| fruit.kind == *kind) {
                continue;
            }
            fruits.push(Fruit::new(*kind, rng));
        }

        Self { fruits }
    }

    /// Re-creates every slot with fresh random state, keeping the same kinds
    pub fn initialize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for fruit in &mut self.fruits {
            *fruit = Fruit::new(fruit.kind, rng);
        }
    }

    /// Advances thrown fruits and re-rolls every slot that is not in flight
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for fruit in &mut self.fruits {
            if fruit.thrown {
                fruit.update();
            } else {
                fruit.reset(rng);
            }
        }
    }

    /// Fruits the renderer should draw this frame
    pub fn drawable(&self) -> impl Iterator<Item = &Fruit> {
        self.fruits.iter().filter(|fruit| fruit.is_drawable())
    }

    /// Returns thrown fruits that fell past the off-screen line to the pool.
    /// Yields how many slots were recycled.
    pub fn remove_offscreen<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let mut recycled = 0;
        for fruit in &mut self.fruits {
            if fruit.thrown && fruit.is_outside_screen() {
                fruit.reset(rng);
                recycled += 1;
            }
        }
        recycled
    }

    /// First thrown, unsliced fruit under the pointer, if any
    pub fn check_collisions(&self, pointer_x: f32, pointer_y: f32) -> Option<FruitKind> {
        self.fruits
            .iter()
            .find(|fruit| fruit.thrown && fruit.check_collision(pointer_x, pointer_y))
            .map(|fruit| fruit.kind)
    }

    pub fn handle_hit(&mut self, kind: FruitKind) {
        if let Some(fruit) = self.get_mut(kind) {
            fruit.on_hit();
        }
    }

    pub fn reset_fruit<R: Rng + ?Sized>(&mut self, kind: FruitKind, rng: &mut R) {
        if let Some(fruit) = self.get_mut(kind) {
            fruit.reset(rng);
        }
    }

    pub fn get(&self, kind: FruitKind) -> Option<&Fruit> {
        self.fruits.iter().find(|fruit| fruit.kind == kind)
    }

    pub fn get_mut(&mut self, kind: FruitKind) -> Option<&mut Fruit> {
        self.fruits.iter_mut().find(|fruit| fruit.kind == kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = FruitKind> + '_ {
        self.fruits.iter().map(|fruit| fruit.kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fruit> {
        self.fruits.iter()
    }

    pub fn len(&self) -> usize {
        self.fruits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fruits.is_empty()
    }

    pub fn thrown_count(&self) -> usize {
        self.fruits.iter().filter(|fruit| fruit.thrown).count()
    }
}
