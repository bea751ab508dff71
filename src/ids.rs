use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Source of element, page and notebook ids. Ids are unique across the whole
/// document, so a single generator serves all three.
pub trait IdGenerator {
    fn next_id(&mut self) -> u64;
}

#[derive(Clone, Debug)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

const SEED_RANGE: u32 = 1_000_000;

/// Hands out ids and per-element rendering seeds.
pub struct Allocator {
    ids: Box<dyn IdGenerator>,
    rng: Box<dyn RngCore>,
}

impl Allocator {
    pub fn new(ids: Box<dyn IdGenerator>, rng: Box<dyn RngCore>) -> Self {
        Self { ids, rng }
    }

    /// Sequential ids from 1 and a seeded RNG, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self::new(
            Box::new(SequentialIds::default()),
            Box::new(StdRng::seed_from_u64(seed)),
        )
    }

    pub fn next_id(&mut self) -> u64 {
        self.ids.next_id()
    }

    pub fn next_seed(&mut self) -> u32 {
        self.rng.random_range(0..SEED_RANGE)
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new(
            Box::new(SequentialIds::default()),
            Box::new(StdRng::from_os_rng()),
        )
    }
}

impl std::fmt::Debug for Allocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Allocator").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "ids_test.rs"]
mod tests;
