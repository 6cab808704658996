//! Generator module - preview-buffered brick supply
//!
//! Implements the "7-bag" randomizer: each bag holds one of each brick,
//! shuffled, and bags are appended to the queue tail whenever the queue would
//! fall below the preview size. Any run of seven bricks that starts on a bag
//! boundary is therefore a permutation of all seven kinds.

use std::collections::VecDeque;
use std::fmt;

use tracing::warn;

use crate::bricks::{catalog, Brick};
use crate::rng::SimpleRng;
use crate::types::{BRICK_KIND_COUNT, DEFAULT_PREVIEW_SIZE, MIN_PREVIEW_SIZE};

/// Produces one bag of bricks from the prototypes
pub trait BagPolicy: fmt::Debug + Send {
    fn create_bag(&mut self, prototypes: &[Brick]) -> Vec<Brick>;
}

/// One copy of every prototype, Fisher-Yates shuffled
#[derive(Debug, Clone)]
pub struct ShuffledBag {
    rng: SimpleRng,
}

impl ShuffledBag {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl Default for ShuffledBag {
    fn default() -> Self {
        Self::new(1)
    }
}

impl BagPolicy for ShuffledBag {
    fn create_bag(&mut self, prototypes: &[Brick]) -> Vec<Brick> {
        let mut bag = prototypes.to_vec();
        self.rng.shuffle(&mut bag);
        bag
    }
}

/// Preview-buffered brick queue
#[derive(Debug)]
pub struct BrickGenerator {
    queue: VecDeque<Brick>,
    prototypes: [Brick; BRICK_KIND_COUNT],
    preview_size: usize,
    bag: Box<dyn BagPolicy>,
}

impl BrickGenerator {
    /// Seeded shuffled-bag generator with the default preview size
    pub fn new(seed: u32) -> Self {
        Self::with_policy(Box::new(ShuffledBag::new(seed)), DEFAULT_PREVIEW_SIZE)
    }

    /// Generator with a custom bag policy; preview sizes below 1 are clamped to 1
    pub fn with_policy(bag: Box<dyn BagPolicy>, preview_size: usize) -> Self {
        let preview_size = if preview_size < MIN_PREVIEW_SIZE {
            warn!(
                requested = preview_size,
                clamped = MIN_PREVIEW_SIZE,
                "preview size below minimum, clamping"
            );
            MIN_PREVIEW_SIZE
        } else {
            preview_size
        };

        let mut generator = Self {
            queue: VecDeque::with_capacity(preview_size + 2 * BRICK_KIND_COUNT),
            prototypes: catalog(),
            preview_size,
            bag,
        };
        generator.refill_until(preview_size);
        generator
    }

    /// Append whole bags until the queue holds at least `len` bricks
    fn refill_until(&mut self, len: usize) {
        while self.queue.len() < len {
            let bag = self.bag.create_bag(&self.prototypes);
            debug_assert!(!bag.is_empty(), "bag policy produced an empty bag");
            if bag.is_empty() {
                // A policy that yields nothing would spin forever
                warn!("bag policy produced an empty bag");
                break;
            }
            self.queue.extend(bag);
        }
    }

    /// Remove and return the next brick
    ///
    /// The queue is topped up first so that at least `preview_size` bricks
    /// remain queued after the pop.
    pub fn get_brick(&mut self) -> Brick {
        self.refill_until(self.preview_size + 1);
        match self.queue.pop_front() {
            Some(brick) => brick,
            // Only reachable with a bag policy that returns nothing
            None => self.prototypes[0],
        }
    }

    /// Peek at the next brick without removing it
    pub fn get_next_brick(&self) -> Brick {
        self.queue.front().copied().unwrap_or(self.prototypes[0])
    }

    /// Up to `n` upcoming bricks, next first, without removing them
    pub fn get_next_bricks(&mut self, n: usize) -> Vec<Brick> {
        self.refill_until(n);
        self.queue.iter().take(n).copied().collect()
    }

    /// Upcoming bricks currently buffered, next first
    pub fn queued(&self) -> impl Iterator<Item = &Brick> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn preview_size(&self) -> usize {
        self.preview_size
    }
}

impl Default for BrickGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
