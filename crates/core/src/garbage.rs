//! Garbage module - timed injection of nearly-full rows
//!
//! The scheduler is polled: the driver calls
//! [`GarbageScheduler::check_and_get_rows_to_add`] once per tick and the
//! scheduler compares its clock against the next threshold. Nothing sleeps
//! and no thread is spawned.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::config::GarbageConfig;
use crate::rng::SimpleRng;
use crate::types::BRICK_KIND_COUNT;

/// Millisecond clock the scheduler reads
pub trait Clock: fmt::Debug + Send {
    fn now_ms(&self) -> u64;
}

/// Monotonic wall clock, counting from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::Relaxed);
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}

#[derive(Debug)]
pub struct GarbageScheduler<C: Clock = SystemClock> {
    enabled: bool,
    next_at_ms: u64,
    min_delay_ms: u64,
    max_delay_ms: u64,
    max_rows: usize,
    rng: SimpleRng,
    clock: C,
}

impl GarbageScheduler<SystemClock> {
    pub fn new(config: GarbageConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> GarbageScheduler<C> {
    pub fn with_clock(config: GarbageConfig, clock: C) -> Self {
        let config = config.normalized();
        let mut scheduler = Self {
            enabled: false,
            next_at_ms: 0,
            min_delay_ms: config.min_delay_ms,
            max_delay_ms: config.max_delay_ms,
            max_rows: config.max_rows,
            rng: SimpleRng::new(config.seed),
            clock,
        };
        if config.enabled {
            scheduler.enable();
        }
        scheduler
    }

    fn schedule_next(&mut self, now: u64) {
        let delay = self.rng.next_between(self.min_delay_ms, self.max_delay_ms);
        self.next_at_ms = now.saturating_add(delay);
        debug!(next_at_ms = self.next_at_ms, "garbage wave scheduled");
    }

    /// Turn garbage on and schedule the next wave from now
    pub fn enable(&mut self) {
        self.enabled = true;
        let now = self.clock.now_ms();
        self.schedule_next(now);
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Reschedule from now if enabled (new game)
    pub fn reset(&mut self) {
        if self.enabled {
            let now = self.clock.now_ms();
            self.schedule_next(now);
        }
    }

    /// Threshold of the next wave, if enabled
    pub fn next_garbage_at_ms(&self) -> Option<u64> {
        self.enabled.then_some(self.next_at_ms)
    }

    /// Rows to inject this tick: 0 until the threshold passes, then 1..=max_rows
    pub fn check_and_get_rows_to_add(&mut self) -> usize {
        if !self.enabled {
            return 0;
        }
        let now = self.clock.now_ms();
        if now < self.next_at_ms {
            return 0;
        }
        self.schedule_next(now);
        self.rng.next_between(1, self.max_rows as u64) as usize
    }

    /// One row of `cols` cells with a single random hole
    pub fn generate_garbage_row(&mut self, cols: usize) -> Vec<u8> {
        if cols == 0 {
            return Vec::new();
        }
        let hole = self.rng.next_range(cols as u32) as usize;
        (0..cols)
            .map(|x| {
                if x == hole {
                    0
                } else {
                    self.rng.next_between(1, BRICK_KIND_COUNT as u64) as u8
                }
            })
            .collect()
    }

    pub fn generate_rows(&mut self, count: usize, cols: usize) -> Vec<Vec<u8>> {
        (0..count).map(|_| self.generate_garbage_row(cols)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_config() -> GarbageConfig {
        GarbageConfig {
            enabled: true,
            seed: 11,
            ..GarbageConfig::default()
        }
    }

    #[test]
    fn test_disabled_never_fires() {
        let clock = ManualClock::new();
        let mut garbage = GarbageScheduler::with_clock(GarbageConfig::default(), clock.clone());
        clock.advance(1_000_000);
        assert_eq!(garbage.check_and_get_rows_to_add(), 0);
        assert_eq!(garbage.next_garbage_at_ms(), None);
    }

    #[test]
    fn test_threshold_within_window() {
        let clock = ManualClock::new();
        clock.set(500);
        let garbage = GarbageScheduler::with_clock(enabled_config(), clock);
        let at = garbage.next_garbage_at_ms().unwrap();
        assert!((500 + 30_000..=500 + 45_000).contains(&at));
    }

    #[test]
    fn test_fires_only_after_threshold() {
        let clock = ManualClock::new();
        let mut garbage = GarbageScheduler::with_clock(enabled_config(), clock.clone());
        let at = garbage.next_garbage_at_ms().unwrap();

        clock.set(at - 1);
        assert_eq!(garbage.check_and_get_rows_to_add(), 0);

        clock.set(at);
        let rows = garbage.check_and_get_rows_to_add();
        assert!((1..=2).contains(&rows));

        // Rescheduled, so polling again right away yields nothing
        assert_eq!(garbage.check_and_get_rows_to_add(), 0);
        assert!(garbage.next_garbage_at_ms().unwrap() >= at + 30_000);
    }

    #[test]
    fn test_disable_then_enable_reschedules() {
        let clock = ManualClock::new();
        let mut garbage = GarbageScheduler::with_clock(enabled_config(), clock.clone());
        garbage.disable();
        clock.set(100_000);
        assert_eq!(garbage.check_and_get_rows_to_add(), 0);

        garbage.enable();
        assert!(garbage.next_garbage_at_ms().unwrap() >= 130_000);
        assert_eq!(garbage.check_and_get_rows_to_add(), 0);
    }

    #[test]
    fn test_reset_only_when_enabled() {
        let clock = ManualClock::new();
        let mut garbage = GarbageScheduler::with_clock(GarbageConfig::default(), clock.clone());
        garbage.reset();
        assert_eq!(garbage.next_garbage_at_ms(), None);

        garbage.enable();
        clock.set(60_000);
        garbage.reset();
        assert!(garbage.next_garbage_at_ms().unwrap() >= 90_000);
    }

    #[test]
    fn test_garbage_row_has_one_hole() {
        let mut garbage = GarbageScheduler::with_clock(enabled_config(), ManualClock::new());
        for cols in [1, 4, 10, 17] {
            for _ in 0..50 {
                let row = garbage.generate_garbage_row(cols);
                assert_eq!(row.len(), cols);
                assert_eq!(row.iter().filter(|&&c| c == 0).count(), 1);
                assert!(row.iter().all(|&c| c <= 7));
            }
        }
        assert!(garbage.generate_garbage_row(0).is_empty());
    }

    #[test]
    fn test_generate_rows() {
        let mut garbage = GarbageScheduler::with_clock(enabled_config(), ManualClock::new());
        let rows = garbage.generate_rows(2, 10);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.len() == 10));
    }
}
