// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Blocking settle delays between a command write and its reply read.

use std::hint;
use std::thread;
use std::time::{Duration, Instant};

/// Blocks the calling context for at least the given time.
pub trait Delay {
    fn delay_ms(&mut self, ms: u32);
}

/// Sleeps the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl Delay for StdDelay {
    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

/// Free running microsecond counter that wraps at `u32::MAX`.
pub trait MonotonicCounter {
    fn now_us(&mut self) -> u32;
}

/// [`MonotonicCounter`] backed by [`Instant`], truncated to 32 bits.
#[derive(Debug, Clone, Copy)]
pub struct InstantCounter {
    origin: Instant,
}

impl InstantCounter {
    pub fn new() -> Self {
        InstantCounter {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicCounter for InstantCounter {
    fn now_us(&mut self) -> u32 {
        // truncation is the wrap
        self.origin.elapsed().as_micros() as u32
    }
}

/// Busy-waits on a [`MonotonicCounter`] without yielding.
#[derive(Debug, Clone, Copy)]
pub struct SpinDelay<C> {
    counter: C,
}

impl<C: MonotonicCounter> SpinDelay<C> {
    pub fn new(counter: C) -> Self {
        SpinDelay { counter }
    }

    pub fn into_inner(self) -> C {
        self.counter
    }

    /// Spins until more than `us` microseconds have passed on the counter.
    ///
    /// Elapsed time is taken modulo 2^32, so a counter wrapping past
    /// `u32::MAX` during the wait, or jumping over it between two reads,
    /// still ends the spin. The first reading may be up to one tick late,
    /// hence the strict comparison.
    pub fn delay_us(&mut self, us: u32) {
        if us == 0 {
            return;
        }
        let start = self.counter.now_us();
        while self.counter.now_us().wrapping_sub(start) <= us {
            hint::spin_loop();
        }
    }
}

impl<C: MonotonicCounter> Delay for SpinDelay<C> {
    fn delay_ms(&mut self, ms: u32) {
        self.delay_us(ms.saturating_mul(1000));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Advances by a fixed step on every read.
    struct SteppingCounter {
        now: u32,
        step: u32,
        reads: u32,
    }

    impl MonotonicCounter for SteppingCounter {
        fn now_us(&mut self) -> u32 {
            let now = self.now;
            self.now = self.now.wrapping_add(self.step);
            self.reads += 1;
            now
        }
    }

    #[test]
    fn waits_for_the_full_duration() {
        let mut delay = SpinDelay::new(SteppingCounter {
            now: 1_000,
            step: 10,
            reads: 0,
        });
        delay.delay_ms(1);
        let counter = delay.into_inner();
        assert!(counter.now >= 2_000);
        assert!(counter.now <= 2_020);
    }

    #[test]
    fn terminates_across_counter_wrap() {
        let start = u32::MAX - 5_000;
        let mut delay = SpinDelay::new(SteppingCounter {
            now: start,
            step: 100,
            reads: 0,
        });
        delay.delay_ms(50);
        let counter = delay.into_inner();
        let elapsed = counter.now.wrapping_sub(start);
        assert!(counter.now < start);
        assert!(elapsed >= 50_000);
        assert!(elapsed <= 50_200);
    }

    /// Replays fixed readings, then counts up by one per read.
    struct JumpingCounter {
        readings: Vec<u32>,
        now: u32,
        reads: u32,
    }

    impl MonotonicCounter for JumpingCounter {
        fn now_us(&mut self) -> u32 {
            self.reads += 1;
            if !self.readings.is_empty() {
                self.now = self.readings.remove(0);
            } else {
                self.now = self.now.wrapping_add(1);
            }
            self.now
        }
    }

    #[test]
    fn counter_jumping_over_wrap_ends_the_spin() {
        let mut delay = SpinDelay::new(JumpingCounter {
            readings: vec![u32::MAX - 1_000, 499],
            now: 0,
            reads: 0,
        });
        delay.delay_us(500);
        let counter = delay.into_inner();
        assert_eq!(counter.reads, 2);
        assert_eq!(counter.now, 499);
    }

    #[test]
    fn waits_strictly_longer_than_requested_ticks() {
        let mut delay = SpinDelay::new(JumpingCounter {
            readings: vec![],
            now: 0,
            reads: 0,
        });
        delay.delay_us(500);
        let counter = delay.into_inner();
        // start reading 1, loop exits on the first reading past 1 + 500
        assert_eq!(counter.now, 502);
        assert_eq!(counter.reads, 502);
    }

    #[test]
    fn zero_delay_does_not_touch_counter() {
        let mut delay = SpinDelay::new(SteppingCounter {
            now: 0,
            step: 1,
            reads: 0,
        });
        delay.delay_ms(0);
        assert_eq!(delay.into_inner().reads, 0);
    }

    #[test]
    fn std_delay_blocks_at_least_requested_time() {
        let before = Instant::now();
        StdDelay.delay_ms(2);
        assert!(before.elapsed() >= Duration::from_millis(2));
    }

    #[test]
    fn instant_counter_spin_blocks_at_least_requested_time() {
        let mut delay = SpinDelay::new(InstantCounter::new());
        for _ in 0..20 {
            let before = Instant::now();
            delay.delay_us(250);
            assert!(before.elapsed() >= Duration::from_micros(250));
        }
    }
}
