//! Random source threaded through every generator call

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::core::config;

/// A `StdRng` together with the instant generators treat as "now".
///
/// Seeded instances use the fixed `SEEDED_NOW` anchor, so a seed replays the
/// same payloads timestamps included. Entropy-backed instances read the clock
/// once, when they are created.
#[derive(Debug, Clone)]
pub struct FakeRng {
    inner: StdRng,
    now: i64,
}

impl FakeRng {
    /// Epoch seconds generators use as the current time
    pub fn now(&self) -> i64 {
        self.now
    }

    /// Same random stream, different clock anchor
    pub fn with_now(mut self, now: i64) -> Self {
        self.now = now;
        self
    }
}

impl RngCore for FakeRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

impl SeedableRng for FakeRng {
    type Seed = <StdRng as SeedableRng>::Seed;

    fn from_seed(seed: Self::Seed) -> Self {
        Self {
            inner: StdRng::from_seed(seed),
            now: config::generators::SEEDED_NOW,
        }
    }

    /// OS-seeded, anchored to the wall clock
    fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
            now: Utc::now().timestamp(),
        }
    }
}
