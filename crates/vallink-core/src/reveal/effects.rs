use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::Duration;

const BURST_DURATION: Duration = Duration::from_millis(5_000);
const BURST_FRAME_INTERVAL: Duration = Duration::from_millis(250);
const BURST_PEAK_PARTICLES: f64 = 50.0;

const OFFSET_X_RANGE: f64 = 100.0;
const OFFSET_Y_RANGE: f64 = 50.0;

/// Celebration effect parameters. The effect runs outside the session;
/// particle counts taper linearly to zero over `duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleBurst {
    pub duration: Duration,
    pub frame_interval: Duration,
}

impl Default for ParticleBurst {
    fn default() -> Self {
        Self {
            duration: BURST_DURATION,
            frame_interval: BURST_FRAME_INTERVAL,
        }
    }
}

impl ParticleBurst {
    pub fn frame_count(&self) -> u32 {
        if self.frame_interval.is_zero() {
            return 0;
        }
        (self.duration.as_millis() / self.frame_interval.as_millis()) as u32
    }

    pub fn particles_at(&self, elapsed: Duration) -> u32 {
        if elapsed >= self.duration || self.duration.is_zero() {
            return 0;
        }
        let remaining = (self.duration - elapsed).as_secs_f64();
        (BURST_PEAK_PARTICLES * remaining / self.duration.as_secs_f64()) as u32
    }
}

/// Side effects a reveal session triggers but never waits on.
pub trait RevealEffects {
    fn start_particles(&mut self, _burst: ParticleBurst) {}

    fn stop_particles(&mut self) {}

    fn notify(&mut self, _message: &str) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoEffects;

impl RevealEffects for NoEffects {}

/// Displacement of the decline button from its resting place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ButtonOffset {
    pub x: f64,
    pub y: f64,
}

impl ButtonOffset {
    pub fn is_within_bounds(&self) -> bool {
        (-OFFSET_X_RANGE..OFFSET_X_RANGE).contains(&self.x)
            && (-OFFSET_Y_RANGE..OFFSET_Y_RANGE).contains(&self.y)
    }
}

pub trait OffsetSource {
    fn next_offset(&mut self) -> ButtonOffset;
}

pub struct RandomOffsets<R = StdRng> {
    rng: R,
}

impl RandomOffsets<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomOffsets<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> OffsetSource for RandomOffsets<R> {
    fn next_offset(&mut self) -> ButtonOffset {
        ButtonOffset {
            x: self.rng.gen_range(-OFFSET_X_RANGE..OFFSET_X_RANGE),
            y: self.rng.gen_range(-OFFSET_Y_RANGE..OFFSET_Y_RANGE),
        }
    }
}
