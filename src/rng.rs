//! RNG module - deterministic colour draws
//!
//! A simple seeded LCG keeps the engine fully deterministic: the same seed
//! reproduces the same initial board and the same refill colours, which makes
//! sessions replayable and cascade behaviour testable.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Resume from a previously captured state, exactly as saved
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Current internal state (for resuming the same sequence later)
    pub fn state(&self) -> u32 {
        self.state
    }
}
