//! RNG module - piece sources
//!
//! Pieces are sampled independently and uniformly from the seven kinds
//! (repeats allowed, no bag). The generator is a small seedable LCG so a
//! seed fully determines a game's piece sequence.
//!
//! [`SequencePieceSource`] replays a fixed cycle instead, for replays and
//! tests that need an exact sequence.

use crate::types::PieceKind;

/// Anything that can hand out the next piece kind
pub trait PieceSource {
    fn next_piece(&mut self) -> PieceKind;
}

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
        // LCG formula: (a * state + c) mod m, with a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Multiply-shift keeps the high bits; the low bits of an LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform, independent piece sampling
#[derive(Debug, Clone)]
pub struct UniformPieceSource {
    rng: SimpleRng,
    seed: u32,
}

impl UniformPieceSource {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Unseeded source, for live play
    pub fn from_entropy() -> Self {
        Self::new(fastrand::u32(..))
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl PieceSource for UniformPieceSource {
    fn next_piece(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }
}

impl Default for UniformPieceSource {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Cycles through a fixed list of kinds forever
#[derive(Debug, Clone)]
pub struct SequencePieceSource {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl SequencePieceSource {
    /// Returns None for an empty sequence
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Option<Self> {
        let kinds: Vec<PieceKind> = kinds.into_iter().collect();
        if kinds.is_empty() {
            return None;
        }
        Some(Self { kinds, index: 0 })
    }

    /// The same kind every time
    pub fn repeat(kind: PieceKind) -> Self {
        Self {
            kinds: vec![kind],
            index: 0,
        }
    }
}

impl PieceSource for SequencePieceSource {
    fn next_piece(&mut self) -> PieceKind {
        let kind = self.kinds[self.index];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_piece(&mut self) -> PieceKind {
        (**self).next_piece()
    }
}
