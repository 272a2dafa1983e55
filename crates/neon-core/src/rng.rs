//! Seeded, hash-driven pseudo-random sequence generator.

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::errors::{codes, ErrorInfo, GenieError};
use crate::hash::ID_DELIMITER;

/// Alphabet used by [`SeededRandom::alphanumeric`].
pub const ALPHANUMERIC: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// 2^64 as a float, the divisor mapping a 64-bit draw into `[0, 1)`.
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// Largest `f64` strictly below one.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Deterministic sequence generator seeded by a string.
///
/// Each draw hashes `seed::counter` with SHA-256 and then advances the
/// counter, so the sequence depends only on the seed and the number of
/// prior draws. No global or process-wide state is involved: a generator is
/// reset only by constructing a new one. The seeding rule is stable across
/// platforms and must be used whenever deterministic selection is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    seed: String,
    counter: u64,
}

impl SeededRandom {
    /// Creates a generator positioned at the start of the sequence for `seed`.
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            counter: 0,
        }
    }

    /// Returns the seed the generator was built from.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Returns the number of draws taken so far.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    fn draw(&mut self) -> u64 {
        let input = format!("{}{ID_DELIMITER}{}", self.seed, self.counter);
        let digest = Sha256::digest(input.as_bytes());
        self.counter += 1;
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        u64::from_be_bytes(head)
    }

    /// Returns the next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let value = self.draw() as f64 / TWO_POW_64;
        // u64 -> f64 rounds to nearest, so draws near u64::MAX land on 1.0.
        value.min(BELOW_ONE)
    }

    /// Returns an integer in the half-open interval `[min, max)`.
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        // Widened so spans beyond i64::MAX do not overflow.
        let span = (i128::from(max) - i128::from(min)) as f64;
        let offset = (self.next_f64() * span).floor() as i128;
        (i128::from(min) + offset) as i64
    }

    /// Returns a shuffled copy of `items` using Fisher-Yates from the end.
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut result = items.to_vec();
        for i in (1..result.len()).rev() {
            let j = self.next_int(0, i as i64 + 1) as usize;
            result.swap(i, j);
        }
        result
    }

    /// Picks one element from `items`.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, GenieError> {
        if items.is_empty() {
            return Err(GenieError::Rng(
                ErrorInfo::new(codes::EMPTY_INPUT, "cannot choose from an empty sequence")
                    .with_context("counter", self.counter.to_string()),
            ));
        }
        let index = self.next_int(0, items.len() as i64) as usize;
        Ok(&items[index])
    }

    /// Draws `length` characters from [`ALPHANUMERIC`].
    pub fn alphanumeric(&mut self, length: usize) -> String {
        (0..length)
            .map(|_| {
                let index = self.next_int(0, ALPHANUMERIC.len() as i64) as usize;
                ALPHANUMERIC[index] as char
            })
            .collect()
    }
}

impl RngCore for SeededRandom {
    fn next_u32(&mut self) -> u32 {
        (self.draw() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.draw()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.draw().to_be_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
