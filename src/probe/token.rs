//! Test tokens identifying one leak test run

use crate::defaults::{TOKEN_MAX, TOKEN_MIN};
use crate::error::{AppError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seven-digit identifier embedded in every hostname of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token(u32);

impl Token {
    /// Wrap a known token, rejecting values outside `[TOKEN_MIN, TOKEN_MAX)`
    pub fn new(value: u32) -> Result<Self> {
        if (TOKEN_MIN..TOKEN_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AppError::validation(format!(
                "Token {} is outside [{}, {})", value, TOKEN_MIN, TOKEN_MAX
            )))
        }
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Uniform token source, seeded once when constructed
pub struct TokenGenerator {
    rng: StdRng,
}

impl TokenGenerator {
    /// Seed from OS entropy
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Deterministic generator for reproducible runs
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn generate(&mut self) -> Token {
        Token(self.rng.gen_range(TOKEN_MIN..TOKEN_MAX))
    }
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}
