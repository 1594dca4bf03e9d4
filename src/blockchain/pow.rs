//! Proof-of-Work: find `p` such that `sha256(last_proof ++ p)` starts with
//! `difficulty` zero hex digits.

use super::hasher::sha256_hex;
use super::{DEFAULT_DIFFICULTY, DIFF_MAX, DIFF_MIN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOfWork {
    difficulty: u32,
}

impl Default for ProofOfWork {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

impl ProofOfWork {
    /// Difficulty is clamped to `DIFF_MIN..=DIFF_MAX`.
    pub fn new(difficulty: u32) -> Self {
        Self::with_difficulty(difficulty.clamp(DIFF_MIN, DIFF_MAX))
    }

    /// Unclamped constructor usable in constants. Callers stay in bounds.
    pub const fn with_difficulty(difficulty: u32) -> Self {
        Self { difficulty }
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Does `candidate` solve the puzzle posed by `last_proof`?
    /// Argument order matters: the decimal forms are concatenated as given.
    pub fn valid_proof(&self, last_proof: u64, candidate: u64) -> bool {
        let guess = format!("{last_proof}{candidate}");
        sha256_hex(guess.as_bytes())
            .bytes()
            .take(self.difficulty as usize)
            .all(|c| c == b'0')
    }

    /// Smallest nonnegative proof valid for `last_proof`.
    ///
    /// Blocks until found. Enumeration restarts from 0 on every call.
    pub fn search(&self, last_proof: u64) -> u64 {
        let mut proof = 0u64;
        while !self.valid_proof(last_proof, proof) {
            proof = proof.wrapping_add(1);
        }
        proof
    }

    /// Like [`search`](Self::search), but polls `is_stale` before every
    /// attempt and gives up with `None` once it reports true.
    pub fn search_until<F>(&self, last_proof: u64, mut is_stale: F) -> Option<u64>
    where
        F: FnMut() -> bool,
    {
        let mut proof = 0u64;
        loop {
            if is_stale() {
                return None;
            }
            if self.valid_proof(last_proof, proof) {
                return Some(proof);
            }
            proof = proof.wrapping_add(1);
        }
    }
}
