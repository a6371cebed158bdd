//! Streaming from-scratch backend.

use super::{Digest, Hasher};
use crate::sha256::Sha256;

pub struct ScratchHasher;

impl Hasher for ScratchHasher {
    fn name(&self) -> &'static str {
        "scratch"
    }

    fn hash(&mut self, input: &[u8]) -> Digest {
        Sha256::digest(input)
    }
}
