//! RustCrypto `sha2` backend.
//!
//! The context is reset in place after each digest rather than rebuilt,
//! so repeated short hashes stay allocation-free.

use sha2::{Digest as _, Sha256};

use super::{Digest, Hasher};

pub struct LibraryHasher {
    ctx: Sha256,
}

impl LibraryHasher {
    pub fn new() -> Self {
        Self { ctx: Sha256::new() }
    }
}

impl Default for LibraryHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for LibraryHasher {
    fn name(&self) -> &'static str {
        "sha2"
    }

    fn hash(&mut self, input: &[u8]) -> Digest {
        self.ctx.update(input);
        self.ctx.finalize_reset().into()
    }
}
