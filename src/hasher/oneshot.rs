//! Slice-at-a-time from-scratch backend.
//!
//! Compresses full blocks straight out of the input slice and assembles the
//! padded tail on the stack, skipping the streaming buffer entirely. For the
//! short messages a brute-force scan produces, the whole digest is usually a
//! single compression call.

use crate::sha256::{BLOCK_LEN, DIGEST_LEN, H0, K};

use super::{Digest, Hasher};

pub struct OneshotHasher;

impl Hasher for OneshotHasher {
    fn name(&self) -> &'static str {
        "oneshot"
    }

    fn hash(&mut self, input: &[u8]) -> Digest {
        digest(input)
    }
}

fn digest(input: &[u8]) -> [u8; DIGEST_LEN] {
    let mut state = H0;

    let mut blocks = input.chunks_exact(BLOCK_LEN);
    for block in &mut blocks {
        compress(&mut state, block.try_into().unwrap());
    }

    // Remainder plus padding spans one block, or two when fewer than 8 bytes
    // stay free after the 0x80 marker.
    let rest = blocks.remainder();
    let mut tail = [0u8; 2 * BLOCK_LEN];
    tail[..rest.len()].copy_from_slice(rest);
    tail[rest.len()] = 0x80;

    let tail_len = if rest.len() < 56 { BLOCK_LEN } else { 2 * BLOCK_LEN };
    let bits = input.len() as u64 * 8;
    tail[tail_len - 8..tail_len].copy_from_slice(&bits.to_be_bytes());

    for block in tail[..tail_len].chunks_exact(BLOCK_LEN) {
        compress(&mut state, block.try_into().unwrap());
    }

    let mut out = [0u8; DIGEST_LEN];
    for (chunk, word) in out.chunks_exact_mut(4).zip(state.iter()) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

#[inline]
fn choose(e: u32, f: u32, g: u32) -> u32 {
    (e & f) ^ (!e & g)
}

#[inline]
fn majority(a: u32, b: u32, c: u32) -> u32 {
    (a & b) | (c & (a | b))
}

fn compress(state: &mut [u32; 8], block: &[u8; BLOCK_LEN]) {
    let mut m = [0u32; 64];
    for (i, chunk) in block.chunks_exact(4).enumerate() {
        m[i] = u32::from_be_bytes(chunk.try_into().unwrap());
    }
    for i in 16..64 {
        let s0 = m[i - 15].rotate_right(7) ^ m[i - 15].rotate_right(18) ^ (m[i - 15] >> 3);
        let s1 = m[i - 2].rotate_right(17) ^ m[i - 2].rotate_right(19) ^ (m[i - 2] >> 10);
        m[i] = s1
            .wrapping_add(m[i - 7])
            .wrapping_add(s0)
            .wrapping_add(m[i - 16]);
    }

    let mut v = *state;

    for i in 0..64 {
        let maj = majority(v[0], v[1], v[2]);
        let xor_a = v[0].rotate_right(2) ^ v[0].rotate_right(13) ^ v[0].rotate_right(22);
        let ch = choose(v[4], v[5], v[6]);
        let xor_e = v[4].rotate_right(6) ^ v[4].rotate_right(11) ^ v[4].rotate_right(25);
        let sum = m[i]
            .wrapping_add(K[i])
            .wrapping_add(v[7])
            .wrapping_add(ch)
            .wrapping_add(xor_e);
        let new_a = xor_a.wrapping_add(maj).wrapping_add(sum);
        let new_e = v[3].wrapping_add(sum);

        v[7] = v[6];
        v[6] = v[5];
        v[5] = v[4];
        v[4] = new_e;
        v[3] = v[2];
        v[2] = v[1];
        v[1] = v[0];
        v[0] = new_a;
    }

    for (s, w) in state.iter_mut().zip(v.iter()) {
        *s = s.wrapping_add(*w);
    }
}
