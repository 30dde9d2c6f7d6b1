//! Block absorption and padding on top of the raw `sha2` compression function.

use sha2::compress256;
use sha2::digest::consts::U64;
use sha2::digest::generic_array::GenericArray;

pub(crate) const BLOCK_LEN: usize = 64;
pub(crate) const STATE_LEN: usize = 32;
pub(crate) const DIGEST_LEN: usize = 32;

/// SHA-256 initial hash values (FIPS 180-4, 5.3.3).
const IV: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

type Block = GenericArray<u8, U64>;

/// Upper bound on blocks copied into the batch buffer per compression call.
const BATCH_BLOCKS: usize = 64;

/// Working registers plus the count of bits already run through `compress256`.
///
/// Registers are kept in native order; conversion to the big-endian wire form
/// only happens at the import/export edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HashState {
    h:    [u32; 8],
    bits: u64,
}

impl Default for HashState {
    fn default() -> Self { Self::new() }
}

impl HashState {
    pub fn new() -> Self { Self { h: IV, bits: 0 } }

    pub fn from_be_bytes(bytes: &[u8; STATE_LEN], bits: u64) -> Self {
        let mut h = [0u32; 8];
        for (word, chunk) in h.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self { h, bits }
    }

    pub fn to_be_bytes(&self) -> [u8; STATE_LEN] {
        let mut out = [0u8; STATE_LEN];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.h.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }

    pub fn bits(&self) -> u64 { self.bits }

    /// Absorb `prefix ++ data`.
    ///
    /// The combined length must be a whole number of blocks and `prefix` must
    /// be shorter than one block. Blocks are handed to `compress256` in
    /// batches of at most [`BATCH_BLOCKS`] through one reused buffer.
    pub fn absorb(&mut self, prefix: &[u8], data: &[u8]) {
        let total = prefix.len() + data.len();
        debug_assert_eq!(total % BLOCK_LEN, 0);
        debug_assert!(prefix.len() < BLOCK_LEN);
        if total == 0 {
            return;
        }
        tracing::trace!(blocks = total / BLOCK_LEN, "absorbing blocks");

        let mut rest = data;
        if !prefix.is_empty() {
            let fill = BLOCK_LEN - prefix.len();
            let mut first = Block::default();
            first[..prefix.len()].copy_from_slice(prefix);
            first[prefix.len()..].copy_from_slice(&rest[..fill]);
            compress256(&mut self.h, &[first]);
            rest = &rest[fill..];
        }

        let mut batch = Vec::with_capacity(BATCH_BLOCKS.min(rest.len() / BLOCK_LEN));
        for chunk in rest.chunks(BATCH_BLOCKS * BLOCK_LEN) {
            batch.clear();
            batch.extend(chunk.chunks_exact(BLOCK_LEN).map(Block::clone_from_slice));
            compress256(&mut self.h, &batch);
        }
        self.bits = self.bits.wrapping_add(total as u64 * 8);
    }

    /// Fold in the trailing partial block with standard padding and emit the digest.
    pub fn finalize(mut self, tail: &[u8]) -> [u8; DIGEST_LEN] {
        debug_assert!(tail.len() < BLOCK_LEN);
        let bits = self.bits.wrapping_add(tail.len() as u64 * 8);

        // 0x80 marker plus the 8-byte length must fit after the tail.
        let len = if tail.len() + 9 <= BLOCK_LEN { BLOCK_LEN } else { 2 * BLOCK_LEN };
        let mut padded = [0u8; 2 * BLOCK_LEN];
        padded[..tail.len()].copy_from_slice(tail);
        padded[tail.len()] = 0x80;
        padded[len - 8..len].copy_from_slice(&bits.to_be_bytes());

        self.absorb(&[], &padded[..len]);
        self.to_be_bytes()
    }
}
