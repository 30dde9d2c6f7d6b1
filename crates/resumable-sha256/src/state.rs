//! Exported engine state and the seed used to resume from it.

use serde::{Deserialize, Serialize};

use crate::compress::{HashState, STATE_LEN};
use crate::{EngineError, Result};

/// Snapshot of a live engine.
///
/// `state` holds the eight working registers in big-endian order, `pending`
/// the bytes that have not yet filled a block, and `total_bits` everything
/// hashed so far (pending bytes included).
///
/// Serializes with hex-encoded byte fields:
///
/// ```json
/// { "state": "6a09e667…", "pending": "616263", "total_bits": 24 }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExportedState {
    #[serde(with = "state_hex")]
    pub state: [u8; STATE_LEN],

    #[serde(with = "hex")]
    pub pending: Vec<u8>,

    pub total_bits: u64,
}

impl ExportedState {
    /// Seed that resumes hashing exactly where this snapshot was taken.
    pub fn to_seed(&self) -> Seed {
        Seed::new(self.state).pending(self.pending.clone()).total_bits(self.total_bits)
    }
}

impl From<ExportedState> for Seed {
    fn from(exported: ExportedState) -> Self {
        Seed::new(exported.state).pending(exported.pending).total_bits(exported.total_bits)
    }
}

/// Resumption options for [`Sha256Engine`](crate::Sha256Engine).
///
/// The state is only validated when the engine is built, so a seed can be
/// assembled from untrusted bytes without checking them first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Seed {
    state:      Vec<u8>,
    pending:    Vec<u8>,
    total_bits: Option<u64>,
}

impl Seed {
    pub fn new(state: impl Into<Vec<u8>>) -> Self {
        Self {
            state:      state.into(),
            pending:    Vec::new(),
            total_bits: None,
        }
    }

    /// Bytes replayed through `update` before any initial data.
    pub fn pending(mut self, pending: impl Into<Vec<u8>>) -> Self {
        self.pending = pending.into();
        self
    }

    /// Total bits hashed so far, counting the pending bytes.
    pub fn total_bits(mut self, total_bits: u64) -> Self {
        self.total_bits = Some(total_bits);
        self
    }

    pub fn get_state(&self) -> &[u8] { &self.state }

    pub fn get_pending(&self) -> &[u8] { &self.pending }

    pub fn get_total_bits(&self) -> Option<u64> { self.total_bits }

    /// Validate the register bytes and install the counter.
    ///
    /// Pending bits are taken off the total because replaying the pending
    /// bytes counts them again.
    pub(crate) fn into_parts(self) -> Result<(HashState, Vec<u8>)> {
        let registers: &[u8; STATE_LEN] = self
            .state
            .as_slice()
            .try_into()
            .map_err(|_| EngineError::InvalidStateSize {
                actual: self.state.len(),
            })?;

        let pending_bits = self.pending.len() as u64 * 8;
        // Wraps like the 64-bit length field; replaying the pending bytes
        // brings the counter back to exactly `total`.
        let counter = match self.total_bits {
            Some(total) if total > 0 => total.wrapping_sub(pending_bits),
            _ => 0,
        };

        Ok((HashState::from_be_bytes(registers, counter), self.pending))
    }
}

mod state_hex {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::EngineError;
    use crate::compress::STATE_LEN;

    pub fn serialize<S: Serializer>(
        state: &[u8; STATE_LEN],
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(state))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<[u8; STATE_LEN], D::Error> {
        let text = String::deserialize(deserializer)?;
        let bytes = hex::decode(&text).map_err(D::Error::custom)?;
        <[u8; STATE_LEN]>::try_from(bytes.as_slice()).map_err(|_| {
            D::Error::custom(EngineError::InvalidStateSize {
                actual: bytes.len(),
            })
        })
    }
}
