use crate::compress::{BLOCK_LEN, DIGEST_LEN, HashState, STATE_LEN};
use crate::{EngineError, ExportedState, Result, Seed};

/// Incremental SHA-256 whose mid-stream state can be exported and resumed.
///
/// Only whole 64-byte blocks reach the compression function; the remainder
/// stays in a pending buffer that is always shorter than one block between
/// calls. Once [`digest`](Self::digest) or [`hexdigest`](Self::hexdigest) runs
/// the state is gone and every further operation returns
/// [`EngineError::EngineFinalized`].
#[derive(Debug)]
pub struct Sha256Engine {
    state:   Option<HashState>,
    pending: Vec<u8>,
}

impl Default for Sha256Engine {
    fn default() -> Self { Self::new() }
}

impl Sha256Engine {
    pub fn new() -> Self {
        Self {
            state:   Some(HashState::new()),
            pending: Vec::new(),
        }
    }

    /// Fresh engine that has already absorbed `data`.
    pub fn with_data(data: &[u8]) -> Self {
        let mut engine = Self::new();
        engine.absorb(data);
        engine
    }

    /// Engine restored from a previously exported seed.
    pub fn resume(seed: Seed) -> Result<Self> { Self::create(None, Some(seed)) }

    /// General constructor.
    ///
    /// Seed pending bytes are replayed first, then `data` is appended.
    pub fn create(data: Option<&[u8]>, seed: Option<Seed>) -> Result<Self> {
        let mut engine = match seed {
            Some(seed) => {
                let (state, pending) = seed.into_parts()?;
                tracing::debug!(
                    counter_bits = state.bits(),
                    pending = pending.len(),
                    "resuming engine from seed"
                );
                let mut engine = Self {
                    state:   Some(state),
                    pending: Vec::new(),
                };
                engine.absorb(&pending);
                engine
            }
            None => Self::new(),
        };

        if let Some(data) = data {
            engine.absorb(data);
        }
        Ok(engine)
    }

    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        self.live()?;
        self.absorb(data);
        Ok(())
    }

    /// Finalize and return the raw digest.
    pub fn digest(&mut self) -> Result<[u8; DIGEST_LEN]> {
        let state = self.state.take().ok_or(EngineError::EngineFinalized)?;
        let pending = std::mem::take(&mut self.pending);
        tracing::debug!(
            total_bits = state.bits().wrapping_add(pending.len() as u64 * 8),
            "finalizing engine"
        );
        Ok(state.finalize(&pending))
    }

    /// Finalize and return the digest as 64 lowercase hex characters.
    pub fn hexdigest(&mut self) -> Result<String> { self.digest().map(hex::encode) }

    /// Independent copy of a live engine.
    pub fn try_clone(&self) -> Result<Self> {
        let state = self.live()?.clone();
        tracing::debug!(pending = self.pending.len(), "cloning engine");
        Ok(Self {
            state:   Some(state),
            pending: self.pending.clone(),
        })
    }

    pub fn export_state(&self) -> Result<ExportedState> {
        Ok(ExportedState {
            state:      self.state_bytes()?,
            pending:    self.pending_bytes()?,
            total_bits: self.total_bit_length()?,
        })
    }

    /// Registers in big-endian order.
    pub fn state_bytes(&self) -> Result<[u8; STATE_LEN]> { Ok(self.live()?.to_be_bytes()) }

    pub fn pending_bytes(&self) -> Result<Vec<u8>> {
        self.live()?;
        Ok(self.pending.clone())
    }

    /// Bits absorbed so far, pending bytes included.
    pub fn total_bit_length(&self) -> Result<u64> {
        let state = self.live()?;
        Ok(state.bits().wrapping_add(self.pending.len() as u64 * 8))
    }

    pub fn is_finalized(&self) -> bool { self.state.is_none() }

    fn live(&self) -> Result<&HashState> { self.state.as_ref().ok_or(EngineError::EngineFinalized) }

    /// Buffering core shared by construction and `update`. Callers check liveness.
    fn absorb(&mut self, data: &[u8]) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if data.is_empty() {
            return;
        }

        let total = self.pending.len() + data.len();
        if total < BLOCK_LEN {
            self.pending.extend_from_slice(data);
            return;
        }

        let boundary = (total / BLOCK_LEN) * BLOCK_LEN - self.pending.len();
        assert!(
            boundary <= data.len(),
            "block boundary {boundary} past end of {} input bytes ({} pending)",
            data.len(),
            self.pending.len(),
        );

        let extra = std::mem::take(&mut self.pending);
        state.absorb(&extra, &data[..boundary]);
        self.pending = data[boundary..].to_vec();
    }
}

impl TryFrom<&ExportedState> for Sha256Engine {
    type Error = EngineError;

    fn try_from(exported: &ExportedState) -> Result<Self> { Self::resume(exported.to_seed()) }
}
