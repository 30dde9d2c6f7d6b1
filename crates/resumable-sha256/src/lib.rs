//! Resumable SHA-256 with exportable mid-stream state.
//!
//! A [`Sha256Engine`] can be paused at any byte offset, its compression state
//! and pending bytes exported as an [`ExportedState`], and a new engine built
//! from that snapshot later. The resumed engine produces the same digest as one
//! that never stopped.
//!
//! # Key Features
//!
//! - **Portable checkpoints**: registers are exported big-endian, so a snapshot
//!   taken on one machine resumes on any other
//! - **Batched compression**: complete blocks in an update go straight to the
//!   compression function in bounded batches; only the sub-block remainder is
//!   buffered
//! - **Serde support**: [`ExportedState`] serializes with hex-encoded fields
//!
//! # Example
//!
//! ```
//! use resumable_sha256::Sha256Engine;
//!
//! let first = Sha256Engine::with_data(b"hello ");
//! let checkpoint = first.export_state().unwrap();
//!
//! let mut resumed = Sha256Engine::resume(checkpoint.into()).unwrap();
//! resumed.update(b"world").unwrap();
//!
//! assert_eq!(
//!     resumed.hexdigest().unwrap(),
//!     "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
//! );
//! ```

pub use self::engine::Sha256Engine;
pub use self::error::{EngineError, Result};
pub use self::state::{ExportedState, Seed};

mod compress;
mod engine;
mod error;
mod state;
