//! Intent oracle core: text in, crystallized words out.
//!
//! The pipeline has two numeric stages:
//!
//! 1. [`charge`]: intent bytes and an entropy draw become a unit-length
//!    charge vector (SHA-256 index perturbation, `sin(pi x)` refinement).
//! 2. [`crystallize`]: a greedy nearest-neighbor walk over an
//!    [`EmbeddingTable`], blending the charge toward each selected word until
//!    the walk settles.
//!
//! # Modules
//!
//! - [`config`]: layered TOML/environment configuration
//! - [`error`]: error types and result aliases
//! - [`entropy`]: remote, local and stub entropy sources plus the guarded
//!   timeout/fallback wrapper
//! - [`similarity`]: cosine similarity, normalization, first-occurrence argmax
//! - [`table`]: validated read-only embedding vocabulary
//! - [`artifact`]: JSON / text artifact loading
//! - [`oracle`]: request facade producing a [`Manifestation`]
//!
//! # Example
//!
//! ```
//! use intent_oracle_core::{EmbeddingCrystallizer, EmbeddingTable};
//!
//! let table = EmbeddingTable::from_entries([
//!     ("ember", vec![1.0, 0.0]),
//!     ("frost", vec![0.0, 1.0]),
//! ])
//! .unwrap();
//!
//! let crystal = EmbeddingCrystallizer::default()
//!     .crystallize(&[0.9, 0.1], &table)
//!     .unwrap();
//! assert_eq!(crystal.words[0], "ember");
//! ```

pub mod artifact;
pub mod charge;
pub mod config;
pub mod crystallize;
pub mod entropy;
pub mod error;
pub mod oracle;
pub mod similarity;
pub mod table;

pub use charge::{ChargeStats, ChargeVector, ChargeVectorSynthesizer, SynthesizedCharge};
pub use config::OracleConfig;
pub use crystallize::{Crystal, EmbeddingCrystallizer, StopReason};
pub use entropy::{EntropyOrigin, EntropySource, GuardedEntropy, LocalEntropy};
pub use error::{OracleError, OracleResult};
pub use oracle::{Manifestation, Oracle};
pub use table::EmbeddingTable;
