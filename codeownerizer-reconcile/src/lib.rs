//! # codeownerizer-reconcile
//!
//! Grants push permission to every declared code owner that lacks it.
//!
//! Call [`reconcile`] with owners you already have, or [`pipeline::run`] to
//! load them from a CODEOWNERS file or owner list first. Both return a
//! [`ReconcileReport`]; only a failed snapshot fetch (or a cancellation) is an
//! `Err`.

pub mod cancel;
pub mod dedupe;
pub mod engine;
pub mod error;
pub mod inspect;
pub mod pipeline;
pub mod report;
pub mod resolve;
pub mod snapshot;

pub use cancel::CancelToken;
pub use dedupe::dedupe;
pub use engine::{reconcile, ReconcileConfig};
pub use error::{Listing, OwnerFailure, ReconcileError};
pub use inspect::Access;
pub use pipeline::OwnerSource;
pub use report::{OwnerOutcome, OwnerReport, ReconcileReport};
