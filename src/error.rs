//! Crate-wide error type.
//!
//! Two of the three failure classes in this crate are represented here:
//! configuration errors (detected at construction time, before any
//! evolution runs) and lookup failures (a gene pool or tree evaluation
//! asking for something that was never registered). The third class —
//! operator arity violations and other broken pipeline preconditions —
//! are programming errors and panic at the point of detection instead.

use crate::gp::GpType;

/// Errors raised by strategy construction, gene pools, and GP tree
/// evaluation.
///
/// All variants are fatal for the triggering operation; nothing in the
/// crate retries. Callers are expected to fix the configuration
/// (signature strings, operator pairings, pool registrations) rather
/// than handle these at runtime.
#[derive(Debug, thiserror::Error)]
pub enum EvoError {
    /// An ES signature string did not match the required grammar.
    #[error("signature {0:?} does not match the pattern a/b{{,+}}c(d/e{{,+}}f)^g, optionally wrapped in [...]^h")]
    InvalidSignature(String),

    /// A strategy or operator was configured with inconsistent
    /// parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Genome creation requested an allele type with no usable entry in
    /// the gene pool.
    #[error("no {kind} allele of type {rtype:?} is registered in the pool")]
    UnknownAlleleType {
        /// Registry that came up empty: "elementary" or "terminal".
        kind: &'static str,
        /// The requested node type.
        rtype: GpType,
    },

    /// A GP tree was evaluated without a value for one of its unbound
    /// terminals.
    #[error("unbound terminal {0:?} evaluated without a value supplied")]
    UnboundTerminal(String),
}
