//! Genetic programming: typed expression-tree genomes.
//!
//! A GP genome is a tree of typed nodes stored in prefix (preorder)
//! linear encoding — every subtree occupies a contiguous slice of the
//! gene vector. Inner nodes are **elementary** functions with at least
//! one typed argument; leaves are **terminal** symbols: fixed
//! constants, ephemeral random constants, or unbound named arguments
//! supplied at evaluation time.
//!
//! - [`GpPool`] registers alleles and draws random trees.
//! - [`evaluate`] executes a genome; [`gp_fitness`] adapts evaluation
//!   into a [`Fitness`](crate::fitness::Fitness).
//! - [`PointMutation`] splices random subtrees in place of existing
//!   nodes.
//!
//! # References
//!
//! - Koza (1992), *Genetic Programming: On the Programming of Computers
//!   by Means of Natural Selection*
//! - Montana (1995), "Strongly Typed Genetic Programming"

mod eval;
mod mutation;
mod node;
mod pool;

pub use eval::{evaluate, gp_fitness};
pub use mutation::PointMutation;
pub use node::{GpFunction, GpNode, GpTerminal, GpType, GpValue};
pub use pool::GpPool;
