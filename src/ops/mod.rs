//! Evolutionary operators and their iteration policies.
//!
//! An operator is a stateless transformation with a fixed input/output
//! cardinality, bound to an [`Iteration`] policy that decides how a
//! container is split into batches. The four operator families mirror
//! the phases of a generation:
//!
//! - **Selection** ([`selection`]): [`Tournament`](selection::Tournament),
//!   [`Best`](selection::Best), [`BestMean`](selection::BestMean)
//! - **Reproduction** ([`reproduction`]):
//!   [`Replicate`](reproduction::Replicate),
//!   [`Crossover`](reproduction::Crossover),
//!   [`DiscreteRecombination`](reproduction::DiscreteRecombination),
//!   [`EquiMix`](reproduction::EquiMix)
//! - **Mutation** ([`mutation`]): [`BitFlip`](mutation::BitFlip),
//!   [`UniformInt`](mutation::UniformInt),
//!   [`UniformNumber`](mutation::UniformNumber),
//!   [`NormalPerturbation`](mutation::NormalPerturbation) (the GP tree
//!   mutation lives in [`crate::gp`])
//! - **Integration** ([`integration`]):
//!   [`OffspringFirst`](integration::OffspringFirst),
//!   [`Crowded`](integration::Crowded)

mod iteration;
mod operator;

pub mod integration;
pub mod mutation;
pub mod reproduction;
pub mod selection;

pub use iteration::Iteration;
pub use operator::Operator;
