//! Parser for Schwefel's evolution-strategy notation.
//!
//! The notation `a/b{,+}c(d/e{,+}f)^g`, optionally wrapped in
//! `[...]^h`, compactly encodes a two-level multimembered evolution
//! strategy (Schwefel, 1977):
//!
//! - `a`: number of parent populations (μ at population level)
//! - `b`: populations mixed into one new population (ρ at population
//!   level)
//! - `c`: number of offspring populations (λ at population level)
//! - `d`: number of parent individuals (μ)
//! - `e`: individuals mixed into one offspring (ρ)
//! - `f`: number of offspring individuals (λ)
//! - `g`: generations each population evolves per community generation
//! - `h`: number of community generations (two-level form only)
//!
//! `+` includes the parents of a level in that level's selection pool;
//! `,` restricts selection to offspring. A signature without the
//! `a/b{,+}c` prefix describes a single-population strategy.

use regex::Regex;

use crate::error::EvoError;

/// The grammar of the parenthesized core signature.
const SIGNATURE_PATTERN: &str =
    r"^(?:(\d+)(?:/(\d+))?([+,])(\d+))?\((\d+)(?:/(\d+))?([+,])(\d+)\)(?:\^(\d+))?$";

/// The grammar of the optional two-level wrapper.
const WRAPPER_PATTERN: &str = r"^\[(.+)\](?:\^(\d+))?$";

/// All parameters encoded by an ES signature string.
///
/// Parsed via [`Signature::parse`]; every count defaults to 1 where the
/// notation allows omission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// Parent individuals per population (μ).
    pub ind_mu: usize,
    /// Offspring individuals per population (λ).
    pub ind_lambda: usize,
    /// Individuals mixed into one offspring (ρ).
    pub ind_rho: usize,
    /// Inner generations per community generation (γ).
    pub ind_gamma: usize,
    /// Whether parents compete in individual-level selection (`+`).
    pub ind_parents_included: bool,
    /// Parent populations (μ at population level).
    pub pop_mu: usize,
    /// Offspring populations (λ at population level).
    pub pop_lambda: usize,
    /// Populations mixed into one offspring population (ρ at
    /// population level).
    pub pop_rho: usize,
    /// Community generations (`h` of the two-level form).
    pub pop_gamma: usize,
    /// Whether parent populations compete in population-level
    /// selection (`+`).
    pub pop_parents_included: bool,
}

impl Signature {
    /// Parses a signature string.
    ///
    /// # Errors
    /// Returns [`EvoError::InvalidSignature`] when the string does not
    /// match the grammar, and [`EvoError::InvalidConfig`] when it
    /// does but encodes a zero count.
    ///
    /// # Examples
    ///
    /// ```
    /// use evostrat::strategy::Signature;
    ///
    /// let signature = Signature::parse("3/1,5(2/2,14)^10").unwrap();
    /// assert_eq!(signature.pop_mu, 3);
    /// assert_eq!(signature.pop_lambda, 5);
    /// assert_eq!(signature.ind_mu, 2);
    /// assert_eq!(signature.ind_lambda, 14);
    /// assert_eq!(signature.ind_gamma, 10);
    /// assert!(!signature.pop_parents_included);
    /// ```
    pub fn parse(signature: &str) -> Result<Self, EvoError> {
        let invalid = || EvoError::InvalidSignature(signature.to_string());

        let wrapper = Regex::new(WRAPPER_PATTERN).expect("wrapper pattern is valid");
        let (core, pop_gamma) = match wrapper.captures(signature) {
            Some(captures) => {
                let inner = captures.get(1).expect("group 1 is not optional").as_str();
                let gamma = match captures.get(2) {
                    Some(digits) => digits.as_str().parse().map_err(|_| invalid())?,
                    None => 1,
                };
                (inner.to_string(), gamma)
            }
            None => (signature.to_string(), 1),
        };

        let pattern = Regex::new(SIGNATURE_PATTERN).expect("signature pattern is valid");
        let captures = pattern.captures(&core).ok_or_else(invalid)?;
        let count = |index: usize, default: usize| -> Result<usize, EvoError> {
            match captures.get(index) {
                Some(digits) => digits.as_str().parse().map_err(|_| invalid()),
                None => Ok(default),
            }
        };

        let parsed = Self {
            pop_mu: count(1, 1)?,
            pop_rho: count(2, 1)?,
            pop_parents_included: captures.get(3).map(|m| m.as_str()) == Some("+"),
            pop_lambda: count(4, 1)?,
            ind_mu: count(5, 1)?,
            ind_rho: count(6, 1)?,
            ind_parents_included: captures.get(7).map(|m| m.as_str()) == Some("+"),
            ind_lambda: count(8, 1)?,
            ind_gamma: count(9, 1)?,
            pop_gamma,
        };

        let counts = [
            parsed.pop_mu,
            parsed.pop_rho,
            parsed.pop_lambda,
            parsed.ind_mu,
            parsed.ind_rho,
            parsed.ind_lambda,
            parsed.ind_gamma,
            parsed.pop_gamma,
        ];
        if counts.contains(&0) {
            return Err(EvoError::InvalidConfig(format!(
                "signature {signature:?} contains a zero count"
            )));
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_population_signature() {
        let signature = Signature::parse("(5/2,10)").unwrap();
        assert_eq!(signature.ind_mu, 5);
        assert_eq!(signature.ind_rho, 2);
        assert_eq!(signature.ind_lambda, 10);
        assert!(!signature.ind_parents_included);
        assert_eq!(signature.pop_mu, 1);
        assert_eq!(signature.pop_lambda, 1);
        assert_eq!(signature.ind_gamma, 1);
        assert_eq!(signature.pop_gamma, 1);
    }

    #[test]
    fn test_two_level_signature() {
        let signature = Signature::parse("3/1,5(2/2,14)^10").unwrap();
        assert_eq!(signature.pop_mu, 3);
        assert_eq!(signature.pop_rho, 1);
        assert_eq!(signature.pop_lambda, 5);
        assert!(!signature.pop_parents_included);
        assert_eq!(signature.ind_mu, 2);
        assert_eq!(signature.ind_rho, 2);
        assert_eq!(signature.ind_lambda, 14);
        assert_eq!(signature.ind_gamma, 10);
    }

    #[test]
    fn test_plus_selection_flags() {
        let signature = Signature::parse("2+4(5+20)").unwrap();
        assert!(signature.pop_parents_included);
        assert!(signature.ind_parents_included);
    }

    #[test]
    fn test_bracketed_community_generations() {
        let signature = Signature::parse("[1/1,2(2/1,10)^10]^7").unwrap();
        assert_eq!(signature.pop_mu, 1);
        assert_eq!(signature.pop_lambda, 2);
        assert_eq!(signature.ind_mu, 2);
        assert_eq!(signature.ind_lambda, 10);
        assert_eq!(signature.ind_gamma, 10);
        assert_eq!(signature.pop_gamma, 7);
    }

    #[test]
    fn test_bracket_without_exponent_defaults_to_one() {
        let signature = Signature::parse("[(5,10)]").unwrap();
        assert_eq!(signature.pop_gamma, 1);
    }

    #[test]
    fn test_defaults_for_omitted_groups() {
        let signature = Signature::parse("(7,12)").unwrap();
        assert_eq!(signature.ind_rho, 1);
        assert_eq!(signature.ind_gamma, 1);
    }

    #[test]
    fn test_malformed_signatures_are_rejected() {
        for bad in ["", "abc", "5,10", "(5;10)", "(5,10", "5,(3,4)", "[(5,10)", "(5,10)]", "(5,10)x"] {
            assert!(
                matches!(Signature::parse(bad), Err(EvoError::InvalidSignature(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_zero_counts_are_config_errors() {
        assert!(matches!(
            Signature::parse("(0,10)"),
            Err(EvoError::InvalidConfig(_))
        ));
        assert!(matches!(
            Signature::parse("(5,10)^0"),
            Err(EvoError::InvalidConfig(_))
        ));
    }
}
