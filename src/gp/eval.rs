//! Evaluation of linearly encoded tree genomes.

use std::collections::HashMap;

use super::node::{GpNode, GpValue};
use crate::error::EvoError;
use crate::fitness::Fitness;
use crate::genome::Individual;

/// Evaluates a tree genome.
///
/// The prefix encoding is executed right to left with a value stack:
/// terminals push their value, functions pop their arguments and push
/// the result. Unbound terminals resolve from `args` by name.
///
/// # Errors
/// Returns [`EvoError::UnboundTerminal`] when an unbound terminal has
/// no entry in `args`.
///
/// # Panics
/// Panics on a malformed encoding (a function without enough operands,
/// or leftover values) — genomes built by
/// [`GpPool`](crate::gp::GpPool) are always well formed, so this
/// indicates a corrupted genome.
pub fn evaluate(
    individual: &Individual<GpNode>,
    args: &HashMap<String, GpValue>,
) -> Result<GpValue, EvoError> {
    let mut stack: Vec<GpValue> = Vec::new();
    for node in individual.genes().iter().rev() {
        match node {
            GpNode::Terminal(terminal) => match terminal.value() {
                Some(value) => stack.push(value),
                None => stack.push(
                    *args
                        .get(terminal.name())
                        .ok_or_else(|| EvoError::UnboundTerminal(terminal.name().to_string()))?,
                ),
            },
            GpNode::Function(function) => {
                let argc = function.argtypes().len();
                let mut call_args = Vec::with_capacity(argc);
                for _ in 0..argc {
                    call_args.push(stack.pop().expect("malformed tree genome"));
                }
                stack.push(function.call(&call_args));
            }
        }
    }
    let result = stack.pop().expect("malformed tree genome");
    assert!(stack.is_empty(), "malformed tree genome");
    Ok(result)
}

/// Builds a [`Fitness`] from tree evaluation.
///
/// The genome is evaluated once per argument set in `argsets` (an
/// empty list behaves like one empty set) and `score` condenses the
/// collected results into a fitness value.
///
/// # Panics
/// The returned fitness panics when a genome contains an unbound
/// terminal missing from every argument set — an evolution run cannot
/// continue past an unresolvable genome.
pub fn gp_fitness(
    argsets: Vec<HashMap<String, GpValue>>,
    score: impl Fn(&[GpValue]) -> f64 + Send + Sync + 'static,
) -> Fitness<GpNode> {
    let argsets = if argsets.is_empty() { vec![HashMap::new()] } else { argsets };
    Fitness::new(move |individual| {
        let results: Vec<GpValue> = argsets
            .iter()
            .map(|args| match evaluate(individual, args) {
                Ok(value) => value,
                Err(error) => panic!("{error}"),
            })
            .collect();
        score(&results)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gp::{GpPool, GpTerminal, GpType};
    use crate::random::create_rng;
    use std::sync::Arc;

    use crate::gp::GpFunction;

    fn add() -> Arc<GpFunction> {
        Arc::new(GpFunction::new(
            "add",
            GpType::Number,
            &[GpType::Number, GpType::Number],
            |a| GpValue::Number(a[0].number().unwrap() + a[1].number().unwrap()),
        ))
    }

    fn sub() -> Arc<GpFunction> {
        Arc::new(GpFunction::new(
            "sub",
            GpType::Number,
            &[GpType::Number, GpType::Number],
            |a| GpValue::Number(a[0].number().unwrap() - a[1].number().unwrap()),
        ))
    }

    fn constant(value: f64) -> GpNode {
        GpNode::Terminal(GpTerminal::bound(GpValue::Number(value)))
    }

    #[test]
    fn test_evaluate_nested_tree() {
        // add(sub(5, 2), 10) = 13, prefix encoded
        let genome = vec![
            GpNode::Function(add()),
            GpNode::Function(sub()),
            constant(5.0),
            constant(2.0),
            constant(10.0),
        ];
        let result = evaluate(&Individual::new(genome), &HashMap::new()).unwrap();
        assert_eq!(result, GpValue::Number(13.0));
    }

    #[test]
    fn test_argument_order_is_left_to_right() {
        // sub(5, 2) = 3, not -3
        let genome = vec![GpNode::Function(sub()), constant(5.0), constant(2.0)];
        let result = evaluate(&Individual::new(genome), &HashMap::new()).unwrap();
        assert_eq!(result, GpValue::Number(3.0));
    }

    #[test]
    fn test_unbound_terminal_resolves_from_args() {
        let genome = vec![
            GpNode::Function(add()),
            GpNode::Terminal(GpTerminal::unbound("x", GpType::Number)),
            constant(1.0),
        ];
        let individual = Individual::new(genome);

        let mut args = HashMap::new();
        args.insert("x".to_string(), GpValue::Number(41.0));
        assert_eq!(evaluate(&individual, &args).unwrap(), GpValue::Number(42.0));

        let err = evaluate(&individual, &HashMap::new()).unwrap_err();
        assert!(matches!(err, EvoError::UnboundTerminal(name) if name == "x"));
    }

    #[test]
    fn test_random_genomes_evaluate() {
        let mut pool = GpPool::new(1, 4);
        pool.push_function("add", GpType::Number, &[GpType::Number, GpType::Number], |a| {
            GpValue::Number(a[0].number().unwrap() + a[1].number().unwrap())
        });
        pool.push_function("mul", GpType::Number, &[GpType::Number, GpType::Number], |a| {
            GpValue::Number(a[0].number().unwrap() * a[1].number().unwrap())
        });
        pool.push_terminals([GpValue::Number(1.0), GpValue::Number(2.0), GpValue::Number(3.0)]);

        use crate::pool::GenePool;
        let mut rng = create_rng(42);
        for _ in 0..50 {
            let individual = Individual::new(pool.random_genome(&mut rng).unwrap());
            let value = evaluate(&individual, &HashMap::new()).unwrap();
            assert!(value.number().is_some());
        }
    }

    #[test]
    fn test_gp_fitness_scores_over_argsets() {
        // fitness = negative squared error of add(x, 1) against target 3
        let genome = vec![
            GpNode::Function(add()),
            GpNode::Terminal(GpTerminal::unbound("x", GpType::Number)),
            constant(1.0),
        ];
        let argsets: Vec<HashMap<String, GpValue>> = [1.0, 2.0, 3.0]
            .iter()
            .map(|&x| {
                let mut set = HashMap::new();
                set.insert("x".to_string(), GpValue::Number(x));
                set
            })
            .collect();
        let fitness = gp_fitness(argsets, |results| {
            -results
                .iter()
                .map(|v| (v.number().unwrap() - 3.0).powi(2))
                .sum::<f64>()
        });

        let mut individual = Individual::new(genome);
        fitness.evaluate_individual(&mut individual);
        // errors: (2-3)^2 + (3-3)^2 + (4-3)^2 = 2
        assert_eq!(individual.fitness(), -2.0);
    }
}
