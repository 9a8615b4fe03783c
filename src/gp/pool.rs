//! Gene pool for typed expression trees.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::{Rng, RngCore};

use super::node::{GpFunction, GpNode, GpTerminal, GpType, GpValue};
use crate::error::EvoError;
use crate::pool::GenePool;

/// A registered terminal: either a fixed symbol or an ephemeral random
/// constant realized each time it is placed into a genome.
enum TerminalSpec {
    Fixed(GpTerminal),
    Ephemeral {
        rtype: GpType,
        draw: Arc<dyn Fn(&mut dyn RngCore) -> GpValue + Send + Sync>,
    },
}

impl TerminalSpec {
    fn rtype(&self) -> GpType {
        match self {
            TerminalSpec::Fixed(terminal) => terminal.rtype(),
            TerminalSpec::Ephemeral { rtype, .. } => *rtype,
        }
    }

    fn realize(&self, rng: &mut dyn RngCore) -> GpTerminal {
        match self {
            TerminalSpec::Fixed(terminal) => terminal.clone(),
            TerminalSpec::Ephemeral { draw, .. } => GpTerminal::bound(draw(rng)),
        }
    }
}

impl std::fmt::Debug for TerminalSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminalSpec::Fixed(terminal) => write!(f, "Fixed({terminal})"),
            TerminalSpec::Ephemeral { rtype, .. } => write!(f, "Ephemeral({rtype:?})"),
        }
    }
}

/// Gene pool for genetic programming.
///
/// The pool holds two registries keyed by return type: **elementary**
/// functions (inner nodes with at least one typed argument) and
/// **terminals** (leaves — fixed constants, ephemeral random constants,
/// and unbound named arguments). Registration is explicit; nothing is
/// inferred from signatures.
///
/// # Examples
///
/// ```
/// use evostrat::gp::{GpPool, GpType, GpValue};
/// use evostrat::random::create_rng;
/// use evostrat::pool::GenePool;
///
/// let mut pool = GpPool::new(1, 3);
/// pool.push_function("add", GpType::Number, &[GpType::Number, GpType::Number], |a| {
///     GpValue::Number(a[0].number().unwrap() + a[1].number().unwrap())
/// });
/// pool.push_terminals([GpValue::Number(1.0), GpValue::Number(2.0)]);
/// pool.push_argument("x", GpType::Number);
///
/// let mut rng = create_rng(42);
/// let genome = pool.random_genome(&mut rng).unwrap();
/// assert!(!genome.is_empty());
/// ```
#[derive(Debug)]
pub struct GpPool {
    min_depth: usize,
    max_depth: usize,
    elementary: BTreeMap<GpType, Vec<Arc<GpFunction>>>,
    terminal: BTreeMap<GpType, Vec<TerminalSpec>>,
}

impl GpPool {
    /// Creates a pool producing trees with heights drawn uniformly from
    /// `[min_depth, max_depth]`.
    ///
    /// # Panics
    /// Panics if `min_depth > max_depth`.
    pub fn new(min_depth: usize, max_depth: usize) -> Self {
        assert!(min_depth <= max_depth, "tree depth bounds are inverted");
        Self {
            min_depth,
            max_depth,
            elementary: BTreeMap::new(),
            terminal: BTreeMap::new(),
        }
    }

    /// Minimum height of freshly drawn trees.
    pub fn min_depth(&self) -> usize {
        self.min_depth
    }

    /// Maximum height of freshly drawn trees.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Registers an elementary function as an inner-node allele.
    ///
    /// The `(rtype, argtypes, method)` triple fully describes the node:
    /// the return type keys the registry, the argument types constrain
    /// the children.
    ///
    /// # Panics
    /// Panics if `argtypes` is empty.
    pub fn push_function(
        &mut self,
        name: impl Into<String>,
        rtype: GpType,
        argtypes: &[GpType],
        method: impl Fn(&[GpValue]) -> GpValue + Send + Sync + 'static,
    ) {
        let function = Arc::new(GpFunction::new(name, rtype, argtypes, method));
        self.elementary.entry(rtype).or_default().push(function);
    }

    /// Registers fixed-value terminal symbols.
    pub fn push_terminals(&mut self, values: impl IntoIterator<Item = GpValue>) {
        for value in values {
            self.terminal
                .entry(value.gp_type())
                .or_default()
                .push(TerminalSpec::Fixed(GpTerminal::bound(value)));
        }
    }

    /// Registers an unbound named argument.
    ///
    /// Trees containing the terminal require a value for `name` at
    /// evaluation time.
    pub fn push_argument(&mut self, name: impl Into<String>, rtype: GpType) {
        self.terminal
            .entry(rtype)
            .or_default()
            .push(TerminalSpec::Fixed(GpTerminal::unbound(name, rtype)));
    }

    /// Registers an ephemeral random constant.
    ///
    /// Whenever this terminal is drawn during genome construction,
    /// `draw` is invoked once and the resulting value is fixed in that
    /// tree.
    pub fn push_ephemeral(
        &mut self,
        rtype: GpType,
        draw: impl Fn(&mut dyn RngCore) -> GpValue + Send + Sync + 'static,
    ) {
        self.terminal.entry(rtype).or_default().push(TerminalSpec::Ephemeral {
            rtype,
            draw: Arc::new(draw),
        });
    }

    /// Builds a random subtree of the given return type and height, in
    /// prefix encoding.
    ///
    /// Inner depths use elementary functions of the required type,
    /// falling back to a terminal when no elementary of that type
    /// exists; the target height always closes with terminals.
    ///
    /// # Errors
    /// Returns [`EvoError::UnknownAlleleType`] when a required type has
    /// no usable allele.
    pub fn random_subtree(
        &self,
        rtype: GpType,
        height: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<GpNode>, EvoError> {
        let mut genes = Vec::new();
        self.grow(rtype, height, rng, &mut genes)?;
        Ok(genes)
    }

    fn grow(
        &self,
        rtype: GpType,
        height: usize,
        rng: &mut dyn RngCore,
        out: &mut Vec<GpNode>,
    ) -> Result<(), EvoError> {
        if height > 0 {
            if let Some(functions) = self.elementary.get(&rtype).filter(|f| !f.is_empty()) {
                let function = functions[rng.random_range(0..functions.len())].clone();
                out.push(GpNode::Function(function.clone()));
                for &argtype in function.argtypes() {
                    self.grow(argtype, height - 1, rng, out)?;
                }
                return Ok(());
            }
        }

        let terminals = self
            .terminal
            .get(&rtype)
            .filter(|t| !t.is_empty())
            .ok_or(EvoError::UnknownAlleleType { kind: "terminal", rtype })?;
        let spec = &terminals[rng.random_range(0..terminals.len())];
        debug_assert_eq!(spec.rtype(), rtype);
        out.push(GpNode::Terminal(spec.realize(rng)));
        Ok(())
    }
}

impl GenePool for GpPool {
    type Allele = GpNode;

    /// Draws a tree with a random elementary root type and a height in
    /// `[min_depth, max_depth]`.
    fn random_genome(&self, rng: &mut dyn RngCore) -> Result<Vec<GpNode>, EvoError> {
        let root_types: Vec<GpType> = self
            .elementary
            .iter()
            .filter(|(_, f)| !f.is_empty())
            .map(|(&t, _)| t)
            .collect();
        if root_types.is_empty() {
            return Err(EvoError::InvalidConfig(
                "gene pool has no elementary alleles to root a tree".into(),
            ));
        }
        let rtype = root_types[rng.random_range(0..root_types.len())];
        let height = rng.random_range(self.min_depth..=self.max_depth);
        self.random_subtree(rtype, height, rng)
    }
}
