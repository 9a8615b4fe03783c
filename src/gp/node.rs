//! Typed nodes of genetic-programming trees.

use std::fmt;
use std::sync::Arc;

/// The type tag of a tree node's value.
///
/// Registration and tree construction are keyed by these tags: an
/// inner node only ever receives children whose return type matches its
/// declared argument types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GpType {
    /// A real number.
    Number,
    /// A truth value.
    Boolean,
}

/// A runtime value flowing through a tree evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GpValue {
    /// A real number.
    Number(f64),
    /// A truth value.
    Boolean(bool),
}

impl GpValue {
    /// The type tag of this value.
    pub fn gp_type(&self) -> GpType {
        match self {
            GpValue::Number(_) => GpType::Number,
            GpValue::Boolean(_) => GpType::Boolean,
        }
    }

    /// The contained number, if this is one.
    pub fn number(&self) -> Option<f64> {
        match self {
            GpValue::Number(n) => Some(*n),
            GpValue::Boolean(_) => None,
        }
    }

    /// The contained truth value, if this is one.
    pub fn boolean(&self) -> Option<bool> {
        match self {
            GpValue::Boolean(b) => Some(*b),
            GpValue::Number(_) => None,
        }
    }
}

impl fmt::Display for GpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpValue::Number(n) => write!(f, "{n}"),
            GpValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// An elementary function: an inner tree node with at least one typed
/// argument and a declared return type.
///
/// Function descriptors are immutable and shared between all trees that
/// use them; a genome only stores the handle.
pub struct GpFunction {
    name: String,
    rtype: GpType,
    argtypes: Vec<GpType>,
    method: Box<dyn Fn(&[GpValue]) -> GpValue + Send + Sync>,
}

impl GpFunction {
    /// Creates a function descriptor from its
    /// (return type, argument types, callable) triple.
    ///
    /// # Panics
    /// Panics if `argtypes` is empty — zero-argument symbols are
    /// terminals, not functions.
    pub fn new(
        name: impl Into<String>,
        rtype: GpType,
        argtypes: &[GpType],
        method: impl Fn(&[GpValue]) -> GpValue + Send + Sync + 'static,
    ) -> Self {
        assert!(
            !argtypes.is_empty(),
            "elementary alleles take at least one argument; register a terminal instead"
        );
        Self {
            name: name.into(),
            rtype,
            argtypes: argtypes.to_vec(),
            method: Box::new(method),
        }
    }

    /// The function's name, used in tree rendering.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared return type.
    pub fn rtype(&self) -> GpType {
        self.rtype
    }

    /// The declared argument types, one per child.
    pub fn argtypes(&self) -> &[GpType] {
        &self.argtypes
    }

    /// Invokes the wrapped callable.
    pub fn call(&self, args: &[GpValue]) -> GpValue {
        (self.method)(args)
    }
}

impl fmt::Debug for GpFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GpFunction")
            .field("name", &self.name)
            .field("rtype", &self.rtype)
            .field("argtypes", &self.argtypes)
            .finish_non_exhaustive()
    }
}

impl PartialEq for GpFunction {
    /// Descriptor identity: name plus signature. The callables
    /// themselves cannot be compared.
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.rtype == other.rtype && self.argtypes == other.argtypes
    }
}

/// A terminal symbol: a leaf node.
///
/// A terminal is either **bound** to a fixed value or **unbound** — a
/// named argument whose value must be supplied at evaluation time.
#[derive(Debug, Clone, PartialEq)]
pub struct GpTerminal {
    name: String,
    rtype: GpType,
    value: Option<GpValue>,
}

impl GpTerminal {
    /// Creates a bound terminal holding a fixed value.
    pub fn bound(value: GpValue) -> Self {
        Self {
            name: String::new(),
            rtype: value.gp_type(),
            value: Some(value),
        }
    }

    /// Creates an unbound terminal resolved by name at evaluation time.
    pub fn unbound(name: impl Into<String>, rtype: GpType) -> Self {
        Self {
            name: name.into(),
            rtype,
            value: None,
        }
    }

    /// The argument name; empty for bound constants.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The terminal's type.
    pub fn rtype(&self) -> GpType {
        self.rtype
    }

    /// The bound value, or `None` for unbound terminals.
    pub fn value(&self) -> Option<GpValue> {
        self.value
    }
}

impl fmt::Display for GpTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{value}"),
            None => write!(f, "<{}>", self.name),
        }
    }
}

/// One node of a linearly encoded tree genome.
///
/// Genomes store trees in prefix (preorder) encoding: a node is
/// followed immediately by the encodings of its children, left to
/// right. Every subtree is therefore a contiguous slice, which is what
/// the point mutation's splice relies on.
#[derive(Debug, Clone, PartialEq)]
pub enum GpNode {
    /// An inner node referencing a shared function descriptor.
    Function(Arc<GpFunction>),
    /// A leaf node.
    Terminal(GpTerminal),
}

impl GpNode {
    /// The node's return type.
    pub fn rtype(&self) -> GpType {
        match self {
            GpNode::Function(function) => function.rtype(),
            GpNode::Terminal(terminal) => terminal.rtype(),
        }
    }

    /// The number of children this node takes in the encoding.
    pub fn arg_count(&self) -> usize {
        match self {
            GpNode::Function(function) => function.argtypes().len(),
            GpNode::Terminal(_) => 0,
        }
    }
}

impl fmt::Display for GpNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpNode::Function(function) => write!(f, "{}", function.name()),
            GpNode::Terminal(terminal) => write!(f, "{terminal}"),
        }
    }
}
