//! Formatting policies

/// Which prefix declarations are written
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PrefixPolicy {
    /// Every prefix declared on the graph
    #[default]
    All,

    /// Only prefixes that compact at least one IRI in the output
    UsedOnly,

    /// No prefixes; every IRI is written in full
    None,
}

/// Policy for blank node label formatting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlankNodePolicy {
    /// Keep the labels stored in the graph
    #[default]
    Preserve,

    /// Rename all blank nodes to `_:b0`, `_:b1`, ... in order of first use
    ///
    /// Output no longer depends on how the labels were allocated.
    Deterministic,
}
