use std::fmt;

/// What a message parameter is expected to hold, as far as the formats
/// applied to it tell.
///
/// Hints form a small lattice: `None` is the bottom element and any two
/// different informative hints collapse to `Mixed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeHint {
    #[default]
    None,
    Number,
    Datetime,
    String,
    List,
    Mixed,
}

impl TypeHint {
    pub fn merge(self, other: TypeHint) -> TypeHint {
        match (self, other) {
            (a, b) if a == b => a,
            (TypeHint::None, b) => b,
            (a, TypeHint::None) => a,
            _ => TypeHint::Mixed,
        }
    }
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeHint::None => write!(f, "none"),
            TypeHint::Number => write!(f, "number"),
            TypeHint::Datetime => write!(f, "datetime"),
            TypeHint::String => write!(f, "string"),
            TypeHint::List => write!(f, "list"),
            TypeHint::Mixed => write!(f, "mixed"),
        }
    }
}
