use std::fmt;
use serde::Serialize;

/// Numeric family of a representation; drives the widening policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Complex,
    Real,
    SignedInteger,
    UnsignedInteger,
}

impl Category {
    pub fn is_integer(self) -> bool {
        matches!(self, Self::SignedInteger | Self::UnsignedInteger)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Complex => "complex",
            Self::Real => "real",
            Self::SignedInteger => "signedInteger",
            Self::UnsignedInteger => "unsignedInteger",
        };
        write!(f, "{s}")
    }
}

/// One scalar encoding known to the runtime.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Representation {
    /// Runtime type name, also what the dispatch failure message prints.
    pub name: &'static str,
    /// Tagged-union variant (`AnyVoxel::I32`, `AnyRandomAccessible::I32`, ...).
    pub variant: &'static str,
    /// Scalar type held by the concrete container (`i32`, `Complex64`, ...).
    pub rust_type: &'static str,
    pub category: Category,
}

impl Representation {
    pub const fn new(
        name: &'static str,
        variant: &'static str,
        rust_type: &'static str,
        category: Category,
    ) -> Self {
        Self { name, variant, rust_type, category }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
