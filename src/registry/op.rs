use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArithmeticOperator {
    pub method: &'static str,
    pub symbol: &'static str,
    /// Marker trait every result representation must implement.
    pub capability: &'static str,
    /// Integer-domain spelling of the operator (`wrapping_add`, ...).
    pub wrapping: &'static str,
    /// `a op b == b op a`; selects the reverse adapter.
    pub commutative: bool,
}

/// A comparison as declared; `inverse: None` means self-inverse.
#[derive(Clone, Debug)]
pub struct ComparisonDecl {
    pub method: &'static str,
    pub symbol: &'static str,
    pub inverse: Option<&'static str>,
}

/// A comparison whose inverse has been resolved against the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ComparisonOperator {
    pub method: &'static str,
    pub symbol: &'static str,
    /// `a op b == b inverse a`
    pub inverse: &'static str,
}

/// Either kind of binary operator, as seen by the emitters.
#[derive(Clone, Copy, Debug)]
pub enum Operator<'r> {
    Arithmetic(&'r ArithmeticOperator),
    Comparison(&'r ComparisonOperator),
}

impl Operator<'_> {
    pub fn method(&self) -> &'static str {
        match self {
            Self::Arithmetic(op) => op.method,
            Self::Comparison(op) => op.method,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Arithmetic(op) => op.symbol,
            Self::Comparison(op) => op.symbol,
        }
    }
}
