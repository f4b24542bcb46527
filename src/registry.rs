//! Closed catalog of everything the generator enumerates.
//!
//! Three orthogonal axes: scalar representations, container kinds, and
//! operators. The cartesian product of the first two defines every emitted
//! function family; the third defines the functions inside each family.
//! The catalog is declared once (see [`RegistryDecl::builtin`]) and validated
//! on construction; nothing is added or removed afterwards.
pub mod container;
pub mod op;
pub mod repr;

use indexmap::IndexMap;
use serde::Serialize;

pub use container::ContainerKind;
pub use op::{ArithmeticOperator, ComparisonDecl, ComparisonOperator, Operator};
pub use repr::{Category, Representation};

use crate::error::{GenError, RegistryError};

// ————————————————————————————————————————————————————————————————————————————
// DECLARATION
// ————————————————————————————————————————————————————————————————————————————

/// Unvalidated catalog declaration.
#[derive(Clone, Debug)]
pub struct RegistryDecl {
    pub representations: Vec<Representation>,
    pub containers: Vec<&'static str>,
    pub arithmetic: Vec<ArithmeticOperator>,
    pub comparisons: Vec<ComparisonDecl>,
    /// Bare primitive types accepted as operands (forms 3 and 4).
    pub primitives: Vec<&'static str>,
    /// Where integer-widened arithmetic results land.
    pub integer_target: &'static str,
    /// Where real-widened arithmetic results land.
    pub real_target: &'static str,
}

impl RegistryDecl {
    pub fn builtin() -> Self {
        use Category::*;
        Self {
            representations: vec![
                Representation::new("ComplexDoubleType", "C64", "Complex64", Complex),
                Representation::new("ComplexFloatType", "C32", "Complex32", Complex),
                Representation::new("DoubleType", "F64", "f64", Real),
                Representation::new("FloatType", "F32", "f32", Real),
                Representation::new("LongType", "I64", "i64", SignedInteger),
                Representation::new("IntType", "I32", "i32", SignedInteger),
                Representation::new("ShortType", "I16", "i16", SignedInteger),
                Representation::new("ByteType", "I8", "i8", SignedInteger),
                Representation::new("UnsignedLongType", "U64", "u64", UnsignedInteger),
                Representation::new("UnsignedIntType", "U32", "u32", UnsignedInteger),
                Representation::new("UnsignedShortType", "U16", "u16", UnsignedInteger),
                Representation::new("UnsignedByteType", "U8", "u8", UnsignedInteger),
            ],
            containers: vec![
                "RandomAccessible",
                "RandomAccessibleInterval",
                "RealRandomAccessible",
                "RealRandomAccessibleRealInterval",
            ],
            arithmetic: vec![
                arith("plus", "+", "::core::ops::Add", "wrapping_add", true),
                arith("minus", "-", "::core::ops::Sub", "wrapping_sub", false),
                arith("times", "*", "::core::ops::Mul", "wrapping_mul", true),
                arith("div", "/", "::core::ops::Div", "wrapping_div", false),
            ],
            comparisons: vec![
                ComparisonDecl { method: "eq", symbol: "==", inverse: None },
                ComparisonDecl { method: "ge", symbol: ">=", inverse: Some("le") },
                ComparisonDecl { method: "le", symbol: "<=", inverse: Some("ge") },
                ComparisonDecl { method: "gt", symbol: ">", inverse: Some("lt") },
                ComparisonDecl { method: "lt", symbol: "<", inverse: Some("gt") },
            ],
            primitives: vec!["i8", "i16", "i32", "i64", "f32", "f64"],
            integer_target: "LongType",
            real_target: "DoubleType",
        }
    }
}

fn arith(
    method: &'static str,
    symbol: &'static str,
    capability: &'static str,
    wrapping: &'static str,
    commutative: bool,
) -> ArithmeticOperator {
    ArithmeticOperator { method, symbol, capability, wrapping, commutative }
}

// ————————————————————————————————————————————————————————————————————————————
// VALIDATED REGISTRY
// ————————————————————————————————————————————————————————————————————————————

#[derive(Clone, Debug, Serialize)]
pub struct Registry {
    representations: Vec<Representation>,
    /// Keyed by short identifier, in declaration order.
    containers: IndexMap<String, ContainerKind>,
    arithmetic: Vec<ArithmeticOperator>,
    comparisons: Vec<ComparisonOperator>,
    primitives: Vec<&'static str>,
    integer_target: usize,
    real_target: usize,
}

impl Registry {
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::new(RegistryDecl::builtin())
    }

    pub fn new(decl: RegistryDecl) -> Result<Self, RegistryError> {
        for (i, r) in decl.representations.iter().enumerate() {
            let dup = decl.representations[..i]
                .iter()
                .any(|o| o.name == r.name || o.variant == r.variant);
            if dup {
                return Err(RegistryError::DuplicateRepresentation(r.name.to_string()));
            }
        }

        let mut containers = IndexMap::<String, ContainerKind>::new();
        for name in decl.containers {
            let kind = ContainerKind::new(name);
            if let Some(first) = containers.get(&kind.short_id) {
                return Err(RegistryError::DuplicateShortId {
                    short_id: kind.short_id.clone(),
                    first: first.name.to_string(),
                    second: name.to_string(),
                });
            }
            containers.insert(kind.short_id.clone(), kind);
        }

        let comparisons = resolve_inverses(&decl.comparisons)?;

        let integer_target = widening_target(
            &decl.representations,
            decl.integer_target,
            Category::SignedInteger,
        )?;
        let real_target =
            widening_target(&decl.representations, decl.real_target, Category::Real)?;

        Ok(Self {
            representations: decl.representations,
            containers,
            arithmetic: decl.arithmetic,
            comparisons,
            primitives: decl.primitives,
            integer_target,
            real_target,
        })
    }

    pub fn representations(&self) -> &[Representation] {
        &self.representations
    }

    pub fn containers(&self) -> impl Iterator<Item = &ContainerKind> {
        self.containers.values()
    }

    /// Look a container up by its abbreviation (`RAI`, `RRA`, ...).
    pub fn container(&self, short_id: &str) -> Result<&ContainerKind, GenError> {
        self.containers.get(short_id).ok_or_else(|| GenError::UnknownContainer {
            requested: short_id.to_string(),
            known: self.containers.keys().cloned().collect::<Vec<_>>().join(", "),
        })
    }

    pub fn arithmetic(&self) -> &[ArithmeticOperator] {
        &self.arithmetic
    }

    pub fn comparisons(&self) -> &[ComparisonOperator] {
        &self.comparisons
    }

    pub fn primitives(&self) -> &[&'static str] {
        &self.primitives
    }

    pub fn integer_target(&self) -> &Representation {
        &self.representations[self.integer_target]
    }

    pub fn real_target(&self) -> &Representation {
        &self.representations[self.real_target]
    }

    /// Every ordered pair, row-major in registry order.
    pub fn pairs(&self) -> impl Iterator<Item = (&Representation, &Representation)> {
        self.representations
            .iter()
            .flat_map(move |a| self.representations.iter().map(move |b| (a, b)))
    }
}

fn resolve_inverses(decls: &[ComparisonDecl]) -> Result<Vec<ComparisonOperator>, RegistryError> {
    let inverse_of = |d: &ComparisonDecl| d.inverse.unwrap_or(d.method);
    let mut out = Vec::with_capacity(decls.len());
    for d in decls {
        let inverse = inverse_of(d);
        let Some(target) = decls.iter().find(|o| o.method == inverse) else {
            return Err(RegistryError::UnknownInverse {
                op: d.method.to_string(),
                inverse: inverse.to_string(),
            });
        };
        let back = inverse_of(target);
        if back != d.method {
            return Err(RegistryError::AsymmetricInverse {
                op: d.method.to_string(),
                inverse: inverse.to_string(),
                back: back.to_string(),
            });
        }
        out.push(ComparisonOperator { method: d.method, symbol: d.symbol, inverse });
    }
    Ok(out)
}

fn widening_target(
    reps: &[Representation],
    name: &str,
    expected: Category,
) -> Result<usize, RegistryError> {
    let index = reps
        .iter()
        .position(|r| r.name == name)
        .ok_or_else(|| RegistryError::UnknownWideningTarget(name.to_string()))?;
    let found = reps[index].category;
    if found != expected {
        return Err(RegistryError::WideningCategory {
            name: name.to_string(),
            found: found.to_string(),
            expected: expected.to_string(),
        });
    }
    Ok(index)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_shape() {
        let reg = Registry::builtin().unwrap();
        assert_eq!(reg.representations().len(), 12);
        assert_eq!(reg.pairs().count(), 144);
        let ids: Vec<_> = reg.containers().map(|c| c.short_id.as_str()).collect();
        assert_eq!(ids, ["RA", "RAI", "RRA", "RRARI"]);
        assert_eq!(reg.integer_target().rust_type, "i64");
        assert_eq!(reg.real_target().rust_type, "f64");
    }

    #[test]
    fn categories_are_balanced() {
        let reg = Registry::builtin().unwrap();
        let count = |c: Category| reg.representations().iter().filter(|r| r.category == c).count();
        assert_eq!(count(Category::Complex), 2);
        assert_eq!(count(Category::Real), 2);
        assert_eq!(count(Category::SignedInteger), 4);
        assert_eq!(count(Category::UnsignedInteger), 4);
    }

    #[test]
    fn inverses_resolve() {
        let reg = Registry::builtin().unwrap();
        let inv: Vec<_> = reg.comparisons().iter().map(|c| (c.method, c.inverse)).collect();
        assert_eq!(inv, [("eq", "eq"), ("ge", "le"), ("le", "ge"), ("gt", "lt"), ("lt", "gt")]);
    }

    #[test]
    fn unknown_container_is_config_error() {
        let reg = Registry::builtin().unwrap();
        let err = reg.container("IRAI").unwrap_err();
        assert!(matches!(err, GenError::UnknownContainer { .. }));
        assert!(err.to_string().contains("RA, RAI, RRA, RRARI"));
    }

    #[test]
    fn dangling_inverse_fails_fast() {
        let mut decl = RegistryDecl::builtin();
        decl.comparisons.retain(|c| c.method != "le");
        let err = Registry::new(decl).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownInverse { ref op, .. } if op == "ge"));
    }

    #[test]
    fn asymmetric_inverse_fails_fast() {
        let mut decl = RegistryDecl::builtin();
        decl.comparisons[3].inverse = Some("le"); // gt -> le, but le -> ge
        assert!(matches!(
            Registry::new(decl),
            Err(RegistryError::AsymmetricInverse { .. })
        ));
    }

    #[test]
    fn duplicate_declarations_fail_fast() {
        let mut decl = RegistryDecl::builtin();
        decl.representations.push(Representation::new("IntType", "I32b", "i32", Category::SignedInteger));
        assert!(matches!(Registry::new(decl), Err(RegistryError::DuplicateRepresentation(_))));

        let mut decl = RegistryDecl::builtin();
        decl.containers.push("RandomAccessibleIntegerView"); // RAIV is fine
        decl.containers.push("RealAccessibleIterator"); // RAI clashes
        assert!(matches!(Registry::new(decl), Err(RegistryError::DuplicateShortId { .. })));
    }

    #[test]
    fn widening_targets_are_checked() {
        let mut decl = RegistryDecl::builtin();
        decl.integer_target = "UnsignedLongType";
        assert!(matches!(Registry::new(decl), Err(RegistryError::WideningCategory { .. })));

        let mut decl = RegistryDecl::builtin();
        decl.real_target = "QuadType";
        assert!(matches!(Registry::new(decl), Err(RegistryError::UnknownWideningTarget(_))));
    }
}
