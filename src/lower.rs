//! Registry → IR.
//!
//! One [`ir::Module`] per (container kind × extension family). The layout of
//! a module is fixed:
//!
//! 1. container ⊗ container: the canonical [`ir::Body::Dispatch`] per operator
//! 2. container ⊗ scalar: same arm structure, scalar operand
//! 3. scalar ⊗ container, primitive forms: [`ir::Body::Delegate`] adapters only
//! 4. family extras (selection for logical, capability checks for arithmetic)
pub mod pairwise;
pub mod select;
pub mod synth;

use crate::ir::{self, Item};
use crate::registry::{ArithmeticOperator, ContainerKind, Operator, Registry};

/// What a module is being generated for.
#[derive(Clone, Copy, Debug)]
pub struct Target<'r> {
    pub registry: &'r Registry,
    pub container: &'r ContainerKind,
    /// Path prefix of the runtime crate the generated code targets.
    pub runtime: &'r str,
}

impl<'r> Target<'r> {
    pub fn new(registry: &'r Registry, container: &'r ContainerKind, runtime: &'r str) -> Self {
        Self { registry, container, runtime }
    }

    pub fn path(&self, item: &str) -> String {
        format!("{}::{item}", self.runtime)
    }

    /// `crate::AnyRandomAccessibleInterval`
    pub fn any(&self) -> String {
        self.path(&self.container.any_name())
    }

    /// `crate::RandomAccessibleInterval<arg>`
    pub fn generic(&self, arg: &str) -> String {
        self.path(&self.container.generic(arg))
    }

    pub fn voxel(&self) -> String {
        self.path("AnyVoxel")
    }

    pub fn error(&self) -> String {
        self.path("DispatchError")
    }

    /// The comparison catalog, as the `Compare` trait sees it.
    pub fn comparisons(&self) -> OperatorSet<'r> {
        OperatorSet {
            family: "Comparison",
            trait_path: self.path("Compare"),
            output: format!("Result<{}, {}>", self.generic("bool"), self.error()),
            ops: self.registry.comparisons().iter().map(Operator::Comparison).collect(),
        }
    }

    /// The arithmetic catalog, as the `Arithmetic` trait sees it.
    pub fn arithmetic(&self) -> OperatorSet<'r> {
        OperatorSet {
            family: "Arithmetic",
            trait_path: self.path("Arithmetic"),
            output: format!("Result<{}, {}>", self.any(), self.error()),
            ops: self.registry.arithmetic().iter().map(Operator::Arithmetic).collect(),
        }
    }
}

/// Operators that share one runtime trait and one `Output` type.
#[derive(Clone, Debug)]
pub struct OperatorSet<'r> {
    pub family: &'static str,
    pub trait_path: String,
    pub output: String,
    pub ops: Vec<Operator<'r>>,
}

impl OperatorSet<'_> {
    /// `crate::Compare<rhs>`
    pub fn trait_for(&self, rhs: &str) -> String {
        format!("{}<{rhs}>", self.trait_path)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// FAMILIES
// ————————————————————————————————————————————————————————————————————————————

/// Comparisons (all four operand forms) plus elementwise selection.
pub fn lower_logical(target: Target<'_>, name: &str) -> ir::Module {
    let mut items = lower_operator_forms(target, &target.comparisons());
    items.push(Item::Impl(select::choose_impl(target)));
    tracing::debug!(module = name, items = items.len(), "lowered logical extensions");
    ir::Module { name: name.to_string(), items }
}

/// Arithmetic (all four operand forms) plus capability assertions.
pub fn lower_arithmetic(target: Target<'_>, name: &str) -> ir::Module {
    let mut items = lower_operator_forms(target, &target.arithmetic());
    items.extend(target.registry.arithmetic().iter().map(|op| capability_check(target, op)));
    tracing::debug!(module = name, items = items.len(), "lowered arithmetic extensions");
    ir::Module { name: name.to_string(), items }
}

fn lower_operator_forms(target: Target<'_>, ops: &OperatorSet<'_>) -> Vec<Item> {
    let mut items = vec![
        Item::Impl(pairwise::container_container_impl(target, ops)),
        Item::Impl(pairwise::container_scalar_impl(target, ops)),
        Item::Impl(synth::scalar_container_impl(target, ops)),
    ];
    for prim in target.registry.primitives() {
        items.push(Item::Impl(synth::container_primitive_impl(target, ops, prim)));
        items.push(Item::Impl(synth::primitive_container_impl(target, ops, prim)));
    }
    items
}

/// Every representation an `op` result can land in must support `op` the way
/// its arms spell it: the operator trait for real-domain results, the
/// wrapping method for integer-domain ones.
fn capability_check(target: Target<'_>, op: &ArithmeticOperator) -> Item {
    let reg = target.registry;
    let mut types: Vec<String> = Vec::new();
    let mut methods: Vec<(String, String)> = Vec::new();
    for (a, b) in reg.pairs() {
        let decision = crate::promotion::resolve(a, b);
        let ty = rust_type(target, decision.result(a, reg).rust_type);
        if decision.is_integer_domain(a) {
            let entry = (ty, op.wrapping.to_string());
            if !methods.contains(&entry) {
                methods.push(entry);
            }
        } else if !types.contains(&ty) {
            types.push(ty);
        }
    }
    Item::CapabilityCheck { bound: format!("{}<Output = T>", op.capability), types, methods }
}

/// Primitive types stay bare; runtime-defined scalars get the runtime prefix.
pub(crate) fn rust_type(target: Target<'_>, ty: &str) -> String {
    if ty.starts_with(|c: char| c.is_ascii_uppercase()) {
        target.path(ty)
    } else {
        ty.to_string()
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Body;

    fn with_target<R>(short_id: &str, f: impl FnOnce(Target<'_>) -> R) -> R {
        let reg = Registry::builtin().unwrap();
        let container = reg.container(short_id).unwrap().clone();
        f(Target::new(&reg, &container, "crate"))
    }

    #[test]
    fn logical_module_layout() {
        with_target("RAI", |t| {
            let m = lower_logical(t, "RandomAccessibleIntervalLogicalExtensions");
            // 3 operand-form impls + 2 per primitive + choose
            assert_eq!(m.impls().count(), 3 + 2 * 6 + 1);
            let first = m.impls().next().unwrap();
            assert_eq!(first.self_ty, "crate::AnyRandomAccessibleInterval");
            assert_eq!(
                first.trait_ref.as_deref(),
                Some("crate::Compare<&'a crate::AnyRandomAccessibleInterval>")
            );
            let names: Vec<_> = first.fns.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(names, ["eq", "ge", "le", "gt", "lt"]);
        });
    }

    #[test]
    fn every_dispatch_is_exhaustive_with_one_fallback() {
        with_target("RRA", |t| {
            let n = t.registry.representations().len();
            for m in [lower_logical(t, "L"), lower_arithmetic(t, "A")] {
                let mut dispatches = 0;
                for (_, f) in m.fns() {
                    if let Body::Dispatch(d) = &f.body {
                        dispatches += 1;
                        assert_eq!(d.arms.len(), n * n, "{}", f.name);
                        let mut pairs: Vec<_> = d.pairs().collect();
                        pairs.sort();
                        pairs.dedup();
                        assert_eq!(pairs.len(), n * n, "{}: duplicate arm", f.name);
                    }
                }
                // container⊗container and container⊗scalar, per operator
                assert!(dispatches == 2 * 5 || dispatches == 2 * 4);
            }
        });
    }

    #[test]
    fn capability_checks_cover_every_result_type() {
        with_target("RA", |t| {
            let m = lower_arithmetic(t, "A");
            let checks: Vec<_> = m
                .items
                .iter()
                .filter_map(|i| match i {
                    Item::CapabilityCheck { bound, types, methods } => Some((bound.clone(), types.clone(), methods.clone())),
                    _ => None,
                })
                .collect();
            assert_eq!(checks.len(), 4);
            assert_eq!(checks[0].0, "::core::ops::Add<Output = T>");
            // real-domain results need the operator, integer-domain ones the wrapping method
            for (_, types, methods) in &checks {
                assert_eq!(types, &["crate::Complex64", "f64", "crate::Complex32", "f32"].map(String::from));
                assert_eq!(methods.len(), 8);
            }
            assert!(checks[0].2.iter().all(|(_, m)| m == "wrapping_add"));
            assert!(checks[3].2.contains(&("u8".to_string(), "wrapping_div".to_string())));
        });
    }

    #[test]
    fn runtime_types_are_prefixed() {
        with_target("RA", |t| {
            assert_eq!(rust_type(t, "Complex64"), "crate::Complex64");
            assert_eq!(rust_type(t, "u16"), "u16");
        });
    }
}
