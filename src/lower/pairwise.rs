//! Canonical operator bodies: one arm per ordered representation pair.
use crate::ir::{Arm, Body, Dispatch, Fallback, FnDef, ImplBlock, Param, Pattern};
use crate::promotion::{self, Decision};
use crate::registry::{Operator, Representation};

use super::{OperatorSet, Target};

/// What the right-hand operand of a dispatch is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Container,
    Scalar,
}

/// `impl<'a> Trait<&'a AnyC> for AnyC`
pub fn container_container_impl(target: Target<'_>, ops: &OperatorSet<'_>) -> ImplBlock {
    operand_impl(target, ops, Operand::Container, &target.any())
}

/// `impl<'a> Trait<&'a AnyVoxel> for AnyC`
pub fn container_scalar_impl(target: Target<'_>, ops: &OperatorSet<'_>) -> ImplBlock {
    operand_impl(target, ops, Operand::Scalar, &target.voxel())
}

fn operand_impl(target: Target<'_>, ops: &OperatorSet<'_>, operand: Operand, rhs: &str) -> ImplBlock {
    let rhs = format!("&'a {rhs}");
    let fns = ops
        .ops
        .iter()
        .map(|op| FnDef {
            doc: None,
            public: false,
            name: op.method().to_string(),
            generics: None,
            params: vec![Param { name: "that".into(), ty: rhs.clone() }],
            ret: "Self::Output".into(),
            body: Body::Dispatch(dispatch(target, ops, *op, operand)),
        })
        .collect();
    ImplBlock {
        generics: vec!["'a".into()],
        trait_ref: Some(ops.trait_for(&rhs)),
        self_ty: target.any(),
        output: Some(ops.output.clone()),
        fns,
    }
}

/// All N² arms for `op`, then the guard.
pub fn dispatch(target: Target<'_>, ops: &OperatorSet<'_>, op: Operator<'_>, operand: Operand) -> Dispatch {
    let voxel = target.voxel();
    let arms = target
        .registry
        .pairs()
        .map(|(a, b)| {
            let decision = promotion::resolve(a, b);
            let right = match operand {
                Operand::Container => Pattern {
                    enum_path: "Self".into(),
                    variant: b.variant,
                    binding: "b",
                    by_value: false,
                },
                Operand::Scalar => Pattern {
                    enum_path: voxel.clone(),
                    variant: b.variant,
                    binding: "t",
                    by_value: true,
                },
            };
            Arm {
                left: Pattern { enum_path: "Self".into(), variant: a.variant, binding: "a", by_value: false },
                right,
                decision,
                expr: arm_expr(target, op, decision, a, operand),
            }
        })
        .collect();
    Dispatch {
        left: "self".into(),
        right: "that".into(),
        arms,
        fallback: Fallback {
            error_path: target.error(),
            family: ops.family.to_string(),
            op: op.method(),
        },
    }
}

/// Convert, apply, and wrap the result for one (a, b) arm.
fn arm_expr(target: Target<'_>, op: Operator<'_>, decision: Decision, a: &Representation, operand: Operand) -> String {
    let mapped = match operand {
        Operand::Container => {
            let value = apply(target, op, decision, a, "s1", "s2");
            format!("a.convert_with(b, |s1, s2| {value})")
        }
        Operand::Scalar => {
            let value = apply(target, op, decision, a, "s", "t");
            format!("a.convert(move |s| {value})")
        }
    };
    match op {
        Operator::Comparison(_) => format!("Ok({mapped})"),
        Operator::Arithmetic(_) => {
            let result = decision.result(a, target.registry);
            format!("Ok(Self::{}({mapped}))", result.variant)
        }
    }
}

/// The scalar expression for `lhs op rhs` under `decision`.
pub fn apply(target: Target<'_>, op: Operator<'_>, decision: Decision, a: &Representation, lhs: &str, rhs: &str) -> String {
    let (l, r) = match decision.view() {
        None => (lhs.to_string(), rhs.to_string()),
        Some(view) => {
            let voxel = target.path("Voxel");
            (format!("{voxel}::{view}({lhs})"), format!("{voxel}::{view}({rhs})"))
        }
    };
    match op {
        Operator::Comparison(c) => format!("{l} {} {r}", c.symbol),
        Operator::Arithmetic(o) if decision.is_integer_domain(a) => format!("{l}.{}({r})", o.wrapping),
        Operator::Arithmetic(o) => format!("{l} {} {r}", o.symbol),
    }
}
