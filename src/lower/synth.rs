//! Derived operand forms. Every body here is a [`Body::Delegate`]: the
//! representation-pair logic exists once, in the container forms.
use crate::ir::{Body, Delegate, FnDef, ImplBlock, Param};
use crate::registry::Operator;

use super::{OperatorSet, Target};

/// How a reversed call (`x op container`) reaches a canonical body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Reverse {
    /// Swap operands and use the declared inverse (`a ge c` → `c le a`).
    Inverse(&'static str),
    /// Commutative arithmetic: swap operands, same operator.
    Swap,
    /// Non-commutative arithmetic: lift the scalar into a constant container
    /// shaped like the operand, then call container ⊗ container.
    Lift,
}

fn reverse_of(op: Operator<'_>) -> Reverse {
    match op {
        Operator::Comparison(c) => Reverse::Inverse(c.inverse),
        Operator::Arithmetic(a) if a.commutative => Reverse::Swap,
        Operator::Arithmetic(_) => Reverse::Lift,
    }
}

/// Form 2: `impl<'a> Trait<&'a AnyC> for AnyVoxel`
pub fn scalar_container_impl(target: Target<'_>, ops: &OperatorSet<'_>) -> ImplBlock {
    reversed_impl(target, ops, target.voxel(), "self", "self")
}

/// Form 4: `impl<'a> Trait<&'a AnyC> for prim`
pub fn primitive_container_impl(target: Target<'_>, ops: &OperatorSet<'_>, prim: &str) -> ImplBlock {
    let lifted = format!("&{}::cast(that.voxel_type(), *self)", target.voxel());
    reversed_impl(target, ops, prim.to_string(), "*self", &lifted)
}

/// Form 3: `impl Trait<prim> for AnyC`, casting into the container's own
/// representation and calling form 1.
pub fn container_primitive_impl(target: Target<'_>, ops: &OperatorSet<'_>, prim: &str) -> ImplBlock {
    let cast = format!("&{}::cast(self.voxel_type(), that)", target.voxel());
    let fns = ops
        .ops
        .iter()
        .map(|op| delegate_fn(op.method(), prim.to_string(), Delegate {
            trait_path: ops.trait_path.clone(),
            method: op.method(),
            receiver: "self".into(),
            arg: cast.clone(),
        }))
        .collect();
    ImplBlock {
        generics: Vec::new(),
        trait_ref: Some(ops.trait_for(prim)),
        self_ty: target.any(),
        output: Some(ops.output.clone()),
        fns,
    }
}

/// `operand` is how the receiver is passed on; `scalar` is the receiver as an
/// `&AnyVoxel` (what a lifted constant is built from).
fn reversed_impl(target: Target<'_>, ops: &OperatorSet<'_>, self_ty: String, operand: &str, scalar: &str) -> ImplBlock {
    let rhs = format!("&'a {}", target.any());
    let fns = ops
        .ops
        .iter()
        .map(|op| {
            let delegate = match reverse_of(*op) {
                Reverse::Inverse(inverse) => Delegate {
                    trait_path: ops.trait_path.clone(),
                    method: inverse,
                    receiver: "that".into(),
                    arg: operand.to_string(),
                },
                Reverse::Swap => Delegate {
                    trait_path: ops.trait_path.clone(),
                    method: op.method(),
                    receiver: "that".into(),
                    arg: operand.to_string(),
                },
                Reverse::Lift => Delegate {
                    trait_path: ops.trait_path.clone(),
                    method: op.method(),
                    receiver: format!("&that.constant_like({scalar})"),
                    arg: "that".into(),
                },
            };
            delegate_fn(op.method(), rhs.clone(), delegate)
        })
        .collect();
    ImplBlock {
        generics: vec!["'a".into()],
        trait_ref: Some(ops.trait_for(&rhs)),
        self_ty,
        output: Some(ops.output.clone()),
        fns,
    }
}

fn delegate_fn(name: &str, that: String, delegate: Delegate) -> FnDef {
    FnDef {
        doc: None,
        public: false,
        name: name.to_string(),
        generics: None,
        params: vec![Param { name: "that".into(), ty: that }],
        ret: "Self::Output".into(),
        body: Body::Delegate(delegate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    fn delegate_of(b: &ImplBlock, name: &str) -> Delegate {
        let f = b.fns.iter().find(|f| f.name == name).unwrap();
        match &f.body {
            Body::Delegate(d) => d.clone(),
            other => panic!("{name} should delegate, got {other:?}"),
        }
    }

    #[test]
    fn reverse_scalar_uses_declared_inverse() {
        let reg = Registry::builtin().unwrap();
        let t = Target::new(&reg, reg.container("RAI").unwrap(), "crate");
        let b = scalar_container_impl(t, &t.comparisons());
        assert_eq!(b.self_ty, "crate::AnyVoxel");
        for (op, inv) in [("eq", "eq"), ("ge", "le"), ("le", "ge"), ("gt", "lt"), ("lt", "gt")] {
            let d = delegate_of(&b, op);
            assert_eq!((d.method, d.receiver.as_str(), d.arg.as_str()), (inv, "that", "self"));
        }
    }

    #[test]
    fn reverse_primitive_dereferences_receiver() {
        let reg = Registry::builtin().unwrap();
        let t = Target::new(&reg, reg.container("RA").unwrap(), "crate");
        let b = primitive_container_impl(t, &t.comparisons(), "f32");
        assert_eq!(b.self_ty, "f32");
        assert_eq!(b.trait_ref.as_deref(), Some("crate::Compare<&'a crate::AnyRandomAccessible>"));
        let d = delegate_of(&b, "gt");
        assert_eq!((d.method, d.receiver.as_str(), d.arg.as_str()), ("lt", "that", "*self"));
    }

    #[test]
    fn forward_primitive_casts_into_container_representation() {
        let reg = Registry::builtin().unwrap();
        let t = Target::new(&reg, reg.container("RRA").unwrap(), "crate");
        let b = container_primitive_impl(t, &t.comparisons(), "i64");
        assert!(b.generics.is_empty());
        let d = delegate_of(&b, "le");
        assert_eq!(d.method, "le");
        assert_eq!(d.arg, "&crate::AnyVoxel::cast(self.voxel_type(), that)");
    }

    #[test]
    fn non_commutative_arithmetic_lifts_scalar() {
        let reg = Registry::builtin().unwrap();
        let t = Target::new(&reg, reg.container("RAI").unwrap(), "crate");
        let set = t.arithmetic();

        let b = scalar_container_impl(t, &set);
        let plus = delegate_of(&b, "plus");
        assert_eq!((plus.receiver.as_str(), plus.arg.as_str()), ("that", "self"));
        let minus = delegate_of(&b, "minus");
        assert_eq!((minus.receiver.as_str(), minus.arg.as_str()), ("&that.constant_like(self)", "that"));

        let b = primitive_container_impl(t, &set, "i8");
        let div = delegate_of(&b, "div");
        assert_eq!(div.receiver, "&that.constant_like(&crate::AnyVoxel::cast(that.voxel_type(), *self))");
        assert_eq!(delegate_of(&b, "times").arg, "*self");
    }

    #[test]
    fn reverse_forms_never_dispatch() {
        let reg = Registry::builtin().unwrap();
        for c in reg.containers() {
            let t = Target::new(&reg, c, "crate");
            for set in [t.comparisons(), t.arithmetic()] {
                let mut blocks = vec![scalar_container_impl(t, &set)];
                for p in reg.primitives() {
                    blocks.push(container_primitive_impl(t, &set, p));
                    blocks.push(primitive_container_impl(t, &set, p));
                }
                for b in &blocks {
                    assert!(b.fns.iter().all(|f| matches!(f.body, Body::Delegate(_))));
                }
            }
        }
    }
}
