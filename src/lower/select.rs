//! Ternary elementwise selection over a boolean container.
use crate::ir::{Body, FnDef, ImplBlock, Param};

use super::Target;

/// `impl C<bool> { choose, choose_constants }`
///
/// Both operands share `T` by construction, so there is nothing to dispatch.
pub fn choose_impl(target: Target<'_>) -> ImplBlock {
    let element = format!("T: {}", target.path("Element"));
    let container_t = target.generic("T");

    let choose = FnDef {
        doc: Some("Elementwise `if self { choose_on_true } else { choose_on_false }`.".into()),
        public: true,
        name: "choose".into(),
        generics: Some(element.clone()),
        params: vec![
            Param { name: "choose_on_true".into(), ty: format!("&{container_t}") },
            Param { name: "choose_on_false".into(), ty: format!("&{container_t}") },
        ],
        ret: container_t.clone(),
        body: Body::Expr(
            "self.tri_convert(choose_on_true, choose_on_false, |a, b, c| if a { b } else { c })".into(),
        ),
    };

    let choose_constants = FnDef {
        doc: Some("[`Self::choose`] between two constants lifted to this container's shape.".into()),
        public: true,
        name: "choose_constants".into(),
        generics: Some(element),
        params: vec![
            Param { name: "choose_on_true".into(), ty: "T".into() },
            Param { name: "choose_on_false".into(), ty: "T".into() },
        ],
        ret: container_t,
        body: Body::Expr(
            "self.choose(&self.constant(choose_on_true), &self.constant(choose_on_false))".into(),
        ),
    };

    ImplBlock {
        generics: Vec::new(),
        trait_ref: None,
        self_ty: target.generic("bool"),
        output: None,
        fns: vec![choose, choose_constants],
    }
}
