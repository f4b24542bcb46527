// Strongly-typed IR for codegen. Lowering decides *what* exists; codegen only
// decides how it is spelled.

use crate::promotion::Decision;

/// One generated artifact.
#[derive(Debug, Clone)]
pub struct Module {
    pub name: String,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone)]
pub enum Item {
    Impl(ImplBlock),
    /// Compile-time assertion that every `types[i]: bound` and that every
    /// `(ty, method)` in `methods` names a `fn(ty, ty) -> ty`.
    CapabilityCheck { bound: String, types: Vec<String>, methods: Vec<(String, String)> },
}

#[derive(Debug, Clone)]
pub struct ImplBlock {
    pub generics: Vec<String>,      // e.g. ["'a"]
    pub trait_ref: Option<String>,  // None → inherent impl
    pub self_ty: String,
    pub output: Option<String>,     // associated `type Output`
    pub fns: Vec<FnDef>,
}

#[derive(Debug, Clone)]
pub struct FnDef {
    pub doc: Option<String>,
    pub public: bool,               // inherent fns only; trait fns never are
    pub name: String,
    pub generics: Option<String>,   // e.g. "T: crate::Element"
    pub params: Vec<Param>,         // after `&self`
    pub ret: String,
    pub body: Body,
}

#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

#[derive(Debug, Clone)]
pub enum Body {
    /// Canonical implementation: one arm per representation pair + fallback.
    Dispatch(Dispatch),
    /// Adapter: a single call into another form. Has no room for arms.
    Delegate(Delegate),
    /// Straight-line expression with no representation branching.
    Expr(String),
}

#[derive(Debug, Clone)]
pub struct Dispatch {
    pub left: String,               // scrutinee expressions
    pub right: String,
    pub arms: Vec<Arm>,
    pub fallback: Fallback,
}

#[derive(Debug, Clone)]
pub struct Arm {
    pub left: Pattern,
    pub right: Pattern,
    pub decision: Decision,
    pub expr: String,
}

#[derive(Debug, Clone)]
pub struct Pattern {
    pub enum_path: String,          // "Self" or "crate::AnyVoxel"
    pub variant: &'static str,
    pub binding: &'static str,
    pub by_value: bool,             // `&Enum::V(x)` copies the scalar out
}

/// Reports the unmatched runtime pair. Unreachable for a closed registry.
#[derive(Debug, Clone)]
pub struct Fallback {
    pub error_path: String,
    pub family: String,
    pub op: &'static str,
}

/// `trait_path::method(receiver, arg)`, spelled fully qualified so the
/// generated file needs no imports.
#[derive(Debug, Clone)]
pub struct Delegate {
    pub trait_path: String,
    pub method: &'static str,
    pub receiver: String,
    pub arg: String,
}

impl Dispatch {
    /// `(left variant, right variant)` per arm, in emission order.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.arms.iter().map(|a| (a.left.variant, a.right.variant))
    }
}

impl Module {
    pub fn impls(&self) -> impl Iterator<Item = &ImplBlock> {
        self.items.iter().filter_map(|i| match i {
            Item::Impl(b) => Some(b),
            _ => None,
        })
    }

    pub fn fns(&self) -> impl Iterator<Item = (&ImplBlock, &FnDef)> {
        self.impls().flat_map(|b| b.fns.iter().map(move |f| (b, f)))
    }
}
