//! IR → Rust source text.
//!
//! Pure formatting: no decisions are made here. Output is deterministic (no
//! timestamps, no hash-ordered iteration), so regenerating is byte-identical.
use crate::ir::{Body, Delegate, Dispatch, FnDef, ImplBlock, Item, Module, Pattern};

const INDENT: &str = "    ";

pub struct Codegen {
    out: String,
    depth: usize,
}

impl Codegen {
    pub fn new() -> Self {
        Self { out: String::new(), depth: 0 }
    }

    pub fn emit(&mut self, module: &Module) {
        self.line(&format!("// @generated by voxelgen: {}", module.name));
        self.line("// Do not edit by hand; regenerate instead.");
        for item in &module.items {
            self.blank();
            match item {
                Item::Impl(block) => self.emit_impl(block),
                Item::CapabilityCheck { bound, types, methods } => self.emit_capability(bound, types, methods),
            }
        }
    }

    pub fn into_string(self) -> String {
        self.out
    }

    // ------------------------------ items ------------------------------ //

    fn emit_impl(&mut self, b: &ImplBlock) {
        let generics = if b.generics.is_empty() {
            String::new()
        } else {
            format!("<{}>", b.generics.join(", "))
        };
        let head = match &b.trait_ref {
            Some(t) => format!("impl{generics} {t} for {} {{", b.self_ty),
            None => format!("impl{generics} {} {{", b.self_ty),
        };
        self.line(&head);
        self.depth += 1;
        if let Some(output) = &b.output {
            self.line(&format!("type Output = {output};"));
        }
        for (i, f) in b.fns.iter().enumerate() {
            if i > 0 || b.output.is_some() {
                self.blank();
            }
            self.emit_fn(f);
        }
        self.depth -= 1;
        self.line("}");
    }

    fn emit_fn(&mut self, f: &FnDef) {
        if let Some(doc) = &f.doc {
            self.line(&format!("/// {doc}"));
        }
        let vis = if f.public { "pub " } else { "" };
        let generics = f.generics.as_ref().map(|g| format!("<{g}>")).unwrap_or_default();
        let mut params = vec!["&self".to_string()];
        params.extend(f.params.iter().map(|p| format!("{}: {}", p.name, p.ty)));
        self.line(&format!(
            "{vis}fn {}{generics}({}) -> {} {{",
            f.name,
            params.join(", "),
            f.ret
        ));
        self.depth += 1;
        match &f.body {
            Body::Dispatch(d) => self.emit_dispatch(d),
            Body::Delegate(d) => self.line(&delegate_call(d)),
            Body::Expr(e) => self.line(e),
        }
        self.depth -= 1;
        self.line("}");
    }

    fn emit_dispatch(&mut self, d: &Dispatch) {
        self.line(&format!("match ({}, {}) {{", d.left, d.right));
        self.depth += 1;
        for arm in &d.arms {
            self.line(&format!(
                "({}, {}) => {},",
                pattern(&arm.left),
                pattern(&arm.right),
                arm.expr
            ));
        }
        let fb = &d.fallback;
        self.line("#[allow(unreachable_patterns)]");
        self.line(&format!("(a, b) => Err({}::Unsupported {{", fb.error_path));
        self.depth += 1;
        self.line(&format!("family: {:?},", fb.family));
        self.line(&format!("op: {:?},", fb.op));
        self.line("left: a.voxel_type(),");
        self.line("right: b.voxel_type(),");
        self.depth -= 1;
        self.line("}),");
        self.depth -= 1;
        self.line("}");
    }

    fn emit_capability(&mut self, bound: &str, types: &[String], methods: &[(String, String)]) {
        self.line("const _: fn() = || {");
        self.depth += 1;
        if !types.is_empty() {
            self.line(&format!("fn requires<T: {bound}>() {{}}"));
        }
        for ty in types {
            self.line(&format!("requires::<{ty}>();"));
        }
        for (ty, method) in methods {
            self.line(&format!("let _: fn({ty}, {ty}) -> {ty} = {ty}::{method};"));
        }
        self.depth -= 1;
        self.line("};");
    }

    // ------------------------------ text ------------------------------- //

    fn line(&mut self, s: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(s);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience: render one module.
pub fn render(module: &Module) -> String {
    let mut cg = Codegen::new();
    cg.emit(module);
    cg.into_string()
}

fn pattern(p: &Pattern) -> String {
    let amp = if p.by_value { "&" } else { "" };
    format!("{amp}{}::{}({})", p.enum_path, p.variant, p.binding)
}

fn delegate_call(d: &Delegate) -> String {
    format!("{}::{}({}, {})", d.trait_path, d.method, d.receiver, d.arg)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Arm, Fallback, Param};
    use crate::promotion::Decision;
    use pretty_assertions::assert_eq;

    fn tiny_module() -> Module {
        let dispatch = Dispatch {
            left: "self".into(),
            right: "that".into(),
            arms: vec![Arm {
                left: Pattern { enum_path: "Self".into(), variant: "I8", binding: "a", by_value: false },
                right: Pattern { enum_path: "rt::AnyVoxel".into(), variant: "I8", binding: "t", by_value: true },
                decision: Decision::Identity,
                expr: "Ok(a.convert(move |s| s == t))".into(),
            }],
            fallback: Fallback { error_path: "rt::DispatchError".into(), family: "Comparison".into(), op: "eq" },
        };
        let eq = FnDef {
            doc: None,
            public: false,
            name: "eq".into(),
            generics: None,
            params: vec![Param { name: "that".into(), ty: "&'a rt::AnyVoxel".into() }],
            ret: "Self::Output".into(),
            body: Body::Dispatch(dispatch),
        };
        let rev = FnDef {
            doc: None,
            public: false,
            name: "eq".into(),
            generics: None,
            params: vec![Param { name: "that".into(), ty: "&'a rt::AnyRandomAccessible".into() }],
            ret: "Self::Output".into(),
            body: Body::Delegate(Delegate {
                trait_path: "rt::Compare".into(),
                method: "eq",
                receiver: "that".into(),
                arg: "self".into(),
            }),
        };
        Module {
            name: "Tiny".into(),
            items: vec![
                Item::Impl(ImplBlock {
                    generics: vec!["'a".into()],
                    trait_ref: Some("rt::Compare<&'a rt::AnyVoxel>".into()),
                    self_ty: "rt::AnyRandomAccessible".into(),
                    output: Some("Out".into()),
                    fns: vec![eq],
                }),
                Item::Impl(ImplBlock {
                    generics: vec!["'a".into()],
                    trait_ref: Some("rt::Compare<&'a rt::AnyRandomAccessible>".into()),
                    self_ty: "rt::AnyVoxel".into(),
                    output: Some("Out".into()),
                    fns: vec![rev],
                }),
                Item::CapabilityCheck {
                    bound: "::core::ops::Add<Output = T>".into(),
                    types: vec!["f32".into()],
                    methods: vec![("u8".into(), "wrapping_add".into())],
                },
            ],
        }
    }

    #[test]
    fn renders_dispatch_delegate_and_check() {
        let expected = r#"// @generated by voxelgen: Tiny
// Do not edit by hand; regenerate instead.

impl<'a> rt::Compare<&'a rt::AnyVoxel> for rt::AnyRandomAccessible {
    type Output = Out;

    fn eq(&self, that: &'a rt::AnyVoxel) -> Self::Output {
        match (self, that) {
            (Self::I8(a), &rt::AnyVoxel::I8(t)) => Ok(a.convert(move |s| s == t)),
            #[allow(unreachable_patterns)]
            (a, b) => Err(rt::DispatchError::Unsupported {
                family: "Comparison",
                op: "eq",
                left: a.voxel_type(),
                right: b.voxel_type(),
            }),
        }
    }
}

impl<'a> rt::Compare<&'a rt::AnyRandomAccessible> for rt::AnyVoxel {
    type Output = Out;

    fn eq(&self, that: &'a rt::AnyRandomAccessible) -> Self::Output {
        rt::Compare::eq(that, self)
    }
}

const _: fn() = || {
    fn requires<T: ::core::ops::Add<Output = T>>() {}
    requires::<f32>();
    let _: fn(u8, u8) -> u8 = u8::wrapping_add;
};
"#;
        assert_eq!(render(&tiny_module()), expected);
    }

    #[test]
    fn rendering_is_deterministic() {
        let m = tiny_module();
        assert_eq!(render(&m), render(&m));
    }
}
