use serde::Serialize;

/// An access pattern over scalars; orthogonal to the representation axis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContainerKind {
    pub name: &'static str,
    pub short_id: String,
}

impl ContainerKind {
    pub fn new(name: &'static str) -> Self {
        Self { name, short_id: abbreviate(name) }
    }

    /// Concrete generic type, e.g. `RandomAccessibleInterval<bool>`.
    pub fn generic(&self, arg: &str) -> String {
        format!("{}<{arg}>", self.name)
    }

    /// Tagged union over every representation, e.g. `AnyRandomAccessibleInterval`.
    pub fn any_name(&self) -> String {
        format!("Any{}", self.name)
    }
}

/// `RandomAccessibleInterval` → `RAI`
pub fn abbreviate(name: &str) -> String {
    name.chars().filter(|c| c.is_uppercase()).collect()
}
