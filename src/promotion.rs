//! Widening policy: which domain a mixed pair is computed in.
//!
//! This is the single place the policy lives. Emitters ask for a [`Decision`]
//! and render whatever it says; they never inspect categories themselves.
use crate::registry::{Registry, Representation};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Same representation: operate on the raw values.
    Identity,
    /// Both integers (any signedness): operate on 64-bit signed views.
    IntegerWiden,
    /// Anything else: operate on f64 views.
    RealWiden,
}

/// Total over `representations × representations`.
pub fn resolve(a: &Representation, b: &Representation) -> Decision {
    if a == b {
        Decision::Identity
    } else if a.category.is_integer() && b.category.is_integer() {
        Decision::IntegerWiden
    } else {
        Decision::RealWiden
    }
}

impl Decision {
    /// Runtime accessor that produces the widened view, if any.
    pub fn view(self) -> Option<&'static str> {
        match self {
            Self::Identity => None,
            Self::IntegerWiden => Some("integer_long"),
            Self::RealWiden => Some("real_double"),
        }
    }

    /// Representation an arithmetic result is stored in.
    pub fn result<'r>(self, a: &'r Representation, registry: &'r Registry) -> &'r Representation {
        match self {
            Self::Identity => a,
            Self::IntegerWiden => registry.integer_target(),
            Self::RealWiden => registry.real_target(),
        }
    }

    /// Whether evaluation happens on integers (and so must wrap).
    pub fn is_integer_domain(self, a: &Representation) -> bool {
        match self {
            Self::Identity => a.category.is_integer(),
            Self::IntegerWiden => true,
            Self::RealWiden => false,
        }
    }
}
