//! Minimal voxel runtime that the generated dispatch compiles against.
//!
//! `build.rs` renders every (container × family) artifact into `OUT_DIR`;
//! the include index pulls them in at the bottom of this file, so the
//! generated impls see this crate as `crate`.
#[macro_use]
mod voxel;
mod any;
mod container;

pub use any::{AnyRandomAccessible, AnyRandomAccessibleInterval, AnyRealRandomAccessible, AnyRealRandomAccessibleRealInterval};
pub use container::{
    Interval, RandomAccessible, RandomAccessibleInterval, RealInterval, RealRandomAccessible,
    RealRandomAccessibleRealInterval, ShapeError,
};
pub use voxel::{AnyVoxel, Complex32, Complex64, Element, Voxel, VoxelType};

/// Elementwise comparisons; `Output` is a boolean container.
///
/// Method names shadow `PartialEq`/`PartialOrd` on primitives, so call
/// these as `Compare::ge(&a, &b)`.
pub trait Compare<Rhs> {
    type Output;

    fn eq(&self, that: Rhs) -> Self::Output;
    fn ge(&self, that: Rhs) -> Self::Output;
    fn le(&self, that: Rhs) -> Self::Output;
    fn gt(&self, that: Rhs) -> Self::Output;
    fn lt(&self, that: Rhs) -> Self::Output;
}

/// Elementwise arithmetic; `Output` is a tagged container in the result
/// representation.
pub trait Arithmetic<Rhs> {
    type Output;

    fn plus(&self, that: Rhs) -> Self::Output;
    fn minus(&self, that: Rhs) -> Self::Output;
    fn times(&self, that: Rhs) -> Self::Output;
    fn div(&self, that: Rhs) -> Self::Output;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// No arm matched the operand pair.
    #[error("{family} operators not supported for combination of voxel types: ({left}, {right})")]
    Unsupported {
        family: &'static str,
        op: &'static str,
        left: VoxelType,
        right: VoxelType,
    },
}

include!(concat!(env!("OUT_DIR"), "/extensions.rs"));
