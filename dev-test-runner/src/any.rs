//! Containers tagged with their element representation: the operand type of
//! every generated dispatch.
use crate::container::{RandomAccessible, RandomAccessibleInterval, RealRandomAccessible, RealRandomAccessibleRealInterval};
use crate::voxel::{AnyVoxel, Complex32, Complex64, VoxelType};

macro_rules! any_container {
    ($any:ident, $container:ident, $coord:ty; $($v:ident => $t:ty, $vt:ident);* $(;)?) => {
        #[derive(Clone, Debug)]
        pub enum $any {
            $($v($container<$t>)),*
        }

        impl $any {
            pub fn voxel_type(&self) -> VoxelType {
                match self {
                    $(Self::$v(_) => VoxelType::$vt),*
                }
            }

            /// The value at `position`, tagged.
            pub fn get(&self, position: &[$coord]) -> AnyVoxel {
                match self {
                    $(Self::$v(c) => AnyVoxel::$v(c.get(position))),*
                }
            }

            /// `value` everywhere, in `value`'s representation, shaped like `self`.
            pub fn constant_like(&self, value: &AnyVoxel) -> Self {
                let shape = match self {
                    $(Self::$v(c) => c.constant(())),*
                };
                match *value {
                    $(AnyVoxel::$v(x) => Self::$v(shape.constant(x))),*
                }
            }
        }

        $(
            impl From<$container<$t>> for $any {
                fn from(c: $container<$t>) -> Self {
                    Self::$v(c)
                }
            }
        )*
    };
}

with_voxels!(any_container!(AnyRandomAccessible, RandomAccessible, i64));
with_voxels!(any_container!(AnyRandomAccessibleInterval, RandomAccessibleInterval, i64));
with_voxels!(any_container!(AnyRealRandomAccessible, RealRandomAccessible, f64));
with_voxels!(any_container!(AnyRealRandomAccessibleRealInterval, RealRandomAccessibleRealInterval, f64));
