//! Scalar side: element types, their runtime tags, and widened views.
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Anything a container can hold.
pub trait Element: Copy + Send + Sync + 'static {}

impl<T: Copy + Send + Sync + 'static> Element for T {}

/// Expands `$m! { $args; <variant> => <type>, <VoxelType>; ... }` over every
/// representation, in catalog order.
macro_rules! with_voxels {
    ($m:ident ! ($($args:tt)*)) => {
        $m! {
            $($args)*;
            C64 => Complex64, ComplexDouble;
            C32 => Complex32, ComplexFloat;
            F64 => f64, Double;
            F32 => f32, Float;
            I64 => i64, Long;
            I32 => i32, Int;
            I16 => i16, Short;
            I8 => i8, Byte;
            U64 => u64, UnsignedLong;
            U32 => u32, UnsignedInt;
            U16 => u16, UnsignedShort;
            U8 => u8, UnsignedByte;
        }
    };
}

// ————————————————————————————————————————————————————————————————————————————
// TYPE TAGS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VoxelType {
    ComplexDouble,
    ComplexFloat,
    Double,
    Float,
    Long,
    Int,
    Short,
    Byte,
    UnsignedLong,
    UnsignedInt,
    UnsignedShort,
    UnsignedByte,
}

impl VoxelType {
    pub const ALL: [VoxelType; 12] = [
        Self::ComplexDouble,
        Self::ComplexFloat,
        Self::Double,
        Self::Float,
        Self::Long,
        Self::Int,
        Self::Short,
        Self::Byte,
        Self::UnsignedLong,
        Self::UnsignedInt,
        Self::UnsignedShort,
        Self::UnsignedByte,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::ComplexDouble => "ComplexDoubleType",
            Self::ComplexFloat => "ComplexFloatType",
            Self::Double => "DoubleType",
            Self::Float => "FloatType",
            Self::Long => "LongType",
            Self::Int => "IntType",
            Self::Short => "ShortType",
            Self::Byte => "ByteType",
            Self::UnsignedLong => "UnsignedLongType",
            Self::UnsignedInt => "UnsignedIntType",
            Self::UnsignedShort => "UnsignedShortType",
            Self::UnsignedByte => "UnsignedByteType",
        }
    }
}

impl fmt::Display for VoxelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// VOXEL
// ————————————————————————————————————————————————————————————————————————————

/// A scalar representation with its two widened views.
pub trait Voxel: Element + fmt::Debug {
    const TYPE: VoxelType;
    /// 64-bit signed view. Floats truncate (saturating), `u64` wraps.
    fn integer_long(self) -> i64;
    /// f64 view. Complex values contribute their real part.
    fn real_double(self) -> f64;
}

macro_rules! primitive_voxel {
    ($($t:ty => $vt:ident),* $(,)?) => {
        $(
            impl Voxel for $t {
                const TYPE: VoxelType = VoxelType::$vt;
                fn integer_long(self) -> i64 {
                    self as i64
                }
                fn real_double(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

primitive_voxel! {
    f64 => Double,
    f32 => Float,
    i64 => Long,
    i32 => Int,
    i16 => Short,
    i8 => Byte,
    u64 => UnsignedLong,
    u32 => UnsignedInt,
    u16 => UnsignedShort,
    u8 => UnsignedByte,
}

// ————————————————————————————————————————————————————————————————————————————
// COMPLEX
// ————————————————————————————————————————————————————————————————————————————

macro_rules! complex {
    ($name:ident, $f:ty, $vt:ident) => {
        /// Orders lexicographically by (re, im).
        #[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
        pub struct $name {
            pub re: $f,
            pub im: $f,
        }

        impl $name {
            pub const fn new(re: $f, im: $f) -> Self {
                Self { re, im }
            }
        }

        impl Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self::new(self.re + rhs.re, self.im + rhs.im)
            }
        }

        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self::new(self.re - rhs.re, self.im - rhs.im)
            }
        }

        impl Mul for $name {
            type Output = Self;
            fn mul(self, rhs: Self) -> Self {
                Self::new(
                    self.re * rhs.re - self.im * rhs.im,
                    self.re * rhs.im + self.im * rhs.re,
                )
            }
        }

        impl Div for $name {
            type Output = Self;
            fn div(self, rhs: Self) -> Self {
                let d = rhs.re * rhs.re + rhs.im * rhs.im;
                Self::new(
                    (self.re * rhs.re + self.im * rhs.im) / d,
                    (self.im * rhs.re - self.re * rhs.im) / d,
                )
            }
        }

        impl Voxel for $name {
            const TYPE: VoxelType = VoxelType::$vt;
            fn integer_long(self) -> i64 {
                self.re as i64
            }
            fn real_double(self) -> f64 {
                self.re as f64
            }
        }
    };
}

complex!(Complex64, f64, ComplexDouble);
complex!(Complex32, f32, ComplexFloat);

// ————————————————————————————————————————————————————————————————————————————
// ANY VOXEL
// ————————————————————————————————————————————————————————————————————————————

macro_rules! any_voxel {
    ($(#[$meta:meta])* $any:ident; $($v:ident => $t:ty, $vt:ident);* $(;)?) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq)]
        pub enum $any {
            $($v($t)),*
        }

        impl $any {
            pub fn voxel_type(&self) -> VoxelType {
                match self {
                    $(Self::$v(_) => VoxelType::$vt),*
                }
            }
        }

        $(
            impl From<$t> for $any {
                fn from(value: $t) -> Self {
                    Self::$v(value)
                }
            }
        )*
    };
}

with_voxels!(any_voxel!(
    /// A scalar tagged with its representation.
    AnyVoxel
));

impl AnyVoxel {
    /// `value` converted into representation `ty`. Integer targets go through
    /// [`Voxel::integer_long`], the rest through [`Voxel::real_double`];
    /// complex targets get a zero imaginary part.
    pub fn cast<P: Voxel>(ty: VoxelType, value: P) -> Self {
        match ty {
            VoxelType::ComplexDouble => Self::C64(Complex64::new(value.real_double(), 0.0)),
            VoxelType::ComplexFloat => Self::C32(Complex32::new(value.real_double() as f32, 0.0)),
            VoxelType::Double => Self::F64(value.real_double()),
            VoxelType::Float => Self::F32(value.real_double() as f32),
            VoxelType::Long => Self::I64(value.integer_long()),
            VoxelType::Int => Self::I32(value.integer_long() as i32),
            VoxelType::Short => Self::I16(value.integer_long() as i16),
            VoxelType::Byte => Self::I8(value.integer_long() as i8),
            VoxelType::UnsignedLong => Self::U64(value.integer_long() as u64),
            VoxelType::UnsignedInt => Self::U32(value.integer_long() as u32),
            VoxelType::UnsignedShort => Self::U16(value.integer_long() as u16),
            VoxelType::UnsignedByte => Self::U8(value.integer_long() as u8),
        }
    }
}
