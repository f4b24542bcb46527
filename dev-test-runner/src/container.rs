//! Lazily sampled containers: a shape plus a position → value function.
//!
//! Combinators never evaluate anything; they compose samplers. A derived
//! container takes the shape of its receiver.
use std::fmt;
use std::sync::Arc;

use crate::voxel::Element;

type Sampler<P, T> = Arc<dyn Fn(&[P]) -> T + Send + Sync>;

/// Inclusive integer bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interval {
    pub min: Vec<i64>,
    pub max: Vec<i64>,
}

impl Interval {
    pub fn new(min: Vec<i64>, max: Vec<i64>) -> Self {
        Self { min, max }
    }

    /// `[0, d)` per dimension.
    pub fn from_dimensions(dims: &[usize]) -> Self {
        Self {
            min: vec![0; dims.len()],
            max: dims.iter().map(|d| *d as i64 - 1).collect(),
        }
    }

    pub fn dimensions(&self) -> Vec<usize> {
        self.min
            .iter()
            .zip(&self.max)
            .map(|(lo, hi)| (hi - lo + 1).max(0) as usize)
            .collect()
    }
}

/// Inclusive real bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct RealInterval {
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

impl RealInterval {
    pub fn new(min: Vec<f64>, max: Vec<f64>) -> Self {
        Self { min, max }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{len} values cannot fill dimensions {dims:?}")]
pub struct ShapeError {
    pub dims: Vec<usize>,
    pub len: usize,
}

macro_rules! sampled_container {
    ($(#[$meta:meta])* $name:ident, $coord:ty, $shape:ty) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name<T> {
            shape: $shape,
            sampler: Sampler<$coord, T>,
        }

        impl<T> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name)).field("shape", &self.shape).finish_non_exhaustive()
            }
        }

        impl<T: Element> $name<T> {
            fn with_shape(shape: $shape, f: impl Fn(&[$coord]) -> T + Send + Sync + 'static) -> Self {
                Self { shape, sampler: Arc::new(f) }
            }

            pub fn get(&self, position: &[$coord]) -> T {
                (self.sampler)(position)
            }

            pub fn convert<U: Element>(&self, f: impl Fn(T) -> U + Send + Sync + 'static) -> $name<U> {
                let src = Arc::clone(&self.sampler);
                $name::with_shape(self.shape.clone(), move |p: &[$coord]| f(src(p)))
            }

            pub fn convert_with<U: Element, V: Element>(
                &self,
                other: &$name<U>,
                f: impl Fn(T, U) -> V + Send + Sync + 'static,
            ) -> $name<V> {
                let a = Arc::clone(&self.sampler);
                let b = Arc::clone(&other.sampler);
                $name::with_shape(self.shape.clone(), move |p: &[$coord]| f(a(p), b(p)))
            }

            pub fn tri_convert<U: Element, V: Element, W: Element>(
                &self,
                second: &$name<U>,
                third: &$name<V>,
                f: impl Fn(T, U, V) -> W + Send + Sync + 'static,
            ) -> $name<W> {
                let a = Arc::clone(&self.sampler);
                let b = Arc::clone(&second.sampler);
                let c = Arc::clone(&third.sampler);
                $name::with_shape(self.shape.clone(), move |p: &[$coord]| f(a(p), b(p), c(p)))
            }

            /// `value` everywhere, shaped like `self`.
            pub fn constant<U: Element>(&self, value: U) -> $name<U> {
                $name::with_shape(self.shape.clone(), move |_: &[$coord]| value)
            }
        }
    };
}

sampled_container!(
    /// Unbounded, integer-addressed.
    RandomAccessible, i64, usize
);
sampled_container!(
    /// Bounded, integer-addressed.
    RandomAccessibleInterval, i64, Interval
);
sampled_container!(
    /// Unbounded, real-addressed.
    RealRandomAccessible, f64, usize
);
sampled_container!(
    /// Bounded, real-addressed.
    RealRandomAccessibleRealInterval, f64, RealInterval
);

impl<T: Element> RandomAccessible<T> {
    pub fn from_fn(n_dims: usize, f: impl Fn(&[i64]) -> T + Send + Sync + 'static) -> Self {
        Self::with_shape(n_dims, f)
    }

    pub fn num_dimensions(&self) -> usize {
        self.shape
    }
}

impl<T: Element> RealRandomAccessible<T> {
    pub fn from_fn(n_dims: usize, f: impl Fn(&[f64]) -> T + Send + Sync + 'static) -> Self {
        Self::with_shape(n_dims, f)
    }

    pub fn num_dimensions(&self) -> usize {
        self.shape
    }
}

impl<T: Element> RealRandomAccessibleRealInterval<T> {
    pub fn from_fn(interval: RealInterval, f: impl Fn(&[f64]) -> T + Send + Sync + 'static) -> Self {
        Self::with_shape(interval, f)
    }

    pub fn interval(&self) -> &RealInterval {
        &self.shape
    }
}

impl<T: Element> RandomAccessibleInterval<T> {
    pub fn from_fn(interval: Interval, f: impl Fn(&[i64]) -> T + Send + Sync + 'static) -> Self {
        Self::with_shape(interval, f)
    }

    /// Flat `data` in iteration order (dimension 0 fastest). Positions outside
    /// the bounds read the nearest border value.
    pub fn from_vec(dims: &[usize], data: Vec<T>) -> Result<Self, ShapeError> {
        let count: usize = dims.iter().product();
        if count != data.len() || dims.contains(&0) {
            return Err(ShapeError { dims: dims.to_vec(), len: data.len() });
        }
        let extents = dims.to_vec();
        Ok(Self::with_shape(Interval::from_dimensions(dims), move |p: &[i64]| {
            let mut index = 0;
            let mut stride = 1;
            for (x, extent) in p.iter().zip(&extents) {
                index += (*x).clamp(0, *extent as i64 - 1) as usize * stride;
                stride *= extent;
            }
            data[index]
        }))
    }

    pub fn interval(&self) -> &Interval {
        &self.shape
    }

    /// Every value inside the bounds, dimension 0 fastest.
    pub fn to_vec(&self) -> Vec<T> {
        let bounds = &self.shape;
        let count: usize = bounds.dimensions().iter().product();
        let mut out = Vec::with_capacity(count);
        let mut position = bounds.min.clone();
        for _ in 0..count {
            out.push(self.get(&position));
            for d in 0..position.len() {
                if position[d] < bounds.max[d] {
                    position[d] += 1;
                    break;
                }
                position[d] = bounds.min[d];
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_round_trips_in_iteration_order() {
        let img = RandomAccessibleInterval::from_vec(&[3, 2], vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(img.get(&[2, 0]), 3);
        assert_eq!(img.get(&[0, 1]), 4);
        assert_eq!(img.get(&[9, -4]), 3); // clamped to border
        assert_eq!(img.to_vec(), [1, 2, 3, 4, 5, 6]);
        assert_eq!(img.interval().dimensions(), [3, 2]);
    }

    #[test]
    fn from_vec_rejects_bad_shapes() {
        assert!(RandomAccessibleInterval::from_vec(&[2, 2], vec![1u8; 3]).is_err());
        assert!(RandomAccessibleInterval::<u8>::from_vec(&[0], vec![]).is_err());
    }

    #[test]
    fn combinators_compose_lazily_and_keep_receiver_shape() {
        let a = RandomAccessibleInterval::from_fn(Interval::new(vec![1], vec![3]), |p: &[i64]| p[0] as i32);
        let b = RandomAccessibleInterval::from_fn(Interval::new(vec![0], vec![9]), |p: &[i64]| p[0] as f64 * 0.5);
        let sum = a.convert_with(&b, |x, y| x as f64 + y);
        assert_eq!(sum.interval(), a.interval());
        assert_eq!(sum.to_vec(), [1.5, 3.0, 4.5]);
        let flags = a.convert(|x| x % 2 == 0);
        let picked = flags.tri_convert(&a.constant('e'), &a.constant('o'), |f, e, o| if f { e } else { o });
        assert_eq!(picked.to_vec(), ['o', 'e', 'o']);
    }

    #[test]
    fn real_containers_sample_at_real_positions() {
        let ramp = RealRandomAccessible::from_fn(2, |p: &[f64]| p[0] + p[1]);
        assert_eq!(ramp.num_dimensions(), 2);
        assert_eq!(ramp.convert(|v| v * 2.0).get(&[0.25, 0.5]), 1.5);
        let bounded = RealRandomAccessibleRealInterval::from_fn(RealInterval::new(vec![0.0], vec![1.0]), |p: &[f64]| p[0]);
        assert_eq!(bounded.constant(7u8).get(&[0.3]), 7);
        assert_eq!(bounded.interval().max, [1.0]);
    }
}
