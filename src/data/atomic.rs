//! Lock-free `f64` accumulator used by the per-face attribute passes.
//!
//! Several faces share each vertex, so concurrent face workers add into the
//! same slot. The value is stored as raw bits in an [`AtomicU64`] and updated
//! with a compare-exchange loop.

use std::sync::atomic::{AtomicU64, Ordering};

/// An `f64` supporting atomic addition.
#[derive(Debug, Default)]
#[repr(transparent)]
pub struct AtomicF64(AtomicU64);

impl AtomicF64 {
    pub fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    /// Add `delta` and return the previous value.
    #[inline]
    pub fn fetch_add(&self, delta: f64) -> f64 {
        let mut current = self.0.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + delta).to_bits();
            match self
                .0
                .compare_exchange_weak(current, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(prev) => return f64::from_bits(prev),
                Err(actual) => current = actual,
            }
        }
    }

    #[inline]
    pub fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn into_inner(self) -> f64 {
        f64::from_bits(self.0.into_inner())
    }
}

/// Allocate `n` zeroed accumulators.
pub fn zeroed(n: usize) -> Vec<AtomicF64> {
    (0..n).map(|_| AtomicF64::default()).collect()
}

/// Allocate `n` zeroed 3-vector accumulators.
pub fn zeroed3(n: usize) -> Vec<[AtomicF64; 3]> {
    (0..n)
        .map(|_| [AtomicF64::default(), AtomicF64::default(), AtomicF64::default()])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_zero() {
        assert_eq!(AtomicF64::default().load(), 0.0);
    }

    #[test]
    fn fetch_add_accumulates() {
        let acc = AtomicF64::new(1.5);
        assert_eq!(acc.fetch_add(2.0), 1.5);
        acc.fetch_add(-0.5);
        assert_eq!(acc.into_inner(), 3.0);
    }

    #[test]
    fn concurrent_adds_are_not_lost() {
        let acc = AtomicF64::default();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..1000 {
                        acc.fetch_add(1.0);
                    }
                });
            }
        });
        assert_eq!(acc.load(), 4000.0);
    }
}
