//! Shared test utilities for the symbology workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Symbology dictionary fixtures
//! - Feature property generators
//! - Approximate float assertions
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::fixtures;
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro asserting that two RGBA tuples match, with a tolerance on alpha.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_rgba_eq;
///
/// assert_rgba_eq!((255, 0, 0, 0.5), (255, 0, 0, 0.5001), 0.001);
/// ```
#[macro_export]
macro_rules! assert_rgba_eq {
    (($r1:expr, $g1:expr, $b1:expr, $a1:expr), ($r2:expr, $g2:expr, $b2:expr, $a2:expr), $epsilon:expr) => {{
        assert_eq!(($r1, $g1, $b1), ($r2, $g2, $b2), "rgb components differ");
        $crate::assert_approx_eq!($a1, $a2, $epsilon);
    }};
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (r1, g1, b1, a1) = $left;
        let (r2, g2, b2, a2) = $right;
        $crate::assert_rgba_eq!((r1, g1, b1, a1), (r2, g2, b2, a2), $epsilon);
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(1.0001, 1.0, 0.001);
        assert_approx_eq!(0.0, 0.0, 0.0001);
        assert_approx_eq!(-5.5, -5.500001, 0.0001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }

    #[test]
    fn test_assert_rgba_eq_passes() {
        assert_rgba_eq!((255, 0, 0, 0.5), (255, 0, 0, 0.5001), 0.001);
    }

    #[test]
    #[should_panic(expected = "rgb components differ")]
    fn test_assert_rgba_eq_fails_on_rgb() {
        assert_rgba_eq!((255, 0, 0, 1.0), (0, 0, 0, 1.0), 0.001);
    }
}
