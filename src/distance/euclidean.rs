//! Planar Euclidean distance.

/// Anything with planar coordinates.
///
/// Implemented by [`Client`](crate::models::Client) and by `(f64, f64)`
/// tuples, so tests and callers can measure between bare coordinates.
pub trait Point {
    /// X-coordinate.
    fn x(&self) -> f64;

    /// Y-coordinate.
    fn y(&self) -> f64;
}

impl Point for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }

    fn y(&self) -> f64 {
        self.1
    }
}

impl<P: Point + ?Sized> Point for &P {
    fn x(&self) -> f64 {
        (**self).x()
    }

    fn y(&self) -> f64 {
        (**self).y()
    }
}

/// Euclidean distance between two points. Travel time equals distance
/// (unit speed) everywhere in this crate.
///
/// # Examples
///
/// ```
/// use u_vrptw::distance::euclidean;
///
/// assert!((euclidean(&(0.0, 0.0), &(3.0, 4.0)) - 5.0).abs() < 1e-10);
/// ```
pub fn euclidean<A: Point + ?Sized, B: Point + ?Sized>(a: &A, b: &B) -> f64 {
    let dx = a.x() - b.x();
    let dy = a.y() - b.y();
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_345() {
        assert!((euclidean(&(0.0, 0.0), &(3.0, 4.0)) - 5.0).abs() < 1e-10);
        assert!((euclidean(&(3.0, 4.0), &(6.0, 8.0)) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_euclidean_symmetric() {
        let a = (1.0, 2.0);
        let b = (4.0, 6.0);
        assert!((euclidean(&a, &b) - euclidean(&b, &a)).abs() < 1e-10);
    }

    #[test]
    fn test_euclidean_self_is_zero() {
        let a = (-7.5, 12.25);
        assert_eq!(euclidean(&a, &a), 0.0);
    }
}
