/// Numeric values a unit transform can be applied to
///
/// Scalars map to scalars; collections are transformed elementwise and
/// returned as new collections of the same shape.
pub trait Quantity {
    type Output;

    fn map_values<F: Fn(f64) -> f64>(self, f: F) -> Self::Output;
}

impl Quantity for f64 {
    type Output = f64;

    fn map_values<F: Fn(f64) -> f64>(self, f: F) -> f64 {
        f(self)
    }
}

impl Quantity for &[f64] {
    type Output = Vec<f64>;

    fn map_values<F: Fn(f64) -> f64>(self, f: F) -> Vec<f64> {
        self.iter().map(|v| f(*v)).collect()
    }
}

impl Quantity for Vec<f64> {
    type Output = Vec<f64>;

    fn map_values<F: Fn(f64) -> f64>(mut self, f: F) -> Vec<f64> {
        for v in self.iter_mut() {
            *v = f(*v);
        }
        self
    }
}

impl Quantity for &Vec<f64> {
    type Output = Vec<f64>;

    fn map_values<F: Fn(f64) -> f64>(self, f: F) -> Vec<f64> {
        self.as_slice().map_values(f)
    }
}

impl<const N: usize> Quantity for [f64; N] {
    type Output = [f64; N];

    fn map_values<F: Fn(f64) -> f64>(self, f: F) -> [f64; N] {
        self.map(f)
    }
}
