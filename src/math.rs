use nalgebra as na;
use num_traits::Float;

/// Least-squares polynomial fit of `y` against `t`, Vandermonde + QR.
/// Coefficients come back highest power first. `None` when the system is
/// underdetermined or rank-deficient (e.g. duplicated `t` values).
pub fn poly_ls<T: na::ComplexField + Float>(
    t: &na::DVector<T>,
    y: &na::DVector<T>,
    degree: usize,
) -> Option<na::DVector<T>> {
    let rows = t.len();
    let cols = degree + 1;

    if rows < cols {
        return None;
    }

    let v = na::DMatrix::from_fn(rows, cols, |r, c| Float::powi(t[r], (degree - c) as i32));

    let qr = v.qr();
    let r = qr.r();

    let mut max_diag = T::zero();
    for i in 0..cols {
        max_diag = Float::max(max_diag, Float::abs(r[(i, i)]));
    }

    let tol = Float::max(max_diag, T::one()) * Float::sqrt(T::epsilon());
    for i in 0..cols {
        if Float::abs(r[(i, i)]) <= tol {
            return None;
        }
    }

    let qty = qr.q().transpose() * y;
    r.solve_upper_triangular(&qty)
}

/// Evaluate a polynomial with highest-power-first coefficients at `t`.
pub fn polyval<T: na::ComplexField + Float>(coefs: &na::DVector<T>, t: T) -> T {
    let mut acc = T::zero();

    for i in 0..coefs.len() {
        acc = acc * t + coefs[i];
    }

    acc
}

/// Median of raw depth samples; an even count averages the two middle
/// values. `None` for an empty slice.
pub fn median(samples: &mut [u16]) -> Option<f32> {
    if samples.is_empty() {
        return None;
    }

    samples.sort_unstable();

    let mid = samples.len() / 2;
    if samples.len() % 2 == 1 {
        Some(samples[mid] as f32)
    } else {
        Some((samples[mid - 1] as f32 + samples[mid] as f32) / 2.0)
    }
}
