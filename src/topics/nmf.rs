// Non-negative matrix factorization via multiplicative updates.
//
// Factors a non-negative document-term matrix X (n x v) into
// W (n x c) paper loadings and H (c x v) topic-term weights using the
// standard Lee-Seung update rules. Initialization is drawn from a
// seeded RNG so the factorization is reproducible for a fixed corpus
// and seed.

use ndarray::Array2;
use rand::Rng;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Guard against division by zero in the update denominators.
const EPS: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct Factorization {
    /// Paper-loading matrix, n x c.
    pub w: Array2<f64>,
    /// Topic-term matrix, c x v.
    pub h: Array2<f64>,
}

/// Run NMF with `components` factors for `max_iter` update rounds.
///
/// Caller guarantees `x` is non-negative and `components >= 1`, with
/// `components <= min(n, v)`.
pub fn factorize(x: &Array2<f64>, components: usize, seed: u64, max_iter: usize) -> Factorization {
    let (n, v) = x.dim();
    debug_assert!(components >= 1 && components <= n.min(v));

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    // Uniform (0, 1] init keeps every entry strictly positive, which the
    // multiplicative updates need to avoid locking entries at zero.
    let mut w = Array2::from_shape_fn((n, components), |_| 1.0 - rng.gen::<f64>());
    let mut h = Array2::from_shape_fn((components, v), |_| 1.0 - rng.gen::<f64>());

    for _ in 0..max_iter {
        // H <- H * (W^T X) / (W^T W H + eps)
        let wt = w.t();
        let numer = wt.dot(x);
        let denom = wt.dot(&w).dot(&h) + EPS;
        h = h * numer / denom;

        // W <- W * (X H^T) / (W H H^T + eps)
        let ht = h.t();
        let numer = x.dot(&ht);
        let denom = w.dot(&h).dot(&ht) + EPS;
        w = w * numer / denom;
    }

    Factorization { w, h }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn reconstruction_error(x: &Array2<f64>, f: &Factorization) -> f64 {
        let approx = f.w.dot(&f.h);
        (x - &approx).iter().map(|d| d * d).sum::<f64>().sqrt()
    }

    #[test]
    fn test_factorization_is_nonnegative() {
        let x = array![[1.0, 0.0, 0.5], [0.0, 2.0, 0.1], [0.9, 0.1, 0.0]];
        let f = factorize(&x, 2, 42, 200);
        assert!(f.w.iter().all(|&v| v >= 0.0));
        assert!(f.h.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_factorization_reduces_error() {
        let x = array![
            [1.0, 0.9, 0.0, 0.0],
            [0.8, 1.0, 0.1, 0.0],
            [0.0, 0.1, 1.0, 0.9],
            [0.0, 0.0, 0.8, 1.0]
        ];
        let short = factorize(&x, 2, 42, 5);
        let long = factorize(&x, 2, 42, 300);
        assert!(
            reconstruction_error(&x, &long) <= reconstruction_error(&x, &short) + 1e-12,
            "more iterations should not worsen the fit"
        );
    }

    #[test]
    fn test_factorization_is_deterministic() {
        let x = array![[1.0, 0.2], [0.3, 1.0]];
        let a = factorize(&x, 2, 7, 100);
        let b = factorize(&x, 2, 7, 100);
        assert_eq!(a.w, b.w);
        assert_eq!(a.h, b.h);
    }

    #[test]
    fn test_different_seeds_still_factor() {
        let x = array![[1.0, 0.2, 0.4], [0.3, 1.0, 0.0]];
        let f = factorize(&x, 1, 99, 100);
        assert_eq!(f.w.dim(), (2, 1));
        assert_eq!(f.h.dim(), (1, 3));
    }
}
