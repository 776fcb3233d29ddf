/// Solves a tridiagonal system in place with the Thomas algorithm.
///
/// `sub[i]`, `diag[i]`, and `sup[i]` are the sub-, main, and
/// super-diagonal coefficients of row `i` (`sub[0]` and `sup[n - 1]` are
/// ignored). `diag` is overwritten during elimination and `rhs` holds the
/// solution on return.
///
/// The systems built by the implicit schemes are strictly diagonally
/// dominant, so no pivoting is needed.
pub(super) fn solve(sub: &[f64], diag: &mut [f64], sup: &[f64], rhs: &mut [f64]) {
    let n = diag.len();
    debug_assert!(n > 0 && sub.len() == n && sup.len() == n && rhs.len() == n);

    for i in 1..n {
        let w = sub[i] / diag[i - 1];
        diag[i] -= w * sup[i - 1];
        rhs[i] -= w * rhs[i - 1];
    }

    rhs[n - 1] /= diag[n - 1];
    for i in (0..n - 1).rev() {
        rhs[i] = (rhs[i] - sup[i] * rhs[i + 1]) / diag[i];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn identity() {
        let mut diag = vec![1.0; 3];
        let mut rhs = vec![4.0, 5.0, 6.0];
        solve(&[0.0; 3], &mut diag, &[0.0; 3], &mut rhs);
        assert_eq!(rhs, vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn second_difference_operator() {
        // [ 2 -1  0] [x0]   [1]
        // [-1  2 -1] [x1] = [0]
        // [ 0 -1  2] [x2]   [1]
        let sub = [0.0, -1.0, -1.0];
        let mut diag = [2.0, 2.0, 2.0];
        let sup = [-1.0, -1.0, 0.0];
        let mut rhs = [1.0, 0.0, 1.0];
        solve(&sub, &mut diag, &sup, &mut rhs);
        for x in rhs {
            assert_relative_eq!(x, 1.0, epsilon = 1e-12);
        }
    }
}
