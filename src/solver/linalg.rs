//! Dense Gauss-Jordan elimination with partial pivoting. A single pass
//! is enough here since the outer DC loop never reuses a factorization
//! across right-hand sides — every iteration gets a fresh system.

use crate::error::{CircuitError, Result};

/// Pivot magnitudes below this are treated as singular.
pub const SINGULAR_THRESHOLD: f64 = 1e-15;

/// Solve `a x = z` for square `a` via Gauss-Jordan elimination with
/// partial pivoting. `a` is row-major, `n*n` long; `z` is `n` long.
///
/// Consumes `a` and `z` as scratch (callers pass owned copies); returns
/// `CircuitError::SingularMatrix` the moment a pivot search turns up
/// nothing above [`SINGULAR_THRESHOLD`].
pub fn solve(mut a: Vec<f64>, mut z: Vec<f64>, n: usize) -> Result<Vec<f64>> {
    debug_assert_eq!(a.len(), n * n);
    debug_assert_eq!(z.len(), n);

    let idx = |r: usize, c: usize| r * n + c;

    for col in 0..n {
        // Partial pivot: largest magnitude in this column, at or below the diagonal.
        let mut pivot_row = col;
        let mut pivot_mag = a[idx(col, col)].abs();
        for row in (col + 1)..n {
            let mag = a[idx(row, col)].abs();
            if mag > pivot_mag {
                pivot_mag = mag;
                pivot_row = row;
            }
        }

        if pivot_mag < SINGULAR_THRESHOLD {
            return Err(CircuitError::SingularMatrix);
        }

        if pivot_row != col {
            for c in 0..n {
                a.swap(idx(col, c), idx(pivot_row, c));
            }
            z.swap(col, pivot_row);
        }

        let pivot = a[idx(col, col)];
        for c in 0..n {
            a[idx(col, c)] /= pivot;
        }
        z[col] /= pivot;

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = a[idx(row, col)];
            if factor == 0.0 {
                continue;
            }
            for c in 0..n {
                a[idx(row, c)] -= factor * a[idx(col, c)];
            }
            z[row] -= factor * z[col];
        }
    }

    Ok(z)
}
