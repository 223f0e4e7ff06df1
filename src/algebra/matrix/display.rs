#![allow(non_snake_case)]
use crate::algebra::{Matrix, ScalarValue};
use crate::settings::settings;
use std::fmt;

/// Render `A` with `digits` significant digits per entry.
///
/// Each row is printed as `[a  b  c]` on its own line, with entries padded
/// so that columns line up.
///
/// ```
/// use mpmatrix::algebra::{nstr, Context, Matrix};
///
/// let A = Matrix::from_rows(Context::Exact, &[[1.0, 0.5], [-10.0, 0.0]]).unwrap();
/// assert_eq!(nstr(&A, 5), "[  1.0  0.5]\n[-10.0  0.0]");
/// ```
pub fn nstr(A: &Matrix, digits: usize) -> String {
    let cells: Vec<Vec<String>> = (0..A.rows)
        .map(|i| {
            (0..A.cols)
                .map(|j| A.entry(i, j).to_string_digits(digits))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..A.cols)
        .map(|j| cells.iter().map(|row| row[j].len()).max().unwrap_or(0))
        .collect();

    cells
        .iter()
        .map(|row| {
            let padded: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(s, &w)| format!("{s:>w$}"))
                .collect();
            format!("[{}]", padded.join("  "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or_else(|| settings().display_digits);
        write!(f, "{}", nstr(self, digits))
    }
}
