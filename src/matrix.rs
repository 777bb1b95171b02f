//! Dense column-major matrix over `Real` with copying sub-block access.
//!
//! The backing storage is a single [`RealArray`] of `rows * cols` elements.
//! Element (i, j) lives at linear index `i + rows * j` — column-major, fixed
//! once in the private [`Matrix::idx`] function that every accessor goes
//! through, so row, column, sub-matrix and identity addressing agree by
//! construction.
//!
//! Row, column and sub-matrix reads always copy into caller-supplied
//! destination storage; no operation hands out a view aliasing the source.

use crate::buffer::RealArray;
use crate::error::{layout_error, out_of_bounds, validation_error, Result};
use crate::kernel;
use crate::vector::Vector1D;
use crate::Real;

/// Dense matrix of `rows x cols` real elements, stored column-major.
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: RealArray,
}

impl Matrix {
    /// Allocates a zero-filled `rows x cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        let len = rows.checked_mul(cols).ok_or_else(|| {
            layout_error(usize::MAX, 1, "matrix element count overflows usize")
        })?;
        Ok(Matrix {
            rows,
            cols,
            data: RealArray::zeroed(len)?,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The backing storage in column-major order.
    pub fn as_slice(&self) -> &[Real] {
        self.data.as_slice()
    }

    /// The backing storage in column-major order, mutable.
    pub fn as_mut_slice(&mut self) -> &mut [Real] {
        self.data.as_mut_slice()
    }

    /// Frees the backing storage; both dimensions become zero. Idempotent.
    pub fn release(&mut self) {
        self.data.release();
        self.rows = 0;
        self.cols = 0;
    }

    /// Overwrites every element with zero.
    pub fn fill_zero(&mut self) {
        self.data.fill_zero();
    }

    // Single source of truth for the storage convention.
    #[inline]
    fn idx(&self, i: usize, j: usize) -> usize {
        i + self.rows * j
    }

    fn check_index(&self, i: usize, j: usize) -> Result<()> {
        if i >= self.rows {
            return Err(out_of_bounds(i, self.rows));
        }
        if j >= self.cols {
            return Err(out_of_bounds(j, self.cols));
        }
        Ok(())
    }

    /// The element at (row `i`, column `j`), bounds-checked.
    pub fn at(&self, i: usize, j: usize) -> Result<Real> {
        self.check_index(i, j)?;
        Ok(self.data.as_slice()[self.idx(i, j)])
    }

    /// Writes the element at (row `i`, column `j`), bounds-checked.
    pub fn set(&mut self, i: usize, j: usize, value: Real) -> Result<()> {
        self.check_index(i, j)?;
        let k = self.idx(i, j);
        self.data.as_mut_slice()[k] = value;
        Ok(())
    }

    /// Turns the matrix into the identity: diagonal 1.0, everything else
    /// 0.0. Requires a square matrix — on a non-square one "the diagonal"
    /// is not well defined, so the call is rejected.
    pub fn identity(&mut self) -> Result<()> {
        if self.rows != self.cols {
            return Err(validation_error(format!(
                "identity requires a square matrix, got {}x{}",
                self.rows, self.cols
            )));
        }
        self.fill_zero();
        for d in 0..self.rows {
            let k = self.idx(d, d);
            self.data.as_mut_slice()[k] = 1.0;
        }
        Ok(())
    }

    /// Copies `src` into `dst` element for element. Dimensions must match
    /// exactly.
    pub fn copy(src: &Matrix, dst: &mut Matrix) -> Result<()> {
        if src.rows != dst.rows || src.cols != dst.cols {
            return Err(validation_error(format!(
                "dimension mismatch: source is {}x{}, destination {}x{}",
                src.rows, src.cols, dst.rows, dst.cols
            )));
        }
        kernel::copy(src.data.as_slice(), dst.data.as_mut_slice());
        Ok(())
    }

    /// Copies `ncols` elements of row `row` into `dst`, which must hold
    /// exactly `ncols` elements. Strided access under the column-major
    /// convention.
    pub fn get_row(src: &Matrix, dst: &mut Vector1D, row: usize, ncols: usize) -> Result<()> {
        if row >= src.rows {
            return Err(out_of_bounds(row, src.rows));
        }
        if ncols > src.cols {
            return Err(validation_error(format!(
                "requested {} columns from a matrix with {}",
                ncols, src.cols
            )));
        }
        if dst.len() != ncols {
            return Err(validation_error(format!(
                "destination holds {} elements, expected {}",
                dst.len(),
                ncols
            )));
        }

        let out = dst.as_mut_slice();
        for j in 0..ncols {
            out[j] = src.data.as_slice()[src.idx(row, j)];
        }
        Ok(())
    }

    /// Copies `nrows` elements of column `col` into `dst`, which must hold
    /// exactly `nrows` elements. A column is contiguous under the
    /// column-major convention.
    pub fn get_column(src: &Matrix, dst: &mut Vector1D, col: usize, nrows: usize) -> Result<()> {
        if col >= src.cols {
            return Err(out_of_bounds(col, src.cols));
        }
        if nrows > src.rows {
            return Err(validation_error(format!(
                "requested {} rows from a matrix with {}",
                nrows, src.rows
            )));
        }
        if dst.len() != nrows {
            return Err(validation_error(format!(
                "destination holds {} elements, expected {}",
                dst.len(),
                nrows
            )));
        }

        let start = src.idx(0, col);
        kernel::copy(&src.data.as_slice()[start..start + nrows], dst.as_mut_slice());
        Ok(())
    }

    /// Extracts the `dst.rows x dst.cols` block whose top-left corner sits
    /// at `(start_row, start_col)` of `src`. The block must lie entirely
    /// within `src`.
    pub fn get_contiguous_submatrix(
        src: &Matrix,
        dst: &mut Matrix,
        start_row: usize,
        start_col: usize,
    ) -> Result<()> {
        if dst.rows > src.rows || dst.cols > src.cols {
            return Err(validation_error(format!(
                "sub-matrix {}x{} exceeds source {}x{}",
                dst.rows, dst.cols, src.rows, src.cols
            )));
        }
        if dst.rows == 0 || dst.cols == 0 {
            return Ok(());
        }
        let last_row = start_row + dst.rows - 1;
        if last_row >= src.rows {
            return Err(out_of_bounds(last_row, src.rows));
        }
        let last_col = start_col + dst.cols - 1;
        if last_col >= src.cols {
            return Err(out_of_bounds(last_col, src.cols));
        }

        // Column segments are contiguous, so the block copies one column
        // slice at a time.
        for jb in 0..dst.cols {
            let s0 = src.idx(start_row, start_col + jb);
            let d0 = dst.idx(0, jb);
            let nrows = dst.rows;
            dst.data.as_mut_slice()[d0..d0 + nrows]
                .copy_from_slice(&src.data.as_slice()[s0..s0 + nrows]);
        }
        Ok(())
    }

    /// Gathers `dst[i, j] = src[rows[i], cols[j]]` with explicit, possibly
    /// non-contiguous and out-of-order index lists. The lists must have
    /// lengths `dst.rows` and `dst.cols`, and every listed index must be
    /// valid in `src`; nothing is clamped.
    pub fn get_general_submatrix(
        src: &Matrix,
        dst: &mut Matrix,
        rows: &[usize],
        cols: &[usize],
    ) -> Result<()> {
        if rows.len() != dst.rows || cols.len() != dst.cols {
            return Err(validation_error(format!(
                "index lists of {}x{} do not match sub-matrix {}x{}",
                rows.len(),
                cols.len(),
                dst.rows,
                dst.cols
            )));
        }
        for &i in rows {
            if i >= src.rows {
                return Err(out_of_bounds(i, src.rows));
            }
        }
        for &j in cols {
            if j >= src.cols {
                return Err(out_of_bounds(j, src.cols));
            }
        }

        for (jb, &ja) in cols.iter().enumerate() {
            for (ib, &ia) in rows.iter().enumerate() {
                let d = dst.idx(ib, jb);
                dst.data.as_mut_slice()[d] = src.data.as_slice()[src.idx(ia, ja)];
            }
        }
        Ok(())
    }

    /// Scatters `dst[rows[i], cols[j]] = src[i, j]`, the inverse of
    /// [`Matrix::get_general_submatrix`]: writing a block back with the same
    /// index lists reproduces the original matrix. The lists must have
    /// lengths `src.rows` and `src.cols`, and every listed index must be
    /// valid in `dst`.
    pub fn set_general_submatrix(
        dst: &mut Matrix,
        src: &Matrix,
        rows: &[usize],
        cols: &[usize],
    ) -> Result<()> {
        if rows.len() != src.rows || cols.len() != src.cols {
            return Err(validation_error(format!(
                "index lists of {}x{} do not match sub-matrix {}x{}",
                rows.len(),
                cols.len(),
                src.rows,
                src.cols
            )));
        }
        for &i in rows {
            if i >= dst.rows {
                return Err(out_of_bounds(i, dst.rows));
            }
        }
        for &j in cols {
            if j >= dst.cols {
                return Err(out_of_bounds(j, dst.cols));
            }
        }

        for (jb, &ja) in cols.iter().enumerate() {
            for (ib, &ia) in rows.iter().enumerate() {
                let d = dst.idx(ia, ja);
                dst.data.as_mut_slice()[d] = src.data.as_slice()[src.idx(ib, jb)];
            }
        }
        Ok(())
    }

    /// The matrix rendered row-major, one tab-separated line per row.
    pub fn format_rows(&self) -> Vec<String> {
        let data = self.data.as_slice();
        (0..self.rows)
            .map(|i| {
                (0..self.cols)
                    .map(|j| data[self.idx(i, j)].to_string())
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect()
    }

    /// Prints the matrix row-major for human inspection. Non-mutating,
    /// diagnostic only.
    pub fn transverse(&self) {
        for line in self.format_rows() {
            println!("{line}");
        }
    }
}
