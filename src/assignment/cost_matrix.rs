use num_traits::NumAssign;
use std::ops::Index;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
    #[error("row {row} has {found} cells, expected {expected}")]
    NotSquare { row: usize, expected: usize, found: usize },
    #[error("expected {expected} cells for a square matrix, found {found}")]
    CellCount { expected: usize, found: usize },
    #[error("a {size}x{size} matrix has more cells than fit in memory")]
    SizeOverflow { size: usize },
}

/// Square matrix of assignment costs, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostMatrix<Cost> {
    size: usize,
    cells: Vec<Cost>,
}

impl<Cost> CostMatrix<Cost>
where
    Cost: NumAssign + Copy,
{
    pub fn from_rows(rows: Vec<Vec<Cost>>) -> Result<Self, MatrixError> {
        let size = rows.len();
        if let Some((row, found)) = rows.iter().map(Vec::len).enumerate().find(|&(_, len)| len != size) {
            return Err(MatrixError::NotSquare { row, expected: size, found });
        }
        Ok(CostMatrix { size, cells: rows.into_iter().flatten().collect() })
    }

    pub fn from_row_major(size: usize, cells: Vec<Cost>) -> Result<Self, MatrixError> {
        let expected = size.checked_mul(size).ok_or(MatrixError::SizeOverflow { size })?;
        if cells.len() != expected {
            return Err(MatrixError::CellCount { expected, found: cells.len() });
        }
        Ok(CostMatrix { size, cells })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, column: usize) -> Option<Cost> {
        if row >= self.size || column >= self.size {
            return None;
        }
        Some(self.cells[row * self.size + column])
    }

    pub fn row(&self, row: usize) -> &[Cost] {
        assert!(row < self.size, "row {row} is outside of a {0}x{0} matrix", self.size);
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cost]> + '_ {
        (0..self.size).map(move |row| self.row(row))
    }

    /// Sum of the cells picked by `columns[row]`, or `None` if `columns` is
    /// not a permutation of `0..size`.
    pub fn assignment_cost(&self, columns: &[usize]) -> Option<Cost> {
        if columns.len() != self.size {
            return None;
        }
        let mut used = vec![false; self.size];
        let mut cost = Cost::zero();
        for (row, &column) in columns.iter().enumerate() {
            if column >= self.size || used[column] {
                return None;
            }
            used[column] = true;
            cost += self[(row, column)];
        }
        Some(cost)
    }
}

impl<Cost> Index<(usize, usize)> for CostMatrix<Cost> {
    type Output = Cost;

    fn index(&self, (row, column): (usize, usize)) -> &Cost {
        assert!(row < self.size && column < self.size, "cell ({row}, {column}) is outside of a {0}x{0} matrix", self.size);
        &self.cells[row * self.size + column]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn from_rows_keeps_row_major_order() {
        let matrix = CostMatrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();

        assert_eq!(matrix.size(), 2);
        assert_eq!(matrix[(0, 1)], 2);
        assert_eq!(matrix[(1, 0)], 3);
        assert_eq!(matrix.get(1, 1), Some(4));
        assert_eq!(matrix.get(2, 0), None);
        assert_eq!(matrix.rows().collect::<Vec<_>>(), vec![&[1, 2][..], &[3, 4][..]]);
        assert_eq!(matrix, CostMatrix::from_row_major(2, vec![1, 2, 3, 4]).unwrap());
    }

    #[test]
    fn empty_matrix_is_square() {
        let matrix = CostMatrix::<i64>::from_rows(Vec::new()).unwrap();
        assert_eq!(matrix.size(), 0);
        assert_eq!(matrix.rows().count(), 0);
        assert_eq!(matrix.assignment_cost(&[]), Some(0));
    }

    #[rstest]
    #[case(vec![vec![1, 2], vec![3]], MatrixError::NotSquare { row: 1, expected: 2, found: 1 })]
    #[case(vec![vec![1, 2]], MatrixError::NotSquare { row: 0, expected: 1, found: 2 })]
    #[case(vec![vec![], vec![]], MatrixError::NotSquare { row: 0, expected: 2, found: 0 })]
    fn from_rows_rejects_ragged_input(#[case] rows: Vec<Vec<i32>>, #[case] expected: MatrixError) {
        assert_eq!(CostMatrix::from_rows(rows), Err(expected));
    }

    #[test]
    fn from_row_major_checks_cell_count() {
        assert_eq!(CostMatrix::from_row_major(2, vec![1, 2, 3]), Err(MatrixError::CellCount { expected: 4, found: 3 }));
    }

    #[test]
    fn from_row_major_rejects_overflowing_size() {
        let size = usize::MAX / 2;
        assert_eq!(CostMatrix::<i64>::from_row_major(size, Vec::new()), Err(MatrixError::SizeOverflow { size }));
    }

    #[test]
    #[should_panic(expected = "row 2 is outside of a 2x2 matrix")]
    fn row_rejects_unknown_index() {
        let matrix = CostMatrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        matrix.row(2);
    }

    #[rstest]
    #[case(vec![0, 1], Some(5))]
    #[case(vec![1, 0], Some(5))]
    #[case(vec![0, 0], None)]
    #[case(vec![0], None)]
    #[case(vec![0, 2], None)]
    fn assignment_cost_requires_permutation(#[case] columns: Vec<usize>, #[case] expected: Option<i64>) {
        let matrix = CostMatrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(matrix.assignment_cost(&columns), expected);
    }
}
