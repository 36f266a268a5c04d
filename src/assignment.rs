pub mod cost_matrix;
pub mod reducer;

pub use cost_matrix::{CostMatrix, MatrixError};
pub use reducer::{solve_assignment, Assignment, AssignmentReducer};
