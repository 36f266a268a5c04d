//! Linear assignment by reduction to unit-capacity min-cost max-flow.
//!
//! ```
//! use assignment_flow::assignment::{solve_assignment, CostMatrix};
//!
//! let matrix = CostMatrix::from_rows(vec![vec![1, 100], vec![100, 1]]).unwrap();
//! let assignment = solve_assignment(&matrix);
//! assert_eq!(assignment.total_cost, 2);
//! assert_eq!(assignment.columns, vec![0, 1]);
//! ```

pub mod assignment;
pub mod minimum_cost_flow;
