use crate::assignment::cost_matrix::CostMatrix;
use crate::minimum_cost_flow::graph::Network;
use crate::minimum_cost_flow::successive_shortest_path::{ShortestPathRule, SuccessiveShortestPath};
use log::debug;
use num_traits::NumAssign;
use std::fmt::Debug;
use std::ops::Neg;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment<Cost> {
    pub total_cost: Cost,
    /// `columns[row]` is the column assigned to `row`.
    pub columns: Vec<usize>,
}

impl<Cost> Assignment<Cost> {
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.columns.iter().copied().enumerate()
    }
}

/// Solves an assignment problem as a unit-capacity flow network
/// `source -> rows -> columns -> sink`.
///
/// For an `n x n` matrix the network has `2n + 2` vertices: `0` is the
/// source, `1..=n` are the rows, `n + 1..=2n` are the columns and `2n + 1`
/// is the sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssignmentReducer {
    rule: ShortestPathRule,
}

#[inline]
fn row_node(row: usize) -> usize {
    row + 1
}

#[inline]
fn column_node(size: usize, column: usize) -> usize {
    size + 1 + column
}

impl AssignmentReducer {
    pub fn new(rule: ShortestPathRule) -> Self {
        AssignmentReducer { rule }
    }

    pub fn build_network<Cost>(&self, matrix: &CostMatrix<Cost>) -> Network<Cost>
    where
        Cost: NumAssign + Neg<Output = Cost> + Ord + Copy,
    {
        let size = matrix.size();
        let mut network = Network::new(2 * size + 2);
        let (source, sink) = (network.source(), network.sink());

        for (i, row) in matrix.rows().enumerate() {
            for (j, &cost) in row.iter().enumerate() {
                network.add_edge(row_node(i), column_node(size, j), Cost::one(), cost);
            }
            network.add_edge(source, row_node(i), Cost::one(), Cost::zero());
            network.add_edge(column_node(size, i), sink, Cost::one(), Cost::zero());
        }

        debug!("built assignment network for a {size}x{size} matrix: {} nodes, {} edges", network.num_nodes(), network.num_edges());
        network
    }

    /// Reads the matching out of a network built by
    /// [`build_network`](Self::build_network) and solved to maximum flow.
    ///
    /// Returns `None` if the network does not have the assignment layout or
    /// its flow does not match every row to a distinct column.
    pub fn decode<Cost>(&self, network: &Network<Cost>) -> Option<Vec<usize>>
    where
        Cost: NumAssign + Neg<Output = Cost> + Ord + Copy,
    {
        let num_nodes = network.num_nodes();
        if num_nodes < 2 || num_nodes % 2 != 0 {
            return None;
        }
        let size = (num_nodes - 2) / 2;
        let first_column = column_node(size, 0);

        let mut assigned = vec![None; size];
        let mut used = vec![false; size];
        for edge in network.edges() {
            let is_row = (row_node(0)..first_column).contains(&edge.from);
            let is_column = (first_column..network.sink()).contains(&edge.to);
            if edge.flow <= Cost::zero() || !is_row || !is_column {
                continue;
            }
            let (row, column) = (edge.from - row_node(0), edge.to - first_column);
            if assigned[row].is_some() || used[column] {
                return None;
            }
            assigned[row] = Some(column);
            used[column] = true;
        }

        assigned.into_iter().collect()
    }

    pub fn solve<Cost>(&self, matrix: &CostMatrix<Cost>) -> Assignment<Cost>
    where
        Cost: NumAssign + Neg<Output = Cost> + Ord + Copy + Debug,
    {
        let mut network = self.build_network(matrix);
        let total_cost = SuccessiveShortestPath::new(self.rule).solve(&mut network);
        let columns = match self.decode(&network) {
            Some(columns) => columns,
            None => unreachable!("maximum flow of a complete bipartite network is a perfect matching"),
        };

        Assignment { total_cost, columns }
    }
}

pub fn solve_assignment<Cost>(matrix: &CostMatrix<Cost>) -> Assignment<Cost>
where
    Cost: NumAssign + Neg<Output = Cost> + Ord + Copy + Debug,
{
    AssignmentReducer::default().solve(matrix)
}
