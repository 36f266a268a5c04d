use num_traits::NumAssign;
use std::ops::Neg;

#[derive(PartialEq, Debug, Clone)]
pub struct Edge<Flow> {
    pub from: usize,
    pub to: usize,
    pub cost: Flow,
    pub capacity: Flow,
    pub flow: Flow,
    pub rev: usize,
}

impl<Flow> Edge<Flow>
where
    Flow: NumAssign + Ord + Copy,
{
    #[inline]
    pub fn residual_capacity(&self) -> Flow {
        self.capacity - self.flow
    }

    // forward edges sit at even positions, so a residual edge points back to an even index
    #[inline]
    pub fn is_residual(&self) -> bool {
        self.rev % 2 == 0
    }
}

/// Directed multigraph whose vertices are `0..num_nodes`.
///
/// Vertex `0` is the source and vertex `num_nodes - 1` is the sink. Every
/// edge added with [`Network::add_edge`] is stored next to its residual
/// partner, so edge `2k` is a forward edge and edge `2k + 1` its reverse.
#[derive(Default, Debug, Clone)]
pub struct Network<Flow> {
    num_nodes: usize,
    edges: Vec<Edge<Flow>>,
    adjacency: Vec<Vec<usize>>,
}

impl<Flow> Network<Flow>
where
    Flow: NumAssign + Neg<Output = Flow> + Ord + Copy,
{
    pub fn new(num_nodes: usize) -> Self {
        Network { num_nodes, edges: Vec::new(), adjacency: vec![Vec::new(); num_nodes] }
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn source(&self) -> usize {
        0
    }

    #[inline]
    pub fn sink(&self) -> usize {
        self.num_nodes.saturating_sub(1)
    }

    /// Appends the edge `from -> to` and its residual partner `to -> from`
    /// (capacity zero, cost negated). Returns the index of the forward edge.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is not a vertex of the network or the
    /// capacity is negative.
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: Flow, cost: Flow) -> usize {
        assert!(from < self.num_nodes && to < self.num_nodes, "edge {from} -> {to} is outside of a network with {} nodes", self.num_nodes);
        assert!(capacity >= Flow::zero(), "edge {from} -> {to} has negative capacity");

        let edge_id = self.edges.len();
        self.edges.push(Edge { from, to, cost, capacity, flow: Flow::zero(), rev: edge_id + 1 });
        self.edges.push(Edge { from: to, to: from, cost: -cost, capacity: Flow::zero(), flow: Flow::zero(), rev: edge_id });
        self.adjacency[from].push(edge_id);
        self.adjacency[to].push(edge_id + 1);

        edge_id
    }

    // the caller guarantees a positive residual capacity
    #[inline]
    pub fn push_unit(&mut self, edge_id: usize) {
        debug_assert!(self.edges[edge_id].residual_capacity() > Flow::zero());
        let rev = self.edges[edge_id].rev;
        self.edges[edge_id].flow += Flow::one();
        self.edges[rev].flow -= Flow::one();
    }

    #[inline]
    pub fn edges(&self) -> &[Edge<Flow>] {
        &self.edges
    }

    /// Indices of the edges (forward and residual) leaving `u`.
    #[inline]
    pub fn neighbors(&self, u: usize) -> std::iter::Copied<std::slice::Iter<'_, usize>> {
        self.adjacency[u].iter().copied()
    }

    pub fn minimum_cost(&self) -> Flow {
        self.edges.iter().step_by(2).fold(Flow::zero(), |cost, edge| cost + edge.cost * edge.flow)
    }

    pub fn flow_value(&self) -> Flow {
        let source = self.source();
        self.neighbors(source).fold(Flow::zero(), |flow, edge_id| flow + self.edges[edge_id].flow)
    }
}
