use crate::minimum_cost_flow::graph::Network;
use log::{debug, trace};
use num_traits::NumAssign;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::ops::Neg;

/// How cheapest augmenting paths are searched in the residual network.
///
/// Both rules are label-correcting and accept negative edge costs. They
/// compute the same distances; only the order of relaxations differs, so
/// ties between equally cheap paths may be broken differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortestPathRule {
    /// Scan every edge until a whole pass relaxes nothing.
    #[default]
    FullPass,
    /// Relax only the edges leaving vertices whose label changed (SPFA).
    Queue,
}

/// Min-cost max-flow by successive shortest augmenting paths, one unit of
/// flow per augmentation.
#[derive(Default)]
pub struct SuccessiveShortestPath<Flow> {
    rule: ShortestPathRule,
    dist: Vec<Option<Flow>>,
    prev: Vec<Option<usize>>,
    in_queue: Vec<bool>,
    que: VecDeque<usize>,
    augmentations: usize,
}

impl<Flow> SuccessiveShortestPath<Flow>
where
    Flow: NumAssign + Neg<Output = Flow> + Ord + Copy + Debug,
{
    pub fn new(rule: ShortestPathRule) -> Self {
        SuccessiveShortestPath { rule, dist: Vec::new(), prev: Vec::new(), in_queue: Vec::new(), que: VecDeque::new(), augmentations: 0 }
    }

    /// Number of unit augmentations performed by the last call to [`solve`](Self::solve).
    #[inline]
    pub fn augmentations(&self) -> usize {
        self.augmentations
    }

    /// Pushes a maximum flow from `network.source()` to `network.sink()` and
    /// returns its cost, which is minimal among all maximum flows.
    pub fn solve(&mut self, network: &mut Network<Flow>) -> Flow {
        self.augmentations = 0;
        let mut total_cost = Flow::zero();
        let (source, sink) = (network.source(), network.sink());
        if source == sink {
            return total_cost;
        }

        self.dist.resize(network.num_nodes(), None);
        self.prev.resize(network.num_nodes(), None);
        self.in_queue.resize(network.num_nodes(), false);

        while let Some(cost) = self.augment(network, source, sink) {
            total_cost += cost;
        }

        debug!(
            "solved network with {} nodes and {} edges: {} augmentations, total cost {:?}",
            network.num_nodes(),
            network.num_edges(),
            self.augmentations,
            total_cost
        );
        total_cost
    }

    // push one unit along the cheapest path, returning its cost
    fn augment(&mut self, network: &mut Network<Flow>, source: usize, sink: usize) -> Option<Flow> {
        match self.rule {
            ShortestPathRule::FullPass => self.calculate_distance_full_pass(network, source),
            ShortestPathRule::Queue => self.calculate_distance_queue(network, source),
        }
        let cost = self.dist[sink]?;

        let mut path_len = 0;
        let mut v = sink;
        while let Some(edge_id) = self.prev[v] {
            network.push_unit(edge_id);
            v = network.edges()[edge_id].from;
            path_len += 1;
        }
        debug_assert_eq!(v, source);

        self.augmentations += 1;
        trace!("augmentation {}: path of {} edges, cost {:?}", self.augmentations, path_len, cost);
        Some(cost)
    }

    fn reset_labels(&mut self, source: usize) {
        self.dist.fill(None);
        self.prev.fill(None);
        self.dist[source] = Some(Flow::zero());
    }

    fn calculate_distance_full_pass(&mut self, network: &Network<Flow>, source: usize) {
        self.reset_labels(source);

        let mut passes = 0;
        let mut updated = true;
        while updated {
            updated = false;
            for (edge_id, edge) in network.edges().iter().enumerate() {
                if edge.residual_capacity() <= Flow::zero() {
                    continue;
                }
                let Some(d) = self.dist[edge.from] else {
                    continue;
                };
                let new_dist = d + edge.cost;
                if self.dist[edge.to].map_or(true, |current| current > new_dist) {
                    self.dist[edge.to] = Some(new_dist);
                    self.prev[edge.to] = Some(edge_id);
                    updated = true;
                }
            }
            passes += 1;
            debug_assert!(passes <= network.num_nodes() + 1, "negative cycle in residual network");
        }
    }

    fn calculate_distance_queue(&mut self, network: &Network<Flow>, source: usize) {
        self.reset_labels(source);
        self.in_queue.fill(false);
        self.que.clear();
        self.que.push_back(source);
        self.in_queue[source] = true;

        while let Some(u) = self.que.pop_front() {
            self.in_queue[u] = false;
            let Some(d) = self.dist[u] else {
                continue;
            };
            for edge_id in network.neighbors(u) {
                let edge = &network.edges()[edge_id];
                if edge.residual_capacity() <= Flow::zero() {
                    continue;
                }
                let new_dist = d + edge.cost;
                if self.dist[edge.to].map_or(true, |current| current > new_dist) {
                    self.dist[edge.to] = Some(new_dist);
                    self.prev[edge.to] = Some(edge_id);
                    if !self.in_queue[edge.to] {
                        self.in_queue[edge.to] = true;
                        self.que.push_back(edge.to);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ShortestPathRule::FullPass)]
    #[case(ShortestPathRule::Queue)]
    fn empty_network_has_no_augmenting_path(#[case] rule: ShortestPathRule) {
        let mut network: Network<i64> = Network::new(2);
        let mut solver = SuccessiveShortestPath::new(rule);

        assert_eq!(solver.solve(&mut network), 0);
        assert_eq!(solver.augmentations(), 0);
        assert_eq!(network.flow_value(), 0);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn degenerate_network_terminates(#[case] num_nodes: usize) {
        let mut network: Network<i32> = Network::new(num_nodes);
        assert_eq!(SuccessiveShortestPath::default().solve(&mut network), 0);
    }

    // 0 -> 1 -> 3 is cheap, 0 -> 2 -> 3 is expensive, 1 -> 2 lets the
    // second unit reroute through a residual edge
    #[rstest]
    #[case(ShortestPathRule::FullPass)]
    #[case(ShortestPathRule::Queue)]
    fn diamond_with_cross_edge(#[case] rule: ShortestPathRule) {
        let mut network: Network<i64> = Network::new(4);
        network.add_edge(0, 1, 1, 1);
        network.add_edge(0, 2, 1, 5);
        network.add_edge(1, 2, 1, 1);
        network.add_edge(1, 3, 1, 6);
        network.add_edge(2, 3, 1, 1);

        let mut solver = SuccessiveShortestPath::new(rule);
        let cost = solver.solve(&mut network);

        assert_eq!(network.flow_value(), 2);
        assert_eq!(cost, 13);
        assert_eq!(cost, network.minimum_cost());
        assert_eq!(solver.augmentations(), 2);
        // the cross edge is used by the first path and cancelled by the second
        assert_eq!(network.edges()[4].flow, 0);
    }

    #[rstest]
    #[case(ShortestPathRule::FullPass)]
    #[case(ShortestPathRule::Queue)]
    fn negative_costs_are_allowed(#[case] rule: ShortestPathRule) {
        let mut network: Network<i32> = Network::new(3);
        network.add_edge(0, 1, 1, -4);
        network.add_edge(1, 2, 1, 1);
        network.add_edge(0, 2, 1, 2);

        let cost = SuccessiveShortestPath::new(rule).solve(&mut network);
        assert_eq!(cost, -1);
        assert_eq!(network.flow_value(), 2);
    }

    #[test]
    fn capacity_above_one_is_filled_unit_by_unit() {
        let mut network: Network<i64> = Network::new(2);
        network.add_edge(0, 1, 3, 2);
        network.add_edge(0, 1, 1, 10);

        let mut solver = SuccessiveShortestPath::default();
        assert_eq!(solver.solve(&mut network), 16);
        assert_eq!(solver.augmentations(), 4);
    }

    #[test]
    fn unreachable_sink_pushes_nothing() {
        let mut network: Network<i64> = Network::new(4);
        network.add_edge(0, 1, 1, 1);
        network.add_edge(2, 3, 1, 1);

        assert_eq!(SuccessiveShortestPath::new(ShortestPathRule::Queue).solve(&mut network), 0);
        assert!(network.edges().iter().all(|e| e.flow == 0));
    }
}
