pub mod graph;
pub mod successive_shortest_path;
