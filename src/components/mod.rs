pub mod link_graph;
