// Domain layer: the descriptor tree, per-file/run models and ports (interfaces).

pub mod model;
pub mod ports;
pub mod tree;
