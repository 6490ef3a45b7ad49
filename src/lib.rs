#![doc = include_str!("../README.md")]

pub use sg_graph as graph;
pub use sg_reflect as reflect;
