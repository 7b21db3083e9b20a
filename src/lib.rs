#![forbid(unsafe_code)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod model;
pub mod render;
pub mod util;
