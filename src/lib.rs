pub mod build_info;
pub mod cli;
pub mod grid;
pub mod solver;
pub mod stencil;
pub mod sweep;
