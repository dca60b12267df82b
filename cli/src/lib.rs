//! `vg-cli`: run VyomGarud content records through the normalizer and filters
//! from the command line.

pub mod cli;
pub mod commands;
pub mod utils;
