// src/config/mod.rs
pub mod input;

pub use input::{Mode, RunConfig, RunInput};
