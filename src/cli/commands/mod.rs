//! Command implementations

pub mod check;
pub mod completions;
pub mod demo;
pub mod fill;
pub mod inputs;
pub mod render;
