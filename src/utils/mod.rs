//! Small helpers shared by the core handlers

pub mod filters;
pub mod paths;
