//! Step definitions registered with `rstest-bdd`.

pub mod config_steps;
pub mod suite_steps;
pub mod target_steps;
