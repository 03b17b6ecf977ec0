//! Behavioural scenarios for configuration, suite validation and target
//! resolution, bound with `rstest-bdd`.

mod fixtures;
mod scenarios;
mod steps;
