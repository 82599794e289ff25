//! # acfg-cli — Ruleset Snapshot CLI
//!
//! Provides the `acfg` command-line interface.
//!
//! ```bash
//! acfg create:configuration config/rosetta.json --server-url http://node:8080
//! acfg create:configuration config/rosetta.json --check
//! ```

pub mod configuration;
