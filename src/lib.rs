//! Partition Designer - workload cost-model framework
//!
//! This crate provides the pluggable cost-model framework used by an offline
//! database-design optimizer to score candidate partitioning plans for a
//! distributed, partition-based OLTP engine.

pub mod catalog;
pub mod config;
pub mod core;
pub mod costmodel;
pub mod estimator;
pub mod statistics;
pub mod utils;
pub mod workload;
