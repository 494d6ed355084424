//! Integration tests for the fimon file-integrity monitor

mod baseline_store;
mod config_loading;
mod monitor_cycle;
