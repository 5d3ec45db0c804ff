//! Integration tests for ommcfg configuration resolution

mod connection_generation;
mod default_synthesis;
mod directory_cache;
mod file_source;
mod layered_merge;
mod test_utils;
mod validation;
