//! Property-based tests for merge and validation laws

mod layers;
mod merge;
mod validation;
mod vocabulary;
