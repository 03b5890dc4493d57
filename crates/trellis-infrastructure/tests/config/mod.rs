//! Configuration Tests
//!
//! Key derivation, lazy reads and Figment loading.

mod keys_tests;
mod reader_tests;
