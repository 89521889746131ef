//! Unit tests for the workflow module.

mod adapter_tests;
