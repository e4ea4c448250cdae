//! End-to-end test suite for isodecay.
//!
//! Integration tests live in `tests/`; shared fixtures and mock engines are
//! in [`helpers`].

pub mod helpers;
