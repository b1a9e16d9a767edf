//! Property-based tests for record normalization and the directory view.
