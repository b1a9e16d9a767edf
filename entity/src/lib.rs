//! sea-orm models for the development schema created by `migration`.
//!
//! The directory page never reads through these models: the hosted relation
//! may carry any subset of columns. They exist for seeding and tests.

pub mod employees;

pub use employees::Entity as Employees;
