//! Fixtures shared by the workspace's tests.

pub mod embedding;
pub mod pdf;
pub mod text;
