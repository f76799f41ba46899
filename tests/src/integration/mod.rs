//! Cross-crate integration tests.

mod concurrency;
mod flows;
mod shim;
