//! # CargoTrack Test Suite
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs        # Lifecycle scenarios through service + bus
//!     ├── concurrency.rs  # Many callers against one registry
//!     └── shim.rs         # JSON command round trips through ct-node
//! ```
//!
//! ```bash
//! cargo test -p ct-tests
//! ```

pub mod integration;
