//! # Provenance Ledger Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs        # Lifecycle scenarios through the dispatcher
//!     ├── determinism.rs  # Canonical bytes, replica agreement
//!     └── conflicts.rs    # Read-set validation between transactions
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pl-tests
//! cargo test -p pl-tests integration::determinism
//! ```

pub mod integration;
