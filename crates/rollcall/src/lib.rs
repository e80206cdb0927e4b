//! Top-level facade crate for rollcall.
//!
//! Re-exports core types and the exporter library so hosts can depend on a single crate.

pub mod core {
    pub use rollcall_core::*;
}

pub mod exporter {
    pub use rollcall_exporter::*;
}
