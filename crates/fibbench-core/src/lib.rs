//! Fibonacci workloads for the fibbench calling-convention benchmarks.
//!
//! This is the leaf crate with zero internal dependencies. It holds the
//! scalar algorithms and the batch maps that the FFI surface wraps. All
//! computation is pure and infallible; overflow wraps by contract.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod batch;
pub mod fib;

pub use batch::{fib_batch, fib_batch_threaded};
pub use fib::{fib_iterative, fib_recursive};
