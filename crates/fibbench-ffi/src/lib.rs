//! C FFI surface for the fibbench Fibonacci benchmarks.
//!
//! Exposes the calling conventions the harness measures — scalar,
//! batch-with-result, threaded-count, threaded-with-result — plus the
//! paired deallocator for every array this library hands out. This is
//! the only crate in the workspace that may contain `unsafe` code.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod fib;
pub mod vec;

pub use fib::{
    fibbench_fib, fibbench_fib_batch, fibbench_fib_batch_threaded,
    fibbench_fib_batch_threaded_results,
};
pub use vec::{fibbench_vec_free, FibVec};
