//! Computation entry points, one per calling convention.
//!
//! Every batch entry point takes the same pointer+length pair and treats
//! `len == 0` as an empty batch without reading `data`, so an empty call
//! never spawns a worker and never dereferences the pointer.

use fibbench_core::{fib_batch, fib_batch_threaded, fib_recursive};

use crate::vec::FibVec;

/// View the caller's input as a slice, without touching `data` when
/// `len == 0`.
///
/// # Safety
///
/// For `len > 0`, `data` must point to `len` readable `u32` values that
/// stay valid for the duration of the call.
#[allow(unsafe_code)]
unsafe fn input_slice<'a>(data: *const u32, len: usize) -> &'a [u32] {
    if len == 0 {
        &[]
    } else {
        // SAFETY: len > 0 and validity per this function's contract.
        unsafe { std::slice::from_raw_parts(data, len) }
    }
}

/// Scalar convention: the nth Fibonacci number.
///
/// No allocation, no failure path; wraps on overflow past `fib(47)`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn fibbench_fib(n: u32) -> u32 {
    fib_recursive(n)
}

/// Slice-in / descriptor-out, sequential.
///
/// Computes each input in order and returns a newly allocated array of
/// equal length. Ownership of the array transfers to the caller, who
/// must pass its exact triple to [`fibbench_vec_free`] exactly once.
///
/// # Safety
///
/// For `len > 0`, `data` must point to `len` readable `u32` values.
///
/// [`fibbench_vec_free`]: crate::vec::fibbench_vec_free
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn fibbench_fib_batch(data: *const u32, len: usize) -> FibVec {
    // SAFETY: caller contract above.
    let inputs = unsafe { input_slice(data, len) };
    FibVec::from_vec(fib_batch(inputs))
}

/// Slice-in / count-out, one worker thread per element.
///
/// Computes every input on its own thread, discards the values, and
/// returns the number of completed computations (always `len`) after all
/// workers join. Exists purely to measure thread-spawn overhead against
/// the sequential path; the results are deliberately unobservable.
///
/// # Safety
///
/// For `len > 0`, `data` must point to `len` readable `u32` values.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn fibbench_fib_batch_threaded(data: *const u32, len: usize) -> u32 {
    // SAFETY: caller contract above.
    let inputs = unsafe { input_slice(data, len) };
    fib_batch_threaded(inputs).len() as u32
}

/// Slice-in / descriptor-out, one worker thread per element.
///
/// Same execution model as [`fibbench_fib_batch_threaded`], but each
/// worker writes into its assigned slot of a pre-sized output buffer, so
/// the returned array preserves input order despite out-of-order
/// completion. Ownership transfers to the caller as in
/// [`fibbench_fib_batch`].
///
/// # Safety
///
/// For `len > 0`, `data` must point to `len` readable `u32` values.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn fibbench_fib_batch_threaded_results(data: *const u32, len: usize) -> FibVec {
    // SAFETY: caller contract above.
    let inputs = unsafe { input_slice(data, len) };
    FibVec::from_vec(fib_batch_threaded(inputs))
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use crate::vec::fibbench_vec_free;

    /// Copy a descriptor's elements out and free it, like a caller would.
    fn drain(desc: FibVec) -> Vec<u32> {
        let out = if desc.len == 0 {
            Vec::new()
        } else {
            // SAFETY: desc is live and describes len initialized elements.
            unsafe { std::slice::from_raw_parts(desc.data, desc.len) }.to_vec()
        };
        fibbench_vec_free(desc.data, desc.len, desc.cap);
        out
    }

    #[test]
    fn scalar_base_cases() {
        assert_eq!(fibbench_fib(0), 0);
        assert_eq!(fibbench_fib(1), 1);
        assert_eq!(fibbench_fib(10), 55);
    }

    #[test]
    fn batch_preserves_input_order() {
        let inputs: Vec<u32> = (0..10).rev().collect();
        let expected: Vec<u32> = inputs.iter().map(|&n| fib_recursive(n)).collect();
        let desc = fibbench_fib_batch(inputs.as_ptr(), inputs.len());
        assert_eq!(drain(desc), expected);
    }

    #[test]
    fn threaded_results_preserve_input_order() {
        let inputs: Vec<u32> = (0..10).rev().collect();
        let expected: Vec<u32> = inputs.iter().map(|&n| fib_recursive(n)).collect();
        let desc = fibbench_fib_batch_threaded_results(inputs.as_ptr(), inputs.len());
        assert_eq!(drain(desc), expected);
    }

    #[test]
    fn threaded_count_equals_len() {
        let inputs = [5u32, 5, 5];
        assert_eq!(fibbench_fib_batch_threaded(inputs.as_ptr(), inputs.len()), 3);
    }

    #[test]
    fn empty_batches_never_read_data() {
        // Null data is fine at len == 0; the pointer is never touched.
        let desc = fibbench_fib_batch(std::ptr::null(), 0);
        assert_eq!(desc.len, 0);
        fibbench_vec_free(desc.data, desc.len, desc.cap);

        let desc = fibbench_fib_batch_threaded_results(std::ptr::null(), 0);
        assert_eq!(desc.len, 0);
        fibbench_vec_free(desc.data, desc.len, desc.cap);

        assert_eq!(fibbench_fib_batch_threaded(std::ptr::null(), 0), 0);
    }

    #[test]
    fn fives_batch_maps_to_itself() {
        let inputs = [5u32, 5, 5];
        let desc = fibbench_fib_batch(inputs.as_ptr(), inputs.len());
        assert_eq!(drain(desc), vec![5, 5, 5]);
    }
}
