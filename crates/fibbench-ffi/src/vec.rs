//! The owned-array descriptor and its paired deallocator.
//!
//! A [`FibVec`] describes a `Vec<u32>` whose buffer has been released to
//! the caller: pointer, element count, allocated capacity. The capacity
//! is carried for one reason only — so the exact original allocation can
//! be reconstructed by the allocator that made it when the triple comes
//! back through [`fibbench_vec_free`].

use std::mem::ManuallyDrop;

/// C-compatible descriptor for a `u32` array allocated by this library.
///
/// Valid from the moment it is returned until its exact
/// (`data`, `len`, `cap`) triple is passed to [`fibbench_vec_free`].
/// Reading beyond `len` elements is undefined. Freeing `data` by any
/// mechanism other than the paired deallocator is undefined — only this
/// library's allocator understands the capacity bookkeeping.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct FibVec {
    /// Pointer to the first element.
    pub data: *mut u32,
    /// Number of initialized elements.
    pub len: usize,
    /// Allocated capacity; may exceed `len`.
    pub cap: usize,
}

impl FibVec {
    /// Release `vec`'s buffer to the caller, returning its descriptor.
    ///
    /// The allocation stays intact; dropping it becomes the caller's
    /// obligation, discharged exactly once via [`fibbench_vec_free`].
    pub(crate) fn from_vec(vec: Vec<u32>) -> Self {
        let mut vec = ManuallyDrop::new(vec);
        Self {
            data: vec.as_mut_ptr(),
            len: vec.len(),
            cap: vec.capacity(),
        }
    }
}

/// Free an array returned by a descriptor-producing entry point.
///
/// Must be called exactly once per descriptor, with the untouched
/// (`data`, `len`, `cap`) triple that descriptor was returned with.
/// Calling it twice on the same descriptor, or with a mismatched
/// capacity, is undefined behavior (double free / heap corruption) —
/// an accepted contract risk, not a detected error. A null `data`
/// pointer is a no-op.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn fibbench_vec_free(data: *mut u32, len: usize, cap: usize) {
    if data.is_null() {
        return;
    }
    // SAFETY: per the contract above, the triple reconstructs the exact
    // Vec released in FibVec::from_vec.
    drop(unsafe { Vec::from_raw_parts(data, len, cap) });
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_carries_vec_geometry() {
        let mut vec = vec![1u32, 2, 3];
        vec.reserve(10);
        let (len, cap) = (vec.len(), vec.capacity());
        let desc = FibVec::from_vec(vec);
        assert_eq!(desc.len, len);
        assert_eq!(desc.cap, cap);
        assert!(!desc.data.is_null());
        fibbench_vec_free(desc.data, desc.len, desc.cap);
    }

    #[test]
    fn empty_descriptor_round_trips() {
        let desc = FibVec::from_vec(Vec::new());
        assert_eq!(desc.len, 0);
        // An empty Vec's pointer is dangling-but-aligned, not null, and
        // reconstructing it is still sound.
        fibbench_vec_free(desc.data, desc.len, desc.cap);
    }

    #[test]
    fn null_free_is_noop() {
        fibbench_vec_free(std::ptr::null_mut(), 0, 0);
    }

    #[test]
    fn descriptor_contents_survive_release() {
        let desc = FibVec::from_vec(vec![13, 21, 34]);
        // SAFETY: desc is live and describes len initialized elements.
        let seen = unsafe { std::slice::from_raw_parts(desc.data, desc.len) }.to_vec();
        assert_eq!(seen, vec![13, 21, 34]);
        fibbench_vec_free(desc.data, desc.len, desc.cap);
    }
}
