//! Native module loading and calling-convention declarations.
//!
//! This is the caller's half of the protocol: each entry point's
//! argument shapes and return shape are declared here as typed symbols
//! and must match the native side exactly — integer widths, the
//! pointer+length pairing, and the descriptor field order included.

use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use libloading::{Library, Symbol};

/// Caller-side mirror of the native owned-array descriptor.
///
/// Field order and widths are part of the protocol. The triple must be
/// echoed back to the deallocation entry point untouched.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct RawFibVec {
    /// Pointer to the first element, opaque until copied out.
    pub data: *mut u32,
    /// Number of initialized elements.
    pub len: usize,
    /// Allocated capacity, carried only for the free call.
    pub cap: usize,
}

/// Scalar-in / scalar-out convention.
type FibFn = unsafe extern "C" fn(u32) -> u32;
/// Slice-in / descriptor-out convention.
type FibBatchFn = unsafe extern "C" fn(*const u32, usize) -> RawFibVec;
/// Slice-in / count-out convention.
type FibBatchCountFn = unsafe extern "C" fn(*const u32, usize) -> u32;
/// Descriptor-deallocation convention.
type VecFreeFn = unsafe extern "C" fn(*mut u32, usize, usize);

/// Errors from loading the native module at startup.
#[derive(Debug)]
pub enum LoadError {
    /// The shared library could not be opened.
    OpenFailed {
        /// Path that was tried.
        path: PathBuf,
        /// Loader error text.
        reason: String,
    },
    /// An entry point was missing from the loaded library.
    SymbolMissing {
        /// Symbol name that failed to resolve.
        name: &'static str,
        /// Loader error text.
        reason: String,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenFailed { path, reason } => {
                write!(
                    f,
                    "failed to load native module '{}': {} (build it with \
                     `cargo build --release -p fibbench-ffi`)",
                    path.display(),
                    reason
                )
            }
            Self::SymbolMissing { name, reason } => {
                write!(f, "entry point '{name}' not found in native module: {reason}")
            }
        }
    }
}

impl Error for LoadError {}

/// Process-global module handle: initialized once at startup, never
/// reloaded, left to process exit for teardown.
static LIBRARY: OnceLock<Library> = OnceLock::new();

struct Symbols {
    fib: Symbol<'static, FibFn>,
    fib_batch: Symbol<'static, FibBatchFn>,
    fib_batch_threaded: Symbol<'static, FibBatchCountFn>,
    fib_batch_threaded_results: Symbol<'static, FibBatchFn>,
    vec_free: Symbol<'static, VecFreeFn>,
}

/// Resolve one entry point under its declared calling convention.
///
/// The type chosen at the call site is the declaration; a mismatch with
/// the native signature is undefined behavior at call time, not a
/// resolution error.
fn resolve<T>(library: &'static Library, name: &'static str) -> Result<Symbol<'static, T>, LoadError> {
    // SAFETY: `T` is the convention declared for this entry point; the
    // match with the native side is the protocol contract.
    unsafe { library.get(name.as_bytes()) }.map_err(|e| LoadError::SymbolMissing {
        name,
        reason: e.to_string(),
    })
}

/// The loaded native module with every entry point resolved.
pub struct NativeModule {
    syms: Symbols,
}

impl NativeModule {
    /// Fixed relative path of the compiled native module.
    ///
    /// No search path and no fallback: the harness expects a release
    /// build of `fibbench-ffi` in the workspace target directory.
    pub fn default_path() -> PathBuf {
        Path::new("target")
            .join("release")
            .join(platform_lib_name("fibbench_ffi"))
    }

    /// Load the module from `path` and resolve every entry point.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        // SAFETY: the artifact is a plain cdylib with no load-time
        // initializers beyond the platform defaults.
        let library = unsafe { Library::new(path) }.map_err(|e| LoadError::OpenFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let library = LIBRARY.get_or_init(|| library);
        Ok(Self {
            syms: Symbols {
                fib: resolve(library, "fibbench_fib")?,
                fib_batch: resolve(library, "fibbench_fib_batch")?,
                fib_batch_threaded: resolve(library, "fibbench_fib_batch_threaded")?,
                fib_batch_threaded_results: resolve(library, "fibbench_fib_batch_threaded_results")?,
                vec_free: resolve(library, "fibbench_vec_free")?,
            },
        })
    }

    /// Scalar call: one `u32` in, one `u32` out.
    pub fn fib(&self, n: u32) -> u32 {
        // SAFETY: no pointers cross this convention.
        unsafe { (*self.syms.fib)(n) }
    }

    /// Sequential batch call; the result arrives as an owned descriptor.
    pub fn fib_batch(&self, inputs: &[u32]) -> OwnedVec<'_> {
        // SAFETY: the pointer+length pair describes `inputs`, which
        // outlives the blocking call.
        let raw = unsafe { (*self.syms.fib_batch)(inputs.as_ptr(), inputs.len()) };
        OwnedVec { raw, module: self }
    }

    /// Threaded batch call returning only the processed count.
    pub fn fib_batch_threaded(&self, inputs: &[u32]) -> u32 {
        // SAFETY: as in `fib_batch`.
        unsafe { (*self.syms.fib_batch_threaded)(inputs.as_ptr(), inputs.len()) }
    }

    /// Threaded batch call; the result arrives as an owned descriptor.
    pub fn fib_batch_threaded_results(&self, inputs: &[u32]) -> OwnedVec<'_> {
        // SAFETY: as in `fib_batch`.
        let raw = unsafe { (*self.syms.fib_batch_threaded_results)(inputs.as_ptr(), inputs.len()) };
        OwnedVec { raw, module: self }
    }
}

/// A native-owned array received across the boundary.
///
/// Move-only guard over the descriptor triple: [`OwnedVec::to_vec`] is
/// the only read, and the untouched triple goes back through the
/// deallocation entry point exactly once, on drop. A skipped free or a
/// double free is unrepresentable from here.
pub struct OwnedVec<'m> {
    raw: RawFibVec,
    module: &'m NativeModule,
}

impl OwnedVec<'_> {
    /// Copy every element into harness-owned storage.
    ///
    /// The copy is independent of the native allocation and survives
    /// this guard.
    pub fn to_vec(&self) -> Vec<u32> {
        if self.raw.len == 0 {
            return Vec::new();
        }
        // SAFETY: the descriptor stays valid until drop and describes
        // `len` initialized elements.
        unsafe { std::slice::from_raw_parts(self.raw.data, self.raw.len) }.to_vec()
    }
}

impl Drop for OwnedVec<'_> {
    fn drop(&mut self) {
        // SAFETY: the untouched triple of a single live descriptor;
        // drop runs at most once per guard.
        unsafe { (*self.module.syms.vec_free)(self.raw.data, self.raw.len, self.raw.cap) };
    }
}

/// Platform shared-library filename for a crate name.
fn platform_lib_name(name: &str) -> String {
    #[cfg(target_os = "windows")]
    {
        format!("{name}.dll")
    }
    #[cfg(target_os = "macos")]
    {
        format!("lib{name}.dylib")
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        format!("lib{name}.so")
    }
}
