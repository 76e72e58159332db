//! The five-variant benchmark loop and the allocation round-trip check.

use std::hint::black_box;
use std::time::Instant;

use fibbench_core::fib_recursive;

use crate::module::NativeModule;

/// Run every calling-convention variant over an identical batch, timing
/// and printing each. The timed loop measures only; no correctness
/// comparison happens between variants here.
pub fn run(module: &NativeModule, fib: u32, rep: u32) {
    let mut nums = vec![fib; rep as usize];
    // Send order is cosmetic — every element is the same index.
    nums.reverse();

    println!("** naive recursive fib over:\n{nums:?}\n");

    println!("** in-process, sequential (no boundary crossed)");
    let start = Instant::now();
    let fibs: Vec<u32> = nums.iter().map(|&n| fib_recursive(n)).collect();
    black_box(&fibs);
    println!(">> done in {:?}\n", start.elapsed());

    println!("** scalar calls across the boundary, one per element");
    let start = Instant::now();
    let fibs: Vec<u32> = nums.iter().map(|&n| module.fib(n)).collect();
    black_box(&fibs);
    println!(">> done in {:?}\n", start.elapsed());

    println!("** one batch call, results returned as a native-owned array");
    let start = Instant::now();
    let fibs = module.fib_batch(&nums).to_vec();
    black_box(&fibs);
    println!(">> done in {:?}\n", start.elapsed());

    println!("** one threaded batch call, returning only the processed count");
    let start = Instant::now();
    let count = module.fib_batch_threaded(&nums);
    black_box(count);
    println!(">> done in {:?}\n", start.elapsed());

    println!("** one threaded batch call, results returned as a native-owned array");
    let start = Instant::now();
    let fibs = module.fib_batch_threaded_results(&nums).to_vec();
    black_box(&fibs);
    println!(">> done in {:?}\n", start.elapsed());

    // Two full allocate/read/free cycles after the timed loop: a free
    // that corrupted the native allocator would diverge here.
    println!("** allocation round-trip check");
    let first = module.fib_batch_threaded_results(&nums).to_vec();
    let second = module.fib_batch_threaded_results(&nums).to_vec();
    println!(
        ">> two cycles of {} values: {}",
        first.len(),
        if first == second { "identical" } else { "DIVERGED" }
    );
}
