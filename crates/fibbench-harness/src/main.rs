//! fibbench: times several calling conventions against the fibbench
//! native module over an identical input batch.

mod bench;
mod module;

use clap::Parser;

use crate::module::NativeModule;

/// Cross-boundary Fibonacci benchmark.
#[derive(Debug, Parser)]
#[command(name = "fibbench")]
struct Args {
    /// Fibonacci index to compute.
    #[arg(long, default_value_t = 30)]
    fib: u32,
    /// Number of times the index is repeated in the batch.
    #[arg(long, default_value_t = 15)]
    rep: u32,
}

fn main() {
    // Bad usage prints the usage text and exits like success; the exit
    // status never distinguishes the two.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return;
        }
    };

    let path = NativeModule::default_path();
    let module = match NativeModule::load(&path) {
        Ok(module) => module,
        Err(err) => {
            eprintln!("fibbench: {err}");
            return;
        }
    };

    bench::run(&module, args.fib, args.rep);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_fib_30_rep_15() {
        let args = Args::try_parse_from(["fibbench"]).unwrap();
        assert_eq!(args.fib, 30);
        assert_eq!(args.rep, 15);
    }

    #[test]
    fn flags_accepted_in_either_order() {
        let args = Args::try_parse_from(["fibbench", "--rep", "3", "--fib", "7"]).unwrap();
        assert_eq!(args.fib, 7);
        assert_eq!(args.rep, 3);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["fibbench", "--frob", "1"]).is_err());
    }

    #[test]
    fn non_integer_value_is_rejected() {
        assert!(Args::try_parse_from(["fibbench", "--fib", "many"]).is_err());
    }

    #[test]
    fn flag_without_value_is_rejected() {
        assert!(Args::try_parse_from(["fibbench", "--fib"]).is_err());
    }

    #[test]
    fn repeated_flag_is_rejected() {
        assert!(Args::try_parse_from(["fibbench", "--fib", "1", "--fib", "2"]).is_err());
    }

    #[test]
    fn stray_positional_is_rejected() {
        assert!(Args::try_parse_from(["fibbench", "5"]).is_err());
    }
}
