//! Runs every self-check kernel and reports whether the scalar and SIMD
//! matrix implementations agree.
//!
//! Usage: `fmat4-selfcheck [ITERATIONS]`. Log level is taken from `RUST_LOG`
//! (`info` by default), default implementation from `FMAT4_BACKEND`.

use std::process::ExitCode;

use fmat4::{kernel, Engine};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let iterations = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<usize>() {
            Ok(n) => n,
            Err(err) => {
                log::error!("invalid iteration count {arg:?}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => kernel::DEFAULT_ITERATIONS,
    };

    let engine = match Engine::from_env() {
        Ok(engine) => engine,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("default backend: {}, {iterations} iterations per kernel", engine.backend());

    let mut failed = 0usize;

    for mut kernel in kernel::all() {
        let valid_before = kernel.init();
        kernel.run_scalar(iterations);
        kernel.run_simd(iterations);
        let valid_after = kernel.cleanup();

        if valid_before && valid_after {
            log::info!("{}: ok", kernel.name());
        } else {
            log::error!("{}: mismatch (init: {valid_before}, cleanup: {valid_after})", kernel.name());
            failed += 1;
        }
    }

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        log::error!("{failed} kernel(s) failed");
        ExitCode::FAILURE
    }
}

// main.rs
