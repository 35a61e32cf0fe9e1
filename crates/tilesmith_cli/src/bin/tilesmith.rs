//! Standalone tilesmith binary
//!
//! Install with: cargo install tilesmith_cli
//! Run with: tilesmith validate assets/tiles

use std::process::ExitCode;

fn main() -> ExitCode {
    ExitCode::from(tilesmith_cli::main_with_args(std::env::args().skip(1)))
}
