//! Runs the reference write-then-decode scenario and prints the transcript.
//!
//! ```bash
//! RUST_LOG=trace cargo run -p jsonstream --bin jsonstream-demo
//! ```

use std::process::ExitCode;

use jsonstream::demo::{self, REFERENCE_CHUNKS};

fn main() -> ExitCode {
    env_logger::init();

    let mut transcript = String::new();
    let result = demo::run(&REFERENCE_CHUNKS, &mut transcript);
    print!("{transcript}");

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
