use std::process::ExitCode;

use clap::Parser;
use elzii_tools::cli::{Arguments, ExitStatus, print_error, run_cli};

fn main() -> ExitCode {
    let args = Arguments::parse();

    match run_cli(args) {
        Ok(code) => code,
        Err(err) => {
            print_error(&err);
            ExitStatus::Error.into()
        }
    }
}
