//! devtls CLI.
//!
//! - `devtls key` - Generate the private key
//! - `devtls request <domain>` - Generate the certificate signing request
//! - `devtls sign` - Self-sign the certificate
//! - `devtls reset <domain>` - All three in sequence
//! - `devtls status` - Show which artifacts exist

use std::process::ExitCode;

use clap::Parser;
use devtls_cert::{CertArgs, ParseFailure};

fn main() -> ExitCode {
    let args = match CertArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let failure = ParseFailure::from_error(&e);
            if failure.to_stderr {
                eprint!("{}", failure.message);
            } else {
                print!("{}", failure.message);
            }
            return ExitCode::from(failure.exit_code);
        }
    };

    match devtls_cert::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
