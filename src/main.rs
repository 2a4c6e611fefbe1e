use listmodel_gen::cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    cli::run()
}
