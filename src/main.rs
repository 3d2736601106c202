use std::process::ExitCode;

fn main() -> ExitCode {
    treeline::cli::run()
}
