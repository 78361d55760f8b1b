use std::process::ExitCode;

fn main() -> ExitCode {
    match vecscope::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("vecscope: {e}");
            ExitCode::FAILURE
        }
    }
}
