// Process runner: launches the downloader with inherited stdio so its own
// progress output reaches the terminal, and waits for it to finish.

use std::io;
use std::process::{ExitStatus, Stdio};
use tracing::debug;

use crate::command::Invocation;

/// Run `invocation` to completion. An `Err` means the program could not
/// be started at all; a non-zero exit is returned as a normal status.
pub fn run(invocation: &Invocation) -> io::Result<ExitStatus> {
    debug!(program = %invocation.program, args = ?invocation.args, "spawning downloader");
    let status = invocation
        .to_command()
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;
    debug!(code = ?status.code(), "downloader exited");
    Ok(status)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn invocation(program: &str, args: &[&str]) -> Invocation {
        Invocation {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn success_status() {
        let status = run(&invocation("true", &["--ignored"])).unwrap();
        assert!(status.success());
    }

    #[test]
    fn exit_code_is_returned() {
        let status = run(&invocation("sh", &["-c", "exit 3"])).unwrap();
        assert_eq!(status.code(), Some(3));
    }

    #[test]
    fn missing_program_is_an_error() {
        let err = run(&invocation("definitely-not-a-real-downloader", &[])).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
