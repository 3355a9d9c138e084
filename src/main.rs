use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let status = match queens_ga::cli::run(std::env::args_os(), &mut out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = out.flush();
            tracing::error!(error = %err, "run failed");
            if let queens_ga::cli::CliError::Args(err) = &err {
                let _ = err.print();
            } else {
                eprintln!("error: {err}");
            }
            ExitCode::from(err.exit_code())
        }
    };
    let _ = out.flush();
    status
}
