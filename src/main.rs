// src/main.rs

use buildag::{cli, logging, run};

#[tokio::main]
async fn main() {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("buildag error: {err:?}");
        std::process::exit(3);
    }

    match run(args).await {
        Ok(report) => std::process::exit(report.exit_code()),
        Err(err) => {
            eprintln!("buildag error: {err}");
            std::process::exit(err.exit_code());
        }
    }
}
