// src/main.rs

use monitdir::{cli, logging, run};

#[tokio::main]
async fn main() {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("monitdir error: {err:?}");
        std::process::exit(1);
    }

    match run(args).await {
        Ok(()) => {}
        Err(err) if err.is_config_error() => {
            println!("monitdir: {err}");
            println!();
            println!("{}", cli::usage());
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("monitdir error: {err:?}");
            std::process::exit(1);
        }
    }
}
