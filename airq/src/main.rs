use airq::app::AirqCliArguments;
use clap::Parser;
use std::path::Path;

fn main() {
    env_logger::init();
    let args = AirqCliArguments::parse();
    log::info!("starting airq at {}", chrono::Local::now().to_rfc3339());
    match args.op.run(args.config.as_deref().map(Path::new), args.json) {
        Ok(_) => log::info!("finished."),
        Err(e) => {
            log::error!("failed running airq [{}]: {e}", e.code());
            std::process::exit(1);
        }
    }
}
