use std::process;

use anyhow::Context;

use rsa_cracker::ui::app::create_app;
use rsa_cracker::CrackerConfig;

fn run() -> anyhow::Result<()> {
    let config = CrackerConfig::from_args(std::env::args().skip(1))
        .context("Invalid command line")?;
    create_app(config).context("Console I/O failed")
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error running application: {:#}", e);
        process::exit(1);
    }
}
