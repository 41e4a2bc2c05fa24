use std::{error::Error, io, process};

use clap::Parser;
use log::info;
use qtclient::{ClusterClient, Prompt, Session};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host name or IP address of the clustering server
    host: String,
    /// Port the server listens on
    port: u16,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize env_logger; For logging to STDOUT/STDERR
    env_logger::init();

    let cli = Cli::parse();

    ctrlc::set_handler(|| {
        info!("interrupted, leaving session");
        process::exit(130);
    })?;

    let mut client = ClusterClient::connect(&cli.host, cli.port)?;

    let prompt = Prompt::new(io::stdin().lock(), io::stdout().lock());
    let res = Session::new(prompt, &mut client).run();

    if let Err(e) = client.shutdown() {
        eprintln!("failed to close connection. error: {e}");
    }
    res?;
    Ok(())
}
