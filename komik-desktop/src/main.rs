#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::sync::Arc;

use clap::Parser;
use komik_core::{Client, DEFAULT_BASE_URL};

#[derive(Parser, Debug)]
#[clap(about, author, version)]
pub struct Args {
    /// Base url of the comic api
    #[clap(long, default_value = DEFAULT_BASE_URL)]
    pub api_base: String,
    /// Page to open first, `page` or `page/slug` (e.g. `detail/one-piece`)
    #[clap(long)]
    pub location: Option<String>,
}

fn main() -> komik_desktop::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    let client = Client::new(&args.api_base)?;
    komik_desktop::run(Arc::new(client), args.location);
    Ok(())
}
