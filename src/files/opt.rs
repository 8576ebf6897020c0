use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
#[clap(
    about = "Serve a fixed set of files from memory, addressed by index",
    long_about = "Serve a fixed set of files from memory, addressed by index

Files are read fully into memory at startup, so deleting them afterwards
does not interrupt serving.
Examples:
- GET / downloads the first file
- GET /2 downloads the third file"
)]
pub struct Options {
    /// Port to listen on
    pub port: u16,

    /// Files to load; the first becomes slot 0 and the root default
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub shared: crate::host::opt::Options,
}
