use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
#[clap(
    about = "Serve an entire folder subtree, addressed by relative path",
    long_about = "Serve an entire folder subtree, addressed by relative path

Files are read per request, so changes on disk are visible to clients
immediately.
Examples:
- GET /notes.txt downloads notes.txt from the hosted folder
- GET /sub lists the immediate entries of sub, one per line"
)]
pub struct Options {
    /// Port to listen on
    pub port: u16,

    /// Folder whose subtree is served
    pub folder: PathBuf,

    #[command(flatten)]
    pub shared: crate::host::opt::Options,
}
