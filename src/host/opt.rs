use clap::Args;
use std::net::Ipv4Addr;

/// Options shared by every hosting mode.
#[derive(Args, Debug)]
#[group(id = "host_options")]
pub struct Options {
    /// Shared secret clients must send verbatim in the Authorization header
    #[arg(long)]
    pub password: Option<String>,

    /// Local IPv4 addresses to bind, skipping automatic discovery
    #[arg(long)]
    pub bind: Vec<Ipv4Addr>,
}
