mod auth;
mod catalog;
mod err;
mod files;
mod folder;
mod host;
mod http;
mod net;
mod opt;
mod resolve;
mod routes;

#[tokio::main]
async fn main() -> Result<(), err::DisplayError> {
    let opt::Options { verbose, command } = clap::Parser::parse();

    env_logger::Builder::new()
        .filter_level(match verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    match command {
        opt::Command::Files(options) => files::main(options).await?,
        opt::Command::Folder(options) => folder::main(options).await?,
    }

    Ok(())
}
