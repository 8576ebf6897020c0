use crate::auth::Auth;
use crate::catalog::Catalog;
use crate::err::Error;
use crate::host;
use crate::routes::State;

pub mod opt;

pub async fn main(options: opt::Options) -> Result<(), Error> {
    let opt::Options {
        port,
        files,
        shared,
    } = options;

    let state = State {
        auth: Auth::new(shared.password),
        catalog: Catalog::fixed_files(&files).await?,
    };

    host::run(port, shared.bind, state).await?;

    Ok(())
}
