use crate::err::{Error, HostError};
use crate::http::serve_connections;
use crate::net;
use crate::routes::{respond_to_request, State};
use hyper::body::Incoming;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;

pub mod opt;

/// Binds one listener per local address and serves until the process exits.
/// Any failure before the first accept is startup-fatal; nothing after it is.
pub async fn run(port: u16, bind: Vec<Ipv4Addr>, state: State) -> Result<(), Error> {
    let addrs = if bind.is_empty() {
        net::local_ipv4_addrs()?
    } else {
        bind
    };
    if addrs.is_empty() {
        return Err(HostError::NoLocalAddr.into());
    }

    let mut listeners = Vec::with_capacity(addrs.len());
    for ip in addrs {
        let addr = SocketAddr::from((ip, port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| HostError::Bind { addr, source })?;
        log::info!("Hosting files at http://{}/", addr);
        listeners.push(listener);
    }

    let state = Arc::new(state);
    futures::future::try_join_all(listeners.into_iter().map(|listener| {
        serve_connections(listener, Arc::clone(&state), respond_to_request::<Incoming>)
    }))
    .await?;

    Ok(())
}
