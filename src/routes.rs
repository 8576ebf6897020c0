use crate::auth::Auth;
use crate::catalog::{Catalog, ServableSet};
use crate::resolve::{resolve, Resolution};
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, AUTHORIZATION, CONNECTION, CONTENT_DISPOSITION,
    CONTENT_TYPE,
};
use hyper::{Request, Response, StatusCode};
use std::path::Path;

const NOT_FOUND: &str = "Not Found";
const DENIED: &str = "Denied";
const GONE: &str = "Resource was Removed";

pub struct State {
    pub auth: Auth,
    pub catalog: Catalog,
}

#[allow(clippy::declare_interior_mutable_const)]
const CLOSE: HeaderValue = HeaderValue::from_static("close");

pub async fn respond_to_request<B>(req: Request<B>, state: &State) -> Response<Full<Bytes>> {
    let provided = req.headers().get(AUTHORIZATION).map(|v| v.as_bytes());
    let mut resp = if state.auth.authorize(provided) {
        let resolution = resolve(req.uri().path(), &state.catalog).await;
        write_response(&req, resolution, &state.catalog).await
    } else {
        log::warn!("{} {} -> [denied]", req.method(), req.uri());
        text_response(StatusCode::UNAUTHORIZED, DENIED)
    };
    // one request per connection
    resp.headers_mut().insert(CONNECTION, CLOSE);
    resp
}

async fn write_response<B>(
    req: &Request<B>,
    resolution: Resolution,
    catalog: &Catalog,
) -> Response<Full<Bytes>> {
    match (resolution, catalog) {
        (Resolution::RootIndex, Catalog::FixedFiles(set)) => {
            slot_response(req, set, 0)
        }
        (Resolution::Slot(index), Catalog::FixedFiles(set)) => {
            slot_response(req, set, index)
        }
        (Resolution::FileAt(path), _) => match tokio::fs::read(&path).await {
            Ok(content) => {
                log::info!(
                    "{} {} -> [file {} bytes]",
                    req.method(),
                    req.uri(),
                    content.len()
                );
                attachment(Bytes::from(content), &basename(&path))
            }
            Err(e) => {
                // existed at resolution time, unreadable now
                log::warn!("{} {} -> [gone] {}", req.method(), req.uri(), e);
                text_response(StatusCode::GONE, GONE)
            }
        },
        (Resolution::DirectoryAt(path), _) => match read_listing(&path).await {
            Ok(listing) => {
                log::info!("{} {} -> [directory listing]", req.method(), req.uri());
                Response::new(Full::new(Bytes::from(listing)))
            }
            Err(e) => {
                log::warn!("{} {} -> [gone] {}", req.method(), req.uri(), e);
                text_response(StatusCode::GONE, GONE)
            }
        },
        (Resolution::Forbidden, _) => {
            log::warn!("{} {} -> [traversal blocked]", req.method(), req.uri());
            text_response(StatusCode::UNAUTHORIZED, DENIED)
        }
        (Resolution::Invalid, _) | (Resolution::RootIndex | Resolution::Slot(_), _) => {
            log::info!("{} {} -> [not found]", req.method(), req.uri());
            text_response(StatusCode::NOT_FOUND, NOT_FOUND)
        }
    }
}

fn slot_response<B>(req: &Request<B>, set: &ServableSet, index: usize) -> Response<Full<Bytes>> {
    match set.get(index) {
        Some((name, content)) => {
            log::info!("{} {} -> [slot {}: {}]", req.method(), req.uri(), index, name);
            attachment(content.clone(), name)
        }
        None => {
            log::info!("{} {} -> [not found]", req.method(), req.uri());
            text_response(StatusCode::NOT_FOUND, NOT_FOUND)
        }
    }
}

fn attachment(content: Bytes, name: &str) -> Response<Full<Bytes>> {
    #[allow(clippy::declare_interior_mutable_const)]
    const FORCE_DOWNLOAD: HeaderValue = HeaderValue::from_static("application/force-download");
    #[allow(clippy::declare_interior_mutable_const)]
    const ANY: HeaderValue = HeaderValue::from_static("*");

    let mut resp = Response::new(Full::new(content));
    resp.headers_mut().insert(CONTENT_TYPE, FORCE_DOWNLOAD);
    // the name passes through as-is; only bytes a header can't carry are dropped
    if let Ok(disposition) =
        HeaderValue::from_bytes(format!("attachment; filename={}", name).as_bytes())
    {
        resp.headers_mut().insert(CONTENT_DISPOSITION, disposition);
    }
    resp.headers_mut().insert(ACCESS_CONTROL_ALLOW_ORIGIN, ANY);
    resp
}

fn text_response(status: StatusCode, text: &'static str) -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::new(Bytes::from_static(text.as_bytes())));
    *resp.status_mut() = status;
    resp
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Immediate entries only, one basename per line.
async fn read_listing(path: &Path) -> Result<String, std::io::Error> {
    let mut dir = tokio::fs::read_dir(path).await?;
    let mut names = Vec::new();
    while let Some(entry) = dir.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names.join("\n"))
}
