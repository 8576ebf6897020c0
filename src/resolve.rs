use crate::catalog::Catalog;
use std::path::PathBuf;

/// Where a request path lands in the active catalog. Produced once per
/// request and consumed by the response writer.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    RootIndex,
    Slot(usize),
    FileAt(PathBuf),
    DirectoryAt(PathBuf),
    Invalid,
    Forbidden,
}

// The original front-end listener normalized most traversal attempts before
// they reached the resolver; this check does not trust that normalization.
fn has_traversal(path: &str) -> bool {
    let bytes = path.as_bytes();
    (0..bytes.len().saturating_sub(1)).any(|i| {
        bytes[i] == b'.' && bytes[i + 1] == b'.' && matches!(bytes.get(i + 2), None | Some(b'/'))
    })
}

const MAX_SLOT_DIGITS: usize = 8;

pub async fn resolve(path: &str, catalog: &Catalog) -> Resolution {
    match catalog {
        Catalog::FixedFiles(set) => {
            if path.is_empty() || path == "/" {
                return Resolution::RootIndex;
            }
            let digits = path.strip_prefix('/').unwrap_or(path);
            if digits.is_empty()
                || digits.len() > MAX_SLOT_DIGITS
                || !digits.bytes().all(|b| b.is_ascii_digit())
            {
                return Resolution::Invalid;
            }
            // 8 ASCII digits always fit in a usize
            let index: usize = digits.parse().unwrap();
            if index < set.count() {
                Resolution::Slot(index)
            } else {
                Resolution::Invalid
            }
        }
        Catalog::HostedFolder { root } => {
            if has_traversal(path) {
                return Resolution::Forbidden;
            }
            let joined = root.join(path.trim_start_matches('/'));
            // Canonicalize and re-check containment: the string scan above
            // can't see escapes that only exist on disk (e.g. symlinks).
            let canonical = match tokio::fs::canonicalize(&joined).await {
                Ok(canonical) => canonical,
                Err(_) => return Resolution::Invalid,
            };
            if !canonical.starts_with(root) {
                return Resolution::Forbidden;
            }
            match tokio::fs::metadata(&canonical).await {
                Ok(meta) if meta.is_file() => Resolution::FileAt(joined),
                Ok(meta) if meta.is_dir() => Resolution::DirectoryAt(joined),
                _ => Resolution::Invalid,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn fixed(count: usize) -> Catalog {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<_> = (0..count)
            .map(|i| {
                let path = dir.path().join(format!("f{}.txt", i));
                std::fs::write(&path, format!("content {}", i)).unwrap();
                path
            })
            .collect();
        Catalog::fixed_files(&paths).await.unwrap()
    }

    #[tokio::test]
    async fn root_paths_hit_slot_zero() {
        let catalog = fixed(1).await;
        assert_eq!(resolve("", &catalog).await, Resolution::RootIndex);
        assert_eq!(resolve("/", &catalog).await, Resolution::RootIndex);
    }

    #[tokio::test]
    async fn numeric_paths_address_slots() {
        let catalog = fixed(3).await;
        assert_eq!(resolve("/0", &catalog).await, Resolution::Slot(0));
        assert_eq!(resolve("/2", &catalog).await, Resolution::Slot(2));
        assert_eq!(resolve("/3", &catalog).await, Resolution::Invalid);
        assert_eq!(resolve("/00000002", &catalog).await, Resolution::Slot(2));
    }

    #[tokio::test]
    async fn non_numeric_and_oversized_paths_are_invalid() {
        let catalog = fixed(3).await;
        assert_eq!(resolve("/readme.md", &catalog).await, Resolution::Invalid);
        assert_eq!(resolve("/1x", &catalog).await, Resolution::Invalid);
        assert_eq!(resolve("/-1", &catalog).await, Resolution::Invalid);
        // nine digits is past the slot-address limit
        assert_eq!(resolve("/000000002", &catalog).await, Resolution::Invalid);
    }

    #[test]
    fn traversal_pattern_detection() {
        assert!(has_traversal("/../etc/passwd"));
        assert!(has_traversal(".."));
        assert!(has_traversal("/a/.."));
        assert!(has_traversal("/a/../b"));
        // trailing ".." matches even with a prefix, like the pattern it mirrors
        assert!(has_traversal("/..."));
        assert!(!has_traversal("/a..b"));
        assert!(!has_traversal("/..hidden"));
        assert!(!has_traversal("/notes.txt"));
    }

    #[tokio::test]
    async fn folder_mode_resolves_files_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"hi").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let catalog = Catalog::hosted_folder(dir.path()).await.unwrap();

        match resolve("/notes.txt", &catalog).await {
            Resolution::FileAt(p) => assert!(p.ends_with("notes.txt")),
            other => panic!("expected FileAt, got {:?}", other),
        }
        match resolve("/sub", &catalog).await {
            Resolution::DirectoryAt(p) => assert!(p.ends_with("sub")),
            other => panic!("expected DirectoryAt, got {:?}", other),
        }
        match resolve("/", &catalog).await {
            Resolution::DirectoryAt(_) => {}
            other => panic!("expected DirectoryAt for root, got {:?}", other),
        }
        assert_eq!(resolve("/nope.txt", &catalog).await, Resolution::Invalid);
    }

    #[tokio::test]
    async fn traversal_is_forbidden_even_when_target_exists() {
        let outer = tempfile::tempdir().unwrap();
        std::fs::write(outer.path().join("secret.txt"), b"s").unwrap();
        let inner = outer.path().join("public");
        std::fs::create_dir(&inner).unwrap();
        let catalog = Catalog::hosted_folder(&inner).await.unwrap();

        assert_eq!(
            resolve("/../secret.txt", &catalog).await,
            Resolution::Forbidden
        );
        assert_eq!(
            resolve("/../missing.txt", &catalog).await,
            Resolution::Forbidden
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlink_escape_is_forbidden() {
        let outer = tempfile::tempdir().unwrap();
        std::fs::write(outer.path().join("secret.txt"), b"s").unwrap();
        let inner = outer.path().join("public");
        std::fs::create_dir(&inner).unwrap();
        std::os::unix::fs::symlink(outer.path().join("secret.txt"), inner.join("link.txt"))
            .unwrap();
        let catalog = Catalog::hosted_folder(&inner).await.unwrap();

        assert_eq!(resolve("/link.txt", &catalog).await, Resolution::Forbidden);
    }
}
