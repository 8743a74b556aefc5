//! Prefix-tree listing
//!
//! Buckets have no directories, only keys that happen to contain `/`. This
//! module rebuilds one level of a folder view from a flat listing: the files
//! sitting directly under a prefix and the names of the sub-folders one level
//! below it.
//!
//! Classification compares separator counts of whole segments rather than
//! searching for character offsets, so the root prefix (empty) needs no
//! special handling.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::Result;
use crate::path::normalize_prefix;
use crate::traits::{ListOptions, ObjectInfo, ObjectStore};

/// Key hierarchy separator
pub const SEPARATOR: char = '/';

/// A folder-listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    /// Bucket to list
    pub bucket: String,

    /// Folder path, normalized to end with `/` unless empty (root)
    pub path: String,

    /// List every descendant as a file instead of one folder level
    pub include_subdirectories: bool,
}

impl ListRequest {
    /// List everything under the bucket root
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            path: String::new(),
            include_subdirectories: true,
        }
    }

    /// Restrict the listing to a folder path
    pub fn path(mut self, path: &str) -> Self {
        self.path = normalize_prefix(path);
        self
    }

    /// Choose between a flat listing (`true`) and one folder level (`false`)
    pub fn include_subdirectories(mut self, include: bool) -> Self {
        self.include_subdirectories = include;
        self
    }
}

/// Files and sub-folders found under a prefix
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Listing {
    /// Objects in the order the store returned them; never folder markers
    pub files: Vec<ObjectInfo>,

    /// Distinct sub-folder prefixes one level below the path, each ending in `/`
    pub dirs: Vec<String>,
}

impl Listing {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty()
    }

    /// Total size of the listed files in bytes
    pub fn total_size(&self) -> i64 {
        self.files.iter().map(|f| f.size_bytes).sum()
    }
}

/// List the contents of a folder with a single listing call.
///
/// Only the first page of results is classified. Store failures are returned
/// unchanged.
pub async fn list_contents(store: &dyn ObjectStore, request: &ListRequest) -> Result<Listing> {
    let prefix = normalize_prefix(&request.path);
    tracing::debug!(
        bucket = %request.bucket,
        prefix = %prefix,
        include_subdirectories = request.include_subdirectories,
        "listing contents"
    );

    let options = ListOptions {
        prefix: (!prefix.is_empty()).then(|| prefix.clone()),
        ..Default::default()
    };
    let page = store.list_objects(&request.bucket, options).await?;

    if page.truncated {
        tracing::warn!(
            bucket = %request.bucket,
            prefix = %prefix,
            returned = page.items.len(),
            "listing truncated, only the first page is shown"
        );
    }

    Ok(classify(&prefix, page.items, request.include_subdirectories))
}

/// Sort a flat listing into files and one-level sub-folders.
///
/// `prefix` must already be normalized. With `include_subdirectories` every
/// non-marker key is a file. Otherwise a key is a file when it sits at the
/// prefix's depth, contributes a folder when it is exactly one level deeper,
/// and is ignored when deeper still.
pub fn classify(prefix: &str, items: Vec<ObjectInfo>, include_subdirectories: bool) -> Listing {
    let mut listing = Listing::default();

    if include_subdirectories {
        listing.files = items
            .into_iter()
            .filter(|item| !item.is_folder_marker())
            .collect();
        return listing;
    }

    let depth = separator_count(prefix);
    let mut seen = HashSet::new();

    for item in items {
        let Some(rest) = item.key.strip_prefix(prefix) else {
            tracing::debug!(key = %item.key, prefix, "key outside requested prefix, skipped");
            continue;
        };

        let key_depth = separator_count(&item.key);
        if key_depth == depth {
            if !item.is_folder_marker() {
                listing.files.push(item);
            }
        } else if key_depth == depth + 1 {
            if let Some((child, _)) = rest.split_once(SEPARATOR) {
                let dir = format!("{prefix}{child}{SEPARATOR}");
                if seen.insert(dir.clone()) {
                    listing.dirs.push(dir);
                }
            }
        }
    }

    listing
}

/// Number of `/` separators in a key
pub fn separator_count(key: &str) -> usize {
    key.matches(SEPARATOR).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::traits::{ListPage, MockObjectStore};

    fn objects(keys: &[&str]) -> Vec<ObjectInfo> {
        keys.iter().map(|k| ObjectInfo::new(*k, 1)).collect()
    }

    fn keys(listing: &Listing) -> Vec<&str> {
        listing.files.iter().map(|f| f.key.as_str()).collect()
    }

    fn store_returning(expected_prefix: Option<&'static str>, keys: &'static [&'static str]) -> MockObjectStore {
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .withf(move |bucket, options| {
                bucket == "bucket" && options.prefix.as_deref() == expected_prefix
            })
            .returning(move |_, _| {
                Ok(ListPage {
                    items: objects(keys),
                    ..Default::default()
                })
            });
        store
    }

    #[test]
    fn test_root_one_level() {
        let listing = classify(
            "",
            objects(&["a.txt", "sub/", "sub/b.txt", "sub/nested/c.txt"]),
            false,
        );
        assert_eq!(keys(&listing), vec!["a.txt"]);
        assert_eq!(listing.dirs, vec!["sub/"]);
    }

    #[test]
    fn test_nested_one_level() {
        let listing = classify(
            "photos/2020/",
            objects(&[
                "photos/2020/a.jpg",
                "photos/2020/b.jpg",
                "photos/2020/2021/c.jpg",
            ]),
            false,
        );
        assert_eq!(keys(&listing), vec!["photos/2020/a.jpg", "photos/2020/b.jpg"]);
        assert_eq!(listing.dirs, vec!["photos/2020/2021/"]);
    }

    #[test]
    fn test_flat_mode_skips_markers_only() {
        let listing = classify(
            "",
            objects(&["a.txt", "sub/", "sub/b.txt", "sub/nested/c.txt"]),
            true,
        );
        assert_eq!(keys(&listing), vec!["a.txt", "sub/b.txt", "sub/nested/c.txt"]);
        assert!(listing.dirs.is_empty());
    }

    #[test]
    fn test_prefix_marker_is_not_a_file() {
        let listing = classify("docs/", objects(&["docs/", "docs/readme.md"]), false);
        assert_eq!(keys(&listing), vec!["docs/readme.md"]);
        assert!(listing.dirs.is_empty());
    }

    #[test]
    fn test_dirs_are_deduplicated_in_discovery_order() {
        let listing = classify(
            "",
            objects(&["b/", "b/1.txt", "a/2.txt", "b/3.txt", "a/"]),
            false,
        );
        assert_eq!(listing.dirs, vec!["b/", "a/"]);
        assert!(listing.files.is_empty());
    }

    #[test]
    fn test_deep_keys_are_ignored_in_one_level_mode() {
        let listing = classify("x/", objects(&["x/y/z/deep.bin", "x/y/z/"]), false);
        assert!(listing.is_empty());
    }

    #[test]
    fn test_dir_entries_have_one_more_separator() {
        let prefix = "a/b/";
        let listing = classify(
            prefix,
            objects(&["a/b/c/", "a/b/c/d", "a/b/e/f", "a/b/g", "a/b/h/i/j"]),
            false,
        );
        assert_eq!(listing.dirs, vec!["a/b/c/", "a/b/e/"]);
        for dir in &listing.dirs {
            assert!(dir.ends_with('/'));
            assert_eq!(separator_count(dir), separator_count(prefix) + 1);
        }
        assert_eq!(keys(&listing), vec!["a/b/g"]);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let input = objects(&["a.txt", "sub/", "sub/b.txt"]);
        let first = classify("", input.clone(), false);
        let second = classify("", input, false);
        assert_eq!(first, second);
    }

    #[test]
    fn test_list_request_normalizes_path() {
        let request = ListRequest::new("bucket").path("photos/2020");
        assert_eq!(request.path, "photos/2020/");
        assert!(request.include_subdirectories);

        let request = ListRequest::new("bucket").path("photos/");
        assert_eq!(request.path, "photos/");

        let request = ListRequest::new("bucket").path("");
        assert_eq!(request.path, "");
    }

    #[test]
    fn test_listing_total_size() {
        let listing = classify("", objects(&["a", "b", "c/"]), true);
        assert_eq!(listing.total_size(), 2);
    }

    #[tokio::test]
    async fn test_list_contents_root() {
        let store = store_returning(None, &["a.txt", "sub/", "sub/b.txt", "sub/nested/c.txt"]);
        let request = ListRequest::new("bucket").include_subdirectories(false);

        let listing = list_contents(&store, &request).await.unwrap();
        assert_eq!(keys(&listing), vec!["a.txt"]);
        assert_eq!(listing.dirs, vec!["sub/"]);
    }

    #[tokio::test]
    async fn test_list_contents_normalizes_prefix() {
        let store = store_returning(
            Some("photos/2020/"),
            &["photos/2020/a.jpg", "photos/2020/b.jpg", "photos/2020/2021/c.jpg"],
        );
        let request = ListRequest {
            bucket: "bucket".into(),
            path: "photos/2020".into(),
            include_subdirectories: false,
        };

        let listing = list_contents(&store, &request).await.unwrap();
        assert_eq!(keys(&listing), vec!["photos/2020/a.jpg", "photos/2020/b.jpg"]);
        assert_eq!(listing.dirs, vec!["photos/2020/2021/"]);
    }

    #[tokio::test]
    async fn test_list_contents_flat() {
        let store = store_returning(None, &["a.txt", "sub/", "sub/b.txt", "sub/nested/c.txt"]);
        let request = ListRequest::new("bucket");

        let listing = list_contents(&store, &request).await.unwrap();
        assert_eq!(keys(&listing), vec!["a.txt", "sub/b.txt", "sub/nested/c.txt"]);
        assert!(listing.dirs.is_empty());
    }

    #[tokio::test]
    async fn test_list_contents_empty_store() {
        let store = store_returning(None, &[]);
        let request = ListRequest::new("bucket").include_subdirectories(false);

        let listing = list_contents(&store, &request).await.unwrap();
        assert!(listing.files.is_empty());
        assert!(listing.dirs.is_empty());
    }

    #[tokio::test]
    async fn test_list_contents_propagates_store_error() {
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .returning(|_, _| Err(Error::service("NoSuchBucket", "The specified bucket does not exist")));

        let result = list_contents(&store, &ListRequest::new("bucket")).await;
        let err = result.unwrap_err();
        assert_eq!(err.code(), Some("NoSuchBucket"));
    }

    #[tokio::test]
    async fn test_list_contents_uses_first_page_only() {
        let mut store = MockObjectStore::new();
        store.expect_list_objects().times(1).returning(|_, _| {
            Ok(ListPage {
                items: objects(&["a.txt"]),
                truncated: true,
                continuation_token: Some("next".into()),
            })
        });

        let listing = list_contents(&store, &ListRequest::new("bucket")).await.unwrap();
        assert_eq!(keys(&listing), vec!["a.txt"]);
    }
}
