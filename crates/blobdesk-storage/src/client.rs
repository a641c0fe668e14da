//! Bucket-scoped storage facade.

use std::path::Path;
use std::time::Duration;

use futures::TryStreamExt;

use crate::backend::StorageBackend;
use crate::config::StorageConfig;
use crate::error::StorageResult;
use crate::path::{
    is_listed_folder, is_root_prefix, leaf_name, lister_path, normalize_folder, normalize_prefix,
};
use crate::types::{
    DirectoryEntry, ListEntry, ListRequest, ListingPage, ObjectLookup, ObjectRecord,
    OperationStatus, PageCursor, UploadItem,
};
use crate::{TRACING_TARGET_CLIENT, TRACING_TARGET_OBJECTS};

/// Default validity of signed download URLs.
pub const DEFAULT_SIGNED_URL_TTL: Duration = Duration::from_secs(3600);

/// Use-case shaped operations over a single bucket.
///
/// Every method is an independent round trip to the storage service. Batch
/// methods process their items in order and stop at the first failure; items
/// handled before the failure stay committed.
#[derive(Debug, Clone)]
pub struct BucketClient {
    backend: StorageBackend,
    signed_url_ttl: Duration,
}

impl BucketClient {
    /// Creates a client bound to the bucket named in the configuration.
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        let backend = StorageBackend::new(config)?;

        tracing::info!(
            target: TRACING_TARGET_CLIENT,
            backend = backend.config().backend_name(),
            bucket = %backend.bucket(),
            "Bucket client initialized"
        );

        Ok(Self {
            backend,
            signed_url_ttl: DEFAULT_SIGNED_URL_TTL,
        })
    }

    /// Sets how long signed URLs issued by [`Self::get_object_info`] stay valid.
    pub fn with_signed_url_ttl(mut self, ttl: Duration) -> Self {
        self.signed_url_ttl = ttl;
        self
    }

    /// Returns the bucket name.
    pub fn bucket(&self) -> &str {
        self.backend.bucket()
    }

    /// Returns the underlying backend handle.
    pub fn backend(&self) -> &StorageBackend {
        &self.backend
    }

    /// Lists every object key in the bucket.
    ///
    /// Unbounded and unpaginated; meant for diagnostics.
    pub async fn list_objects(&self) -> StorageResult<Vec<String>> {
        let mut lister = self.backend.lister("/", true).await?;
        let mut keys = Vec::new();

        while let Some(entry) = lister.try_next().await? {
            if entry.metadata().is_dir() {
                continue;
            }
            keys.push(entry.path().to_owned());
        }

        Ok(keys)
    }

    /// Uploads local files, overwriting existing objects.
    pub async fn upload_files(&self, items: &[UploadItem]) -> StorageResult<Vec<OperationStatus>> {
        let mut results = Vec::with_capacity(items.len());

        for item in items {
            let size = self
                .backend
                .write_from_file(&item.destination_path, &item.source_path)
                .await?;

            tracing::info!(
                target: TRACING_TARGET_OBJECTS,
                bucket = %self.bucket(),
                source = %item.source_path.display(),
                destination = %item.destination_path,
                size,
                "File uploaded"
            );

            results.push(OperationStatus::Uploaded {
                source: item.source_path.display().to_string(),
                destination: item.destination_path.clone(),
            });
        }

        Ok(results)
    }

    /// Deletes objects by key.
    ///
    /// Fails with [`StorageError::NotFound`](crate::StorageError::NotFound) when a key does not exist.
    pub async fn delete_files<S: AsRef<str>>(
        &self,
        keys: &[S],
    ) -> StorageResult<Vec<OperationStatus>> {
        let mut results = Vec::with_capacity(keys.len());

        for key in keys {
            let key = key.as_ref();

            // The service treats deletes as idempotent; a missing key is an error here.
            self.backend.stat(key).await?;
            self.backend.delete(key).await?;

            results.push(OperationStatus::Deleted {
                key: key.to_owned(),
            });
        }

        Ok(results)
    }

    /// Deletes folders together with everything stored under them.
    ///
    /// The empty prefix and `/` name no folder and are reported as empty;
    /// this never deletes the whole bucket. The reported count covers
    /// objects only, not directory markers removed along with them.
    pub async fn delete_folders<S: AsRef<str>>(
        &self,
        folders: &[S],
    ) -> StorageResult<Vec<OperationStatus>> {
        let mut results = Vec::with_capacity(folders.len());

        for folder in folders {
            let folder = normalize_prefix(folder.as_ref());
            if is_root_prefix(&folder) {
                tracing::warn!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %self.bucket(),
                    folder = %folder,
                    "Skipping folder delete of the bucket root"
                );
                results.push(OperationStatus::FolderEmpty { folder });
                continue;
            }

            let mut lister = self.backend.lister(&folder, true).await?;

            let mut paths = Vec::new();
            let mut count = 0;
            let mut listed_folder = false;
            while let Some(entry) = lister.try_next().await? {
                if is_listed_folder(entry.path(), &folder) {
                    listed_folder = true;
                    continue;
                }
                if !entry.metadata().is_dir() {
                    count += 1;
                }
                paths.push(entry.path().to_owned());
            }

            // Listers may report the folder itself even when nothing backs it.
            if listed_folder && self.backend.exists(&folder).await? {
                paths.push(folder.clone());
            }

            // Children sort after their parent prefix, so reverse order empties
            // directories before they are removed.
            paths.sort_unstable_by(|a, b| b.cmp(a));
            paths.dedup();

            if count == 0 {
                // Leftover directory markers go too, but nothing is reported.
                if !paths.is_empty() {
                    self.backend.delete_many(paths).await?;
                }

                tracing::debug!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %self.bucket(),
                    folder = %folder,
                    "Folder is empty"
                );
                results.push(OperationStatus::FolderEmpty { folder });
                continue;
            }

            self.backend.delete_many(paths).await?;

            tracing::info!(
                target: TRACING_TARGET_OBJECTS,
                bucket = %self.bucket(),
                folder = %folder,
                count,
                "Folder deleted"
            );

            results.push(OperationStatus::FolderDeleted { folder, count });
        }

        Ok(results)
    }

    /// Finds objects under `folder` whose leaf name contains `pattern`.
    ///
    /// The pattern matches literally and case-sensitively anywhere in the
    /// leaf name. Directories never match.
    pub async fn search_objects(
        &self,
        pattern: &str,
        folder: &str,
    ) -> StorageResult<Vec<ObjectRecord>> {
        let page = self
            .list_objects_with_metadata(ListRequest::new(folder).with_recursive(true))
            .await?;

        let matches = page
            .objects_info
            .into_iter()
            .filter_map(|entry| match entry {
                ListEntry::Object(object) if !object.is_directory => Some(object),
                _ => None,
            })
            .filter(|object| leaf_name(&object.path).contains(pattern))
            .collect();

        Ok(matches)
    }

    /// Looks up one object and issues a signed download URL for it.
    ///
    /// A missing key yields [`ObjectLookup::NotFound`] instead of an error.
    /// The URL is left empty on services that cannot presign.
    pub async fn get_object_info(&self, key: &str) -> StorageResult<ObjectLookup> {
        let metadata = match self.backend.stat(key).await {
            Ok(metadata) => metadata,
            Err(err) if err.is_not_found() => {
                tracing::debug!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %self.bucket(),
                    key = %key,
                    "Object not found"
                );
                return Ok(ObjectLookup::NotFound);
            }
            Err(err) => return Err(err),
        };

        let signed_url = self.generate_signed_url(key, self.signed_url_ttl).await?;
        let record = ObjectRecord::from_metadata(key, &metadata).with_signed_url(signed_url);

        Ok(ObjectLookup::Found(record))
    }

    /// Lists one page of a folder with object metadata.
    ///
    /// Non-recursive listings group sub-folders into directory entries placed
    /// before the objects of the page. Recursive listings return every object
    /// below the folder and no directory entries. The folder itself is never
    /// part of the result.
    pub async fn list_objects_with_metadata(
        &self,
        request: ListRequest,
    ) -> StorageResult<ListingPage> {
        let folder = normalize_folder(&request.folder);
        let recursive = request.recursive;

        let offset = match request.page_token.as_deref() {
            Some(token) => PageCursor::decode(token, &folder, recursive)?.offset,
            None => 0,
        };

        let mut lister = self.backend.lister(lister_path(&folder), recursive).await?;
        let mut skipped = 0;
        let mut directories = Vec::new();
        let mut objects = Vec::new();
        let mut has_more = false;

        while let Some(entry) = lister.try_next().await? {
            let path = entry.path();
            let metadata = entry.metadata();

            if is_listed_folder(path, &folder) || (recursive && metadata.is_dir()) {
                continue;
            }

            if skipped < offset {
                skipped += 1;
                continue;
            }

            if request
                .page_size
                .is_some_and(|size| directories.len() + objects.len() == size.get())
            {
                has_more = true;
                break;
            }

            if metadata.is_dir() {
                directories.push(ListEntry::Directory(DirectoryEntry::new(path, &folder)));
            } else {
                objects.push(ListEntry::Object(ObjectRecord::from_metadata(path, metadata)));
            }
        }

        let returned = directories.len() + objects.len();
        let next_page_token = if has_more {
            let cursor = PageCursor {
                folder: folder.clone(),
                recursive,
                offset: offset + returned,
            };
            Some(cursor.encode()?)
        } else {
            None
        };

        tracing::debug!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %self.bucket(),
            folder = %folder,
            recursive,
            offset,
            count = returned,
            has_more,
            "Listed folder page"
        );

        directories.extend(objects);

        Ok(ListingPage {
            current_page_token: request.page_token,
            next_page_token,
            objects_info: directories,
        })
    }

    /// Moves an object to a new key within the bucket.
    ///
    /// Copies first, then deletes the source. A failure between the two
    /// steps leaves both keys populated.
    pub async fn move_file(&self, source_key: &str, dest_key: &str) -> StorageResult<OperationStatus> {
        self.backend.copy(source_key, dest_key).await?;
        self.backend.delete(source_key).await?;

        tracing::info!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %self.bucket(),
            from = %source_key,
            to = %dest_key,
            "Object moved"
        );

        Ok(OperationStatus::Moved {
            from: source_key.to_owned(),
            to: dest_key.to_owned(),
        })
    }

    /// Moves an object between two buckets reachable with the same configuration.
    ///
    /// The bucket named in `config` is ignored; clients for both buckets are
    /// built from its backend and credentials.
    pub async fn move_file_across_buckets(
        config: &StorageConfig,
        source_bucket: &str,
        dest_bucket: &str,
        source_key: &str,
        dest_key: &str,
    ) -> StorageResult<OperationStatus> {
        let source = Self::new(config.clone().with_bucket(source_bucket))?;
        let destination = Self::new(config.clone().with_bucket(dest_bucket))?;

        Self::transfer(&source, &destination, source_key, dest_key).await
    }

    /// Moves an object from one client's bucket into another's.
    ///
    /// Same copy-then-delete sequence as [`Self::move_file`].
    pub async fn transfer(
        source: &Self,
        destination: &Self,
        source_key: &str,
        dest_key: &str,
    ) -> StorageResult<OperationStatus> {
        source
            .backend
            .copy_to(source_key, &destination.backend, dest_key)
            .await?;
        source.backend.delete(source_key).await?;

        tracing::info!(
            target: TRACING_TARGET_OBJECTS,
            from_bucket = %source.bucket(),
            from = %source_key,
            to_bucket = %destination.bucket(),
            to = %dest_key,
            "Object moved across buckets"
        );

        Ok(OperationStatus::MovedAcrossBuckets {
            from_bucket: source.bucket().to_owned(),
            from: source_key.to_owned(),
            to_bucket: destination.bucket().to_owned(),
            to: dest_key.to_owned(),
        })
    }

    /// Downloads an object into a local file, overwriting it.
    pub async fn download_blob(
        &self,
        source_key: &str,
        local_path: impl AsRef<Path>,
    ) -> StorageResult<()> {
        let local_path = local_path.as_ref();
        let size = self.backend.download_to_file(source_key, local_path).await?;

        tracing::info!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %self.bucket(),
            key = %source_key,
            local_path = %local_path.display(),
            size,
            "Object downloaded"
        );

        Ok(())
    }

    /// Issues a signed read URL, or `None` when the service cannot presign.
    pub(crate) async fn generate_signed_url(
        &self,
        key: &str,
        expiration: Duration,
    ) -> StorageResult<Option<String>> {
        if !self.backend.supports_presign() {
            tracing::debug!(
                target: TRACING_TARGET_OBJECTS,
                backend = self.backend.config().backend_name(),
                "Signed URLs are not supported by this backend"
            );
            return Ok(None);
        }

        self.backend.presign_read(key, expiration).await.map(Some)
    }
}

#[cfg(all(test, feature = "fs"))]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::config::FsConfig;
    use crate::error::StorageError;

    struct Fixture {
        root: TempDir,
        workdir: TempDir,
        config: StorageConfig,
        client: BucketClient,
    }

    impl Fixture {
        fn new() -> Self {
            let root = TempDir::new().unwrap();
            let workdir = TempDir::new().unwrap();
            let config = StorageConfig::Fs(FsConfig::new(root.path(), "primary"));
            let client = BucketClient::new(config.clone()).unwrap();

            Self {
                root,
                workdir,
                config,
                client,
            }
        }

        /// Writes a local file and uploads it under `key`.
        async fn put(&self, key: &str, content: &str) {
            let local = self.workdir.path().join(key.replace('/', "_"));
            std::fs::write(&local, content).unwrap();
            self.client
                .upload_files(&[UploadItem::new(local, key)])
                .await
                .unwrap();
        }

        async fn exists(&self, key: &str) -> bool {
            self.client.get_object_info(key).await.unwrap().is_found()
        }
    }

    fn paths(page: &ListingPage) -> Vec<&str> {
        page.objects_info.iter().map(ListEntry::path).collect()
    }

    #[tokio::test]
    async fn upload_then_download_round_trips() {
        let fx = Fixture::new();
        let source = fx.workdir.path().join("f.txt");
        std::fs::write(&source, b"invoice \x00\x01 bytes").unwrap();

        let statuses = fx
            .client
            .upload_files(&[UploadItem::new(&source, "d/f.txt")])
            .await
            .unwrap();
        assert_eq!(
            statuses[0].to_string(),
            format!("File {} uploaded to d/f.txt.", source.display())
        );

        let target = fx.workdir.path().join("downloaded.txt");
        fx.client.download_blob("d/f.txt", &target).await.unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), std::fs::read(&source).unwrap());
    }

    #[tokio::test]
    async fn upload_stops_at_first_unreadable_file() {
        let fx = Fixture::new();
        let good = fx.workdir.path().join("good.txt");
        std::fs::write(&good, "ok").unwrap();
        let items = [
            UploadItem::new(&good, "a/good.txt"),
            UploadItem::new(fx.workdir.path().join("missing.txt"), "a/missing.txt"),
            UploadItem::new(&good, "a/after.txt"),
        ];

        let err = fx.client.upload_files(&items).await.unwrap_err();

        assert!(matches!(err, StorageError::LocalIo { .. }));
        assert!(fx.exists("a/good.txt").await);
        assert!(!fx.exists("a/after.txt").await);
    }

    #[tokio::test]
    async fn download_of_missing_object_leaves_no_file() {
        let fx = Fixture::new();
        let target = fx.workdir.path().join("never.txt");

        let err = fx.client.download_blob("nope.txt", &target).await.unwrap_err();

        assert!(err.is_not_found());
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn list_objects_returns_every_key() {
        let fx = Fixture::new();
        fx.put("top.txt", "1").await;
        fx.put("a/b/deep.txt", "2").await;

        let mut keys = fx.client.list_objects().await.unwrap();
        keys.sort();

        assert_eq!(keys, vec!["a/b/deep.txt", "top.txt"]);
    }

    #[tokio::test]
    async fn delete_files_removes_objects_and_fails_on_missing() {
        let fx = Fixture::new();
        fx.put("a/x.txt", "x").await;
        fx.put("a/y.txt", "y").await;

        let statuses = fx.client.delete_files(&["a/x.txt"]).await.unwrap();
        assert_eq!(
            statuses,
            vec![OperationStatus::Deleted {
                key: "a/x.txt".to_owned()
            }]
        );
        assert!(!fx.exists("a/x.txt").await);

        let err = fx
            .client
            .delete_files(&["a/missing.txt", "a/y.txt"])
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(fx.exists("a/y.txt").await);
    }

    #[tokio::test]
    async fn delete_folders_normalizes_prefix() {
        let fx = Fixture::new();
        fx.put("reports/2024/jan.csv", "1").await;
        fx.put("reports/2024/feb.csv", "2").await;
        fx.put("reports/summary.txt", "3").await;
        fx.put("reports-old/keep.txt", "4").await;

        let statuses = fx.client.delete_folders(&["reports"]).await.unwrap();

        assert_eq!(
            statuses,
            vec![OperationStatus::FolderDeleted {
                folder: "reports/".to_owned(),
                count: 3,
            }]
        );
        assert!(!fx.exists("reports/2024/jan.csv").await);
        assert!(!fx.exists("reports/summary.txt").await);
        assert!(fx.exists("reports-old/keep.txt").await);
    }

    #[tokio::test]
    async fn delete_folders_reports_empty_prefix() {
        let fx = Fixture::new();
        fx.put("keep/me.txt", "1").await;

        let statuses = fx.client.delete_folders(&["empty/"]).await.unwrap();

        assert_eq!(
            statuses,
            vec![OperationStatus::FolderEmpty {
                folder: "empty/".to_owned()
            }]
        );
        assert_eq!(
            statuses[0].to_string(),
            "Folder 'empty/' is empty or does not exist."
        );
        assert!(fx.exists("keep/me.txt").await);
    }

    #[tokio::test]
    async fn delete_folders_never_clears_bucket_root() {
        let fx = Fixture::new();
        fx.put("keep/me.txt", "1").await;
        fx.put("top.txt", "2").await;

        let statuses = fx.client.delete_folders(&["", "/"]).await.unwrap();

        let root = OperationStatus::FolderEmpty {
            folder: "/".to_owned(),
        };
        assert_eq!(statuses, vec![root.clone(), root]);
        let mut keys = fx.client.list_objects().await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["keep/me.txt", "top.txt"]);
    }

    #[tokio::test]
    async fn delete_folders_reports_empty_directory_as_empty() {
        let fx = Fixture::new();
        fx.put("stale/gone.txt", "1").await;
        fx.client.delete_files(&["stale/gone.txt"]).await.unwrap();

        let statuses = fx.client.delete_folders(&["stale"]).await.unwrap();

        assert_eq!(
            statuses,
            vec![OperationStatus::FolderEmpty {
                folder: "stale/".to_owned()
            }]
        );
    }

    #[tokio::test]
    async fn listing_puts_directories_first_and_skips_folder() {
        let fx = Fixture::new();
        fx.put("docs/a.txt", "1").await;
        fx.put("docs/z.txt", "2").await;
        fx.put("docs/sub/inner.txt", "3").await;
        fx.put("docs/zsub/inner.txt", "4").await;

        let page = fx
            .client
            .list_objects_with_metadata(ListRequest::new("docs/"))
            .await
            .unwrap();

        let entries = &page.objects_info;
        assert_eq!(entries.len(), 4);
        assert!(entries[0].is_directory());
        assert!(entries[1].is_directory());
        assert!(!entries[2].is_directory());
        assert!(!entries[3].is_directory());
        assert!(!paths(&page).contains(&"docs/"));
        assert!(page.current_page_token.is_none());
        assert!(page.next_page_token.is_none());

        let ListEntry::Directory(dir) = &entries[0] else {
            panic!("expected a directory entry");
        };
        assert!(dir.name == "sub/" || dir.name == "zsub/");
    }

    #[tokio::test]
    async fn listing_without_separator_matches_listing_with_it() {
        let fx = Fixture::new();
        fx.put("docs/a.txt", "1").await;
        fx.put("docs/sub/inner.txt", "2").await;

        let bare = fx
            .client
            .list_objects_with_metadata(ListRequest::new("docs"))
            .await
            .unwrap();
        let slashed = fx
            .client
            .list_objects_with_metadata(ListRequest::new("docs/"))
            .await
            .unwrap();

        let mut bare = paths(&bare);
        let mut slashed = paths(&slashed);
        bare.sort();
        slashed.sort();
        assert_eq!(bare, slashed);
        assert_eq!(bare, vec!["docs/a.txt", "docs/sub/"]);
    }

    #[tokio::test]
    async fn recursive_listing_has_no_directories() {
        let fx = Fixture::new();
        fx.put("docs/a.txt", "1").await;
        fx.put("docs/sub/inner.txt", "2").await;

        let page = fx
            .client
            .list_objects_with_metadata(ListRequest::new("docs").with_recursive(true))
            .await
            .unwrap();

        let mut found = paths(&page);
        found.sort();
        assert_eq!(found, vec!["docs/a.txt", "docs/sub/inner.txt"]);
        assert!(page.objects_info.iter().all(|e| !e.is_directory()));
    }

    #[tokio::test]
    async fn paging_visits_every_entry_once() {
        let fx = Fixture::new();
        for i in 0..5 {
            fx.put(&format!("bulk/file-{i}.txt"), "x").await;
        }

        let mut seen = Vec::new();
        let mut request = ListRequest::new("bulk/").with_page_size(2);
        let mut pages = 0;

        loop {
            let page = fx
                .client
                .list_objects_with_metadata(request.clone())
                .await
                .unwrap();
            assert!(page.objects_info.len() <= 2);
            assert_eq!(page.current_page_token, request.page_token);
            seen.extend(page.objects_info.iter().map(|e| e.path().to_owned()));
            pages += 1;

            match page.next_page_token {
                Some(token) => request = request.with_page_token(token),
                None => break,
            }
        }

        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 5);
        assert_eq!(pages, 3);
    }

    #[tokio::test]
    async fn page_token_from_other_folder_is_rejected() {
        let fx = Fixture::new();
        for i in 0..3 {
            fx.put(&format!("one/{i}.txt"), "x").await;
        }

        let page = fx
            .client
            .list_objects_with_metadata(ListRequest::new("one").with_page_size(1))
            .await
            .unwrap();
        let token = page.next_page_token.unwrap();

        let err = fx
            .client
            .list_objects_with_metadata(ListRequest::new("two").with_page_token(token))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidPageToken(_)));
    }

    #[tokio::test]
    async fn search_matches_leaf_names_literally() {
        let fx = Fixture::new();
        fx.put("inv/2024/a+b.pdf", "1").await;
        fx.put("inv/2024/aab.pdf", "2").await;
        fx.put("inv/a+b-dir/other.txt", "3").await;
        fx.put("inv/report.PDF", "4").await;

        let hits = fx.client.search_objects("a+b", "inv").await.unwrap();
        let hits: Vec<_> = hits.iter().map(|o| o.path.as_str()).collect();
        assert_eq!(hits, vec!["inv/2024/a+b.pdf"]);

        let hits = fx.client.search_objects(".pdf", "").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|o| !o.is_directory && o.signed_url.is_none()));
    }

    #[tokio::test]
    async fn object_info_reports_metadata() {
        let fx = Fixture::new();
        fx.put("a/report.txt", "twelve bytes").await;

        let lookup = fx.client.get_object_info("a/report.txt").await.unwrap();
        let record = lookup.into_found().unwrap();

        assert_eq!(record.name, "report.txt");
        assert_eq!(record.path, "a/report.txt");
        assert_eq!(record.size, 12);
        assert!(!record.is_directory);
        assert!(record.time_updated.is_some());
        // The filesystem backend cannot presign.
        assert!(record.signed_url.is_none());
    }

    #[tokio::test]
    async fn object_info_on_missing_key_is_not_found() {
        let fx = Fixture::new();

        let lookup = fx.client.get_object_info("nope/missing.txt").await.unwrap();

        assert_eq!(lookup, ObjectLookup::NotFound);
    }

    #[tokio::test]
    async fn move_file_relocates_content() {
        let fx = Fixture::new();
        fx.put("a/x.txt", "payload").await;

        let status = fx.client.move_file("a/x.txt", "a/y.txt").await.unwrap();

        assert_eq!(status.to_string(), "Moved file from a/x.txt to a/y.txt.");
        assert!(!fx.exists("a/x.txt").await);
        let target = fx.workdir.path().join("y.txt");
        fx.client.download_blob("a/y.txt", &target).await.unwrap();
        assert_eq!(std::fs::read_to_string(target).unwrap(), "payload");
    }

    #[tokio::test]
    async fn move_of_missing_source_fails() {
        let fx = Fixture::new();

        let err = fx.client.move_file("a/none.txt", "a/y.txt").await.unwrap_err();

        assert!(err.is_not_found());
        assert!(!fx.exists("a/y.txt").await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn move_failing_after_copy_keeps_both_keys() {
        use std::os::unix::fs::PermissionsExt;

        let fx = Fixture::new();
        fx.put("locked/x.txt", "payload").await;

        let locked = fx.root.path().join("primary").join("locked");
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o555)).unwrap();
        // Privileged users bypass directory permissions.
        if std::fs::write(locked.join("writable"), "").is_ok() {
            std::fs::remove_file(locked.join("writable")).unwrap();
            std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = fx.client.move_file("locked/x.txt", "open/x.txt").await;
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

        let err = result.unwrap_err();
        assert!(matches!(err, StorageError::PermissionDenied(_)));
        assert!(fx.exists("locked/x.txt").await);
        assert!(fx.exists("open/x.txt").await);
    }

    #[tokio::test]
    async fn move_across_buckets_uses_shared_config() {
        let fx = Fixture::new();
        fx.put("in/x.txt", "cross").await;

        let status = BucketClient::move_file_across_buckets(
            &fx.config,
            "primary",
            "archive",
            "in/x.txt",
            "out/x.txt",
        )
        .await
        .unwrap();

        assert_eq!(
            status.to_string(),
            "Moved file from primary/in/x.txt to archive/out/x.txt."
        );
        assert!(!fx.exists("in/x.txt").await);

        let archive = BucketClient::new(fx.config.clone().with_bucket("archive")).unwrap();
        let record = archive
            .get_object_info("out/x.txt")
            .await
            .unwrap()
            .into_found()
            .unwrap();
        assert_eq!(record.size, 5);
    }
}
