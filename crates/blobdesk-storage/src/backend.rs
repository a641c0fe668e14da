//! Storage backend implementation.

use std::path::Path;
use std::pin::pin;
use std::time::Duration;

use futures::TryStreamExt;
use opendal::{Capability, Lister, Metadata, Operator, services};
use tokio::io::AsyncWriteExt;

use crate::TRACING_TARGET_OBJECTS;
use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};

/// Client handle for one bucket, wrapping an OpenDAL operator.
///
/// Cloning is cheap and shares the underlying HTTP client.
#[derive(Clone)]
pub struct StorageBackend {
    operator: Operator,
    config: StorageConfig,
}

impl StorageBackend {
    /// Creates a new storage backend from configuration.
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        let operator = Self::create_operator(&config)?;
        Ok(Self { operator, config })
    }

    /// Returns the configuration for this backend.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Returns the bucket this backend is bound to.
    pub fn bucket(&self) -> &str {
        self.config.bucket()
    }

    fn capability(&self) -> Capability {
        self.operator.info().full_capability()
    }

    /// Returns whether the service can issue signed read URLs.
    pub fn supports_presign(&self) -> bool {
        self.capability().presign_read
    }

    /// Returns whether the service copies objects server side.
    pub fn supports_copy(&self) -> bool {
        self.capability().copy
    }

    /// Gets metadata for an object.
    pub async fn stat(&self, path: &str) -> StorageResult<Metadata> {
        Ok(self.operator.stat(path).await?)
    }

    /// Checks if an object exists.
    pub async fn exists(&self, path: &str) -> StorageResult<bool> {
        Ok(self.operator.exists(path).await?)
    }

    /// Writes the content of a local file to an object, overwriting it.
    pub async fn write_from_file(&self, path: &str, local_path: &Path) -> StorageResult<u64> {
        let data = tokio::fs::read(local_path)
            .await
            .map_err(|e| StorageError::local_io(local_path, e))?;
        let size = data.len() as u64;

        tracing::debug!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %self.bucket(),
            path = %path,
            size,
            "Writing object"
        );

        self.operator.write(path, data).await?;
        Ok(size)
    }

    /// Streams an object into a local file, overwriting it.
    ///
    /// The object is checked first so a missing key never creates the file.
    pub async fn download_to_file(&self, path: &str, local_path: &Path) -> StorageResult<u64> {
        let metadata = self.operator.stat(path).await?;

        tracing::debug!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %self.bucket(),
            path = %path,
            size = metadata.content_length(),
            local_path = %local_path.display(),
            "Downloading object"
        );

        let reader = self.operator.reader(path).await?;
        let mut stream = pin!(reader.into_bytes_stream(..).await?);

        let mut file = tokio::fs::File::create(local_path)
            .await
            .map_err(|e| StorageError::local_io(local_path, e))?;

        let mut written = 0u64;
        while let Some(chunk) = stream
            .try_next()
            .await
            .map_err(|e| stream_error(local_path, e))?
        {
            file.write_all(&chunk)
                .await
                .map_err(|e| StorageError::local_io(local_path, e))?;
            written += chunk.len() as u64;
        }

        file.flush()
            .await
            .map_err(|e| StorageError::local_io(local_path, e))?;

        Ok(written)
    }

    /// Deletes an object.
    pub async fn delete(&self, path: &str) -> StorageResult<()> {
        tracing::debug!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %self.bucket(),
            path = %path,
            "Deleting object"
        );

        self.operator.delete(path).await?;
        Ok(())
    }

    /// Deletes many objects, batched where the service allows it.
    ///
    /// Keys are deleted in the given order.
    pub async fn delete_many(&self, paths: Vec<String>) -> StorageResult<()> {
        tracing::debug!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %self.bucket(),
            count = paths.len(),
            "Deleting objects"
        );

        self.operator.delete_iter(paths).await?;
        Ok(())
    }

    /// Copies an object within the bucket.
    ///
    /// Falls back to read-then-write on services without native copy.
    pub async fn copy(&self, from: &str, to: &str) -> StorageResult<()> {
        tracing::debug!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %self.bucket(),
            from = %from,
            to = %to,
            native = self.supports_copy(),
            "Copying object"
        );

        if self.supports_copy() {
            self.operator.copy(from, to).await?;
        } else {
            let data = self.operator.read(from).await?;
            self.operator.write(to, data).await?;
        }

        Ok(())
    }

    /// Copies an object into another backend.
    pub async fn copy_to(&self, from: &str, target: &StorageBackend, to: &str) -> StorageResult<()> {
        tracing::debug!(
            target: TRACING_TARGET_OBJECTS,
            from_bucket = %self.bucket(),
            from = %from,
            to_bucket = %target.bucket(),
            to = %to,
            "Copying object across buckets"
        );

        let data = self.operator.read(from).await?;
        target.operator.write(to, data).await?;
        Ok(())
    }

    /// Opens a lister over a directory path.
    pub async fn lister(&self, path: &str, recursive: bool) -> StorageResult<Lister> {
        Ok(self
            .operator
            .lister_with(path)
            .recursive(recursive)
            .await?)
    }

    /// Issues a pre-authenticated read URL.
    pub async fn presign_read(&self, path: &str, expiration: Duration) -> StorageResult<String> {
        let request = self.operator.presign_read(path, expiration).await?;
        Ok(request.uri().to_string())
    }

    /// Creates an OpenDAL operator based on configuration.
    #[allow(unreachable_patterns)]
    fn create_operator(config: &StorageConfig) -> StorageResult<Operator> {
        match config {
            #[cfg(feature = "gcs")]
            StorageConfig::Gcs(gcs) => {
                let mut builder = services::Gcs::default().bucket(&gcs.bucket);

                if let Some(ref credential_path) = gcs.credential_path {
                    builder = builder.credential_path(credential_path);
                }

                if let Some(ref credential) = gcs.credential {
                    builder = builder.credential(credential);
                }

                if let Some(ref endpoint) = gcs.endpoint {
                    builder = builder.endpoint(endpoint);
                }

                if let Some(ref prefix) = gcs.prefix {
                    builder = builder.root(prefix);
                }

                Operator::new(builder)
                    .map(|op| op.finish())
                    .map_err(|e| StorageError::init(e.to_string()))
            }

            #[cfg(feature = "s3")]
            StorageConfig::S3(s3) => {
                let mut builder = services::S3::default()
                    .bucket(&s3.bucket)
                    .region(&s3.region);

                if let Some(ref endpoint) = s3.endpoint {
                    builder = builder.endpoint(endpoint);
                }

                if let Some(ref credentials) = s3.credentials {
                    builder = builder
                        .access_key_id(&credentials.access_key_id)
                        .secret_access_key(&credentials.secret_access_key);
                }

                if s3.virtual_host_style {
                    builder = builder.enable_virtual_host_style();
                }

                if let Some(ref prefix) = s3.prefix {
                    builder = builder.root(prefix);
                }

                Operator::new(builder)
                    .map(|op| op.finish())
                    .map_err(|e| StorageError::init(e.to_string()))
            }

            #[cfg(feature = "azblob")]
            StorageConfig::AzureBlob(azblob) => {
                let mut builder = services::Azblob::default()
                    .container(&azblob.container)
                    .account_name(&azblob.account_name)
                    .endpoint(&azblob.endpoint_url());

                if let Some(ref account_key) = azblob.account_key {
                    builder = builder.account_key(account_key);
                } else if let Some(ref sas_token) = azblob.sas_token {
                    builder = builder.sas_token(sas_token);
                }

                if let Some(ref prefix) = azblob.prefix {
                    builder = builder.root(prefix);
                }

                Operator::new(builder)
                    .map(|op| op.finish())
                    .map_err(|e| StorageError::init(e.to_string()))
            }

            #[cfg(feature = "fs")]
            StorageConfig::Fs(fs) => {
                let root = fs.bucket_dir();
                let builder = services::Fs::default().root(&root.to_string_lossy());

                Operator::new(builder)
                    .map(|op| op.finish())
                    .map_err(|e| StorageError::init(e.to_string()))
            }

            // This should never be reached if the config was properly created
            // with the same features enabled
            #[allow(unreachable_patterns)]
            _ => Err(StorageError::init(format!(
                "Backend '{}' is not supported with current features",
                config.backend_name()
            ))),
        }
    }
}

/// Recovers the storage error carried inside a read stream failure.
fn stream_error(local_path: &Path, err: std::io::Error) -> StorageError {
    if !err.get_ref().is_some_and(|inner| inner.is::<opendal::Error>()) {
        return StorageError::local_io(local_path, err);
    }

    match err.into_inner().map(|inner| inner.downcast::<opendal::Error>()) {
        Some(Ok(inner)) => StorageError::from(*inner),
        _ => StorageError::local_io(
            local_path,
            std::io::Error::other("read stream failed"),
        ),
    }
}

impl std::fmt::Debug for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageBackend")
            .field("backend", &self.config.backend_name())
            .field("bucket", &self.config.bucket())
            .finish()
    }
}
