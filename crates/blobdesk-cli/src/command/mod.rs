//! Bucket operations exposed as subcommands.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use blobdesk_storage::{BucketClient, ListRequest, OperationStatus, StorageConfig, UploadItem};
use clap::Subcommand;
use serde_json::Value;

/// Operation to run against the configured bucket.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print every object key in the bucket.
    List,

    /// Upload local files, overwriting existing objects.
    Upload {
        /// Files to upload as SOURCE=DESTINATION pairs.
        #[arg(required = true)]
        items: Vec<UploadItem>,
    },

    /// Delete objects.
    Delete {
        /// Keys to delete.
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Delete folders and everything below them.
    DeleteFolder {
        /// Folder prefixes to delete.
        #[arg(required = true)]
        folders: Vec<String>,
    },

    /// Find objects whose name contains a literal pattern.
    Search {
        /// Text to look for in object names.
        pattern: String,

        /// Folder to search below, the whole bucket by default.
        #[arg(long, default_value = "")]
        folder: String,
    },

    /// Show metadata and a signed download URL for one object.
    Info {
        /// Object key.
        key: String,
    },

    /// List one page of a folder with metadata.
    Ls {
        /// Folder to list, the bucket root by default.
        #[arg(long, default_value = "")]
        folder: String,

        /// Maximum number of entries per page.
        #[arg(long)]
        page_size: Option<usize>,

        /// Token of the page to fetch.
        #[arg(long)]
        page_token: Option<String>,

        /// List every key below the folder.
        #[arg(short, long)]
        recursive: bool,
    },

    /// Move an object within the bucket.
    Move {
        /// Current key.
        source: String,
        /// New key.
        destination: String,
    },

    /// Move an object between buckets of the configured backend.
    MoveAcross {
        /// Source bucket.
        source_bucket: String,
        /// Destination bucket.
        destination_bucket: String,
        /// Current key.
        source: String,
        /// New key.
        destination: String,
    },

    /// Download an object into a local file.
    Download {
        /// Object key.
        key: String,
        /// Local file to write.
        local_path: PathBuf,
    },
}

impl Command {
    /// Runs the command and prints its result to stdout.
    pub async fn execute(self, client: &BucketClient, config: &StorageConfig) -> anyhow::Result<()> {
        match self {
            Self::List => {
                let keys = client.list_objects().await.context("failed to list objects")?;
                print_lines(keys)
            }
            Self::Upload { items } => {
                let statuses = client
                    .upload_files(&items)
                    .await
                    .context("failed to upload files")?;
                print_statuses(&statuses)
            }
            Self::Delete { keys } => {
                let statuses = client
                    .delete_files(&keys)
                    .await
                    .context("failed to delete files")?;
                print_statuses(&statuses)
            }
            Self::DeleteFolder { folders } => {
                let statuses = client
                    .delete_folders(&folders)
                    .await
                    .context("failed to delete folders")?;
                print_statuses(&statuses)
            }
            Self::Search { pattern, folder } => {
                let objects = client
                    .search_objects(&pattern, &folder)
                    .await
                    .context("failed to search objects")?;
                print_json(&serde_json::to_value(objects)?)
            }
            Self::Info { key } => {
                let lookup = client
                    .get_object_info(&key)
                    .await
                    .with_context(|| format!("failed to look up '{key}'"))?;
                print_json(&serde_json::to_value(lookup)?)
            }
            Self::Ls {
                folder,
                page_size,
                page_token,
                recursive,
            } => {
                let mut request = ListRequest::new(folder)
                    .with_page_size(page_size.unwrap_or_default())
                    .with_recursive(recursive);
                if let Some(token) = page_token {
                    request = request.with_page_token(token);
                }

                let page = client
                    .list_objects_with_metadata(request)
                    .await
                    .context("failed to list folder")?;
                print_json(&serde_json::to_value(page)?)
            }
            Self::Move {
                source,
                destination,
            } => {
                let status = client
                    .move_file(&source, &destination)
                    .await
                    .context("failed to move file")?;
                print_statuses(&[status])
            }
            Self::MoveAcross {
                source_bucket,
                destination_bucket,
                source,
                destination,
            } => {
                let status = BucketClient::move_file_across_buckets(
                    config,
                    &source_bucket,
                    &destination_bucket,
                    &source,
                    &destination,
                )
                .await
                .context("failed to move file across buckets")?;
                print_statuses(&[status])
            }
            Self::Download { key, local_path } => {
                client
                    .download_blob(&key, &local_path)
                    .await
                    .with_context(|| format!("failed to download '{key}'"))?;
                print_lines([format!(
                    "Downloaded {key} to {}.",
                    local_path.display()
                )])
            }
        }
    }
}

fn print_statuses(statuses: &[OperationStatus]) -> anyhow::Result<()> {
    print_lines(statuses.iter().map(ToString::to_string))
}

fn print_lines<I, S>(lines: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut stdout = std::io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{}", line.as_ref())?;
    }
    Ok(())
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::config::Cli;

    fn command(args: &[&str]) -> Command {
        let mut argv = vec!["blobdesk", "--bucket", "test"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn upload_parses_pairs() {
        let Command::Upload { items } = command(&["upload", "a.txt=x/a.txt", "b.txt=x/b.txt"])
        else {
            panic!("expected upload");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].destination_path, "x/b.txt");
    }

    #[test]
    fn upload_rejects_malformed_pair() {
        let argv = ["blobdesk", "--bucket", "test", "upload", "a.txt"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn ls_defaults_to_root_first_page() {
        let Command::Ls {
            folder,
            page_size,
            page_token,
            recursive,
        } = command(&["ls"])
        else {
            panic!("expected ls");
        };
        assert_eq!(folder, "");
        assert!(page_size.is_none());
        assert!(page_token.is_none());
        assert!(!recursive);
    }

    #[test]
    fn move_across_takes_four_positionals() {
        let Command::MoveAcross {
            source_bucket,
            destination_bucket,
            ..
        } = command(&["move-across", "src", "dst", "a.txt", "b.txt"])
        else {
            panic!("expected move-across");
        };
        assert_eq!(source_bucket, "src");
        assert_eq!(destination_bucket, "dst");
    }
}
