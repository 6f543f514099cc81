//! Reading an export directory and building the report.
//!
//! [`ExportArchive`] owns the read-only inputs (user directory, channel list,
//! root path). [`Exporter`] walks the channels in `channels.json` order and
//! turns each one into a [`Sheet`]. Nothing is written here: the complete
//! [`Report`] is handed to a sink only after every channel succeeded.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ExportConfig;
use crate::core::row::{OutputRow, RowBuilder};
use crate::error::{ExportError, Result};
use crate::identity::{Identity, UserDirectory};
use crate::message::{Channel, Message};
use crate::timestamp::SortKey;

/// Name of the user directory file at the export root.
pub const USERS_FILE: &str = "users.json";

/// Name of the channel list file at the export root.
pub const CHANNELS_FILE: &str = "channels.json";

/// The read-only inputs of an export run.
#[derive(Debug, Clone)]
pub struct ExportArchive {
    root: PathBuf,
    directory: UserDirectory,
    channels: Vec<Channel>,
}

impl ExportArchive {
    /// Opens an export directory, loading `users.json` and `channels.json`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        let users: Vec<Identity> = read_json(&root.join(USERS_FILE), USERS_FILE)?;
        let channels: Vec<Channel> = read_json(&root.join(CHANNELS_FILE), CHANNELS_FILE)?;
        debug!(
            root = %root.display(),
            users = users.len(),
            channels = channels.len(),
            "opened export archive"
        );

        Ok(Self::from_parts(root, UserDirectory::new(users), channels))
    }

    /// Builds an archive from already loaded parts.
    pub fn from_parts(
        root: impl Into<PathBuf>,
        directory: UserDirectory,
        channels: Vec<Channel>,
    ) -> Self {
        Self {
            root: root.into(),
            directory,
            channels,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Lists `<root>/<channel>/*.json`, sorted by file name.
    ///
    /// Batch files are named by date, so name order is chronological. A
    /// channel without a directory has no messages.
    pub fn batch_files(&self, channel: &Channel) -> Result<Vec<PathBuf>> {
        let dir = self.root.join(&channel.name);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(channel = %channel.name, "no message directory for channel");
                return Ok(Vec::new());
            }
            Err(e) => return Err(ExportError::io(dir, e)),
        };

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| ExportError::io(&dir, e))?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Reads every message of a channel, in file-name then array order.
    pub fn channel_messages(&self, channel: &Channel) -> Result<Vec<Message>> {
        let mut messages = Vec::new();
        for path in self.batch_files(channel)? {
            let batch: Vec<Message> = read_json(&path, "message batch")?;
            debug!(file = %path.display(), messages = batch.len(), "read message batch");
            messages.extend(batch);
        }
        Ok(messages)
    }
}

/// Reads and deserializes a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path, format: &'static str) -> Result<T> {
    let raw = fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|e| ExportError::json(format, e, Some(path.to_path_buf())))
}

/// One channel's worth of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    /// The channel name, verbatim.
    pub name: String,
    pub rows: Vec<OutputRow>,
}

/// Counters collected while exporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    pub channels: usize,
    pub messages: usize,
    pub rows: usize,
    /// Replies announced by a thread root that never appeared as messages.
    pub unmatched_replies: usize,
}

/// A fully built report, ready for a sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub sheets: Vec<Sheet>,
    pub stats: ExportStats,
}

impl Report {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

/// Turns an [`ExportArchive`] into a [`Report`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Exports every channel, in channel list order.
    ///
    /// Any error aborts the whole export.
    pub fn export(&self, archive: &ExportArchive) -> Result<Report> {
        let mut report = Report::default();

        for channel in archive.channels() {
            let messages = archive.channel_messages(channel)?;
            report.stats.messages += messages.len();

            let (sheet, unmatched) =
                self.export_messages(archive.directory(), &channel.name, messages)?;
            report.stats.rows += sheet.rows.len();
            report.stats.unmatched_replies += unmatched;
            report.stats.channels += 1;
            report.sheets.push(sheet);
        }

        Ok(report)
    }

    /// Builds one sheet from a channel's messages.
    ///
    /// Returns the sheet and the number of announced replies that never
    /// appeared.
    pub fn export_messages(
        &self,
        directory: &UserDirectory,
        channel_name: &str,
        messages: Vec<Message>,
    ) -> Result<(Sheet, usize)> {
        let messages = if self.config.sort_by_timestamp {
            sort_chronologically(channel_name, messages)?
        } else {
            messages
        };

        let mut builder = RowBuilder::new(directory, self.config);
        let mut rows = Vec::with_capacity(messages.len());
        for msg in &messages {
            rows.extend(builder.push(msg)?);
        }

        let unmatched = builder.finish();
        for pending in &unmatched {
            warn!(
                channel = channel_name,
                reply_ts = %pending.reply_timestamp,
                parent_row = pending.parent_row_index,
                reply_user = %pending.reply_user.id,
                "thread reply announced but never found in export"
            );
        }
        debug!(channel = channel_name, rows = rows.len(), "built sheet");

        Ok((
            Sheet {
                name: channel_name.to_string(),
                rows,
            },
            unmatched.len(),
        ))
    }
}

/// Stable-sorts messages by `ts`, keeping file order for equal timestamps.
fn sort_chronologically(channel_name: &str, messages: Vec<Message>) -> Result<Vec<Message>> {
    let mut keyed = Vec::with_capacity(messages.len());
    for msg in messages {
        keyed.push((SortKey::parse(&msg.timestamp)?, msg));
    }

    if !keyed.is_sorted_by_key(|(key, _)| *key) {
        debug!(
            channel = channel_name,
            "messages were out of order across batch files, sorting by ts"
        );
        keyed.sort_by_key(|(key, _)| *key);
    }

    Ok(keyed.into_iter().map(|(_, m)| m).collect())
}
