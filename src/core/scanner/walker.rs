//! Directory listing implementation using walkdir.

use super::{FileEntry, FileLister, Listing};
use crate::error::ScanError;
use crate::events::{Event, EventSender, ScanEvent};
use std::path::Path;
use walkdir::WalkDir;

/// Configuration for the directory lister
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to include files whose name starts with `.`
    pub include_hidden: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            include_hidden: true,
        }
    }
}

/// Lister that reads exactly one directory level, sorted by file name
pub struct DirectoryLister {
    config: ScanConfig,
}

impl DirectoryLister {
    /// Create a new lister with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    fn is_hidden(path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.starts_with('.'))
    }
}

impl FileLister for DirectoryLister {
    fn list(&self, dir: &Path) -> Result<Listing, ScanError> {
        self.list_with_events(dir, &crate::events::null_sender())
    }

    fn list_with_events(&self, dir: &Path, events: &EventSender) -> Result<Listing, ScanError> {
        if !dir.exists() {
            return Err(ScanError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }
        if !dir.is_dir() {
            return Err(ScanError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }

        events.send(Event::Scan(ScanEvent::Started {
            path: dir.to_path_buf(),
        }));

        let mut listing = Listing::default();

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        for entry_result in walker {
            match entry_result {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }

                    let path = entry.path();
                    if !self.config.include_hidden && Self::is_hidden(path) {
                        continue;
                    }

                    match entry.metadata() {
                        Ok(metadata) => {
                            events.send(Event::Scan(ScanEvent::FileFound {
                                path: path.to_path_buf(),
                            }));
                            listing.files.push(FileEntry::new(path, metadata.len()));
                        }
                        Err(e) => {
                            let error = ScanError::ReadDirectory {
                                path: path.to_path_buf(),
                                source: e.into(),
                            };
                            events.send(Event::Scan(ScanEvent::Error {
                                path: path.to_path_buf(),
                                message: error.to_string(),
                            }));
                            listing.errors.push(error);
                        }
                    }
                }
                Err(e) => {
                    let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();

                    let error = if e.io_error().map(|e| e.kind())
                        == Some(std::io::ErrorKind::PermissionDenied)
                    {
                        ScanError::PermissionDenied { path: path.clone() }
                    } else {
                        ScanError::ReadDirectory {
                            path: path.clone(),
                            source: std::io::Error::other(e.to_string()),
                        }
                    };

                    events.send(Event::Scan(ScanEvent::Error {
                        path,
                        message: error.to_string(),
                    }));

                    listing.errors.push(error);
                }
            }
        }

        events.send(Event::Scan(ScanEvent::Completed {
            total_files: listing.files.len(),
        }));

        Ok(listing)
    }
}
