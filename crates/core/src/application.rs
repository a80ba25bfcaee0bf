use log::info;

use crate::domain::FilterReport;
use crate::filter::filter_records;
use crate::ports::{PlaylistFetcher, PlaylistRepository, PlaylistWriter, RawPlaylistStore, Result};

/// Application service for filtering a playlist by channel name keywords
pub struct FilterServiceImpl {
    repository: Box<dyn PlaylistRepository>,
    writer: Box<dyn PlaylistWriter>,
}

impl FilterServiceImpl {
    /// Creates a new FilterServiceImpl with the given dependencies
    pub fn new(repository: Box<dyn PlaylistRepository>, writer: Box<dyn PlaylistWriter>) -> Self {
        Self { repository, writer }
    }

    /// Reads the playlist, keeps the records matching every token and writes them.
    /// Nothing is written when no record matches.
    pub fn execute_filter<S: AsRef<str>>(&self, tokens: &[S]) -> Result<FilterReport> {
        let records = self.repository.fetch_all_records()?;
        let filtered = filter_records(&records, tokens);

        let report = FilterReport {
            total: records.len(),
            hits: filtered.len(),
        };
        info!("{} of {} channels matched", report.hits, report.total);

        if report.hits > 0 {
            self.writer.write(&filtered)?;
        }
        Ok(report)
    }
}

/// Application service for downloading the playlist and storing it as-is
pub struct DownloadServiceImpl {
    fetcher: Box<dyn PlaylistFetcher>,
    store: Box<dyn RawPlaylistStore>,
}

impl DownloadServiceImpl {
    pub fn new(fetcher: Box<dyn PlaylistFetcher>, store: Box<dyn RawPlaylistStore>) -> Self {
        Self { fetcher, store }
    }

    /// Returns the number of bytes stored
    pub fn execute_download(&self) -> Result<usize> {
        let bytes = self.fetcher.fetch()?;
        self.store.save(&bytes)?;
        info!("Stored {} bytes of playlist data", bytes.len());
        Ok(bytes.len())
    }
}
