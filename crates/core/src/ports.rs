use crate::domain::ChannelRecord;
use crate::error::PlaylistError;

pub type Result<T> = std::result::Result<T, PlaylistError>;

pub trait PlaylistRepository {
    // Reads the source playlist and maps it to ChannelRecord
    fn fetch_all_records(&self) -> Result<Vec<ChannelRecord>>;
}

/// Trait for writing a filtered playlist
/// This is a port (interface) that defines how the core communicates with output adapters
pub trait PlaylistWriter {
    fn write(&self, records: &[ChannelRecord]) -> Result<()>;
}

/// Retrieves the raw playlist bytes from the IPTV server
pub trait PlaylistFetcher {
    fn fetch(&self) -> Result<Vec<u8>>;
}

/// Persists a downloaded playlist untouched
pub trait RawPlaylistStore {
    fn save(&self, bytes: &[u8]) -> Result<()>;
}
