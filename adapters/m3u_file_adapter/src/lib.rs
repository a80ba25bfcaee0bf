use log::debug;
use playlist_core::domain::ChannelRecord;
use playlist_core::error::PlaylistError;
use playlist_core::parser::parse_m3u_str;
use playlist_core::ports::{PlaylistRepository, PlaylistWriter, RawPlaylistStore, Result};
use std::fs;
use std::path::PathBuf;

/// Formats records as an M3U document
/// Attribute values are inserted verbatim, without any escaping
pub fn format_m3u(records: &[ChannelRecord]) -> String {
    let mut output = String::from("#EXTM3U\n");

    for record in records {
        output.push_str(&format!(
            "#EXTINF:-1 tvg-name=\"{}\" tvg-logo=\"{}\" group-title=\"{}\",{}\n",
            record.name, record.logo_url, record.group, record.name
        ));
        output.push_str(&record.stream_url);
        output.push('\n');
    }

    output
}

/// M3U file implementation of the PlaylistRepository trait
pub struct M3uFileRepository {
    file_path: PathBuf,
}

impl M3uFileRepository {
    /// Creates a new M3uFileRepository reading from the given path
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }
}

impl PlaylistRepository for M3uFileRepository {
    fn fetch_all_records(&self) -> Result<Vec<ChannelRecord>> {
        let content = fs::read_to_string(&self.file_path)
            .map_err(|e| PlaylistError::from_io(&self.file_path, e))?;
        debug!("Read {} bytes from {}", content.len(), self.file_path.display());

        Ok(parse_m3u_str(&content))
    }
}

/// M3U writer adapter implementation
pub struct M3uFileWriter {
    output_file: PathBuf,
}

impl M3uFileWriter {
    pub fn new(output_file: impl Into<PathBuf>) -> Self {
        Self {
            output_file: output_file.into(),
        }
    }
}

impl PlaylistWriter for M3uFileWriter {
    fn write(&self, records: &[ChannelRecord]) -> Result<()> {
        fs::write(&self.output_file, format_m3u(records))
            .map_err(|e| PlaylistError::from_io(&self.output_file, e))?;
        debug!("Wrote {} records to {}", records.len(), self.output_file.display());
        Ok(())
    }
}

/// Stores a downloaded playlist byte-for-byte
pub struct RawFileStore {
    output_file: PathBuf,
}

impl RawFileStore {
    pub fn new(output_file: impl Into<PathBuf>) -> Self {
        Self {
            output_file: output_file.into(),
        }
    }
}

impl RawPlaylistStore for RawFileStore {
    fn save(&self, bytes: &[u8]) -> Result<()> {
        fs::write(&self.output_file, bytes).map_err(|e| PlaylistError::from_io(&self.output_file, e))
    }
}
