use std::fmt;
use std::time::Duration;

/// Default location of the downloaded playlist, also the default filter input
pub const DEFAULT_PLAYLIST_FILE: &str = "playlist.m3u";

pub const DEFAULT_ENDPOINT: &str = "http://ultra-vip.net/get.php";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// One playlist entry: the `#EXTINF` metadata plus the stream URL that follows it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelRecord {
    pub name: String,
    pub logo_url: String,
    pub group: String,
    pub stream_url: String,
}

/// Outcome of a filter run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterReport {
    /// Number of records read from the source playlist
    pub total: usize,
    /// Number of records that matched every token
    pub hits: usize,
}

/// Settings for fetching the playlist from the IPTV server
#[derive(Clone)]
pub struct DownloadConfig {
    pub endpoint: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Duration,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            username: None,
            password: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for DownloadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadConfig")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}
