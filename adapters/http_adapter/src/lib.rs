use log::{debug, warn};
use playlist_core::domain::DownloadConfig;
use playlist_core::error::PlaylistError;
use playlist_core::ports::{PlaylistFetcher, Result};
use ureq::Agent;

const PLAYLIST_TYPE: &str = "m3u_plus";
const STREAM_OUTPUT: &str = "ts";

/// HTTP implementation of the PlaylistFetcher trait
pub struct HttpPlaylistFetcher {
    config: DownloadConfig,
    agent: Agent,
}

impl HttpPlaylistFetcher {
    /// Creates a fetcher whose requests are bounded by `config.timeout`
    pub fn new(config: DownloadConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            // A redirect is a non-2xx answer like any other
            .max_redirects(0)
            .max_redirects_will_error(false)
            .build()
            .into();
        Self { config, agent }
    }

    /// Query parameters sent with the playlist request
    /// Credentials that are not configured are left out
    pub fn query_params(&self) -> Vec<(&str, &str)> {
        let mut params = Vec::with_capacity(4);
        if let Some(username) = self.config.username.as_deref() {
            params.push(("username", username));
        }
        if let Some(password) = self.config.password.as_deref() {
            params.push(("password", password));
        }
        params.push(("type", PLAYLIST_TYPE));
        params.push(("output", STREAM_OUTPUT));
        params
    }
}

impl PlaylistFetcher for HttpPlaylistFetcher {
    fn fetch(&self) -> Result<Vec<u8>> {
        debug!("Fetching playlist from {}", self.config.endpoint);

        let mut request = self.agent.get(self.config.endpoint.as_str());
        for (key, value) in self.query_params() {
            request = request.query(key, value);
        }

        let mut response = request
            .call()
            .map_err(|e| PlaylistError::DownloadFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.body_mut().read_to_string().unwrap_or_default();
            warn!("Playlist server answered {}", status);
            return Err(PlaylistError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        // Full m3u_plus playlists easily exceed ureq's default body limit
        let bytes = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| PlaylistError::DownloadFailed(e.to_string()))?;
        debug!("Received {} bytes", bytes.len());

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    /// Serves one canned HTTP response and reports the request line it received
    fn serve_once(
        status_line: &'static str,
        extra_headers: &'static str,
        body: &'static str,
    ) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = format!("http://{}/get.php", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut header = String::new();
                if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
                    break;
                }
            }
            tx.send(request_line.trim_end().to_string()).unwrap();

            let mut stream = stream;
            write!(
                stream,
                "{}\r\n{}Content-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                extra_headers,
                body.len(),
                body
            )
            .unwrap();
            stream.flush().unwrap();
        });

        (address, rx)
    }

    fn config(endpoint: String) -> DownloadConfig {
        DownloadConfig {
            endpoint,
            username: Some("alice".to_string()),
            password: Some("secret".to_string()),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_query_params_with_credentials() {
        let fetcher = HttpPlaylistFetcher::new(config("http://localhost/get.php".to_string()));
        assert_eq!(
            fetcher.query_params(),
            vec![
                ("username", "alice"),
                ("password", "secret"),
                ("type", "m3u_plus"),
                ("output", "ts"),
            ]
        );
    }

    #[test]
    fn test_query_params_without_credentials() {
        let fetcher = HttpPlaylistFetcher::new(DownloadConfig::default());
        assert_eq!(fetcher.query_params(), vec![("type", "m3u_plus"), ("output", "ts")]);
    }

    #[test]
    fn test_fetch_returns_body() {
        let body = "#EXTM3U\n#EXTINF:-1 tvg-name=\"BBC One\",BBC One\nhttp://x/1\n";
        let (endpoint, requests) = serve_once("HTTP/1.1 200 OK", "", body);

        let bytes = HttpPlaylistFetcher::new(config(endpoint)).fetch().unwrap();

        assert_eq!(bytes, body.as_bytes());
        let request_line = requests.recv().unwrap();
        assert!(request_line.starts_with("GET /get.php?"));
        assert!(request_line.contains("username=alice"));
        assert!(request_line.contains("password=secret"));
        assert!(request_line.contains("type=m3u_plus"));
        assert!(request_line.contains("output=ts"));
    }

    #[test]
    fn test_fetch_reports_http_status() {
        let (endpoint, _requests) = serve_once("HTTP/1.1 403 Forbidden", "", "account expired");

        let err = HttpPlaylistFetcher::new(config(endpoint)).fetch().unwrap_err();

        match err {
            PlaylistError::HttpStatus { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "account expired");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fetch_does_not_follow_redirects() {
        let (endpoint, requests) =
            serve_once("HTTP/1.1 302 Found", "Location: /other\r\n", "moved");

        let err = HttpPlaylistFetcher::new(config(endpoint)).fetch().unwrap_err();

        match err {
            PlaylistError::HttpStatus { status, body } => {
                assert_eq!(status, 302);
                assert_eq!(body, "moved");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(requests.recv().unwrap().starts_with("GET /get.php?"));
    }

    #[test]
    fn test_fetch_reports_connection_failure() {
        // Bind then drop to get a port nothing listens on
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let endpoint = format!("http://127.0.0.1:{}/get.php", port);

        let err = HttpPlaylistFetcher::new(config(endpoint)).fetch().unwrap_err();

        assert!(matches!(err, PlaylistError::DownloadFailed(_)));
    }
}
