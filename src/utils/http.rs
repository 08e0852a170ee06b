use crate::config::FetchConfig;
use reqwest::Client;

/// Get standard user agent string
pub fn get_user_agent() -> &'static str {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) tarot-app-rws-downloader"
}

/// Build the shared HTTP client with the configured timeout and identifier
pub fn build_client(config: &FetchConfig) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.clone())
        .build()
}

/// URL of a hosted file, with the file name percent-encoded into the path
pub fn file_url(base_url: &str, file_name: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(file_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_url_encodes_spaces() {
        assert_eq!(
            file_url(
                "https://commons.wikimedia.org/wiki/Special:FilePath/",
                "RWS Tarot 00 Fool.jpg"
            ),
            "https://commons.wikimedia.org/wiki/Special:FilePath/RWS%20Tarot%2000%20Fool.jpg"
        );
    }

    #[test]
    fn file_url_adds_missing_slash() {
        assert_eq!(
            file_url("http://127.0.0.1:8080", "Cups01.jpg"),
            "http://127.0.0.1:8080/Cups01.jpg"
        );
    }
}
