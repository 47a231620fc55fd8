// UI layer: decides between the stats and the shorten branch and turns
// results and reportable errors into one localized line of output.

use crate::api::VkClient;
use crate::error::{ApiError, ApiResult};
use std::io::Write;
use tracing::debug;

/// What a single invocation found out about the link.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The link was already shortened; all-time views.
    Clicks(u64),
    /// A new short link for the original URL.
    Shortened(String),
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Clicks(n) => write!(f, "Количество кликов: {}", n),
            Outcome::Shortened(url) => write!(f, "Сокращенная ссылка: {}", url),
        }
    }
}

/// Classify `url`, then either count its clicks or shorten it.
pub fn resolve(api: &VkClient, url: Option<&str>) -> ApiResult<Outcome> {
    let url = match url {
        Some(u) if !u.trim().is_empty() => u,
        _ => return Err(ApiError::Value("no URL given".into())),
    };

    if api.is_shorten_link(url)? {
        debug!(url, "link is already shortened");
        Ok(Outcome::Clicks(api.count_clicks(url)?))
    } else {
        Ok(Outcome::Shortened(api.shorten_url(url)?))
    }
}

/// One-line diagnostic for errors the user is shown instead of a crash.
/// Returns `None` for errors that must stay fatal.
pub fn diagnostic(err: &ApiError) -> Option<String> {
    match err {
        ApiError::Status { .. } => Some(format!("Ошибка при работе с API: {}", err)),
        ApiError::MissingKey(_) => Some(format!("Ключ сопоставления не найден: {}", err)),
        ApiError::Value(_) => Some(format!("Ошибка значения: {}", err)),
        ApiError::Index(_) | ApiError::Transport(_) => None,
    }
}

/// Run one invocation and write its single line to `out`. Reportable
/// errors end up as a diagnostic line and `Ok(())`; index and transport
/// failures are returned to the caller.
pub fn run<W: Write>(api: &VkClient, url: Option<&str>, out: &mut W) -> anyhow::Result<()> {
    match resolve(api, url) {
        Ok(outcome) => writeln!(out, "{}", outcome)?,
        Err(err) => match diagnostic(&err) {
            Some(line) => writeln!(out, "{}", line)?,
            None => return Err(err.into()),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::net::TcpListener;

    fn closed_port_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    #[test]
    fn outcome_lines() {
        assert_eq!(Outcome::Clicks(42).to_string(), "Количество кликов: 42");
        assert_eq!(
            Outcome::Shortened("https://vk.cc/xyz".into()).to_string(),
            "Сокращенная ссылка: https://vk.cc/xyz"
        );
    }

    #[test]
    fn diagnostics_per_category() {
        let http = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            method: "utils.getShortLink",
        };
        assert!(diagnostic(&http).unwrap().starts_with("Ошибка при работе с API: "));

        let key = ApiError::MissingKey("short_url".into());
        assert_eq!(
            diagnostic(&key).unwrap(),
            "Ключ сопоставления не найден: 'short_url'"
        );

        let value = ApiError::Value("no URL given".into());
        assert_eq!(diagnostic(&value).unwrap(), "Ошибка значения: no URL given");
    }

    #[test]
    fn index_error_has_no_diagnostic() {
        assert!(diagnostic(&ApiError::Index("stats[0]".into())).is_none());
    }

    #[test]
    fn blank_url_never_reaches_the_network() {
        // A request would fail with a transport error here.
        let api = VkClient::new(closed_port_url(), "tok").unwrap();
        for url in [None, Some(""), Some("   ")] {
            let err = resolve(&api, url).unwrap_err();
            assert!(matches!(err, ApiError::Value(_)));
        }
    }
}
