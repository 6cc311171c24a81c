//! Session context: HTTP client, backend address, and the in-flight
//! request bookkeeping that makes stale responses detectable.

use reqwest::Client;
use tokio_util::sync::CancellationToken;

use crate::core::config::{resolve_base_url, Config};
use crate::ui::theme::Theme;
use crate::utils::logging::TranscriptLog;
use crate::utils::url::normalize_base_url;

pub struct SessionContext {
    pub client: Client,
    pub base_url: String,
    pub logging: TranscriptLog,
    /// Id of the most recently issued request. Completions carrying any
    /// other id are stale and must be dropped.
    pub current_request_id: u64,
    pub cancel_token: Option<CancellationToken>,
    pub in_flight: bool,
}

impl SessionContext {
    pub fn new(base_url: String, log: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            client: Client::new(),
            base_url,
            logging: TranscriptLog::new(log)?,
            current_request_id: 0,
            cancel_token: None,
            in_flight: false,
        })
    }

    /// Supersede any in-flight request: cancel its token, bump the id, and
    /// hand back the id and token for the new one.
    pub fn begin_request(&mut self) -> (u64, CancellationToken) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        self.current_request_id += 1;
        let token = CancellationToken::new();
        self.cancel_token = Some(token.clone());
        self.in_flight = true;
        (self.current_request_id, token)
    }

    /// Cancel without issuing a replacement. The id is still bumped so a
    /// response already in the channel can never match again.
    pub fn cancel_in_flight(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        self.current_request_id += 1;
        self.in_flight = false;
    }

    pub fn finish_request(&mut self) {
        self.cancel_token = None;
        self.in_flight = false;
    }
}

pub struct SessionBootstrap {
    pub session: SessionContext,
    pub theme: Theme,
}

/// Build the session from CLI flags and the config file. The base URL
/// resolves flag > environment > config > default; an unknown theme name
/// falls back to the dark palette with a diagnostic.
pub fn bootstrap_session(
    base_url_flag: Option<&str>,
    theme_flag: Option<&str>,
    log: Option<String>,
) -> Result<SessionBootstrap, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let base_url = normalize_base_url(&resolve_base_url(base_url_flag, &config));

    let theme_name = theme_flag.or(config.theme.as_deref());
    let theme = match theme_name {
        Some(name) => Theme::find(name).unwrap_or_else(|| {
            tracing::warn!(theme = name, "unknown theme, falling back to dark");
            Theme::dark_default()
        }),
        None => Theme::dark_default(),
    };

    Ok(SessionBootstrap {
        session: SessionContext::new(base_url, log)?,
        theme,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_request_bumps_id_and_cancels_predecessor() {
        let mut session = SessionContext::new("http://test".to_string(), None).unwrap();
        let (first_id, first_token) = session.begin_request();
        let (second_id, _second_token) = session.begin_request();

        assert_eq!(first_id + 1, second_id);
        assert!(first_token.is_cancelled());
        assert!(session.in_flight);
        assert_eq!(session.current_request_id, second_id);
    }

    #[test]
    fn cancel_in_flight_bumps_id_without_replacement() {
        let mut session = SessionContext::new("http://test".to_string(), None).unwrap();
        let (id, token) = session.begin_request();
        session.cancel_in_flight();

        assert!(token.is_cancelled());
        assert!(!session.in_flight);
        assert!(session.cancel_token.is_none());
        assert_eq!(session.current_request_id, id + 1);
    }

    #[test]
    fn finish_request_clears_flight_state() {
        let mut session = SessionContext::new("http://test".to_string(), None).unwrap();
        let (id, _token) = session.begin_request();
        session.finish_request();

        assert!(!session.in_flight);
        assert!(session.cancel_token.is_none());
        assert_eq!(session.current_request_id, id);
    }
}
