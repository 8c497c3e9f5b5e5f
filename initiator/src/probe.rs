use errors::InitiatorError;
use std::time::{Duration, Instant};

const DEFAULT_INTERVAL: Duration = Duration::from_millis(200);

/// Polls an HTTP endpoint until it answers.
///
/// Any response that is not a 5xx counts as ready: the emulator answers
/// `GET /` with a plain "Ok" once it accepts requests, while connection
/// errors and server errors mean it is still starting.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    path: String,
    interval: Duration,
    client: reqwest::Client
}

impl Default for HttpProbe {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            interval: DEFAULT_INTERVAL,
            client: reqwest::Client::new()
        }
    }
}

impl HttpProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.path = if path.starts_with('/') {
            path
        } else {
            format!("/{}", path)
        };
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Polls `http://{address}{path}` until it answers or `timeout` elapses.
    pub async fn probe(&self, address: &str, timeout: Duration) -> Result<(), InitiatorError> {
        let url = format!("http://{}{}", address, self.path);
        let started = Instant::now();
        let mut last_failure = "no attempt completed".to_string();
        let mut attempt: u32 = 0;

        loop {
            let remaining = timeout.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                return Err(InitiatorError::ProbeTimeout {
                    address: address.to_string(),
                    timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                    last_failure
                });
            }

            attempt += 1;
            match tokio::time::timeout(remaining, self.client.get(&url).send()).await {
                Ok(Ok(response)) if !response.status().is_server_error() => {
                    tracing::debug!(
                        "Probe of {} succeeded after {} attempt(s) with status {}",
                        url,
                        attempt,
                        response.status()
                    );
                    return Ok(());
                }
                Ok(Ok(response)) => {
                    last_failure = format!("status {}", response.status());
                }
                Ok(Err(e)) => {
                    last_failure = e.to_string();
                }
                Err(_) => {
                    last_failure = "request did not complete".to_string();
                }
            }

            tracing::debug!("Probe attempt {} on {} failed: {}", attempt, url, last_failure);

            let remaining = timeout.saturating_sub(started.elapsed());
            tokio::time::sleep(self.interval.min(remaining)).await;
        }
    }
}
