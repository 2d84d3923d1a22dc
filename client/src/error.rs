use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a usable response: connection failure,
    /// timeout or an error status.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The server answered with something that is not the expected JSON.
    #[error("unexpected response from /{endpoint}: {source}")]
    Protocol {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// The server refused a submitted action.
    #[error("action rejected: {0}")]
    ActionRejected(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}
