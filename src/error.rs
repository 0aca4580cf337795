//! Error kinds surfaced by the loaders

#[derive(thiserror::Error, Debug)]
pub enum PokedexError {
    #[error("HTTP error! Status: {status} ({url})")]
    Http { status: u16, url: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("response parse error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid pokemon id: {0:?}")]
    InvalidIdentifier(String),
}
