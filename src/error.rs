use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("API key not set. Export YOUTUBE_API_KEY or add it to .env.")]
    ApiKeyMissing,

    #[error("YouTube API request failed ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Invalid view count {value:?} for video {video_id}")]
    InvalidViewCount { video_id: String, value: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
