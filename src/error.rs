use axum::{http::StatusCode, response::IntoResponse};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to make request: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("fetch task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Missing 'url' parameter")]
    MissingUrlParameter,

    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("environment variables could not be validated: {0:#?}")]
    Envy(#[from] envy::Error),

    #[error("cannot bind tcp port: {0}")]
    IO(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        match self {
            Error::MissingUrlParameter => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            _ => {
                tracing::error!("{self}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
