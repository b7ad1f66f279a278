use axum::http::StatusCode;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<RitualError> for AppError {
    fn from(err: RitualError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Input that the page itself can never produce but a raw API caller can.
#[derive(Debug, thiserror::Error)]
pub enum RitualError {
    #[error("unknown category `{0}`")]
    UnknownCategory(String),
    #[error("category `{category_id}` has no orbital `{orbital}`")]
    UnknownOrbital { category_id: String, orbital: String },
    #[error("category `{category_id}` has no orbital slot {index}")]
    OrbitalIndexOutOfRange { category_id: String, index: usize },
    #[error("orbital names must not be empty")]
    EmptyOrbitalName,
    #[error("category `{category_id}` must keep {expected} orbitals")]
    OrbitalCountChanged { category_id: String, expected: usize },
    #[error("no view at index {0}")]
    UnknownView(usize),
    #[error("no slice at index {0}")]
    UnknownSlice(usize),
    #[error("settings are not open")]
    SettingsClosed,
    #[error("clearing data was not requested")]
    ClearNotRequested,
}
