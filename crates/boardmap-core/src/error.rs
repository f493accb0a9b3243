pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Work item #{id} has no area path")]
    MissingArea { id: String },

    #[error("Invalid date for iteration '{path}': {value}")]
    InvalidDate { path: String, value: String },
}
