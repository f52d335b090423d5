use thiserror::Error;

pub type Result<T> = std::result::Result<T, SurvivalError>;

#[derive(Error, Debug, Clone)]
pub enum SurvivalError {
    #[error("dimensions don't match: {message}")]
    InvalidDimensions { message: String },

    #[error("survival data is broken: {message}")]
    InvalidSurvivalData { message: String },

    #[error("result is undefined for this input: {message}")]
    DegenerateInput { message: String },
}

impl SurvivalError {
    pub fn invalid_dimensions(message: impl Into<String>) -> Self {
        Self::InvalidDimensions { message: message.into() }
    }

    pub fn invalid_survival_data(message: impl Into<String>) -> Self {
        Self::InvalidSurvivalData { message: message.into() }
    }

    pub fn degenerate_input(message: impl Into<String>) -> Self {
        Self::DegenerateInput { message: message.into() }
    }
}
