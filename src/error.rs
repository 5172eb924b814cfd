use thiserror::Error;

/// Errors raised by the climate pipeline
#[derive(Error, Debug)]
pub enum ClimateError {
    /// Backend unreachable, non-success status or unparseable body
    #[error("Source unavailable: {message}")]
    SourceUnavailable { message: String },

    /// Region or locality not chosen before starting the pipeline
    #[error("Missing selection: {field}")]
    MissingSelection { field: &'static str },

    /// A chart container the render cycle needs does not exist
    #[error("Render target missing: {container}")]
    RenderTargetMissing { container: String },

    /// A chart sink failed while drawing
    #[error("Render error: {message}")]
    Render { message: String },

    /// A series needed by a derivation is absent from the dataset
    #[error("Missing series: {series}")]
    MissingSeries { series: &'static str },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl ClimateError {
    pub fn source_unavailable<S: Into<String>>(message: S) -> Self {
        Self::SourceUnavailable {
            message: message.into(),
        }
    }

    pub fn render<S: Into<String>>(message: S) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-facing message for the error
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ClimateError::SourceUnavailable { .. } => {
                "Climate data service is unavailable.".to_string()
            }
            ClimateError::MissingSelection { field } => format!("Please select a {field}."),
            ClimateError::RenderTargetMissing { .. } => {
                "Could not find the chart area. Please refresh and try again.".to_string()
            }
            ClimateError::Render { .. } => {
                "An error occurred while rendering the charts.".to_string()
            }
            ClimateError::MissingSeries { series } => {
                format!("The dataset has no {series} temperatures.")
            }
            ClimateError::InvalidInput { message } => format!("Invalid input: {message}"),
            ClimateError::Config { message } => format!("Configuration error: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_selection_prompts_for_field() {
        let err = ClimateError::MissingSelection { field: "state" };
        assert_eq!(err.user_message(), "Please select a state.");
        assert_eq!(err.to_string(), "Missing selection: state");
    }

    #[test]
    fn test_source_unavailable_hides_details() {
        let err = ClimateError::source_unavailable("connection refused (os error 111)");
        assert!(!err.user_message().contains("os error"));
        assert!(err.to_string().contains("connection refused"));
    }
}
