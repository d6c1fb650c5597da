use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("creating request object failed: {0}")]
    RequestConstruction(#[from] ConstructionError),
    #[error(
        "http request failed: status: {}: err: {}",
        display_status(.status),
        display_source(.source)
    )]
    RequestExecution {
        status: Option<Status>,
        source: Option<Box<ureq::Error>>,
    },
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid argument: {0}")]
    Argument(String),
}

#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("url parsing error: {0}")]
    Url(#[from] url::ParseError),
    #[error("control character in url: {0:?}")]
    ControlCharacter(String),
    #[error("invalid method: {0:?}")]
    Method(String),
    #[error("invalid header name: {0:?}")]
    HeaderName(String),
    #[error("invalid value for header {0:?}")]
    HeaderValue(String),
}

/// Status line of a response that was received but rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub code: u16,
    pub text: String,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.code, self.text)
    }
}

fn display_status(status: &Option<Status>) -> String {
    status
        .as_ref()
        .map_or_else(|| "none".to_owned(), Status::to_string)
}

fn display_source(source: &Option<Box<ureq::Error>>) -> String {
    source
        .as_ref()
        .map_or_else(|| "none".to_owned(), |e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_error_without_source() {
        let err = Error::RequestExecution {
            status: Some(Status {
                code: 404,
                text: "Not Found".to_owned(),
            }),
            source: None,
        };

        assert_eq!(
            err.to_string(),
            "http request failed: status: 404(Not Found): err: none"
        );
    }

    #[test]
    fn test_construction_error_message() {
        let err = Error::from(ConstructionError::Method("GE T".to_owned()));

        assert_eq!(
            err.to_string(),
            "creating request object failed: invalid method: \"GE T\""
        );
    }
}
