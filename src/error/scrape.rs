use std::error::Error as StdError;
use std::fmt;

/// Error raised by the I/O side of the scraper: fetching pages, writing output, loading config.
#[derive(Debug)]
pub struct ScrapeError {
    pub message: String,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl ScrapeError {
    pub fn new(message: &str) -> Self {
        ScrapeError {
            message: message.to_string(),
            source: None,
        }
    }

    pub fn with_context(context: &str, err: impl Into<ScrapeError>) -> Self {
        let err = err.into();
        ScrapeError {
            message: format!("{}: {}", context, err.message),
            source: err.source,
        }
    }

    /// The wrapped error, if this one was converted from another.
    pub fn source_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScrapeError: {}", self.message)
    }
}

// Not an `Error` itself, so every `Error` type can convert with `?`.
impl<E: StdError + Send + Sync + 'static> From<E> for ScrapeError {
    fn from(err: E) -> Self {
        ScrapeError {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_source_of_converted_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: ScrapeError = io.into();
        assert_eq!(err.message, "no such file");
        assert!(err.source_error().is_some());
    }

    #[test]
    fn context_prefixes_message() {
        let err = ScrapeError::with_context("loading config", ScrapeError::new("bad json"));
        assert_eq!(err.to_string(), "ScrapeError: loading config: bad json");
        assert!(err.source_error().is_none());
    }
}
