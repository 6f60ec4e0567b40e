use std::fmt;
use std::fmt::{Display, Formatter};

/// Name of one cover variant as known to the cover provider, e.g. `"{book_id}-front"`.
pub(crate) type CoverName = String;

/// A successfully fetched cover blob.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Cover {
    pub name: CoverName,
    pub bytes: Vec<u8>,
}

impl Cover {
    pub fn new(name: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            bytes,
        }
    }
}

/// Why a single cover could not be fetched.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CoverFetchFailure {
    Cancelled,
    NotFound,
    ProviderError {
        message: String,
    },
}

impl CoverFetchFailure {
    pub fn provider(message: &str) -> Self {
        CoverFetchFailure::ProviderError { message: message.to_string() }
    }
}

impl From<reqwest::Error> for CoverFetchFailure {
    fn from(err: reqwest::Error) -> Self {
        CoverFetchFailure::provider(format!("cover request failed {}", err).as_str())
    }
}

impl Display for CoverFetchFailure {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            CoverFetchFailure::Cancelled => write!(f, "Cancelled"),
            CoverFetchFailure::NotFound => write!(f, "NotFound"),
            CoverFetchFailure::ProviderError { .. } => write!(f, "ProviderError"),
        }
    }
}

/// Settled result of fetching one requested cover. Every requested name ends
/// up with exactly one outcome.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CoverFetchOutcome {
    Success(Cover),
    Failure {
        name: CoverName,
        reason: CoverFetchFailure,
    },
}

impl CoverFetchOutcome {
    pub fn failure(name: &str, reason: CoverFetchFailure) -> Self {
        CoverFetchOutcome::Failure { name: name.to_string(), reason }
    }

    pub fn cancelled(name: &str) -> Self {
        Self::failure(name, CoverFetchFailure::Cancelled)
    }

    pub fn from_result(name: &str, res: Result<Cover, CoverFetchFailure>) -> Self {
        match res {
            Ok(cover) => CoverFetchOutcome::Success(cover),
            Err(reason) => Self::failure(name, reason),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CoverFetchOutcome::Success(cover) => cover.name.as_str(),
            CoverFetchOutcome::Failure { name, .. } => name.as_str(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CoverFetchOutcome::Success(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, CoverFetchOutcome::Failure { reason: CoverFetchFailure::Cancelled, .. })
    }

    pub fn reason(&self) -> Option<&CoverFetchFailure> {
        match self {
            CoverFetchOutcome::Success(_) => None,
            CoverFetchOutcome::Failure { reason, .. } => Some(reason),
        }
    }

    // "Success" or the failure kind, used to compare outcomes ignoring bytes
    pub fn kind(&self) -> String {
        match self {
            CoverFetchOutcome::Success(_) => "Success".to_string(),
            CoverFetchOutcome::Failure { reason, .. } => reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::covers::domain::model::{Cover, CoverFetchFailure, CoverFetchOutcome};

    #[tokio::test]
    async fn test_should_build_outcomes() {
        let ok = CoverFetchOutcome::from_result("front", Ok(Cover::new("front", vec![1, 2])));
        assert!(ok.is_success());
        assert_eq!("front", ok.name());
        assert_eq!(None, ok.reason());
        assert_eq!("Success", ok.kind());

        let failed = CoverFetchOutcome::from_result("back", Err(CoverFetchFailure::NotFound));
        assert!(!failed.is_success());
        assert_eq!("back", failed.name());
        assert_eq!(Some(&CoverFetchFailure::NotFound), failed.reason());
        assert_eq!("NotFound", failed.kind());

        assert!(CoverFetchOutcome::cancelled("spine").is_cancelled());
        assert_eq!("ProviderError", CoverFetchOutcome::failure("x", CoverFetchFailure::provider("down")).kind());
    }
}
