use serde::{Deserialize, Serialize};
use crate::covers::domain::model::{CoverFetchFailure, CoverFetchOutcome};

// CoverDto reports the outcome of one cover; the bytes themselves stay
// server side and only their size is returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CoverDto {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&CoverFetchOutcome> for CoverDto {
    fn from(other: &CoverFetchOutcome) -> Self {
        match other {
            CoverFetchOutcome::Success(cover) => Self {
                name: cover.name.to_string(),
                status: other.kind(),
                size: Some(cover.bytes.len()),
                message: None,
            },
            CoverFetchOutcome::Failure { name, reason } => Self {
                name: name.to_string(),
                status: other.kind(),
                size: None,
                message: match reason {
                    CoverFetchFailure::ProviderError { message } => Some(message.to_string()),
                    _ => None,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::covers::domain::model::{Cover, CoverFetchFailure, CoverFetchOutcome};
    use crate::covers::dto::CoverDto;

    #[tokio::test]
    async fn test_should_map_outcomes() {
        let dto = CoverDto::from(&CoverFetchOutcome::Success(Cover::new("front", vec![0u8; 42])));
        assert_eq!("Success", dto.status.as_str());
        assert_eq!(Some(42), dto.size);

        let dto = CoverDto::from(&CoverFetchOutcome::failure("dummycover", CoverFetchFailure::provider("down")));
        assert_eq!("ProviderError", dto.status.as_str());
        assert_eq!(Some("down".to_string()), dto.message);

        let json = serde_json::to_string(&CoverDto::from(&CoverFetchOutcome::cancelled("back"))).expect("should serialize");
        assert_eq!(r#"{"name":"back","status":"Cancelled"}"#, json);
    }
}
