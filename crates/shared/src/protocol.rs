use serde::{Deserialize, Serialize};

use crate::{
    domain::{Citation, QueryRecord},
    error::QueryError,
};

/// Path of the answering service's query route.
pub const LAWS_PATH: &str = "/laws";
/// Name of the single query-string parameter carrying the question.
pub const QUERY_PARAM: &str = "query";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationPayload {
    pub source: String,
    pub text: String,
}

/// Success body of `GET /laws`.
///
/// Unknown fields are tolerated; missing or mistyped ones are a shape error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LawsQueryResponse {
    pub query: String,
    pub response: String,
    pub citations: Vec<CitationPayload>,
}

impl LawsQueryResponse {
    pub fn parse(body: &[u8]) -> Result<Self, QueryError> {
        serde_json::from_slice(body).map_err(|err| QueryError::shape(err.to_string()))
    }

    /// Builds the transcript record for `submitted`, the trimmed text that
    /// was actually sent. The service's echo of the query is not trusted.
    pub fn into_record(self, submitted: &str) -> QueryRecord {
        QueryRecord {
            query: submitted.to_string(),
            response: self.response,
            citations: self
                .citations
                .into_iter()
                .map(|citation| Citation {
                    source: citation.source,
                    text: citation.text,
                })
                .collect(),
        }
    }
}

/// Error body convention of the answering service (`{"detail": ...}`).
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Best-effort extraction of a readable detail from an error response.
    pub fn detail_from(body: &[u8]) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
        match parsed.detail? {
            serde_json::Value::String(text) => Some(text),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}
