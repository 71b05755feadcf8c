//! Analysis Entity
//!
//! Explicit schema for the reasoning model's JSON output. The original
//! contract was an opaque free-text "JSON per schema" instruction; here the
//! schema is defined and validated after stage 1, so malformed reasoning
//! output becomes a distinct, typed failure instead of being forwarded
//! silently into the explanation stage.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::errors::ChainError;

/// One architectural component named by the reasoning model.
///
/// Models answer either with bare component names or with full objects;
/// both forms are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(from = "ComponentRepr")]
pub struct ComponentSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ComponentRepr {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        purpose: Option<String>,
        #[serde(default)]
        technology: Option<String>,
    },
}

impl From<ComponentRepr> for ComponentSpec {
    fn from(repr: ComponentRepr) -> Self {
        match repr {
            ComponentRepr::Name(name) => Self {
                name,
                purpose: None,
                technology: None,
            },
            ComponentRepr::Full {
                name,
                purpose,
                technology,
            } => Self {
                name,
                purpose,
                technology,
            },
        }
    }
}

/// A data store recommendation from the reasoning model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(from = "DataStoreRepr")]
pub struct DataStoreSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DataStoreRepr {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        kind: Option<String>,
        #[serde(default)]
        rationale: Option<String>,
    },
}

impl From<DataStoreRepr> for DataStoreSpec {
    fn from(repr: DataStoreRepr) -> Self {
        match repr {
            DataStoreRepr::Name(name) => Self {
                name,
                kind: None,
                rationale: None,
            },
            DataStoreRepr::Full {
                name,
                kind,
                rationale,
            } => Self {
                name,
                kind,
                rationale,
            },
        }
    }
}

/// Structured architectural analysis produced by the reasoning stage.
///
/// Unknown fields in the model's JSON are ignored; the only hard
/// requirement is at least one component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ArchitectureAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub components: Vec<ComponentSpec>,
    #[serde(default)]
    pub data_stores: Vec<DataStoreSpec>,
    #[serde(default)]
    pub scaling_notes: Vec<String>,
    #[serde(default)]
    pub risks: Vec<String>,
}

impl ArchitectureAnalysis {
    /// Parse and validate raw reasoning-stage output.
    ///
    /// Strips a single outer Markdown code fence if the model added one,
    /// then requires valid JSON matching this schema with at least one
    /// component. The caller keeps the raw text; this only decides whether
    /// the chain may proceed and what structure to report.
    pub fn parse(raw: &str) -> Result<Self, ChainError> {
        let body = strip_code_fence(raw);

        let analysis: Self = serde_json::from_str(body)
            .map_err(|e| ChainError::InvalidAnalysis(format!("not valid analysis JSON: {e}")))?;

        if analysis.components.is_empty() {
            return Err(ChainError::InvalidAnalysis(
                "analysis names no components".to_string(),
            ));
        }

        Ok(analysis)
    }
}

/// Remove one outer ``` / ```json fence, if present
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop a language tag such as "json" on the opening fence line
    match body.split_once('\n') {
        Some((first_line, tail)) if !first_line.trim().is_empty() => tail.trim(),
        _ => body.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_object_form() {
        let raw = r#"{
            "summary": "Three-tier URL shortener",
            "components": [
                {"name": "API", "purpose": "accept shorten/redirect requests"},
                {"name": "Cache", "technology": "Redis"}
            ],
            "data_stores": [{"name": "DB", "kind": "key-value"}],
            "scaling_notes": ["shard by short code"],
            "risks": ["hot keys"]
        }"#;

        let analysis = ArchitectureAnalysis::parse(raw).unwrap();
        assert_eq!(analysis.summary.as_deref(), Some("Three-tier URL shortener"));
        assert_eq!(analysis.components.len(), 2);
        assert_eq!(analysis.components[0].name, "API");
        assert_eq!(
            analysis.components[1].technology.as_deref(),
            Some("Redis")
        );
        assert_eq!(analysis.data_stores[0].kind.as_deref(), Some("key-value"));
    }

    #[test]
    fn test_parse_bare_name_form() {
        let raw = r#"{"components":["API","DB","Cache"]}"#;
        let analysis = ArchitectureAnalysis::parse(raw).unwrap();
        assert_eq!(
            analysis
                .components
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>(),
            vec!["API", "DB", "Cache"]
        );
    }

    #[test]
    fn test_parse_strips_markdown_fence() {
        let raw = "```json\n{\"components\":[\"API\"]}\n```";
        let analysis = ArchitectureAnalysis::parse(raw).unwrap();
        assert_eq!(analysis.components[0].name, "API");

        let raw_plain_fence = "```\n{\"components\":[\"API\"]}\n```";
        assert!(ArchitectureAnalysis::parse(raw_plain_fence).is_ok());
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let raw = r#"{"components":["API"],"estimated_cost":"$10k/mo"}"#;
        assert!(ArchitectureAnalysis::parse(raw).is_ok());
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = ArchitectureAnalysis::parse("I think you should use microservices").unwrap_err();
        assert!(matches!(err, ChainError::InvalidAnalysis(_)));
    }

    #[test]
    fn test_parse_rejects_empty_components() {
        let err = ArchitectureAnalysis::parse(r#"{"components":[]}"#).unwrap_err();
        assert!(matches!(err, ChainError::InvalidAnalysis(_)));

        let err = ArchitectureAnalysis::parse(r#"{"summary":"no parts"}"#).unwrap_err();
        assert!(matches!(err, ChainError::InvalidAnalysis(_)));
    }
}
