// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the mem0 memory service.
//!
//! Provides [`Mem0Client`] implementing [`MemoryGateway`]. Every call is
//! scoped by the employee id (`user_id` on the wire), so no operation can
//! cross memory partitions.

use std::time::Duration;

use async_trait::async_trait;
use deskmate_core::types::{ChatTurn, MemoryRecord};
use deskmate_core::{DeskmateError, MemoryGateway};
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{AddRequest, SearchRequest, WireMemory, WireMessage};

/// HTTP client for mem0 API communication.
#[derive(Debug, Clone)]
pub struct Mem0Client {
    client: reqwest::Client,
    base_url: String,
}

impl Mem0Client {
    /// Creates a new mem0 API client against the given base URL.
    pub fn new(api_key: String, base_url: String) -> Result<Self, DeskmateError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Token {api_key}")).map_err(|e| {
                DeskmateError::Config(format!("invalid mem0 API key header value: {e}"))
            })?,
        );
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DeskmateError::Memory {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, DeskmateError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(DeskmateError::Memory {
            message: format!("mem0 API returned {status}: {body}"),
            source: None,
        })
    }
}

#[async_trait]
impl MemoryGateway for Mem0Client {
    async fn add(
        &self,
        turns: &[ChatTurn],
        employee_id: &str,
        metadata: serde_json::Value,
    ) -> Result<(), DeskmateError> {
        // Augment caller metadata with provenance fields.
        let mut metadata = match metadata {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        metadata.insert("source".into(), "deskmate".into());
        metadata.insert(
            "timestamp".into(),
            chrono::Utc::now().to_rfc3339().into(),
        );

        let request = AddRequest {
            messages: turns
                .iter()
                .map(|t| WireMessage {
                    role: t.role.clone(),
                    content: t.content.clone().unwrap_or_default(),
                })
                .collect(),
            user_id: employee_id.to_string(),
            metadata: serde_json::Value::Object(metadata),
        };

        let response = self
            .client
            .post(self.url("/v1/memories/"))
            .json(&request)
            .send()
            .await
            .map_err(|e| DeskmateError::Memory {
                message: format!("mem0 add request failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        Self::check_status(response).await?;
        debug!(employee_id, "memory stored");
        Ok(())
    }

    async fn search(
        &self,
        query: &str,
        employee_id: &str,
        limit: usize,
    ) -> Result<Vec<MemoryRecord>, DeskmateError> {
        let request = SearchRequest {
            query: query.to_string(),
            user_id: employee_id.to_string(),
            limit,
        };

        let response = self
            .client
            .post(self.url("/v1/memories/search/"))
            .json(&request)
            .send()
            .await
            .map_err(|e| DeskmateError::Memory {
                message: format!("mem0 search request failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        let response = Self::check_status(response).await?;

        let memories: Vec<WireMemory> =
            response.json().await.map_err(|e| DeskmateError::Memory {
                message: format!("failed to parse mem0 search response: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(memories.into_iter().map(WireMemory::into_record).collect())
    }

    async fn get_all(&self, employee_id: &str) -> Result<Vec<MemoryRecord>, DeskmateError> {
        let response = self
            .client
            .get(self.url("/v1/memories/"))
            .query(&[("user_id", employee_id)])
            .send()
            .await
            .map_err(|e| DeskmateError::Memory {
                message: format!("mem0 list request failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        let response = Self::check_status(response).await?;

        let memories: Vec<WireMemory> =
            response.json().await.map_err(|e| DeskmateError::Memory {
                message: format!("failed to parse mem0 list response: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(memories.into_iter().map(WireMemory::into_record).collect())
    }

    async fn delete(&self, memory_id: &str) -> Result<(), DeskmateError> {
        let response = self
            .client
            .delete(self.url(&format!("/v1/memories/{memory_id}/")))
            .send()
            .await
            .map_err(|e| DeskmateError::Memory {
                message: format!("mem0 delete request failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn delete_all(&self, employee_id: &str) -> Result<(), DeskmateError> {
        let response = self
            .client
            .delete(self.url("/v1/memories/"))
            .query(&[("user_id", employee_id)])
            .send()
            .await
            .map_err(|e| DeskmateError::Memory {
                message: format!("mem0 delete-all request failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        Self::check_status(response).await?;
        debug!(employee_id, "all memories deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> Mem0Client {
        Mem0Client::new("m0-test-key".into(), base_url.to_string()).unwrap()
    }

    #[tokio::test]
    async fn add_scopes_by_user_and_augments_metadata() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/memories/"))
            .and(header("authorization", "Token m0-test-key"))
            .and(body_partial_json(serde_json::json!({
                "user_id": "EMP001",
                "metadata": {
                    "category": "food_preferences",
                    "source": "deskmate"
                },
                "messages": [
                    {"role": "user", "content": "I'm vegetarian"},
                    {"role": "assistant", "content": "Noted!"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let turns = vec![
            ChatTurn::user("I'm vegetarian"),
            ChatTurn::assistant("Noted!"),
        ];
        let result = client
            .add(
                &turns,
                "EMP001",
                serde_json::json!({"category": "food_preferences"}),
            )
            .await;
        assert!(result.is_ok(), "{result:?}");
    }

    #[tokio::test]
    async fn search_returns_ranked_records() {
        let server = MockServer::start().await;

        let body = serde_json::json!([
            {
                "id": "mem-1",
                "memory": "Prefers window seat cabs",
                "score": 0.88,
                "metadata": {"category": "travel_preferences"}
            },
            {
                "id": "mem-2",
                "memory": "Lives in Indiranagar",
                "score": 0.71
            }
        ]);

        Mock::given(method("POST"))
            .and(path("/v1/memories/search/"))
            .and(body_partial_json(serde_json::json!({
                "query": "book me a cab home",
                "user_id": "EMP001",
                "limit": 5
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let records = client.search("book me a cab home", "EMP001", 5).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "Prefers window seat cabs");
        assert_eq!(
            records[0].category,
            Some(deskmate_core::MemoryCategory::TravelPreferences)
        );
        assert_eq!(records[1].category, None);
    }

    #[tokio::test]
    async fn get_all_passes_user_id_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/memories/"))
            .and(query_param("user_id", "EMP002"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let records = client.get_all("EMP002").await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn delete_targets_memory_id() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/v1/memories/mem-42/"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.delete("mem-42").await.is_ok());
    }

    #[tokio::test]
    async fn delete_all_scopes_by_user() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/v1/memories/"))
            .and(query_param("user_id", "EMP003"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.delete_all("EMP003").await.is_ok());
    }

    #[tokio::test]
    async fn non_success_status_maps_to_memory_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/memories/search/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.search("query", "EMP001", 5).await.unwrap_err();
        assert!(matches!(err, DeskmateError::Memory { .. }));
        assert!(err.to_string().contains("500"));
    }
}
