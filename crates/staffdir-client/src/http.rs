//! HTTP implementation of the directory API.

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use staffdir_core::{Employee, EmployeeInput, Envelope};

use crate::api::EmployeeApi;
use crate::error::{ClientError, ClientResult};

/// Path of the employee collection below the server base URL.
const EMPLOYEES_PATH: &str = "api/employees";

/// reqwest-backed client for `/api/employees`.
#[derive(Debug, Clone)]
pub struct HttpEmployeeClient {
    client: Client,
    base_url: String,
}

impl HttpEmployeeClient {
    /// `base_url` is the server root, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), EMPLOYEES_PATH)
    }

    /// URL of one record. The id is a single percent-encoded path segment.
    fn record_url(&self, id: &str) -> ClientResult<Url> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ClientError::InvalidRequest("empty employee id".to_string()));
        }

        let mut url = Url::parse(&self.collection_url())
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
        let base = &self.base_url;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidRequest(format!("not a base URL: {}", base)))?
            .push(id);
        Ok(url)
    }

    /// Send a request and unwrap the envelope.
    /// Returns the `data` payload, or `None` if the server sent none.
    async fn send(request: RequestBuilder) -> ClientResult<Option<Value>> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        let envelope: Envelope<Value> = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(ClientError::InvalidResponse(e.to_string()));
            }
            Err(_) => return Err(ClientError::from_status(status, None, None)),
        };

        if !status.is_success() || !envelope.ok {
            return Err(ClientError::from_status(
                status,
                envelope.message,
                envelope.errors,
            ));
        }

        Ok(envelope.data)
    }

    async fn send_data<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
        let data = Self::send(request)
            .await?
            .ok_or_else(|| ClientError::InvalidResponse("missing data".to_string()))?;
        serde_json::from_value(data).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

impl EmployeeApi for HttpEmployeeClient {
    async fn list(&self) -> ClientResult<Vec<Employee>> {
        Self::send_data(self.client.get(self.collection_url())).await
    }

    async fn get(&self, id: &str) -> ClientResult<Employee> {
        Self::send_data(self.client.get(self.record_url(id)?)).await
    }

    async fn create(&self, input: &EmployeeInput) -> ClientResult<Employee> {
        Self::send_data(self.client.post(self.collection_url()).json(input)).await
    }

    async fn update(&self, id: &str, input: &EmployeeInput) -> ClientResult<Employee> {
        Self::send_data(self.client.put(self.record_url(id)?).json(input)).await
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        tracing::debug!("Deleting employee {}", id);
        Self::send(self.client.delete(self.record_url(id)?)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let client = HttpEmployeeClient::new("http://localhost:5000/");
        assert_eq!(
            client.collection_url(),
            "http://localhost:5000/api/employees"
        );
        assert_eq!(
            client.record_url(" abc ").unwrap().as_str(),
            "http://localhost:5000/api/employees/abc"
        );
    }

    #[test]
    fn test_record_url_encodes_id() {
        let client = HttpEmployeeClient::new("http://localhost:5000");
        assert_eq!(
            client.record_url("a/b?c#d").unwrap().as_str(),
            "http://localhost:5000/api/employees/a%2Fb%3Fc%23d"
        );
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected_before_sending() {
        // Nothing listens here; an issued request would fail with a transport error
        let client = HttpEmployeeClient::new("http://127.0.0.1:1");

        let err = client.delete("  ").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
        assert!(!err.is_not_found());
    }
}
