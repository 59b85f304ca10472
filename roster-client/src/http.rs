//! HTTP client for network-based API calls

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::error::ApiResponse;
use shared::models::{Employee, EmployeeInput, EmployeeUpdate};

use crate::{ClientConfig, ClientError, ClientResult};

const EMPLOYEES_PATH: &str = "api/employees";

/// HTTP client for making network requests to the roster server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    success: bool,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Server base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with query parameters and JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> ClientResult<T> {
        let response = self
            .client
            .put(self.url(path))
            .query(query)
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request with query parameters
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<T> {
        let response = self
            .client
            .delete(self.url(path))
            .query(query)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            // Prefer the message of the unified error body
            let message = serde_json::from_str::<ApiResponse>(&text)
                .map(|body| body.message)
                .unwrap_or(text);
            return match status {
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(message)),
                _ => Err(ClientError::Internal(message)),
            };
        }

        response.json().await.map_err(Into::into)
    }

    // ========== Employee API ==========

    /// List all employees, newest first
    pub async fn list_employees(&self) -> ClientResult<Vec<Employee>> {
        self.get(EMPLOYEES_PATH).await
    }

    /// Create an employee
    pub async fn create_employee(&self, input: &EmployeeInput) -> ClientResult<Employee> {
        self.post(EMPLOYEES_PATH, input).await
    }

    /// Update an employee; `None` when the server found no matching record
    pub async fn update_employee(
        &self,
        id: &str,
        update: &EmployeeUpdate,
    ) -> ClientResult<Option<Employee>> {
        self.put(EMPLOYEES_PATH, &[("id", id)], update).await
    }

    /// Delete an employee
    pub async fn delete_employee(&self, id: &str) -> ClientResult<()> {
        let response: DeleteResponse = self.delete(EMPLOYEES_PATH, &[("id", id)]).await?;
        if !response.success {
            return Err(ClientError::InvalidResponse(
                "Delete was not acknowledged".to_string(),
            ));
        }
        Ok(())
    }
}
