//! Employee API Handlers

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use shared::error::ErrorCode;
use shared::models::{Employee, EmployeeInput, EmployeeUpdate};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// `?id=` query for update and delete
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    /// The supplied id; absent or blank is an invalid request
    pub fn require(self) -> AppResult<String> {
        self.id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| AppError::invalid_request("ID required"))
    }
}

fn body_error(rejection: JsonRejection) -> AppError {
    AppError::with_message(ErrorCode::InvalidFormat, rejection.body_text())
}

/// List all employees, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Employee>>> {
    let repo = state.employees().await?;
    let employees = repo.find_all().await?;
    Ok(Json(employees))
}

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let Json(payload) = payload.map_err(body_error)?;
    let repo = state.employees().await?;
    let employee = repo.create(payload).await?;

    tracing::info!(id = ?employee.id, "Employee created");
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Update an employee; `null` when no record matches
pub async fn update(
    State(state): State<ServerState>,
    Query(query): Query<IdQuery>,
    payload: Result<Json<EmployeeUpdate>, JsonRejection>,
) -> AppResult<Json<Option<Employee>>> {
    let id = query.require()?;
    let Json(payload) = payload.map_err(body_error)?;
    let repo = state.employees().await?;
    let employee = repo.update(&id, payload).await?;

    if employee.is_none() {
        tracing::debug!(id = %id, "Update matched no employee");
    }
    Ok(Json(employee))
}

/// Hard delete an employee
pub async fn delete(
    State(state): State<ServerState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<Value>> {
    let id = query.require()?;
    let repo = state.employees().await?;
    repo.delete(&id).await?;

    tracing::info!(id = %id, "Employee deleted");
    Ok(Json(json!({ "success": true })))
}
