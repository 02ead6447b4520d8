use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
    http::{StatusCode, header},
};

use crate::{
    application::dto::{ClientDto, HealthResponse, ListClientsQueryRequest, PageResponse},
    interface::http::problem::{ApiProblem, ApiResult},
    state::AppState,
};

pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn get_client(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
) -> ApiResult<Json<ClientDto>> {
    let client = state
        .client_service
        .find_by_id(id)
        .await
        .map_err(|error| ApiProblem::from_domain(error, uri.path()))?;
    Ok(Json(client))
}

pub async fn list_clients(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ListClientsQueryRequest>,
) -> ApiResult<Json<PageResponse<ClientDto>>> {
    let page = state
        .client_service
        .find_all_paged(query.into_page_request())
        .await
        .map_err(|error| ApiProblem::from_domain(error, uri.path()))?;
    Ok(Json(PageResponse::from(page)))
}

pub async fn find_all_clients(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> ApiResult<Json<Vec<ClientDto>>> {
    let clients = state
        .client_service
        .find_all()
        .await
        .map_err(|error| ApiProblem::from_domain(error, uri.path()))?;
    Ok(Json(clients))
}

pub async fn create_client(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(request): Json<ClientDto>,
) -> ApiResult<(StatusCode, [(header::HeaderName, String); 1], Json<ClientDto>)> {
    let created = state
        .client_service
        .insert(request)
        .await
        .map_err(|error| ApiProblem::from_domain(error, uri.path()))?;

    // id is always present on a freshly inserted record
    let location = format!("/clients/{}", created.id.unwrap_or_default());

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

pub async fn update_client(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
    Json(request): Json<ClientDto>,
) -> ApiResult<Json<ClientDto>> {
    let updated = state
        .client_service
        .update(id, request)
        .await
        .map_err(|error| ApiProblem::from_domain(error, uri.path()))?;
    Ok(Json(updated))
}

pub async fn delete_client(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state
        .client_service
        .delete(id)
        .await
        .map_err(|error| ApiProblem::from_domain(error, uri.path()))?;
    Ok(StatusCode::NO_CONTENT)
}
