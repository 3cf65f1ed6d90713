//! Generic handlers shared by every registry.
//!
//! Each handler turns transport rejections and domain errors into Problem
//! responses that carry the request path as `instance`.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Serialize;
use tracing::info;

use crate::api::rest::dto::{ListParams, RestResource};
use crate::api::rest::error::{
    domain_error_to_problem, json_rejection_to_problem, path_rejection_to_problem,
    query_rejection_to_problem, validation_problem,
};
use crate::api::rest::problem::Problem;
use crate::domain::resource::RecordId;
use crate::domain::service::ResourceService;

pub type ApiResult<T> = Result<T, Problem>;

type Svc<R> = Extension<Arc<ResourceService<R>>>;

/// 201 Created + JSON with Location header
fn created_json<T: Serialize>(value: T, uri: &Uri, new_id: &str) -> Response {
    let location = [uri.path().trim_end_matches('/'), new_id].join("/");
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(value),
    )
        .into_response()
}

fn record_id(path: Result<Path<RecordId>, PathRejection>, uri: &Uri) -> ApiResult<RecordId> {
    path.map(|Path(id)| id)
        .map_err(|rej| path_rejection_to_problem(&rej, uri.path()))
}

pub(super) async fn list<R: RestResource>(
    uri: Uri,
    Extension(svc): Svc<R>,
    query: Result<Query<R::ListParams>, QueryRejection>,
) -> ApiResult<Json<R::ListDto>> {
    let Query(params) = query.map_err(|rej| query_rejection_to_problem(&rej, uri.path()))?;
    let query = params
        .into_list_query()
        .map_err(|errors| validation_problem(&errors, uri.path()))?;

    let page = svc
        .list(query)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;

    Ok(Json(page.map_items(R::Dto::from).into()))
}

pub(super) async fn get<R: RestResource>(
    uri: Uri,
    Extension(svc): Svc<R>,
    path: Result<Path<RecordId>, PathRejection>,
) -> ApiResult<Json<R::Dto>> {
    let id = record_id(path, &uri)?;

    let record = svc
        .get(id)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;

    Ok(Json(R::Dto::from(record)))
}

pub(super) async fn create<R: RestResource>(
    uri: Uri,
    Extension(svc): Svc<R>,
    body: Result<Json<R::CreateReq>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(req) = body.map_err(|rej| json_rejection_to_problem(&rej, uri.path()))?;

    info!(resource = R::KIND, "Creating record");

    let record = svc
        .create(req.into())
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    let id = R::id(&record).to_string();

    Ok(created_json(R::Dto::from(record), &uri, &id))
}

pub(super) async fn update<R: RestResource>(
    uri: Uri,
    Extension(svc): Svc<R>,
    path: Result<Path<RecordId>, PathRejection>,
    body: Result<Json<R::UpdateReq>, JsonRejection>,
) -> ApiResult<Json<R::Dto>> {
    let id = record_id(path, &uri)?;
    let Json(req) = body.map_err(|rej| json_rejection_to_problem(&rej, uri.path()))?;

    info!(resource = R::KIND, id, "Updating record");

    let record = svc
        .update(id, req.into())
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;

    Ok(Json(R::Dto::from(record)))
}

pub(super) async fn delete<R: RestResource>(
    uri: Uri,
    Extension(svc): Svc<R>,
    path: Result<Path<RecordId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = record_id(path, &uri)?;

    info!(resource = R::KIND, id, "Deleting record");

    svc.delete(id)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

pub(super) async fn health() -> Json<Health> {
    Json(Health { status: "healthy" })
}

pub(super) async fn root(Extension(info): Extension<ServiceInfo>) -> Json<ServiceInfo> {
    Json(info)
}

