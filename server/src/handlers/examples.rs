use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use list_query::{ListParams, ListQuery};
use sentences::{Example, ExampleUpdate, NewExample};

use super::{Resource, readable_params};
use crate::responses::Error;
use crate::services::{ServiceError, examples::Examples, parse_id};

pub(crate) async fn create<Service>(
    State(resource): State<Resource<Service>>,
    payload: Result<Json<NewExample>, JsonRejection>,
) -> Result<Json<Example>, Error>
where
    Service: Examples,
{
    let Json(example) = payload?;
    example.validate().map_err(ServiceError::from)?;

    Ok(Json(resource.service.create(example).await?))
}

pub(crate) async fn list<Service>(
    State(resource): State<Resource<Service>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Example>>, Error>
where
    Service: Examples,
{
    let params = readable_params(params);
    let query = ListQuery::from_params(&params, resource.page_size);
    tracing::debug!(?query, "listing examples");

    Ok(Json(resource.service.list(&query).await?))
}

pub(crate) async fn get<Service>(
    State(resource): State<Resource<Service>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Example>, Error>
where
    Service: Examples,
{
    let Path(id) = path?;
    let id = parse_id(&id)?;
    Ok(Json(resource.service.get(id).await?))
}

pub(crate) async fn update<Service>(
    State(resource): State<Resource<Service>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<ExampleUpdate>, JsonRejection>,
) -> Result<Json<Example>, Error>
where
    Service: Examples,
{
    let Path(id) = path?;
    let id = parse_id(&id)?;
    let Json(update) = payload?;
    update.validate().map_err(ServiceError::from)?;

    Ok(Json(resource.service.update(id, update).await?))
}
