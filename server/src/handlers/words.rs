use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use list_query::{ListParams, ListQuery};
use words::{NewWord, Word, WordUpdate};

use super::{Resource, readable_params};
use crate::responses::Error;
use crate::services::{ServiceError, parse_id, words::Words};

pub(crate) async fn create<Service>(
    State(resource): State<Resource<Service>>,
    payload: Result<Json<NewWord>, JsonRejection>,
) -> Result<Json<Word>, Error>
where
    Service: Words,
{
    let Json(word) = payload?;
    word.validate().map_err(ServiceError::from)?;

    Ok(Json(resource.service.create(word).await?))
}

pub(crate) async fn list<Service>(
    State(resource): State<Resource<Service>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Word>>, Error>
where
    Service: Words,
{
    let params = readable_params(params);
    let query = ListQuery::from_params(&params, resource.page_size);
    Ok(Json(resource.service.list(&query).await?))
}

pub(crate) async fn get<Service>(
    State(resource): State<Resource<Service>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Word>, Error>
where
    Service: Words,
{
    let Path(id) = path?;
    let id = parse_id(&id)?;
    Ok(Json(resource.service.get(id).await?))
}

pub(crate) async fn update<Service>(
    State(resource): State<Resource<Service>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<WordUpdate>, JsonRejection>,
) -> Result<Json<Word>, Error>
where
    Service: Words,
{
    let Path(id) = path?;
    let id = parse_id(&id)?;
    let Json(update) = payload?;
    update.validate().map_err(ServiceError::from)?;

    Ok(Json(resource.service.update(id, update).await?))
}
