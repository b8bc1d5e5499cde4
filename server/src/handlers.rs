use axum::{
    Json,
    extract::{Query, rejection::QueryRejection},
};
use list_query::ListParams;
use serde_json::{Value, json};

pub(crate) mod examples;
pub(crate) mod words;

/// Router state for one resource: its store plus listing settings.
#[derive(Clone)]
pub(crate) struct Resource<S> {
    pub(crate) service: S,
    pub(crate) page_size: u64,
}

impl<S> Resource<S> {
    pub(crate) fn new(service: S, page_size: u64) -> Self {
        Self { service, page_size }
    }
}

pub(crate) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Listing parameters never fail a request. A query string that does not
/// deserialize at all (a repeated key, say) lists as if none were given.
pub(crate) fn readable_params(params: Result<Query<ListParams>, QueryRejection>) -> ListParams {
    match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::debug!(%rejection, "ignoring unreadable listing parameters");
            ListParams::default()
        }
    }
}
