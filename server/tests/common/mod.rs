//! In-memory stores and request helpers for driving the router without a
//! database.

#![allow(dead_code)]

use std::cmp::Ordering;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use dictionary_server::services::{ServiceError, examples::Examples, words::Words};
use http_body_util::BodyExt;
use list_query::{Direction, ListQuery, Sort};
use sentences::{Example, ExampleUpdate, NewExample};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct MemoryExamples(Arc<Mutex<Vec<Example>>>);

impl Examples for MemoryExamples {
    async fn create(&self, example: NewExample) -> Result<Example, ServiceError> {
        let example = Example::new(Uuid::now_v7(), example, Utc::now());
        self.0.lock().unwrap().push(example.clone());
        Ok(example)
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<Example>, ServiceError> {
        let keyword = query.keyword.as_deref().map(str::to_lowercase);
        let mut examples: Vec<Example> = self
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|e| {
                keyword
                    .as_deref()
                    .is_none_or(|k| e.igbo.to_lowercase().contains(k))
            })
            .cloned()
            .collect();
        examples.sort_by(|a, b| {
            order(query.sort.as_ref(), |field| match field {
                "igbo" => Some(a.igbo.cmp(&b.igbo)),
                "english" => Some(a.english.cmp(&b.english)),
                "updatedOn" => Some(a.updated_on.cmp(&b.updated_on)),
                "id" => Some(a.id.cmp(&b.id)),
                _ => None,
            })
            .then(a.id.cmp(&b.id))
        });
        Ok(window(examples, query))
    }

    async fn get(&self, id: Uuid) -> Result<Example, ServiceError> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(ServiceError::NotFound {
                kind: "example",
                id,
            })
    }

    async fn update(&self, id: Uuid, update: ExampleUpdate) -> Result<Example, ServiceError> {
        let mut examples = self.0.lock().unwrap();
        let example = examples
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(ServiceError::NotFound {
                kind: "example",
                id,
            })?;
        update.apply_to(example, Utc::now());
        Ok(example.clone())
    }
}

#[derive(Clone, Default)]
pub struct MemoryWords(Arc<Mutex<Vec<words::Word>>>);

impl Words for MemoryWords {
    async fn create(&self, word: words::NewWord) -> Result<words::Word, ServiceError> {
        let word = words::Word::new(Uuid::now_v7(), word);
        self.0.lock().unwrap().push(word.clone());
        Ok(word)
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<words::Word>, ServiceError> {
        let keyword = query.keyword.as_deref().map(str::to_lowercase);
        let normalized = query.keyword.as_deref().map(words::normalize);
        let mut found: Vec<words::Word> = self
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|w| match (&keyword, &normalized) {
                (Some(k), Some(n)) => {
                    w.word.to_lowercase().contains(k)
                        || w.variations.iter().any(|v| v.to_lowercase().contains(k))
                        || w.normalized.contains(n.as_str())
                }
                _ => true,
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            order(query.sort.as_ref(), |field| match field {
                "word" => Some(a.word.cmp(&b.word)),
                "wordClass" => Some(a.word_class.cmp(&b.word_class)),
                "normalized" => Some(a.normalized.cmp(&b.normalized)),
                "frequency" => a.frequency.partial_cmp(&b.frequency),
                "id" => Some(a.id.cmp(&b.id)),
                _ => None,
            })
            .then(a.id.cmp(&b.id))
        });
        Ok(window(found, query))
    }

    async fn get(&self, id: Uuid) -> Result<words::Word, ServiceError> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or(ServiceError::NotFound { kind: "word", id })
    }

    async fn update(
        &self,
        id: Uuid,
        update: words::WordUpdate,
    ) -> Result<words::Word, ServiceError> {
        let mut found = self.0.lock().unwrap();
        let word = found
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(ServiceError::NotFound { kind: "word", id })?;
        update.apply_to(word);
        Ok(word.clone())
    }
}

fn order(sort: Option<&Sort>, compare: impl Fn(&str) -> Option<Ordering>) -> Ordering {
    let Some(sort) = sort else {
        return Ordering::Equal;
    };
    let ordering = compare(&sort.field).unwrap_or(Ordering::Equal);
    match sort.direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    }
}

fn window<T>(items: Vec<T>, query: &ListQuery) -> Vec<T> {
    items
        .into_iter()
        .skip(query.offset as usize)
        .take(query.limit as usize)
        .collect()
}

pub fn app() -> Router {
    dictionary_server::app(MemoryExamples::default(), MemoryWords::default(), 10)
}

/// Percent-encode a query string.
pub fn query(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
        })
        .collect::<Vec<_>>()
        .join("&")
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "PUT", uri, Some(body)).await
}

pub fn ids(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_owned())
        .collect()
}

pub fn assert_disjoint(sets: &[Vec<String>]) {
    for (i, a) in sets.iter().enumerate() {
        assert!(!a.is_empty(), "window {i} is empty");
        for b in &sets[i + 1..] {
            assert!(a.iter().all(|id| !b.contains(id)), "windows overlap: {a:?} {b:?}");
        }
    }
}

pub fn assert_in_order(body: &Value, key: &str, direction: Direction) {
    let values: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item[key].as_str().unwrap())
        .collect();
    assert!(!values.is_empty());
    for pair in values.windows(2) {
        match direction {
            Direction::Asc => assert!(pair[0] <= pair[1], "{pair:?} not ascending"),
            Direction::Desc => assert!(pair[0] >= pair[1], "{pair:?} not descending"),
        }
    }
}
