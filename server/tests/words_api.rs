mod common;

use axum::http::StatusCode;
use common::{get, ids, post, put, query};
use serde_json::json;

#[tokio::test]
async fn new_word_gets_empty_defaults() {
    let app = common::app();
    let (status, body) = post(&app, "/api/words", json!({ "word": "ụlọ" })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["id"].is_string());
    assert_eq!(body["wordClass"], "");
    assert_eq!(body["definitions"], json!([]));
    assert_eq!(body["variations"], json!([]));
    assert_eq!(body["stems"], json!([]));
    assert_eq!(body["normalized"], "");
    assert!(body.get("frequency").is_none());
}

#[tokio::test]
async fn word_is_required() {
    let app = common::app();
    for payload in [
        json!({ "wordClass": "noun" }),
        json!({ "word": ["ụlọ"] }),
        json!({ "word": "" }),
        json!({ "word": "ụlọ", "definitions": "house" }),
    ] {
        let (status, body) = post(&app, "/api/words", payload.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "accepted {payload}");
        assert!(!body["error"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn keyword_matches_variations_and_normalized_form() {
    let app = common::app();
    post(
        &app,
        "/api/words",
        json!({
            "word": "àkwà",
            "normalized": "akwa",
            "variations": ["akwaa"],
            "definitions": ["cloth"],
        }),
    )
    .await;
    post(&app, "/api/words", json!({ "word": "nne", "normalized": "nne" })).await;

    let (_, body) = get(&app, &format!("/api/words?{}", query(&[("keyword", "ákwá")]))).await;
    let found = body.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["word"], "àkwà");

    let (_, body) = get(&app, &format!("/api/words?{}", query(&[("keyword", "akwaa")]))).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn updates_only_given_fields() {
    let app = common::app();
    let (_, created) = post(
        &app,
        "/api/words",
        json!({ "word": "nri", "wordClass": "noun", "definitions": ["food"] }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = put(
        &app,
        &format!("/api/words/{id}"),
        json!({ "definitions": ["food", "meal"], "frequency": 12 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["word"], "nri");
    assert_eq!(body["wordClass"], "noun");
    assert_eq!(body["definitions"], json!(["food", "meal"]));
    assert_eq!(body["frequency"], 12.0);
}

#[tokio::test]
async fn sorts_by_frequency_and_pages() {
    let app = common::app();
    for i in 0..15 {
        post(
            &app,
            "/api/words",
            json!({ "word": format!("okwu{i}"), "frequency": (i * 4) % 15 }),
        )
        .await;
    }

    let (_, first) = get(
        &app,
        &format!("/api/words?{}", query(&[("sort", r#"["frequency": "desc"]"#), ("page", "0")])),
    )
    .await;
    let frequencies: Vec<f64> = first
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["frequency"].as_f64().unwrap())
        .collect();
    assert_eq!(frequencies.len(), 10);
    assert!(frequencies.windows(2).all(|pair| pair[0] >= pair[1]));

    let (_, second) = get(
        &app,
        &format!("/api/words?{}", query(&[("sort", r#"["frequency": "desc"]"#), ("page", "1")])),
    )
    .await;
    assert_eq!(second.as_array().unwrap().len(), 5);
    common::assert_disjoint(&[ids(&first), ids(&second)]);
}

#[tokio::test]
async fn unknown_and_malformed_ids() {
    let app = common::app();

    let (status, body) = get(&app, "/api/words/0190b6a2-7c1e-7d3a-9e4b-2f1a3c5d7e9f").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("no word exists"));

    let (status, body) = get(&app, "/api/words/5f864d7401203866b6546dd3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("not a valid id"));

    let (status, body) = get(&app, "/api/words/%FF%FE").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn unreadable_listing_parameters_are_ignored() {
    let app = common::app();
    let (status, _) = post(&app, "/api/words", json!({ "word": "nne" })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, "/api/words?keyword=nne&keyword=nna").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}
