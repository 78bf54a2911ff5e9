use super::common::*;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use tower::ServiceExt;

use crate::catalog::{catalog_router, router};

#[tokio::test]
async fn sector_crud_over_http() {
    let catalog = catalog();
    let app = catalog_router(catalog);

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/sectors",
            json!({ "id": 77, "name": "Informatique" }),
        ))
        .await
        .expect("create");
    assert_eq!(created.status(), StatusCode::CREATED);
    let body = read_json_body(created).await;
    assert_eq!(body, json!({ "id": 1, "name": "Informatique" }));

    let renamed = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/sectors/1",
            json!({ "name": "Informatique appliquée" }),
        ))
        .await
        .expect("update");
    assert_eq!(renamed.status(), StatusCode::OK);
    assert_eq!(
        read_json_body(renamed).await["name"],
        "Informatique appliquée"
    );

    let listed = app
        .clone()
        .oneshot(empty_request("GET", "/api/sectors"))
        .await
        .expect("list");
    assert_eq!(
        read_json_body(listed).await,
        json!([{ "id": 1, "name": "Informatique appliquée" }])
    );

    let deleted = app
        .clone()
        .oneshot(empty_request("DELETE", "/api/sectors/1"))
        .await
        .expect("delete");
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = app
        .oneshot(empty_request("GET", "/api/sectors/1"))
        .await
        .expect("get");
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(gone).await;
    assert_eq!(body["kind"], "not_found");
    assert_eq!(body["entity"], "sector");
    assert_eq!(body["error"], "Sector 1 not found");
}

#[tokio::test]
async fn sector_lookup_by_name() {
    let (catalog, _, gestion) = seeded_catalog();
    let app = catalog_router(catalog);

    let found = app
        .clone()
        .oneshot(empty_request("GET", "/api/sectors/by-name/Gestion"))
        .await
        .expect("by name");
    assert_eq!(found.status(), StatusCode::OK);
    assert_eq!(read_json_body(found).await["id"], gestion.id.0);

    let missing = app
        .oneshot(empty_request("GET", "/api/sectors/by-name/Droit"))
        .await
        .expect("by name");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json_body(missing).await["key"], "Droit");
}

#[tokio::test]
async fn duplicate_sector_is_a_conflict() {
    let (catalog, _, _) = seeded_catalog();
    let response = catalog_router(catalog)
        .oneshot(json_request(
            "POST",
            "/api/sectors",
            json!({ "name": "Gestion" }),
        ))
        .await
        .expect("create");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(read_json_body(response).await["kind"], "conflict");
}

#[tokio::test]
async fn invalid_bodies_are_bad_requests() {
    let app = catalog_router(catalog());

    let blank = app
        .clone()
        .oneshot(json_request("POST", "/api/sectors", json!({ "name": "" })))
        .await
        .expect("blank");
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(blank).await;
    assert_eq!(body["kind"], "validation");
    assert_eq!(body["fields"][0]["field"], "name");

    let malformed = app
        .oneshot(
            axum::http::Request::post("/api/classes")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from("{\"className\": "))
                .expect("request"),
        )
        .await
        .expect("malformed");
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn class_crud_over_http() {
    let catalog = catalog();
    let informatique = add_sector(&catalog, "Informatique");
    let gestion = add_sector(&catalog, "Gestion");
    let app = catalog_router(catalog);

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/classes",
            json!({ "name": "L1", "description": "First year", "sectorId": informatique.id.0 }),
        ))
        .await
        .expect("create");
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(
        read_json_body(created).await,
        json!({
            "id": 1,
            "className": "L1",
            "description": "First year",
            "idSector": informatique.id.0,
            "sectorName": "Informatique"
        })
    );

    let moved = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/classes/1",
            json!({ "className": "L1", "description": "First year", "idSector": gestion.id.0 }),
        ))
        .await
        .expect("update");
    assert_eq!(moved.status(), StatusCode::OK);
    assert_eq!(read_json_body(moved).await["sectorName"], "Gestion");

    let count = app
        .clone()
        .oneshot(empty_request("GET", "/api/classes/count"))
        .await
        .expect("count");
    assert_eq!(read_json_body(count).await, json!({ "count": 1 }));

    let deleted = app
        .clone()
        .oneshot(empty_request("DELETE", "/api/classes/1"))
        .await
        .expect("delete");
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let again = app
        .oneshot(empty_request("DELETE", "/api/classes/1"))
        .await
        .expect("delete again");
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn class_with_unknown_sector_is_not_found() {
    let catalog = catalog();
    add_sector(&catalog, "Informatique");
    let app = catalog_router(catalog);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/classes",
            json!({ "className": "L1", "description": "First year", "idSector": 999 }),
        ))
        .await
        .expect("create");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert_eq!(body["entity"], "sector");
    assert_eq!(body["key"], "999");

    let count = app
        .oneshot(empty_request("GET", "/api/classes/count"))
        .await
        .expect("count");
    assert_eq!(read_json_body(count).await["count"], 0);
}

#[tokio::test]
async fn classes_filter_by_sector() {
    let (catalog, informatique, _) = seeded_catalog();
    let app = catalog_router(catalog);

    let filtered = app
        .clone()
        .oneshot(empty_request(
            "GET",
            &format!("/api/classes?sectorId={}", informatique.id),
        ))
        .await
        .expect("filter");
    let body = read_json_body(filtered).await;
    let names: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .map(|class| class["className"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["L1", "L2"]);

    let nested = app
        .clone()
        .oneshot(empty_request(
            "GET",
            &format!("/api/sectors/{}/classes", informatique.id),
        ))
        .await
        .expect("nested");
    assert_eq!(read_json_body(nested).await, body);

    let unknown = app
        .oneshot(empty_request("GET", "/api/sectors/99/classes"))
        .await
        .expect("nested");
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

async fn class_ids_in_sector(app: &axum::Router, sector_id: i64) -> Vec<i64> {
    let response = app
        .clone()
        .oneshot(empty_request(
            "GET",
            &format!("/api/classes?sectorId={sector_id}"),
        ))
        .await
        .expect("filter");
    assert_eq!(response.status(), StatusCode::OK);
    read_json_body(response)
        .await
        .as_array()
        .expect("array")
        .iter()
        .map(|class| class["id"].as_i64().expect("id"))
        .collect()
}

#[tokio::test]
async fn moved_class_changes_sector_membership() {
    let (catalog, informatique, gestion) = seeded_catalog();
    let l1 = catalog.classes.get_by_name("L1").expect("seeded");
    let app = catalog_router(catalog);

    assert!(class_ids_in_sector(&app, informatique.id.0).await.contains(&l1.id.0));
    assert!(!class_ids_in_sector(&app, gestion.id.0).await.contains(&l1.id.0));

    let moved = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/classes/{}", l1.id),
            json!({ "className": "L1", "description": "First year", "idSector": gestion.id.0 }),
        ))
        .await
        .expect("update");
    assert_eq!(moved.status(), StatusCode::OK);

    assert!(!class_ids_in_sector(&app, informatique.id.0).await.contains(&l1.id.0));
    assert!(class_ids_in_sector(&app, gestion.id.0).await.contains(&l1.id.0));
}

#[tokio::test]
async fn malformed_ids_are_json_bad_requests() {
    let app = catalog_router(catalog());

    for (method, uri) in [
        ("GET", "/api/sectors/abc"),
        ("DELETE", "/api/sectors/99999999999999999999"),
        ("GET", "/api/sectors/x/classes"),
        ("GET", "/api/classes/1.5"),
    ] {
        let response = app
            .clone()
            .oneshot(empty_request(method, uri))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method} {uri}");
        let body = read_json_body(response).await;
        assert_eq!(body["kind"], "validation", "{method} {uri}");
        assert!(body["error"].as_str().is_some_and(|text| !text.is_empty()));
    }

    let update = app
        .oneshot(json_request(
            "PUT",
            "/api/classes/abc",
            json!({ "className": "L1", "description": "First year", "idSector": 1 }),
        ))
        .await
        .expect("update");
    assert_eq!(update.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json_body(update).await["kind"], "validation");
}

#[tokio::test]
async fn delete_handler_maps_missing_class_to_not_found() {
    let response = router::delete_class(State(catalog()), Ok(Path(3)))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
