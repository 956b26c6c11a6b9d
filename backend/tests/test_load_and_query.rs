//! End-to-end: config file -> CSV load -> HTTP lookups.

mod common;

use actix_web::{http::StatusCode, test, web, App};
use common::{Workspace, PEOPLE_CSV};
use csvdex_api::models::ErrorResponse;
use csvdex_api::routes::configure_routes;
use csvdex_core::IndexReader;
use csvdex_server::lifecycle;

macro_rules! app_for {
    ($reader:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($reader))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_lookup_by_any_searchable_combination() {
    let ws = Workspace::new();
    let csv = ws.write("people.csv", PEOPLE_CSV);
    let config = ws.config(
        r#"store = "people"
searchable_columns = ["id", "city"]"#,
    );

    let loaded = lifecycle::load(&config, &csv).unwrap();
    assert_eq!(loaded.summary.columns, vec!["id", "name", "city"]);
    assert_eq!(loaded.summary.rows, 3);
    assert_eq!(loaded.summary.keys, 9);

    let app = app_for!(loaded.reader());

    let req = test::TestRequest::get().uri("/?id=2").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body.as_ref(), br#"{"id":"2","name":"Bob","city":"LA"}"#);

    // Parameter order in the query string does not matter
    let req = test::TestRequest::get().uri("/?city=NY&id=3").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body.as_ref(), br#"{"id":"3","name":"Cid","city":"NY"}"#);

    // Non-unique city: the last row written wins
    let req = test::TestRequest::get().uri("/?city=NY").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body.as_ref(), br#"{"id":"3","name":"Cid","city":"NY"}"#);
}

#[actix_web::test]
async fn test_non_searchable_column_is_not_queryable() {
    let ws = Workspace::new();
    let csv = ws.write("people.csv", PEOPLE_CSV);
    let config = ws.config(
        r#"store = "people"
searchable_columns = ["id"]"#,
    );

    let loaded = lifecycle::load(&config, &csv).unwrap();
    let app = app_for!(loaded.reader());

    let req = test::TestRequest::get().uri("/?name=Ann").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, r#"Invalid parameters, try with ["id"]"#);
}

#[actix_web::test]
async fn test_empty_searchable_list_indexes_every_column() {
    let ws = Workspace::new();
    let csv = ws.write("people.csv", PEOPLE_CSV);
    let config = ws.config(
        r#"store = "people"
searchable_columns = []"#,
    );

    let loaded = lifecycle::load(&config, &csv).unwrap();
    assert_eq!(loaded.summary.searchable_columns, vec!["id", "name", "city"]);
    assert_eq!(loaded.summary.keys, 3 * 7);

    let app = app_for!(loaded.reader());
    let req = test::TestRequest::get().uri("/?name=Ann&city=NY").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_explicit_columns_treat_first_line_as_data() {
    let ws = Workspace::new();
    let csv = ws.write("people.csv", "1,Ann,NY\n2,Bob\n");
    let config = ws.config(
        r#"store = "people"
columns = ["id", "name", "city"]
searchable_columns = ["id"]"#,
    );

    let loaded = lifecycle::load(&config, &csv).unwrap();
    assert_eq!(loaded.summary.rows, 2);

    let app = app_for!(loaded.reader());
    let req = test::TestRequest::get().uri("/?id=2").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body.as_ref(), br#"{"id":"2","name":"Bob","city":""}"#);
}

#[actix_web::test]
async fn test_serve_reopens_loaded_store() {
    let ws = Workspace::new();
    let csv = ws.write("people.csv", PEOPLE_CSV);
    let config = ws.config(
        r#"store = "people"
searchable_columns = ["id", "city"]"#,
    );

    drop(lifecycle::load(&config, &csv).unwrap());

    let reader: IndexReader = lifecycle::open_reader(&config).unwrap();
    assert_eq!(reader.searchable_columns(), ["id", "city"]);

    let app = app_for!(reader);
    let req = test::TestRequest::get().uri("/?id=1&city=NY").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body.as_ref(), br#"{"id":"1","name":"Ann","city":"NY"}"#);

    let req = test::TestRequest::get().uri("/?id=1&city=LA").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.key.as_deref(), Some("id_1_city_LA"));
}
