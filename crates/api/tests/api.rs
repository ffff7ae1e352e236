use bytes::Bytes;
use http::{Method, Request, Response, StatusCode};
use http_body_util::{BodyExt, Full};
use indoc::indoc;
use serde_json::{Value, json};
use tutorial_web::{ResponseBody, Server};

fn server() -> Server {
    Server::builder().router(tutorial_api::router().unwrap()).address("127.0.0.1:8000").build().unwrap()
}

async fn send(method: Method, uri: &str, body: &'static str) -> Response<ResponseBody> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from_static(body.as_bytes())))
        .unwrap();
    server().handle(request).await
}

async fn get(uri: &str) -> (StatusCode, Value) {
    into_json(send(Method::GET, uri, "").await).await
}

async fn into_json(response: Response<ResponseBody>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn error_types(body: &Value) -> Vec<(&str, Vec<&str>)> {
    body["detail"]
        .as_array()
        .unwrap()
        .iter()
        .map(|detail| {
            let loc = detail["loc"].as_array().unwrap().iter().map(|part| part.as_str().unwrap()).collect();
            (detail["type"].as_str().unwrap(), loc)
        })
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_first_steps() {
    assert_eq!(get("/").await, (StatusCode::OK, json!({ "message": "Hello world" })));
    assert_eq!(get("/hola").await, (StatusCode::OK, json!({ "message": "Estas en el endpoint 'hola'" })));
    assert_eq!(get("/testing/int").await, (StatusCode::OK, json!(3)));
    assert_eq!(get("/testing/str").await, (StatusCode::OK, json!("testing")));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_path_parameter() {
    assert_eq!(get("/path/parameters/hello%20there").await, (StatusCode::OK, json!({ "path_parameter": "hello there" })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_models() {
    assert_eq!(
        get("/models/alexnet").await,
        (StatusCode::OK, json!({ "model_name": "alexnet", "message": "Deep Learning Model!" }))
    );
    assert_eq!(
        get("/models/lenet").await,
        (StatusCode::OK, json!({ "model_name": "lenet", "message": "LeCNN all the images" }))
    );
    assert_eq!(
        get("/models/resnet").await,
        (StatusCode::OK, json!({ "model_name": "resnet", "message": "Have some residuals" }))
    );

    let (status, body) = get("/models/vgg").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({
            "detail": [{
                "type": "enum",
                "loc": ["path", "model_name"],
                "msg": "Input should be 'alexnet', 'resnet' or 'lenet'",
                "input": "vgg",
                "ctx": { "expected": "'alexnet', 'resnet' or 'lenet'" }
            }]
        })
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_list_items() {
    let foo = json!({ "item_name": "Foo" });
    let bar = json!({ "item_name": "Bar" });
    let baz = json!({ "item_name": "Baz" });

    assert_eq!(get("/items/").await, (StatusCode::OK, json!([foo, bar, baz])));
    assert_eq!(get("/items/?skip=0&limit=2").await, (StatusCode::OK, json!([foo, bar])));
    assert_eq!(get("/items/?skip=1").await, (StatusCode::OK, json!([bar, baz])));
    assert_eq!(get("/items/?skip=5").await, (StatusCode::OK, json!([])));

    let (status, body) = get("/items/?skip=one&limit=two").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_types(&body), vec![("int_parsing", vec!["query", "skip"]), ("int_parsing", vec!["query", "limit"])]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_read_item() {
    assert_eq!(get("/items/foo").await, (StatusCode::OK, json!({ "item_id": "foo" })));
    assert_eq!(get("/items/42?q=search").await, (StatusCode::OK, json!({ "item_id": 42, "q": "search" })));

    let (status, body) = get("/items/foo?q=search").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_types(&body), vec![("int_parsing", vec!["path", "item_id"])]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_another_item() {
    let description = "This is an amazing item that has a long description";

    assert_eq!(get("/another/items/42?short=yes").await, (StatusCode::OK, json!({ "item_id": "42" })));
    assert_eq!(get("/another/items/42?short=ON").await, (StatusCode::OK, json!({ "item_id": "42" })));
    assert_eq!(
        get("/another/items/42?short=false").await,
        (StatusCode::OK, json!({ "item_id": "42", "description": description }))
    );
    assert_eq!(
        get("/another/items/42?q=abc").await,
        (StatusCode::OK, json!({ "item_id": "42", "q": "abc", "description": description }))
    );

    let (status, body) = get("/another/items/42?short=maybe").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_types(&body), vec![("bool_parsing", vec!["query", "short"])]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_required_query_parameter() {
    assert_eq!(get("/required/query/parameter?needy=sooo").await, (StatusCode::OK, json!({ "needy": "sooo" })));

    let (status, body) = get("/required/query/parameter").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({ "detail": [{ "type": "missing", "loc": ["query", "needy"], "msg": "Field required", "input": null }] })
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_create_item() {
    let body = indoc! {r#"
        {
            "name": "Foo",
            "price": 10,
            "tax": 2
        }
    "#};
    let (status, body) = into_json(send(Method::POST, "/items", body).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "name": "Foo", "description": null, "price": 10.0, "tax": 2.0, "price_with_tag": 12.0 })
    );

    let (status, body) = into_json(send(Method::POST, "/items", r#"{"name":"Bar","price":"3.5"}"#).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "name": "Bar", "description": null, "price": 3.5, "tax": null }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_create_item_invalid() {
    let (status, body) = into_json(send(Method::POST, "/items", r#"{"description":3,"price":"free"}"#).await).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        error_types(&body),
        vec![
            ("missing", vec!["body", "name"]),
            ("string_type", vec!["body", "description"]),
            ("float_parsing", vec!["body", "price"]),
        ]
    );

    let (status, body) = into_json(send(Method::POST, "/items", "").await).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_types(&body), vec![("missing", vec!["body"])]);

    let (status, body) = into_json(send(Method::POST, "/items", "[1, 2]").await).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_types(&body), vec![("model_attributes_type", vec!["body"])]);

    let (status, body) = into_json(send(Method::POST, "/items", r#"{"name": x}"#).await).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "json_invalid");
    assert_eq!(body["detail"][0]["loc"], json!(["body", 9]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_read_items_validations() {
    let items = json!([{ "item_id": "Foo" }, { "item_id": "Bar" }]);

    assert_eq!(get("/read-items/").await, (StatusCode::OK, json!({ "items": items })));
    assert_eq!(get("/read-items/?q=abc").await, (StatusCode::OK, json!({ "items": items, "q": "abc" })));

    let (status, body) = get("/read-items/?q=ab").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["msg"], "String should have at least 3 characters");

    let long = format!("/read-items/?q={}", "a".repeat(51));
    let (status, body) = get(&long).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_types(&body), vec![("string_too_long", vec!["query", "q"])]);

    for path in ["/read-items-2/", "/read-items-3/"] {
        let (status, body) = get(path).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{path}");
        assert_eq!(error_types(&body), vec![("missing", vec!["query", "q"])], "{path}");

        let (status, body) = get(&format!("{path}?q=ab")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{path}");
        assert_eq!(error_types(&body), vec![("string_too_short", vec!["query", "q"])], "{path}");

        assert_eq!(get(&format!("{path}?q=abc")).await, (StatusCode::OK, json!({ "items": items, "q": "abc" })), "{path}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_read_items_list() {
    assert_eq!(get("/read-items-4/?q=foo&q=bar").await, (StatusCode::OK, json!({ "q": ["foo", "bar"] })));
    assert_eq!(get("/read-items-4/").await, (StatusCode::OK, json!({ "q": null })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_path_validation() {
    assert_eq!(get("/path-validation/7").await, (StatusCode::OK, json!({ "item_id": 7 })));
    assert_eq!(get("/path-validation/7?item-query=abc").await, (StatusCode::OK, json!({ "item_id": 7, "q": "abc" })));
    assert_eq!(get("/path-validation/7?q=abc").await, (StatusCode::OK, json!({ "item_id": 7 })));

    let (status, body) = get("/path-validation/seven").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_types(&body), vec![("int_parsing", vec!["path", "item_id"])]);

    assert_eq!(get("/path-validation-2/7?q=abc").await, (StatusCode::OK, json!({ "item_id": 7, "q": "abc" })));

    let (status, body) = get("/path-validation-2/seven").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_types(&body), vec![("int_parsing", vec!["path", "item_id"]), ("missing", vec!["query", "q"])]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_dispatch_errors() {
    let response = send(Method::GET, "/read-items?q=abc", "").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[http::header::LOCATION], "/read-items/?q=abc");

    assert_eq!(
        into_json(send(Method::DELETE, "/", "").await).await,
        (StatusCode::METHOD_NOT_ALLOWED, json!({ "detail": "Method Not Allowed" }))
    );
    assert_eq!(get("/nope").await, (StatusCode::NOT_FOUND, json!({ "detail": "Not Found" })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_head_answers_get_routes() {
    let response = send(Method::HEAD, "/", "").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[http::header::CONTENT_TYPE], "application/json");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());

    let response = send(Method::HEAD, "/models/vgg", "").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = send(Method::HEAD, "/items", "").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn test_openapi_document() {
    let (status, doc) = get("/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["openapi"], "3.1.0");
    assert_eq!(doc["info"]["title"], "tutorial-api");

    let paths = doc["paths"].as_object().unwrap();
    assert_eq!(paths.len(), 17);
    assert_eq!(doc["paths"]["/"]["get"]["tags"], json!(["testing"]));
    assert_eq!(doc["paths"]["/items"]["post"]["tags"], json!(["Request Body"]));
    assert_eq!(doc["paths"]["/models/{model_name}"]["get"]["parameters"][0]["schema"]["enum"], json!(["alexnet", "resnet", "lenet"]));
    assert_eq!(doc["paths"]["/path-validation/{item_id}"]["get"]["parameters"][1]["name"], "item-query");
    assert_eq!(doc["paths"]["/items/"]["get"]["parameters"][1]["schema"], json!({ "type": "integer", "default": 10 }));
    assert_eq!(
        doc["paths"]["/items"]["post"]["requestBody"]["content"]["application/json"]["schema"]["required"],
        json!(["name", "price"])
    );
}
