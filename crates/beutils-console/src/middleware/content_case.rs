// Content-Case negotiation middleware
//
// The server speaks snake_case. A client sending `Content-Case: json/camel`
// (or `_case=camel`) gets camelCase JSON back and may send camelCase JSON
// bodies and query parameter names; both are translated at the edge so
// handlers only ever see snake_case.

use std::rc::Rc;

use actix_http::h1;
use actix_service::forward_ready;
use actix_utils::future::{Ready, ok};
use actix_web::body::{self, BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Uri;
use actix_web::http::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderValue};
use actix_web::web::{Bytes, BytesMut};
use actix_web::{Error, HttpMessage, error};
use futures::StreamExt;
use futures::future::LocalBoxFuture;
use serde_json::Value;

use beutils_api::model::{CASE_QUERY_PARAM, CONTENT_CASE_HEADER, ContentCase};
use beutils_common::cases::{camelize_value, snakeify, snakeify_value};

// Content-Case negotiation middleware transformer
pub struct ContentCaseNegotiation;

impl<S, B> Transform<S, ServiceRequest> for ContentCaseNegotiation
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = ContentCaseMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ContentCaseMiddleware {
            service: Rc::new(service),
        })
    }
}

pub struct ContentCaseMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ContentCaseMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let case = requested_case(&req);

            if case.is_camel() {
                rewrite_query(&mut req);
                snakeify_request_body(&mut req).await?;
            }

            let res = service.call(req).await?;

            if case.is_camel() {
                camelize_response(res).await
            } else {
                Ok(res.map_into_boxed_body())
            }
        })
    }
}

/// Resolve the requested case from the `Content-Case` header or the `_case`
/// query parameter; snake_case is the default.
fn requested_case(req: &ServiceRequest) -> ContentCase {
    if let Some(header) = req.headers().get(CONTENT_CASE_HEADER)
        && let Ok(value) = header.to_str()
    {
        return ContentCase::from_header_value(value);
    }

    for pair in req.query_string().split('&') {
        if let Some((key, value)) = pair.split_once('=')
            && key == CASE_QUERY_PARAM
        {
            return ContentCase::from_query_value(value);
        }
    }

    ContentCase::default()
}

/// Snakeify query parameter names in place
fn rewrite_query(req: &mut ServiceRequest) {
    let query = req.query_string();
    if query.is_empty() {
        return;
    }

    let rewritten = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => format!("{}={}", snakeify(key), value),
            None => snakeify(pair),
        })
        .collect::<Vec<_>>()
        .join("&");
    if rewritten == query {
        return;
    }

    let path = req.path().to_string();
    let mut parts = req.head().uri.clone().into_parts();
    if let Ok(path_and_query) = format!("{path}?{rewritten}").parse() {
        parts.path_and_query = Some(path_and_query);
        if let Ok(uri) = Uri::from_parts(parts) {
            req.head_mut().uri = uri;
        }
    }
}

/// Buffer a camelCase JSON request body and replace it with its snake_case
/// translation. Non-JSON and unparsable bodies pass through untouched.
async fn snakeify_request_body(req: &mut ServiceRequest) -> Result<(), Error> {
    if !is_json(req.headers().get(CONTENT_TYPE)) {
        return Ok(());
    }

    let mut payload = req.take_payload();
    let mut buffer = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        buffer.extend_from_slice(&chunk?);
    }

    let translated = match serde_json::from_slice::<Value>(&buffer) {
        Ok(value) => Bytes::from(
            serde_json::to_vec(&snakeify_value(&value)).map_err(error::ErrorInternalServerError)?,
        ),
        // Let the handler's extractor produce the parse error
        Err(_) => buffer.freeze(),
    };

    req.headers_mut()
        .insert(CONTENT_LENGTH, HeaderValue::from(translated.len()));
    let (_, mut new_payload) = h1::Payload::create(true);
    new_payload.unread_data(translated);
    req.set_payload(actix_web::dev::Payload::from(new_payload));

    Ok(())
}

/// Buffer a JSON response body and camelize its keys
async fn camelize_response<B>(res: ServiceResponse<B>) -> Result<ServiceResponse<BoxBody>, Error>
where
    B: MessageBody + 'static,
{
    if !is_json(res.headers().get(CONTENT_TYPE)) {
        return Ok(res.map_into_boxed_body());
    }

    let (request, response) = res.into_parts();
    let (response, response_body) = response.into_parts();

    let buffered = body::to_bytes(response_body)
        .await
        .map_err(|_| error::ErrorInternalServerError("failed to buffer response body"))?;

    let translated = match serde_json::from_slice::<Value>(&buffered) {
        Ok(value) => Bytes::from(
            serde_json::to_vec(&camelize_value(&value)).map_err(error::ErrorInternalServerError)?,
        ),
        Err(_) => buffered,
    };

    let response = response.set_body(BoxBody::new(translated));
    Ok(ServiceResponse::new(request, response))
}

fn is_json(content_type: Option<&HeaderValue>) -> bool {
    content_type
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpRequest, HttpResponse, test, web};
    use serde_json::json;

    use super::*;

    async fn echo_body(body: web::Json<Value>) -> HttpResponse {
        HttpResponse::Ok().json(body.into_inner())
    }

    async fn echo_query(req: HttpRequest) -> HttpResponse {
        HttpResponse::Ok().json(json!({"query_string": req.query_string()}))
    }

    fn echo_app() -> App<
        impl actix_service::ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<BoxBody>,
            Error = Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(ContentCaseNegotiation)
            .route("/echo", web::post().to(echo_body))
            .route("/query", web::get().to(echo_query))
    }

    #[actix_web::test]
    async fn test_snake_case_passes_through_untouched() {
        let app = test::init_service(echo_app()).await;

        let req = test::TestRequest::post()
            .uri("/echo")
            .set_json(json!({"first_name": "Ada"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"first_name": "Ada"}));
    }

    #[actix_web::test]
    async fn test_camel_request_body_is_snakeified_and_response_camelized() {
        let app = test::init_service(echo_app()).await;

        let req = test::TestRequest::post()
            .uri("/echo")
            .insert_header((CONTENT_CASE_HEADER, "json/camel"))
            .set_json(json!({"firstName": "Ada", "homeCity": {"cityName": "London"}}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        // The handler echoes the snake_case body; the response is camelized
        // again on the way out.
        assert_eq!(
            body,
            json!({"firstName": "Ada", "homeCity": {"cityName": "London"}})
        );
    }

    #[actix_web::test]
    async fn test_camel_response_keys_are_translated() {
        // The handler returns snake_case; a camel client sees camelCase.
        async fn snake_handler() -> HttpResponse {
            HttpResponse::Ok().json(json!({"page_number": 1, "page_items": []}))
        }

        let app = test::init_service(
            App::new()
                .wrap(ContentCaseNegotiation)
                .route("/page", web::get().to(snake_handler)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/page")
            .insert_header((CONTENT_CASE_HEADER, "json/camel"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"pageNumber": 1, "pageItems": []}));

        // Without the header, keys stay snake_case
        let req = test::TestRequest::get().uri("/page").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"page_number": 1, "page_items": []}));
    }

    #[actix_web::test]
    async fn test_camel_query_parameters_are_snakeified() {
        let app = test::init_service(echo_app()).await;

        let req = test::TestRequest::get()
            .uri("/query?pageSize=5&_case=camel")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        let query = body["queryString"].as_str().expect("query string");
        assert!(query.contains("page_size=5"), "query was {query}");
    }
}
