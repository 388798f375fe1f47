use axum::Json;

use common::types::Greeting;

#[utoipa::path(
    get, path = "/hello-world", tag = "meta",
    responses((status = 200, description = "Greeting"))
)]
pub async fn hello_world() -> Json<Greeting> {
    Json(Greeting { messages: "HELLO World!" })
}

#[utoipa::path(
    get, path = "/", tag = "meta",
    responses((status = 200, description = "Welcome message"))
)]
pub async fn root() -> Json<Greeting> {
    Json(Greeting { messages: "Welcome to the bookstore" })
}
