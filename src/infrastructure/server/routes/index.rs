use axum::response::Html;

const WELCOME_PAGE: &str = r#"<html>
    <head>
        <title>Calendar Booking AI Agent</title>
    </head>
    <body>
        <h1>Welcome to the Calendar Booking AI Agent Backend!</h1>
        <p>This is the backend for your chat interface.</p>
        <p>Send messages to <code>POST /chat</code> or browse the API at <a href="/swagger-ui">/swagger-ui</a>.</p>
    </body>
</html>
"#;

#[utoipa::path(
    get,
    path = "/",
    tag = "meta",
    responses((status = 200, description = "Welcome page", content_type = "text/html", body = String))
)]
pub async fn index_handler() -> Html<&'static str> {
    Html(WELCOME_PAGE)
}
