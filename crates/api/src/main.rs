use std::env;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;
use tutorial_web::Server;

const DEFAULT_ADDRESS: &str = "127.0.0.1:8000";

// curl -v http://127.0.0.1:8000/items/?skip=0&limit=2
// curl -v -H 'Content-Type: application/json' -d '{"name":"Foo","price":10,"tax":2}' http://127.0.0.1:8000/items
#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let address = env::args().nth(1).unwrap_or_else(|| DEFAULT_ADDRESS.to_owned());

    let router = match tutorial_api::router() {
        Ok(router) => router,
        Err(e) => {
            error!(cause = %e, "failed to build router");
            return;
        }
    };

    let server = match Server::builder().router(router).address(address.as_str()).build() {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, address = %address, "failed to build server");
            return;
        }
    };

    info!(address = %address, docs = tutorial_api::OPENAPI_PATH, "tutorial api is starting");
    if let Err(e) = server.start().await {
        error!(cause = %e, "server stopped");
    }
}
