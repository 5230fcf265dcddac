use std::net::SocketAddr;
use std::sync::Arc;
use tiffin_api::{app, AppState};
use tiffin_cart::CartStore;
use tiffin_delivery::DeliveryZoneEvaluator;
use tiffin_order::{CheckoutOrchestrator, MockOrderPlacementAdapter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tiffin_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = tiffin_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Tiffin API on port {}", config.server.port);

    // Delivery zone is validated once at startup; a malformed tier table
    // refuses to boot instead of misquoting fees later.
    let zone = config
        .delivery
        .zone()
        .expect("Invalid delivery zone configuration");
    let evaluator = DeliveryZoneEvaluator::new(zone, config.delivery.eta());

    // Redis Connection
    let cart_store = tiffin_store::RedisCartStore::new(&config.redis.url)
        .await
        .expect("Failed to connect to Redis");
    let cart_store: Arc<dyn CartStore> = Arc::new(cart_store);

    // Order placement is an external collaborator; the adapter seam is
    // swapped for the real endpoint client at deployment.
    let orchestrator = Arc::new(CheckoutOrchestrator::new(
        evaluator.clone(),
        Arc::new(MockOrderPlacementAdapter),
    ));

    // Notification Broadcast Channel
    let (events_tx, _) = tokio::sync::broadcast::channel(100);

    let app_state = AppState {
        cart_store,
        orchestrator,
        evaluator,
        events_tx,
        category_minimums: config.storefront.category_minimums.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
