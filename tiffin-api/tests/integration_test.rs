use std::sync::Arc;
use std::time::Duration;
use tiffin_cart::{CartRegistry, CartStore, InMemoryCartStore, NewCartItem};
use tiffin_core::geo::GeoPoint;
use tiffin_core::location::{acquire_location, LocationOutcome, LocationProvider, StaticLocationProvider};
use tiffin_delivery::{DeliveryZone, DeliveryZoneEvaluator, EtaParams, FeeSchedule, FeeTier};
use tiffin_order::{
    CheckoutError, CheckoutOrchestrator, CustomerDetails, MockOrderPlacementAdapter,
    PlacedOrderStatus,
};
use tiffin_shared::Masked;

fn evaluator() -> DeliveryZoneEvaluator {
    let zone = DeliveryZone::new(
        GeoPoint::new(19.0728, 72.8826),
        12.0,
        vec![
            FeeTier {
                min_km: 0.0,
                max_km: 2.0,
                fee: FeeSchedule::Flat(20),
            },
            FeeTier {
                min_km: 2.0,
                max_km: 12.0,
                fee: FeeSchedule::Stepped {
                    base: 20,
                    step: 10,
                    from_km: 2.0,
                },
            },
        ],
    )
    .unwrap();

    DeliveryZoneEvaluator::new(zone, EtaParams::default())
}

fn orchestrator() -> CheckoutOrchestrator {
    CheckoutOrchestrator::new(evaluator(), Arc::new(MockOrderPlacementAdapter))
}

fn thali(product_id: &str, price: i32) -> NewCartItem {
    NewCartItem {
        product_id: product_id.to_string(),
        name: format!("Thali {}", product_id),
        price,
        image_url: None,
        category_id: "thalis".to_string(),
        vendor_id: "v1".to_string(),
        vendor_name: "Kamala's Kitchen".to_string(),
    }
}

fn customer(name: &str) -> CustomerDetails {
    CustomerDetails {
        name: name.to_string(),
        phone: Masked::new("+91 98200 12345".to_string()),
        address: "14 Hill Road, Bandra West".to_string(),
        email: Some(Masked::new("asha@example.com".to_string())),
    }
}

// 1.11 km north of the zone center.
fn nearby() -> GeoPoint {
    GeoPoint::new(19.0828, 72.8826)
}

#[tokio::test]
async fn test_browse_to_placed_order_flow() {
    let store = InMemoryCartStore::new();
    let orchestrator = orchestrator();

    // Build the cart: two thalis and a side from the same kitchen.
    let mut registry = CartRegistry::new();
    assert!(registry.add_to_cart(thali("t1", 180), "Thalis"));
    assert!(registry.add_to_cart(thali("t1", 180), "Thalis"));
    assert!(registry.add_to_cart(thali("side-1", 60), "Thalis"));
    store.save("session-1", &registry.snapshot()).await.unwrap();

    // Reload the session the way a fresh request does.
    let snapshot = store.load("session-1").await.unwrap().unwrap();
    let mut registry = CartRegistry::from_snapshot(snapshot);
    assert_eq!(registry.total_price("thalis"), 420);

    // Freeze and submit.
    let request = orchestrator
        .prepare_checkout(&registry, "thalis", nearby())
        .unwrap();
    assert_eq!(request.subtotal, 420);
    assert_eq!(request.delivery_fee, 20);
    assert_eq!(request.total, 440);

    let placed = orchestrator
        .commit_checkout(&mut registry, &request, &customer("Asha"))
        .await
        .unwrap();
    assert_eq!(placed.status, PlacedOrderStatus::Received);

    // The category cart is gone from the registry and from storage.
    assert!(registry.cart("thalis").is_none());
    store.save("session-1", &registry.snapshot()).await.unwrap();
    let snapshot = store.load("session-1").await.unwrap().unwrap();
    assert!(snapshot.carts.is_empty());
}

#[tokio::test]
async fn test_vendor_conflict_leaves_other_categories_alone() {
    let mut registry = CartRegistry::new();
    registry.add_to_cart(thali("t1", 180), "Thalis");

    // A second kitchen can't sell into the thalis cart...
    let intruder = NewCartItem {
        vendor_id: "v2".to_string(),
        vendor_name: "Spice Route".to_string(),
        ..thali("t9", 150)
    };
    assert!(!registry.add_to_cart(intruder.clone(), "Thalis"));

    // ...but opens its own cart in another category.
    let dessert = NewCartItem {
        category_id: "desserts".to_string(),
        ..intruder
    };
    assert!(registry.add_to_cart(dessert, "Desserts"));

    assert_eq!(registry.cart("thalis").unwrap().vendor_id, "v1");
    assert_eq!(registry.cart("desserts").unwrap().vendor_id, "v2");
}

#[tokio::test]
async fn test_failed_placement_keeps_cart_for_retry() {
    let orchestrator = orchestrator();
    let mut registry = CartRegistry::new();
    registry.add_to_cart(thali("t1", 180), "Thalis");

    let request = orchestrator
        .prepare_checkout(&registry, "thalis", nearby())
        .unwrap();

    let failed = orchestrator
        .commit_checkout(&mut registry, &request, &customer("fail-placement"))
        .await;
    assert!(matches!(failed, Err(CheckoutError::PlacementFailed(_))));
    assert_eq!(registry.total_items(Some("thalis")), 1);

    // Same frozen request, second attempt.
    let placed = orchestrator
        .commit_checkout(&mut registry, &request, &customer("Asha"))
        .await
        .unwrap();
    assert_eq!(placed.status, PlacedOrderStatus::Received);
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_checkout_rejections_by_kind() {
    let orchestrator = orchestrator();

    // Empty cart.
    let registry = CartRegistry::new();
    assert!(matches!(
        orchestrator.prepare_checkout(&registry, "thalis", nearby()),
        Err(CheckoutError::EmptyCart(_))
    ));

    // Below the default minimum of 100.
    let mut registry = CartRegistry::new();
    registry.add_to_cart(thali("t1", 80), "Thalis");
    assert!(matches!(
        orchestrator.prepare_checkout(&registry, "thalis", nearby()),
        Err(CheckoutError::BelowMinimumOrder {
            subtotal: 80,
            minimum: 100,
        })
    ));

    // Outside the zone: 0.2 degrees north is about 22 km out.
    registry.add_to_cart(thali("t2", 180), "Thalis");
    assert!(matches!(
        orchestrator.prepare_checkout(&registry, "thalis", GeoPoint::new(19.2728, 72.8826)),
        Err(CheckoutError::OutsideServiceArea { .. })
    ));
}

#[tokio::test]
async fn test_location_timeout_does_not_block_cart_mutations() {
    struct NeverResolves;

    #[async_trait::async_trait]
    impl LocationProvider for NeverResolves {
        async fn current_location(
            &self,
        ) -> Result<GeoPoint, tiffin_core::location::LocationDenied> {
            std::future::pending().await
        }
    }

    let outcome = acquire_location(&NeverResolves, Duration::from_millis(50)).await;
    assert_eq!(outcome, LocationOutcome::TimedOut);

    // The cart experience continues without a coordinate.
    let mut registry = CartRegistry::new();
    assert!(registry.add_to_cart(thali("t1", 180), "Thalis"));
    assert_eq!(registry.total_items(None), 1);

    // Once the customer shares a location, checkout proceeds.
    let provider = StaticLocationProvider { point: nearby() };
    let outcome = acquire_location(&provider, Duration::from_secs(1)).await;
    let point = outcome.point().unwrap();

    let request = orchestrator()
        .prepare_checkout(&registry, "thalis", point)
        .unwrap();
    assert_eq!(request.delivery_fee, 20);
}

#[tokio::test]
async fn test_server_fee_quote_matches_tier_table() {
    let evaluator = evaluator();

    // 3.34 km out: 20 + 10 x ceil(1.34) = 40.
    let quote = evaluator.evaluate(GeoPoint::new(19.1028, 72.8826));
    assert!(quote.serviceable);
    assert_eq!(quote.fee, 40);
    assert_eq!(quote.distance_km, 3.34);

    // Outside the boundary there is no fee, only a refusal message.
    let quote = evaluator.evaluate(GeoPoint::new(19.2728, 72.8826));
    assert!(!quote.serviceable);
    assert_eq!(quote.fee, 0);
}
