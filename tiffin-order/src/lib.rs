pub mod flow;
pub mod models;
pub mod orchestrator;

pub use flow::{CheckoutFlow, CheckoutState, FlowError};
pub use models::{CheckoutRequest, CustomerDetails, PlacedOrder, PlacedOrderStatus};
pub use orchestrator::{
    CheckoutError, CheckoutOrchestrator, MockOrderPlacementAdapter, OrderPlacementAdapter,
};
