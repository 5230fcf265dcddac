pub mod evaluator;
pub mod models;

pub use evaluator::{DeliveryQuote, DeliveryZoneEvaluator, EtaParams};
pub use models::{DeliveryZone, FeeSchedule, FeeTier, ZoneConfigError};
