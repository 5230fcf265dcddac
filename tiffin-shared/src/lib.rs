pub mod events;
pub mod pii;

pub use events::StorefrontEvent;
pub use pii::Masked;
