use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wrapper for customer contact fields (phone, e-mail) that masks the value
/// in Debug/Display output so it never lands in logs verbatim.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Masked<T>(T);

impl<T> Masked<T> {
    pub fn new(value: T) -> Self {
        Masked(value)
    }

    /// Access the real value, e.g. when building the order-placement payload.
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Masked<T> {
    fn from(value: T) -> Self {
        Masked(value)
    }
}

impl<T: fmt::Display> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: fmt::Display> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialization passes the real value through: the order-placement
        // endpoint needs the actual phone number. Masking guards log macros
        // like tracing::info!("{:?}", customer), not the wire format.
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_is_masked() {
        let phone = Masked::new("+91 98200 12345".to_string());
        assert_eq!(format!("{:?}", phone), "********");
        assert_eq!(format!("{}", phone), "********");
    }

    #[test]
    fn test_serialization_passes_through() {
        let phone = Masked::new("+91 98200 12345".to_string());
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"+91 98200 12345\"");
    }
}
