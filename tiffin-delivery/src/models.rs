use serde::{Deserialize, Serialize};
use tiffin_core::geo::GeoPoint;

/// How a tier charges within its distance band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum FeeSchedule {
    /// Fixed fee across the whole band.
    Flat(i32),
    /// `base + step x ceil(km - from_km)`: the fee grows with every started
    /// kilometer beyond `from_km`.
    Stepped { base: i32, step: i32, from_km: f64 },
}

impl FeeSchedule {
    pub fn fee_at(&self, distance_km: f64) -> i32 {
        match self {
            FeeSchedule::Flat(fee) => *fee,
            FeeSchedule::Stepped {
                base,
                step,
                from_km,
            } => {
                let started_km = (distance_km - from_km).max(0.0).ceil() as i32;
                base + step * started_km
            }
        }
    }
}

/// One contiguous distance band. `min_km` is inclusive, `max_km` exclusive,
/// except the zone's final tier which is closed at the outer boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeeTier {
    pub min_km: f64,
    pub max_km: f64,
    pub fee: FeeSchedule,
}

/// The serviced area: a center point, an outer boundary, and a tier table
/// covering the full 0..=boundary range with no gaps and no overlaps.
///
/// Loaded from configuration and treated as read-only by the evaluator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryZone {
    pub center: GeoPoint,
    pub outer_radius_km: f64,
    pub tiers: Vec<FeeTier>,
}

impl DeliveryZone {
    /// Build a zone, rejecting malformed tier tables up front so `evaluate`
    /// never has to handle an unmatched distance.
    pub fn new(
        center: GeoPoint,
        outer_radius_km: f64,
        tiers: Vec<FeeTier>,
    ) -> Result<Self, ZoneConfigError> {
        if tiers.is_empty() {
            return Err(ZoneConfigError::NoTiers);
        }
        if outer_radius_km <= 0.0 {
            return Err(ZoneConfigError::InvalidBoundary(outer_radius_km));
        }

        let mut expected_min = 0.0;
        for tier in &tiers {
            if (tier.min_km - expected_min).abs() > f64::EPSILON {
                return Err(ZoneConfigError::Discontinuity {
                    expected: expected_min,
                    found: tier.min_km,
                });
            }
            if tier.max_km <= tier.min_km {
                return Err(ZoneConfigError::EmptyBand {
                    min_km: tier.min_km,
                    max_km: tier.max_km,
                });
            }
            expected_min = tier.max_km;
        }

        if (expected_min - outer_radius_km).abs() > f64::EPSILON {
            return Err(ZoneConfigError::BoundaryMismatch {
                boundary: outer_radius_km,
                last_tier_end: expected_min,
            });
        }

        Ok(Self {
            center,
            outer_radius_km,
            tiers,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ZoneConfigError {
    #[error("Zone has no fee tiers")]
    NoTiers,

    #[error("Zone boundary must be positive, got {0}")]
    InvalidBoundary(f64),

    #[error("Tier table has a gap or overlap: expected a tier starting at {expected} km, found {found} km")]
    Discontinuity { expected: f64, found: f64 },

    #[error("Tier band is empty or inverted: {min_km}..{max_km} km")]
    EmptyBand { min_km: f64, max_km: f64 },

    #[error("Last tier ends at {last_tier_end} km but the zone boundary is {boundary} km")]
    BoundaryMismatch { boundary: f64, last_tier_end: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center() -> GeoPoint {
        GeoPoint::new(19.0728, 72.8826)
    }

    #[test]
    fn test_valid_zone_is_accepted() {
        let zone = DeliveryZone::new(
            center(),
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
        );
        assert!(zone.is_ok());
    }

    #[test]
    fn test_gap_in_tier_table_is_rejected() {
        let result = DeliveryZone::new(
            center(),
            12.0,
            vec![
                FeeTier {
                    min_km: 0.0,
                    max_km: 2.0,
                    fee: FeeSchedule::Flat(20),
                },
                FeeTier {
                    min_km: 3.0,
                    max_km: 12.0,
                    fee: FeeSchedule::Flat(40),
                },
            ],
        );
        assert!(matches!(result, Err(ZoneConfigError::Discontinuity { .. })));
    }

    #[test]
    fn test_overlapping_tiers_are_rejected() {
        let result = DeliveryZone::new(
            center(),
            12.0,
            vec![
                FeeTier {
                    min_km: 0.0,
                    max_km: 3.0,
                    fee: FeeSchedule::Flat(20),
                },
                FeeTier {
                    min_km: 2.0,
                    max_km: 12.0,
                    fee: FeeSchedule::Flat(40),
                },
            ],
        );
        assert!(matches!(result, Err(ZoneConfigError::Discontinuity { .. })));
    }

    #[test]
    fn test_tier_table_must_reach_the_boundary() {
        let result = DeliveryZone::new(
            center(),
            12.0,
            vec![FeeTier {
                min_km: 0.0,
                max_km: 10.0,
                fee: FeeSchedule::Flat(20),
            }],
        );
        assert!(matches!(result, Err(ZoneConfigError::BoundaryMismatch { .. })));
    }

    #[test]
    fn test_stepped_fee_charges_per_started_km() {
        let fee = FeeSchedule::Stepped {
            base: 20,
            step: 10,
            from_km: 2.0,
        };
        assert_eq!(fee.fee_at(2.0), 20);
        assert_eq!(fee.fee_at(2.01), 30);
        assert_eq!(fee.fee_at(3.0), 30);
        assert_eq!(fee.fee_at(3.4), 40);
    }
}
