use crate::models::{DeliveryZone, FeeTier};
use serde::{Deserialize, Serialize};
use tiffin_core::geo::{haversine_km, GeoPoint};

/// Delivery time model: fixed kitchen prep time plus a per-kilometer ride
/// estimate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EtaParams {
    pub prep_minutes: u32,
    pub minutes_per_km: f64,
}

impl Default for EtaParams {
    fn default() -> Self {
        Self {
            prep_minutes: 20,
            minutes_per_km: 5.0,
        }
    }
}

/// Result of a serviceability check for one coordinate.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryQuote {
    pub serviceable: bool,
    pub distance_km: f64,
    /// 0 when the point is outside the zone; a fee is only meaningful for
    /// serviceable points.
    pub fee: i32,
    pub eta_minutes: u32,
    pub message: String,
}

/// Answers "do we deliver here, and at what fee". Pure: the quote is a
/// function of the input point and the static zone configuration.
#[derive(Debug, Clone)]
pub struct DeliveryZoneEvaluator {
    zone: DeliveryZone,
    eta: EtaParams,
}

impl DeliveryZoneEvaluator {
    pub fn new(zone: DeliveryZone, eta: EtaParams) -> Self {
        Self { zone, eta }
    }

    pub fn zone(&self) -> &DeliveryZone {
        &self.zone
    }

    /// Great-circle distance from the zone center, rounded to two decimals.
    pub fn distance_km(&self, point: GeoPoint) -> f64 {
        haversine_km(self.zone.center, point)
    }

    pub fn evaluate(&self, point: GeoPoint) -> DeliveryQuote {
        let distance_km = self.distance_km(point);

        if distance_km > self.zone.outer_radius_km {
            tracing::debug!("Point {:.4},{:.4} is {} km out, beyond the {} km boundary",
                point.latitude, point.longitude, distance_km, self.zone.outer_radius_km);
            return DeliveryQuote {
                serviceable: false,
                distance_km,
                fee: 0,
                eta_minutes: 0,
                message: format!(
                    "We don't deliver to your area yet ({} km away) - coming soon!",
                    distance_km
                ),
            };
        }

        // Zone construction guarantees a contiguous table up to the
        // boundary, so a serviceable distance always matches one tier.
        let tier = self.matching_tier(distance_km);
        let fee = tier.fee.fee_at(distance_km);
        let eta_minutes =
            self.eta.prep_minutes + (distance_km * self.eta.minutes_per_km).ceil() as u32;

        DeliveryQuote {
            serviceable: true,
            distance_km,
            fee,
            eta_minutes,
            message: format!(
                "Delivery available: {} km away, fee {}, about {} minutes",
                distance_km, fee, eta_minutes
            ),
        }
    }

    /// A boundary distance belongs to the upper tier: `min_km` is inclusive
    /// and `max_km` exclusive, except the final tier which is closed at the
    /// outer boundary.
    fn matching_tier(&self, distance_km: f64) -> &FeeTier {
        let last = self.zone.tiers.len() - 1;
        self.zone
            .tiers
            .iter()
            .enumerate()
            .find(|(index, tier)| {
                distance_km >= tier.min_km
                    && (distance_km < tier.max_km || (*index == last && distance_km <= tier.max_km))
            })
            .map(|(_, tier)| tier)
            .expect("contiguous tier table covers every in-zone distance")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeeSchedule;

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

    #[test]
    fn test_near_point_gets_flat_fee() {
        // 0.01 degrees of latitude north of center: 1.11 km.
        let quote = evaluator().evaluate(GeoPoint::new(19.0828, 72.8826));
        assert!(quote.serviceable);
        assert_eq!(quote.distance_km, 1.11);
        assert_eq!(quote.fee, 20);
    }

    #[test]
    fn test_stepped_fee_beyond_first_band() {
        // 0.03 degrees north: 3.34 km, so 20 + 10 x ceil(1.34) = 40.
        let quote = evaluator().evaluate(GeoPoint::new(19.1028, 72.8826));
        assert!(quote.serviceable);
        assert_eq!(quote.distance_km, 3.34);
        assert_eq!(quote.fee, 40);
    }

    #[test]
    fn test_band_boundary_belongs_to_upper_tier() {
        // 0.018 degrees north lands exactly on the 2.0 km boundary; the
        // stepped tier owns it and charges its base fee.
        let quote = evaluator().evaluate(GeoPoint::new(19.0908, 72.8826));
        assert_eq!(quote.distance_km, 2.0);
        assert_eq!(quote.fee, 20);

        // A distinguishable upper tier proves the selection.
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
                    fee: FeeSchedule::Flat(35),
                },
            ],
        )
        .unwrap();
        let flat = DeliveryZoneEvaluator::new(zone, EtaParams::default());
        assert_eq!(flat.evaluate(GeoPoint::new(19.0908, 72.8826)).fee, 35);
    }

    #[test]
    fn test_outer_boundary_is_inclusive() {
        // 0.1079 degrees north: 12.0 km, exactly the boundary.
        let quote = evaluator().evaluate(GeoPoint::new(19.1807, 72.8826));
        assert_eq!(quote.distance_km, 12.0);
        assert!(quote.serviceable);
    }

    #[test]
    fn test_point_beyond_boundary_is_unserviceable() {
        let quote = evaluator().evaluate(GeoPoint::new(19.2028, 72.8826));
        assert!(!quote.serviceable);
        assert_eq!(quote.fee, 0);
        assert!(quote.message.contains("coming soon"));
    }

    #[test]
    fn test_fee_is_non_decreasing_with_distance() {
        let eval = evaluator();
        let mut last_fee = 0;
        for step in 0..11 {
            // Walk north in 0.01-degree (1.11 km) increments.
            let point = GeoPoint::new(19.0728 + 0.01 * f64::from(step), 72.8826);
            let quote = eval.evaluate(point);
            if !quote.serviceable {
                break;
            }
            assert!(
                quote.fee >= last_fee,
                "fee dropped from {} to {} at {} km",
                last_fee,
                quote.fee,
                quote.distance_km
            );
            last_fee = quote.fee;
        }
    }

    #[test]
    fn test_eta_grows_with_distance() {
        let eval = evaluator();
        let near = eval.evaluate(GeoPoint::new(19.0828, 72.8826));
        let far = eval.evaluate(GeoPoint::new(19.1028, 72.8826));
        assert!(far.eta_minutes > near.eta_minutes);
        // 20 prep + ceil(1.11 x 5.0) = 26.
        assert_eq!(near.eta_minutes, 26);
    }
}
