use bevy::log::{debug, warn};

use crate::physics::traits::{FlightVehicle, RendererBounds};

/// Where a wingspan estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WingspanSource {
    /// Measured from renderer geometry
    Measured,
    /// No usable renderer was found, default substituted
    NoGeometry,
    /// Measurement exceeded the sanity ceiling, default substituted
    Implausible,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingspanEstimate {
    pub wingspan: f64,
    pub source: WingspanSource,
}

/// Measures a vehicle's lateral extent from its parts' renderer bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingspanEstimator {
    pub default_wingspan: f64,
    pub max_plausible_wingspan: f64,
}

impl WingspanEstimator {
    pub fn new(default_wingspan: f64, max_plausible_wingspan: f64) -> Self {
        Self {
            default_wingspan,
            max_plausible_wingspan,
        }
    }

    /// Renderers that describe airframe: enabled, non-FX, with a finite box.
    pub fn is_usable(bounds: &RendererBounds) -> bool {
        bounds.enabled && !bounds.kind.is_fx() && bounds.aabb.is_well_formed()
    }

    /// Full scan of every renderer on every part. Expensive; callers throttle it.
    pub fn estimate<V: FlightVehicle + ?Sized>(&self, vehicle: &V) -> WingspanEstimate {
        let world_to_local = vehicle.local_frame().inverse();
        let mut min_lateral = f64::INFINITY;
        let mut max_lateral = f64::NEG_INFINITY;
        let mut usable = 0usize;

        vehicle.for_each_renderer(&mut |_part, bounds| {
            if !Self::is_usable(bounds) {
                return;
            }
            usable += 1;
            for corner in bounds.aabb.corners() {
                // Local X is the lateral axis
                let lateral = world_to_local.transform_point(&corner).x;
                min_lateral = min_lateral.min(lateral);
                max_lateral = max_lateral.max(lateral);
            }
        });

        if usable == 0 {
            debug!(
                "No renderer geometry on vehicle {:?}, using default wingspan {:.2} m",
                vehicle.id(),
                self.default_wingspan
            );
            return self.fallback(WingspanSource::NoGeometry);
        }

        let wingspan = (max_lateral - min_lateral).abs();
        if !wingspan.is_finite() || wingspan > self.max_plausible_wingspan {
            warn!(
                "Measured wingspan {:.1} m on vehicle {:?} exceeds {:.0} m, using default {:.2} m",
                wingspan,
                vehicle.id(),
                self.max_plausible_wingspan,
                self.default_wingspan
            );
            return self.fallback(WingspanSource::Implausible);
        }

        debug!(
            "Vehicle {:?} wingspan {:.2} m from {} renderers",
            vehicle.id(),
            wingspan,
            usable
        );
        WingspanEstimate {
            wingspan,
            source: WingspanSource::Measured,
        }
    }

    fn fallback(&self, source: WingspanSource) -> WingspanEstimate {
        WingspanEstimate {
            wingspan: self.default_wingspan,
            source,
        }
    }
}
