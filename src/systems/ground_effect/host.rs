use bevy::prelude::*;
use nalgebra::Isometry3;
use std::sync::Arc;

use crate::components::{
    part_entity, part_id, vehicle_id, AeroForceSlot, PartRenderers, VehiclePart,
    VehicleTelemetry,
};
use crate::physics::{
    AeroForceHook, AeroForceModifier, FlightTelemetry, FlightVehicle, PartId, RendererBounds,
    VehicleId,
};

pub type PartQuery<'w, 's> =
    Query<'w, 's, (Entity, &'static VehiclePart, Option<&'static PartRenderers>)>;

/// [`FlightVehicle`] view over a vehicle entity and its part entities.
pub struct EcsVehicle<'a, 'w, 's> {
    pub entity: Entity,
    pub telemetry: &'a VehicleTelemetry,
    pub parts: &'a PartQuery<'w, 's>,
}

impl FlightVehicle for EcsVehicle<'_, '_, '_> {
    fn id(&self) -> VehicleId {
        vehicle_id(self.entity)
    }

    fn telemetry(&self) -> FlightTelemetry {
        self.telemetry.flight_telemetry()
    }

    fn local_frame(&self) -> Isometry3<f64> {
        self.telemetry.local_frame()
    }

    fn part_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|(_, part, _)| part.vehicle == self.entity)
            .count()
    }

    fn part_ids(&self) -> Vec<PartId> {
        self.parts
            .iter()
            .filter(|(_, part, _)| part.vehicle == self.entity)
            .map(|(entity, _, _)| part_id(entity))
            .collect()
    }

    fn for_each_renderer(&self, visit: &mut dyn FnMut(PartId, &RendererBounds)) {
        for (entity, part, renderers) in self.parts.iter() {
            if part.vehicle != self.entity {
                continue;
            }
            let Some(renderers) = renderers else {
                continue;
            };
            for bounds in &renderers.0 {
                visit(part_id(entity), bounds);
            }
        }
    }
}

/// [`AeroForceHook`] writing modifiers into part [`AeroForceSlot`]s.
pub struct SlotHook<'a, 'w, 's, 'q> {
    slots: &'a mut Query<'w, 's, &'q mut AeroForceSlot>,
    available: bool,
}

impl<'a, 'w, 's, 'q> SlotHook<'a, 'w, 's, 'q> {
    pub fn new(slots: &'a mut Query<'w, 's, &'q mut AeroForceSlot>, available: bool) -> Self {
        Self { slots, available }
    }
}

impl AeroForceHook for SlotHook<'_, '_, '_, '_> {
    fn set_modifier(&mut self, part: PartId, modifier: Option<Arc<dyn AeroForceModifier>>) {
        // Parts destroyed since they were attached are simply skipped
        let Some(entity) = part_entity(part) else {
            return;
        };
        if let Ok(mut slot) = self.slots.get_mut(entity) {
            slot.modifier = modifier;
        }
    }

    fn is_available(&self) -> bool {
        self.available
    }
}
