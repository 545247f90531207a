use bevy::prelude::*;

/// The vehicle the player currently controls, if any.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ActiveVehicle(pub Option<Entity>);

impl ActiveVehicle {
    pub fn set(&mut self, vehicle: Option<Entity>) {
        self.0 = vehicle;
    }

    pub fn get(&self) -> Option<Entity> {
        self.0
    }
}
