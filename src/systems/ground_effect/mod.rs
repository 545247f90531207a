mod host;
mod lifecycle;
mod notifications;
mod tick;

pub use host::{EcsVehicle, PartQuery, SlotHook};
pub use lifecycle::{ground_effect_startup_system, ground_effect_teardown_system};
pub use notifications::vehicle_modified_system;
pub use tick::ground_effect_tick_system;
