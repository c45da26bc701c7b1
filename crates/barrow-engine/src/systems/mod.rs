//! The update pipeline stages.
//!
//! Order is a hard invariant, wired once by the [`Engine`](crate::engine::Engine):
//! movement, then combat, then inventory pickup, then equipment, then item
//! use. Each stage consumes exactly the intent kinds it owns; stages never
//! call each other.

pub mod combat;
pub mod equipment;
pub mod inventory;
pub mod movement;
pub mod usable;

pub use combat::CombatSystem;
pub use equipment::EquipmentSystem;
pub use inventory::InventorySystem;
pub use movement::MovementSystem;
pub use usable::UsableSystem;
