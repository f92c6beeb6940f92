// Inventory system module
//
// This module provides storage for Nomads, including:
// - Fixed-length slot pools (inventory, hotbar, chests)
// - Player inventory with hotbar-first placement
// - Drag/drop transfers, pickups and chest withdrawals

pub mod error;
pub mod player;
pub mod pool;
pub mod transfer;

// Re-export main types
pub use error::InventoryError;
pub use player::PlayerInventory;
pub use pool::{to_count_map, Pool, PoolId};
pub use transfer::{DragSession, PoolSet, SlotRef};
