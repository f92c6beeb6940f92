use super::pool::PoolId;
use crate::item::ItemKind;
use thiserror::Error;

/// Errors that can occur during inventory, transfer and crafting operations
///
/// None of these are fatal: the caller logs them and the tick carries on
/// with the pools exactly as they were before the failed operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// No slot with a matching stack and no empty slot
    #[error("no room for {0}: pool is full")]
    PoolFull(ItemKind),

    /// Craft attempted without enough ingredients
    #[error("insufficient materials to craft {0}")]
    InsufficientMaterials(ItemKind),

    /// No recipe produces this item
    #[error("no recipe for {0}")]
    UnknownRecipe(ItemKind),

    /// A drag ended over no slot; the stack went back to its origin
    #[error("drop did not land on a slot")]
    InvalidDrop,

    /// Slot index out of bounds, or the pool is not available
    #[error("invalid slot {index} in {pool:?}")]
    InvalidSlot { pool: PoolId, index: usize },

    /// Split amount outside 1..=count
    #[error("cannot split {requested} from a stack of {available}")]
    InvalidSplit { requested: u32, available: u32 },
}
