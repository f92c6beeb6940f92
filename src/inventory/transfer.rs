//! Transfer engine: moving stacks between slots and pools
//!
//! This module covers every way a stack changes hands:
//! - Drag and drop between any two visible slots (swap semantics)
//! - Picking up loose world items into the player's pools
//! - Withdrawing single units from a chest
//!
//! # Drag/drop state machine
//!
//! ```text
//!   Idle --pointer down on a non-empty slot--> Dragging
//!   Dragging --pointer up--> Idle   (swap / place / return to origin)
//! ```
//!
//! While dragging, the origin slot is empty and the session owns the
//! stack, so the stack is always in exactly one place. The origin pool
//! keeps the slot reserved: world pickups and chest withdrawals during
//! the drag never fill it, and if an earlier chest slot collapses the
//! reservation moves with it.
//!
//! A split drag (right button) lifts only half the stack. The other half
//! stays in the origin slot, so the held half can merge into a matching
//! slot or an empty one but never swap.

use super::error::InventoryError;
use super::player::PlayerInventory;
use super::pool::{Pool, PoolId};
use crate::item::{ItemKind, Stack};
use tracing::{debug, warn};

/// A slot position: which pool and which index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRef {
    pub pool: PoolId,
    pub index: usize,
}

impl SlotRef {
    pub fn new(pool: PoolId, index: usize) -> Self {
        SlotRef { pool, index }
    }
}

/// The stack "in hand" during a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraggedStack {
    pub stack: Stack,
    pub origin: SlotRef,
    /// Only part of the origin stack was lifted
    pub split: bool,
}

/// Mutable view of every pool a drag can touch this tick
///
/// The chest entry is the currently open chest, if any.
pub struct PoolSet<'a> {
    pub player: &'a mut PlayerInventory,
    pub chest: Option<(usize, &'a mut Pool)>,
}

impl<'a> PoolSet<'a> {
    pub fn new(player: &'a mut PlayerInventory, chest: Option<(usize, &'a mut Pool)>) -> Self {
        PoolSet { player, chest }
    }

    /// Borrow a pool by id, if it is currently reachable
    pub fn get_mut(&mut self, id: PoolId) -> Option<&mut Pool> {
        match id {
            PoolId::Chest(camp) => match &mut self.chest {
                Some((open, pool)) if *open == camp => Some(&mut **pool),
                _ => None,
            },
            _ => self.player.pool_mut(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging(DraggedStack),
}

/// Drag-and-drop session owned by the UI layer
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        DragSession::default()
    }

    /// The stack currently in hand
    pub fn held(&self) -> Option<&DraggedStack> {
        match &self.state {
            DragState::Dragging(dragged) => Some(dragged),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Idle -> Dragging: lift the stack out of `slot`
    ///
    /// Returns false (staying Idle) if the slot is empty or unreachable,
    /// or if a drag is already in progress.
    pub fn begin(&mut self, slot: SlotRef, pools: &mut PoolSet) -> bool {
        if self.is_dragging() {
            return false;
        }

        let Some(pool) = pools.get_mut(slot.pool) else {
            return false;
        };

        match pool.take_slot(slot.index) {
            Some(stack) => {
                pool.reserve(slot.index);
                self.state = DragState::Dragging(DraggedStack {
                    stack,
                    origin: slot,
                    split: false,
                });
                true
            }
            None => false,
        }
    }

    /// Idle -> Dragging with half of the stack in `slot`
    ///
    /// The larger half stays behind. A single item cannot be split.
    pub fn begin_split(&mut self, slot: SlotRef, pools: &mut PoolSet) -> bool {
        if self.is_dragging() {
            return false;
        }

        let Some(pool) = pools.get_mut(slot.pool) else {
            return false;
        };
        let Some(mut stack) = pool.take_slot(slot.index) else {
            return false;
        };

        let half = stack.split_half();
        pool.put_slot(slot.index, Some(stack));

        match half {
            Some(half) => {
                pool.reserve(slot.index);
                self.state = DragState::Dragging(DraggedStack {
                    stack: half,
                    origin: slot,
                    split: true,
                });
                true
            }
            None => false,
        }
    }

    /// Dragging -> Idle: drop over `target`
    ///
    /// - Occupied target: the two stacks swap (within or across pools)
    /// - Empty target: the stack moves there, origin stays empty
    /// - No target: the stack returns to its origin and `InvalidDrop` is reported
    ///
    /// Returns the slot the dragged stack ended up in.
    pub fn drop_at(
        &mut self,
        target: Option<SlotRef>,
        pools: &mut PoolSet,
    ) -> Result<SlotRef, InventoryError> {
        let Some(dragged) = self.take_held(pools) else {
            return Err(InventoryError::InvalidDrop);
        };

        let target = target.filter(|slot| {
            pools
                .get_mut(slot.pool)
                .is_some_and(|pool| slot.index < pool.capacity())
        });

        let Some(target) = target else {
            debug!("Drop missed every slot, returning {} to origin", dragged.stack.kind);
            Self::restore(dragged, pools);
            return Err(InventoryError::InvalidDrop);
        };

        if target == dragged.origin {
            Self::restore(dragged, pools);
            return Ok(target);
        }

        if dragged.split {
            let rejected = pools
                .get_mut(target.pool)
                .and_then(|pool| pool.merge_into_slot(target.index, dragged.stack));
            if rejected.is_some() {
                debug!("Split {} cannot swap, returning to origin", dragged.stack.kind);
                Self::restore(dragged, pools);
                return Err(InventoryError::InvalidDrop);
            }
            return Ok(target);
        }

        let displaced = match pools.get_mut(target.pool) {
            Some(pool) => pool.put_slot(target.index, Some(dragged.stack)),
            None => None,
        };

        if let Some(displaced) = displaced {
            Self::restore(
                DraggedStack {
                    stack: displaced,
                    ..dragged
                },
                pools,
            );
        }

        Ok(target)
    }

    /// Puts the held stack back where it came from
    pub fn cancel(&mut self, pools: &mut PoolSet) {
        if let Some(dragged) = self.take_held(pools) {
            Self::restore(dragged, pools);
        }
    }

    /// Dragging -> Idle, releasing the origin reservation
    ///
    /// The returned origin index is wherever the reserved slot is now.
    fn take_held(&mut self, pools: &mut PoolSet) -> Option<DraggedStack> {
        let DragState::Dragging(mut dragged) = std::mem::take(&mut self.state) else {
            return None;
        };

        if let Some(index) = pools.get_mut(dragged.origin.pool).and_then(|pool| pool.release()) {
            dragged.origin.index = index;
        }
        Some(dragged)
    }

    fn restore(dragged: DraggedStack, pools: &mut PoolSet) {
        let rejected = match pools.get_mut(dragged.origin.pool) {
            Some(pool) => pool.merge_into_slot(dragged.origin.index, dragged.stack),
            None => Some(dragged.stack),
        };

        if let Some(stack) = rejected {
            // Origin pool is out of reach (chest closed); keep the stack with the player
            warn!("Drag origin {:?} is gone, stowing {}", dragged.origin, stack.kind);
            if let Err(e) = pools.player.add_item(stack.kind, stack.count) {
                warn!("Dropped {} x{} with nowhere to go: {}", stack.kind, stack.count, e);
            }
        }
    }
}

/// Moves a loose world item into the player's pools
///
/// Returns true if the item was consumed; the caller removes it from the
/// world only in that case.
pub fn pickup(kind: ItemKind, count: u32, player: &mut PlayerInventory) -> bool {
    player.add_item(kind, count).is_ok()
}

/// Withdraws one unit from a chest slot into `dest`
///
/// The chest slot is decremented; when it reaches zero the slot is
/// removed from the chest pool (the sequence collapses). Returns
/// `Ok(None)` for an empty or missing slot and leaves the chest
/// untouched when `dest` is full.
pub fn withdraw_one(
    chest: &mut Pool,
    index: usize,
    dest: &mut Pool,
) -> Result<Option<ItemKind>, InventoryError> {
    let Some(kind) = chest.slot(index).map(|stack| stack.kind) else {
        return Ok(None);
    };

    dest.add_stack(kind, 1)?;
    chest.decrement_slot(index);

    if chest.slot(index).is_none() {
        chest.remove_slot(index);
    }

    Ok(Some(kind))
}
