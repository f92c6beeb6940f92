use super::error::InventoryError;
use crate::item::{ItemKind, Stack};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Identifies one of the pools a slot can live in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolId {
    /// Player inventory (24 slots)
    Inventory,
    /// Player hotbar (8 slots)
    Hotbar,
    /// Loot of the chest in the camp with this index
    Chest(usize),
}

/// Fixed-length ordered collection of slots
///
/// This is the core storage structure shared by the player inventory,
/// the hotbar and every chest. Slot order only matters for drawing and
/// for drag/drop targeting; stacking scans in order and the first match
/// wins.
///
/// Serializes as a plain array of `null` / `{"item", "count"}` entries.
/// Loading goes through `from_slots`, so a saved zero count comes back
/// as an empty slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Option<Stack>>", into = "Vec<Option<Stack>>")]
pub struct Pool {
    /// Slots that can hold stacks (None = empty)
    slots: Vec<Option<Stack>>,

    /// Origin slot of an active drag; adds never place a new stack here
    reserved: Option<usize>,
}

impl Pool {
    /// Creates a new empty pool with the specified capacity
    pub fn new(capacity: usize) -> Self {
        Pool {
            slots: vec![None; capacity],
            reserved: None,
        }
    }

    /// Wraps existing slots (loaded saves, generated chest loot)
    ///
    /// Zero-count stacks are normalised to empty slots.
    pub fn from_slots(slots: Vec<Option<Stack>>) -> Self {
        Pool {
            slots: slots
                .into_iter()
                .map(|slot| slot.filter(|stack| stack.count > 0))
                .collect(),
            reserved: None,
        }
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Read-only view of every slot, in order
    pub fn slots(&self) -> &[Option<Stack>] {
        &self.slots
    }

    /// The stack in a slot, if any
    pub fn slot(&self, index: usize) -> Option<&Stack> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    /// Returns true if the pool has no items
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    /// Counts how many of a specific item are in the pool
    pub fn count_item(&self, kind: ItemKind) -> u32 {
        self.iter_stacks()
            .filter(|stack| stack.kind == kind)
            .fold(0u32, |total, stack| total.saturating_add(stack.count))
    }

    /// Finds the first slot holding this kind
    pub fn find_stack_slot(&self, kind: ItemKind) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| matches!(slot, Some(stack) if stack.kind == kind))
    }

    /// Finds the first empty slot index, skipping a reserved slot
    pub fn find_empty_slot(&self) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .position(|(index, slot)| slot.is_none() && self.reserved != Some(index))
    }

    /// Holds `index` for a stack that is out on a drag
    pub fn reserve(&mut self, index: usize) {
        self.reserved = Some(index);
    }

    /// Ends the reservation, returning where the reserved slot is now
    pub fn release(&mut self) -> Option<usize> {
        self.reserved.take()
    }

    /// Current position of the reserved slot
    pub fn reserved_slot(&self) -> Option<usize> {
        self.reserved
    }

    /// Adds items to the pool
    ///
    /// # Strategy
    /// 1. Merge into the first slot already holding this kind
    /// 2. Otherwise place a new stack in the first empty slot
    /// 3. Otherwise fail with `PoolFull` and leave the pool untouched
    pub fn add_stack(&mut self, kind: ItemKind, amount: u32) -> Result<(), InventoryError> {
        let result = self.try_add(kind, amount);
        if result.is_err() {
            warn!("Pool full! Could not add {} x{}", kind, amount);
        }
        result
    }

    fn try_add(&mut self, kind: ItemKind, amount: u32) -> Result<(), InventoryError> {
        if amount == 0 {
            return Ok(());
        }

        if let Some(index) = self.find_stack_slot(kind) {
            if let Some(stack) = self.slots[index].as_mut() {
                stack.merge(Stack::new(kind, amount));
            }
            return Ok(());
        }

        if let Some(index) = self.find_empty_slot() {
            self.slots[index] = Some(Stack::new(kind, amount));
            return Ok(());
        }

        Err(InventoryError::PoolFull(kind))
    }

    /// Removes items from the pool
    ///
    /// Scans slots in order, decrementing and clearing until `amount` is
    /// satisfied. Returns false when the pool held less than `amount`;
    /// in that case everything of that kind has been drained, so callers
    /// check `count_item` (or `can_craft`) first.
    pub fn remove_amount(&mut self, kind: ItemKind, amount: u32) -> bool {
        let mut remaining = amount;

        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }

            if let Some(stack) = slot {
                if stack.kind == kind {
                    let to_take = remaining.min(stack.count);
                    stack.count -= to_take;
                    remaining -= to_take;

                    // Clear slot if empty
                    if stack.count == 0 {
                        *slot = None;
                    }
                }
            }
        }

        remaining == 0
    }

    /// Takes the whole stack out of a slot, leaving it empty
    pub fn take_slot(&mut self, index: usize) -> Option<Stack> {
        self.slots.get_mut(index).and_then(|slot| slot.take())
    }

    /// Replaces a slot's contents, returning what was there
    pub fn put_slot(&mut self, index: usize, stack: Option<Stack>) -> Option<Stack> {
        match self.slots.get_mut(index) {
            Some(slot) => std::mem::replace(slot, stack),
            None => stack,
        }
    }

    /// Places `stack` into an empty or same-kind slot
    ///
    /// Returns the stack untouched if the slot holds another kind or does
    /// not exist.
    pub fn merge_into_slot(&mut self, index: usize, stack: Stack) -> Option<Stack> {
        let Some(slot) = self.slots.get_mut(index) else {
            return Some(stack);
        };

        match slot {
            None => {
                *slot = Some(stack);
                None
            }
            Some(existing) if existing.can_stack(&stack) => {
                existing.merge(stack);
                None
            }
            Some(_) => Some(stack),
        }
    }

    /// Removes one unit from a slot, clearing it at zero
    ///
    /// Returns the kind that was removed.
    pub fn decrement_slot(&mut self, index: usize) -> Option<ItemKind> {
        let slot = self.slots.get_mut(index)?;
        let stack = slot.as_mut()?;
        let kind = stack.kind;

        stack.count = stack.count.saturating_sub(1);
        if stack.count == 0 {
            *slot = None;
        }

        Some(kind)
    }

    /// Deletes a slot entirely, shifting later slots down
    ///
    /// Only chests shrink like this; player pools keep their length. The
    /// reserved slot is never deleted, and moves down with the others.
    pub fn remove_slot(&mut self, index: usize) -> Option<Stack> {
        if index >= self.slots.len() || self.reserved == Some(index) {
            return None;
        }

        if let Some(reserved) = self.reserved.as_mut() {
            if *reserved > index {
                *reserved -= 1;
            }
        }
        self.slots.remove(index)
    }

    /// Returns an iterator over all non-empty stacks
    pub fn iter_stacks(&self) -> impl Iterator<Item = &Stack> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }
}

/// Adds to `primary`, falling back to `secondary`, then consolidates
///
/// Used for hotbar-then-inventory placement of everything the player
/// gains from the world or from crafting.
pub fn add_with_fallback(
    primary: &mut Pool,
    secondary: &mut Pool,
    kind: ItemKind,
    amount: u32,
) -> Result<(), InventoryError> {
    let added = primary
        .try_add(kind, amount)
        .or_else(|_| secondary.try_add(kind, amount));

    match added {
        Ok(()) => {
            consolidate(primary, secondary);
            Ok(())
        }
        Err(e) => {
            warn!("Inventory and hotbar full! Could not add {} x{}", kind, amount);
            Err(e)
        }
    }
}

/// Merges duplicate stacks across two pools into the earliest slot
///
/// Scans `a` then `b` once. The first slot seen for a kind becomes its
/// accumulator; later slots of that kind are added into it and cleared.
/// Nothing is shifted: non-merged stacks keep their positions.
pub fn consolidate(a: &mut Pool, b: &mut Pool) {
    let mut accumulators: HashMap<ItemKind, (PoolSide, usize)> = HashMap::new();
    let a_len = a.slots.len();

    for position in 0..a_len + b.slots.len() {
        let (side, index) = if position < a_len {
            (PoolSide::A, position)
        } else {
            (PoolSide::B, position - a_len)
        };

        let slot = match side {
            PoolSide::A => &mut a.slots[index],
            PoolSide::B => &mut b.slots[index],
        };

        let Some(stack) = *slot else { continue };

        match accumulators.get(&stack.kind).copied() {
            Some((target_side, target_index)) => {
                *slot = None;
                let target = match target_side {
                    PoolSide::A => &mut a.slots[target_index],
                    PoolSide::B => &mut b.slots[target_index],
                };
                if let Some(target) = target.as_mut() {
                    target.merge(stack);
                }
            }
            None => {
                accumulators.insert(stack.kind, (side, index));
            }
        }
    }
}

impl From<Vec<Option<Stack>>> for Pool {
    fn from(slots: Vec<Option<Stack>>) -> Self {
        Pool::from_slots(slots)
    }
}

impl From<Pool> for Vec<Option<Stack>> {
    fn from(pool: Pool) -> Self {
        pool.slots
    }
}

#[derive(Debug, Clone, Copy)]
enum PoolSide {
    A,
    B,
}

/// Aggregates item counts across pools
pub fn to_count_map(pools: &[&Pool]) -> HashMap<ItemKind, u32> {
    let mut counts = HashMap::new();
    for pool in pools {
        for stack in pool.iter_stacks() {
            let total = counts.entry(stack.kind).or_insert(0u32);
            *total = total.saturating_add(stack.count);
        }
    }
    counts
}
