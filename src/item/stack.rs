use super::kind::ItemKind;
use crate::inventory::InventoryError;
use serde::{Deserialize, Serialize};

/// A quantity of one item kind held in a single slot
///
/// Stacks have no size cap: `count` grows as far as a `u32` allows.
/// A stack with `count == 0` never lives in a slot; every decrement
/// that reaches zero clears the slot instead.
///
/// Serialized as `{"item": "Wood", "count": 3}`, the slot shape used
/// by the save file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    /// What the stack holds
    #[serde(rename = "item")]
    pub kind: ItemKind,

    /// How many (always > 0 while stored)
    pub count: u32,
}

impl Stack {
    /// Creates a new stack
    pub fn new(kind: ItemKind, count: u32) -> Self {
        Stack { kind, count }
    }

    /// Returns true if this stack can merge with another
    ///
    /// Stacks can merge if they're the same item kind
    pub fn can_stack(&self, other: &Stack) -> bool {
        self.kind == other.kind
    }

    /// Merges another stack into this one
    ///
    /// Returns how many items couldn't fit (overflow). Without a stack
    /// cap this is always 0 for matching kinds; a mismatched kind comes
    /// back whole.
    ///
    /// # Example
    /// ```ignore
    /// let mut wood = Stack::new(ItemKind::Wood, 3);
    /// let overflow = wood.merge(Stack::new(ItemKind::Wood, 2));
    /// assert_eq!(wood.count, 5);
    /// assert_eq!(overflow, 0);
    /// ```
    pub fn merge(&mut self, other: Stack) -> u32 {
        if !self.can_stack(&other) {
            return other.count;
        }

        self.count = self.count.saturating_add(other.count);
        0
    }

    /// Splits `amount` items off this stack
    ///
    /// Returns `(removed, remainder)`; the remainder is `None` when the
    /// whole stack was taken.
    pub fn split(self, amount: u32) -> Result<(Stack, Option<Stack>), InventoryError> {
        if amount == 0 || amount > self.count {
            return Err(InventoryError::InvalidSplit {
                requested: amount,
                available: self.count,
            });
        }

        let removed = Stack::new(self.kind, amount);
        let remainder = if amount == self.count {
            None
        } else {
            Some(Stack::new(self.kind, self.count - amount))
        };

        Ok((removed, remainder))
    }

    /// Lifts the smaller half off this stack, leaving the larger half
    ///
    /// Returns None for a single item, which cannot be split.
    pub fn split_half(&mut self) -> Option<Stack> {
        let (half, rest) = self.split(self.count / 2).ok()?;
        *self = rest?;
        Some(half)
    }
}
