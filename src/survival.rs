//! Hunger and thirst
//!
//! Both meters start full and drain only while the player moves; the
//! rates drop near a burning campfire. Eating and drinking take real
//! items out of the player's pools.

use crate::inventory::PlayerInventory;
use crate::item::ItemKind;
use crate::player::Gait;
use tracing::debug;

pub const MAX_METER: f64 = 100.0;

const HUNGER_RATE: f64 = 0.0005;
const THIRST_RATE: f64 = 0.00094;
const FIRE_HUNGER_RATE: f64 = 0.0002;
const FIRE_THIRST_RATE: f64 = 0.0003;

const MEAT_RESTORES: f64 = 20.0;
const WATER_RESTORES: f64 = 30.0;

/// Distance from a campfire centre that counts as "near the fire"
pub const CAMPFIRE_WARMTH_RADIUS: f64 = 150.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Survival {
    pub hunger: f64,
    pub thirst: f64,
}

impl Survival {
    pub fn new() -> Self {
        Survival {
            hunger: MAX_METER,
            thirst: MAX_METER,
        }
    }

    pub fn from_values(hunger: f64, thirst: f64) -> Self {
        Survival {
            hunger: hunger.clamp(0.0, MAX_METER),
            thirst: thirst.clamp(0.0, MAX_METER),
        }
    }

    /// Drains both meters for `dt_ms` of activity
    pub fn update(&mut self, gait: Gait, near_fire: bool, dt_ms: f64) {
        let (hunger_rate, thirst_rate) = if near_fire {
            (FIRE_HUNGER_RATE, FIRE_THIRST_RATE)
        } else {
            (HUNGER_RATE, THIRST_RATE)
        };

        let factor = match gait {
            Gait::Idle => return,
            Gait::Walking => 1.0,
            Gait::Sprinting => 2.0,
            Gait::Crouching => 0.5,
        };

        self.hunger = (self.hunger - hunger_rate * factor * dt_ms).max(0.0);
        self.thirst = (self.thirst - thirst_rate * factor * dt_ms).max(0.0);
    }

    /// Eats one Meat if the player has any
    pub fn eat(&mut self, player: &mut PlayerInventory) -> bool {
        if !player.has_item(ItemKind::Meat, 1) {
            return false;
        }
        player.remove_item(ItemKind::Meat, 1);
        self.hunger = (self.hunger + MEAT_RESTORES).min(MAX_METER);
        debug!("Ate meat, hunger now {:.0}", self.hunger);
        true
    }

    /// Drinks one Water if the player has any
    pub fn drink(&mut self, player: &mut PlayerInventory) -> bool {
        if !player.has_item(ItemKind::Water, 1) {
            return false;
        }
        player.remove_item(ItemKind::Water, 1);
        self.thirst = (self.thirst + WATER_RESTORES).min(MAX_METER);
        debug!("Drank water, thirst now {:.0}", self.thirst);
        true
    }
}

impl Default for Survival {
    fn default() -> Self {
        Self::new()
    }
}
