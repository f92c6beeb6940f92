//! Screen-Space GUI System
//!
//! UI elements that render at fixed screen positions, independent of the
//! camera: the hotbar, the inventory window, the open chest and the
//! crafting panel.
//!
//! # Architecture
//!
//! Screen-space GUI elements:
//! - Use screen coordinates (pixels from screen edges)
//! - Render on top layer (above the world and the night overlay)
//! - Read their open/closed state from `GameState`, they hold none themselves
//! - Use procedural rendering (SDL2 primitives)
//!
//! Hit-testing uses the same `SlotLayout` as drawing, so a slot is
//! clickable exactly where it is drawn.

pub mod inventory_ui;

pub use inventory_ui::{InventoryUI, VisiblePools};
