// Item system module
//
// This module provides the core item types for Nomads:
// - Item kinds and their tool classes
// - Item stacks for quantity management

pub mod kind;
pub mod stack;

// Re-export main types for convenient access
pub use kind::{ItemKind, ToolClass};
pub use stack::Stack;
