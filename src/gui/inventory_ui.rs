//! Inventory UI System
//!
//! Renders the hotbar, the inventory window, the open chest and the
//! crafting panel, and maps mouse positions back onto slots. Follows the
//! Screen-Space GUI pattern: all positions are derived from the screen
//! size, so the same `SlotLayout` drives both drawing and hit-testing.

use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::Canvas;
use sdl2::video::Window;

use crate::crafting::Recipe;
use crate::game::{GameState, Panels};
use crate::inventory::player::{HOTBAR_SLOTS, INVENTORY_SLOTS};
use crate::inventory::{Pool, PoolId, SlotRef};
use crate::item::Stack;
use crate::render::item_color;
use crate::text::{draw_centered_text, draw_simple_text};

const SLOT_SIZE: u32 = 48;
const SLOT_MARGIN: u32 = 4;
const HOTBAR_BOTTOM_GAP: i32 = 15;
const INVENTORY_COLUMNS: usize = 6;
const INVENTORY_ROWS: usize = INVENTORY_SLOTS / INVENTORY_COLUMNS;
const CHEST_GAP: i32 = 24;
const RECIPE_BUTTON_WIDTH: u32 = 260;
const RECIPE_BUTTON_HEIGHT: u32 = 40;
const PANEL_EDGE: i32 = 20;

/// Represents the visual style of the inventory UI.
#[derive(Debug, Clone)]
pub struct InventoryUIStyle {
    pub background_color: Color,
    pub border_color: Color,
    pub slot_color: Color,
    pub selected_slot_color: Color,
    /// Border of the slot a dragged stack came from
    pub origin_slot_color: Color,
    pub affordable_color: Color,
    pub unaffordable_color: Color,
}

impl Default for InventoryUIStyle {
    fn default() -> Self {
        InventoryUIStyle {
            background_color: Color::RGBA(25, 25, 35, 200),
            border_color: Color::RGBA(80, 80, 100, 220),
            slot_color: Color::RGBA(50, 50, 60, 200),
            selected_slot_color: Color::RGBA(255, 255, 100, 255),
            origin_slot_color: Color::RGBA(150, 150, 170, 255),
            affordable_color: Color::RGBA(40, 90, 40, 230),
            unaffordable_color: Color::RGBA(70, 40, 40, 230),
        }
    }
}

/// Which pools have slots on screen, for hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisiblePools {
    pub inventory: bool,
    /// Open chest: camp index and slot count
    pub chest: Option<(usize, usize)>,
}

impl VisiblePools {
    pub fn of(game: &GameState) -> Self {
        VisiblePools::new(
            &game.panels,
            game.world
                .open_chest()
                .map(|camp| (camp, game.world.camps[camp].chest.capacity())),
        )
    }

    pub fn new(panels: &Panels, chest: Option<(usize, usize)>) -> Self {
        VisiblePools {
            inventory: panels.inventory_open,
            chest,
        }
    }
}

/// Screen geometry of every slot and button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLayout {
    screen_width: u32,
    screen_height: u32,
}

fn grid_width(columns: usize) -> u32 {
    (SLOT_SIZE + SLOT_MARGIN) * columns as u32 + SLOT_MARGIN
}

impl SlotLayout {
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        SlotLayout {
            screen_width,
            screen_height,
        }
    }

    pub fn hotbar_slot_rect(&self, index: usize) -> Rect {
        let hotbar_width = grid_width(HOTBAR_SLOTS) - 2 * SLOT_MARGIN;
        let start_x = (self.screen_width as i32 - hotbar_width as i32) / 2;
        let start_y = self.screen_height as i32 - (SLOT_SIZE as i32 + HOTBAR_BOTTOM_GAP);
        let slot_x = start_x + index as i32 * (SLOT_SIZE + SLOT_MARGIN) as i32;
        Rect::new(slot_x, start_y, SLOT_SIZE, SLOT_SIZE)
    }

    pub fn inventory_window_rect(&self) -> Rect {
        let width = grid_width(INVENTORY_COLUMNS);
        let height = grid_width(INVENTORY_ROWS);
        Rect::new(
            (self.screen_width as i32 - width as i32) / 2,
            (self.screen_height as i32 - height as i32) / 2,
            width,
            height,
        )
    }

    pub fn inventory_slot_rect(&self, index: usize) -> Rect {
        let window = self.inventory_window_rect();
        let row = (index / INVENTORY_COLUMNS) as i32;
        let col = (index % INVENTORY_COLUMNS) as i32;
        let step = (SLOT_SIZE + SLOT_MARGIN) as i32;
        Rect::new(
            window.x() + SLOT_MARGIN as i32 + col * step,
            window.y() + SLOT_MARGIN as i32 + row * step,
            SLOT_SIZE,
            SLOT_SIZE,
        )
    }

    /// One row of chest slots above the inventory window
    pub fn chest_window_rect(&self, slot_count: usize) -> Rect {
        let inventory = self.inventory_window_rect();
        let width = grid_width(slot_count.max(1));
        let height = grid_width(1);
        Rect::new(
            (self.screen_width as i32 - width as i32) / 2,
            inventory.y() - CHEST_GAP - height as i32,
            width,
            height,
        )
    }

    pub fn chest_slot_rect(&self, slot_count: usize, index: usize) -> Rect {
        let window = self.chest_window_rect(slot_count);
        Rect::new(
            window.x() + SLOT_MARGIN as i32 + index as i32 * (SLOT_SIZE + SLOT_MARGIN) as i32,
            window.y() + SLOT_MARGIN as i32,
            SLOT_SIZE,
            SLOT_SIZE,
        )
    }

    /// Recipe buttons stack down the left edge of the screen
    pub fn recipe_button_rect(&self, index: usize) -> Rect {
        Rect::new(
            PANEL_EDGE,
            PANEL_EDGE * 3 + index as i32 * (RECIPE_BUTTON_HEIGHT + SLOT_MARGIN) as i32,
            RECIPE_BUTTON_WIDTH,
            RECIPE_BUTTON_HEIGHT,
        )
    }

    /// The slot under `(x, y)`
    ///
    /// Checked in a fixed order: inventory, then hotbar, then the open chest.
    pub fn slot_at(&self, x: i32, y: i32, visible: &VisiblePools) -> Option<SlotRef> {
        let point = Point::new(x, y);

        if visible.inventory {
            if let Some(index) = (0..INVENTORY_SLOTS).find(|&i| self.inventory_slot_rect(i).contains_point(point)) {
                return Some(SlotRef::new(PoolId::Inventory, index));
            }
        }

        if let Some(index) = (0..HOTBAR_SLOTS).find(|&i| self.hotbar_slot_rect(i).contains_point(point)) {
            return Some(SlotRef::new(PoolId::Hotbar, index));
        }

        let (camp, len) = visible.chest?;
        (0..len)
            .find(|&i| self.chest_slot_rect(len, i).contains_point(point))
            .map(|index| SlotRef::new(PoolId::Chest(camp), index))
    }

    /// Index of the recipe button under `(x, y)`
    pub fn recipe_at(&self, x: i32, y: i32, recipe_count: usize) -> Option<usize> {
        let point = Point::new(x, y);
        (0..recipe_count).find(|&i| self.recipe_button_rect(i).contains_point(point))
    }
}

/// Manages the rendering of the inventory UI.
pub struct InventoryUI {
    style: InventoryUIStyle,
    pub layout: SlotLayout,
}

impl InventoryUI {
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        InventoryUI {
            style: InventoryUIStyle::default(),
            layout: SlotLayout::new(screen_width, screen_height),
        }
    }

    /// Renders every visible panel, then the stack in hand on top
    pub fn render(&self, canvas: &mut Canvas<Window>, game: &GameState, mouse_x: i32, mouse_y: i32) -> Result<(), String> {
        self.render_hotbar(canvas, game)?;

        if game.panels.inventory_open {
            self.render_inventory_window(canvas, &game.inventory.inventory)?;
        }

        if let Some(camp_index) = game.world.open_chest() {
            let camp = &game.world.camps[camp_index];
            self.render_chest(canvas, &camp.chest, camp.selected_index)?;
        }

        if game.panels.crafting_open {
            self.render_crafting(canvas, game)?;
        }

        if let Some(held) = game.drag.held() {
            let rect = Rect::from_center(Point::new(mouse_x, mouse_y), SLOT_SIZE, SLOT_SIZE);
            self.draw_stack(canvas, rect, &held.stack)?;
        }

        Ok(())
    }

    fn render_hotbar(&self, canvas: &mut Canvas<Window>, game: &GameState) -> Result<(), String> {
        let hotbar = &game.inventory.hotbar;
        for (i, slot) in hotbar.slots().iter().enumerate().take(HOTBAR_SLOTS) {
            let rect = self.layout.hotbar_slot_rect(i);
            let border = self.border_for(hotbar, i, i == game.inventory.selected_hotbar_slot);
            self.draw_slot(canvas, rect, slot.as_ref(), border)?;
        }
        Ok(())
    }

    fn render_inventory_window(&self, canvas: &mut Canvas<Window>, pool: &Pool) -> Result<(), String> {
        let window = self.layout.inventory_window_rect();
        self.draw_window(canvas, window)?;
        draw_simple_text(canvas, "INVENTORY", window.x(), window.y() - 18, Color::RGB(255, 255, 255), 2)?;

        for (i, slot) in pool.slots().iter().enumerate() {
            let border = self.border_for(pool, i, false);
            self.draw_slot(canvas, self.layout.inventory_slot_rect(i), slot.as_ref(), border)?;
        }
        Ok(())
    }

    fn render_chest(&self, canvas: &mut Canvas<Window>, chest: &Pool, selected: usize) -> Result<(), String> {
        let len = chest.capacity();
        let window = self.layout.chest_window_rect(len);
        self.draw_window(canvas, window)?;

        if chest.is_empty() {
            draw_centered_text(
                canvas,
                "EMPTY",
                window.center().x(),
                window.y() + 20,
                Color::RGB(200, 200, 200),
                2,
            )?;
        }

        for (i, slot) in chest.slots().iter().enumerate() {
            let border = self.border_for(chest, i, i == selected);
            self.draw_slot(canvas, self.layout.chest_slot_rect(len, i), slot.as_ref(), border)?;
        }
        Ok(())
    }

    fn render_crafting(&self, canvas: &mut Canvas<Window>, game: &GameState) -> Result<(), String> {
        draw_simple_text(canvas, "CRAFTING", PANEL_EDGE, PANEL_EDGE, Color::RGB(255, 255, 255), 2)?;
        let pools = [&game.inventory.inventory, &game.inventory.hotbar];

        for (i, recipe) in game.recipes.recipes().iter().enumerate() {
            let rect = self.layout.recipe_button_rect(i);
            let fill = if recipe.is_affordable(&pools) {
                self.style.affordable_color
            } else {
                self.style.unaffordable_color
            };
            canvas.set_draw_color(fill);
            canvas.fill_rect(rect)?;
            canvas.set_draw_color(self.style.border_color);
            canvas.draw_rect(rect)?;

            draw_simple_text(canvas, recipe.output.name(), rect.x() + 6, rect.y() + 6, Color::RGB(255, 255, 255), 2)?;
            draw_simple_text(canvas, &ingredients_label(recipe), rect.x() + 6, rect.y() + 26, Color::RGB(200, 200, 200), 1)?;
        }
        Ok(())
    }

    fn draw_window(&self, canvas: &mut Canvas<Window>, rect: Rect) -> Result<(), String> {
        canvas.set_draw_color(self.style.background_color);
        canvas.fill_rect(rect)?;
        canvas.set_draw_color(self.style.border_color);
        canvas.draw_rect(rect)
    }

    fn border_for(&self, pool: &Pool, index: usize, selected: bool) -> Color {
        if selected {
            self.style.selected_slot_color
        } else if pool.reserved_slot() == Some(index) {
            self.style.origin_slot_color
        } else {
            self.style.border_color
        }
    }

    fn draw_slot(&self, canvas: &mut Canvas<Window>, rect: Rect, stack: Option<&Stack>, border: Color) -> Result<(), String> {
        canvas.set_draw_color(self.style.slot_color);
        canvas.fill_rect(rect)?;

        if let Some(stack) = stack {
            self.draw_stack(canvas, rect, stack)?;
        }

        canvas.set_draw_color(border);
        canvas.draw_rect(rect)
    }

    /// Flat colour swatch plus a count in the bottom-right corner
    fn draw_stack(&self, canvas: &mut Canvas<Window>, rect: Rect, stack: &Stack) -> Result<(), String> {
        let swatch = Rect::new(rect.x() + 8, rect.y() + 8, rect.width() - 16, rect.height() - 16);
        canvas.set_draw_color(item_color(stack.kind));
        canvas.fill_rect(swatch)?;

        if stack.count > 1 {
            let label = stack.count.to_string();
            draw_simple_text(
                canvas,
                &label,
                rect.right() - 4 - crate::text::text_width(&label, 1) as i32,
                rect.bottom() - 11,
                Color::RGB(255, 255, 255),
                1,
            )?;
        }
        Ok(())
    }
}

/// "Wood x3 Plank x2"
fn ingredients_label(recipe: &Recipe) -> String {
    recipe
        .inputs
        .iter()
        .map(|(kind, amount)| format!("{} x{}", kind.name(), amount))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemKind;

    fn layout() -> SlotLayout {
        SlotLayout::new(1280, 720)
    }

    fn all_visible(chest_len: usize) -> VisiblePools {
        VisiblePools {
            inventory: true,
            chest: Some((3, chest_len)),
        }
    }

    #[test]
    fn test_slot_centres_resolve_to_their_slot() {
        let layout = layout();
        let visible = all_visible(4);

        for i in 0..INVENTORY_SLOTS {
            let c = layout.inventory_slot_rect(i).center();
            assert_eq!(layout.slot_at(c.x(), c.y(), &visible), Some(SlotRef::new(PoolId::Inventory, i)));
        }
        for i in 0..HOTBAR_SLOTS {
            let c = layout.hotbar_slot_rect(i).center();
            assert_eq!(layout.slot_at(c.x(), c.y(), &visible), Some(SlotRef::new(PoolId::Hotbar, i)));
        }
        for i in 0..4 {
            let c = layout.chest_slot_rect(4, i).center();
            assert_eq!(layout.slot_at(c.x(), c.y(), &visible), Some(SlotRef::new(PoolId::Chest(3), i)));
        }
    }

    #[test]
    fn test_hidden_panels_do_not_resolve() {
        let layout = layout();
        let visible = VisiblePools {
            inventory: false,
            chest: None,
        };

        let c = layout.inventory_slot_rect(0).center();
        assert_eq!(layout.slot_at(c.x(), c.y(), &visible), None);

        let c = layout.hotbar_slot_rect(7).center();
        assert_eq!(layout.slot_at(c.x(), c.y(), &visible), Some(SlotRef::new(PoolId::Hotbar, 7)));
    }

    #[test]
    fn test_gaps_between_slots_are_empty() {
        let layout = layout();
        let first = layout.inventory_slot_rect(0);

        assert_eq!(layout.slot_at(first.right() + 1, first.y() + 4, &all_visible(2)), None);
        assert_eq!(layout.slot_at(0, 0, &all_visible(2)), None);
    }

    #[test]
    fn test_panels_do_not_overlap() {
        let layout = layout();
        let inventory = layout.inventory_window_rect();

        assert!(!layout.chest_window_rect(6).has_intersection(inventory));
        assert!(!layout.hotbar_slot_rect(0).has_intersection(inventory));
        assert!(!layout.recipe_button_rect(3).has_intersection(inventory));
    }

    #[test]
    fn test_recipe_buttons() {
        let layout = layout();
        let c = layout.recipe_button_rect(2).center();

        assert_eq!(layout.recipe_at(c.x(), c.y(), 4), Some(2));
        assert_eq!(layout.recipe_at(c.x(), c.y(), 2), None);
    }

    #[test]
    fn test_ingredients_label() {
        let recipe = Recipe::new(ItemKind::StoneSword, vec![(ItemKind::Stone, 2), (ItemKind::Plank, 1)]);
        assert_eq!(ingredients_label(&recipe), "Stone x2 Plank x1");
    }
}
