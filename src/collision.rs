/// Collision detection for Nomads
///
/// Everything in the world is an axis-aligned rectangle, so collision is
/// plain AABB overlap. Entities expose their rectangle through the
/// `Collidable` trait; the world asks "does this rectangle hit anything
/// that blocks movement?" before committing a move.
///
/// # Rust Learning Notes
///
/// This module demonstrates:
/// - **Trait-based design**: Shared behavior across different entity types
/// - **Pure functions**: Stateless collision detection logic
/// - **Value types from a C library**: `sdl2::rect::Rect` is plain data, so
///   it can be used in tests without ever initialising SDL
use sdl2::rect::Rect;

/// Trait for world objects that occupy a rectangle.
///
/// # Example
///
/// ```rust
/// impl Collidable for Rock {
///     fn get_bounds(&self) -> Rect {
///         Rect::new(self.x, self.y, ROCK_SIZE, ROCK_SIZE)
///     }
/// }
/// ```
pub trait Collidable {
    /// Returns the axis-aligned bounding box for this object in world pixels.
    fn get_bounds(&self) -> Rect;

    /// True if this object overlaps `rect`.
    fn overlaps(&self, rect: &Rect) -> bool {
        aabb_intersect(&self.get_bounds(), rect)
    }
}

/// Checks if two axis-aligned bounding boxes intersect.
///
/// Two rectangles intersect if they overlap on both the X and Y axes.
/// Edges are exclusive: rectangles that only touch do not intersect.
///
/// # Performance
///
/// This is an O(1) operation - just a few integer comparisons.
pub fn aabb_intersect(a: &Rect, b: &Rect) -> bool {
    // Check for intersection on both axes
    let x_overlap = a.x() < b.x() + b.width() as i32 && a.x() + a.width() as i32 > b.x();
    let y_overlap = a.y() < b.y() + b.height() as i32 && a.y() + a.height() as i32 > b.y();

    x_overlap && y_overlap
}

/// Checks if a point lies inside a rectangle (right/bottom edges exclusive).
///
/// Used to resolve mouse positions to UI slots.
pub fn point_in_rect(x: i32, y: i32, rect: &Rect) -> bool {
    x >= rect.x()
        && x < rect.x() + rect.width() as i32
        && y >= rect.y()
        && y < rect.y() + rect.height() as i32
}

/// Returns indices of every object in `objects` that overlaps `rect`.
pub fn overlapping_indices<T: Collidable>(rect: &Rect, objects: &[T]) -> Vec<usize> {
    objects
        .iter()
        .enumerate()
        .filter(|(_, object)| object.overlaps(rect))
        .map(|(index, _)| index)
        .collect()
}

/// Snaps a world coordinate down to the grid line at or before it.
pub fn snap_to_grid(value: i32, grid_size: i32) -> i32 {
    value.div_euclid(grid_size) * grid_size
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Block(Rect);

    impl Collidable for Block {
        fn get_bounds(&self) -> Rect {
            self.0
        }
    }

    #[test]
    fn test_aabb_intersect_overlapping() {
        let rect_a = Rect::new(0, 0, 32, 32);
        let rect_b = Rect::new(16, 16, 32, 32);

        assert!(aabb_intersect(&rect_a, &rect_b));
        assert!(aabb_intersect(&rect_b, &rect_a)); // Symmetric
    }

    #[test]
    fn test_aabb_intersect_touching_edges() {
        // Rectangles touching at edges should NOT intersect (boundary case)
        let rect_a = Rect::new(0, 0, 32, 32);
        let rect_b = Rect::new(32, 0, 32, 32);

        assert!(!aabb_intersect(&rect_a, &rect_b));
    }

    #[test]
    fn test_aabb_intersect_separated() {
        let rect_a = Rect::new(0, 0, 32, 32);
        let rect_b = Rect::new(100, 100, 32, 32);

        assert!(!aabb_intersect(&rect_a, &rect_b));
    }

    #[test]
    fn test_aabb_intersect_contained() {
        let large = Rect::new(0, 0, 100, 100);
        let small = Rect::new(25, 25, 50, 50);

        assert!(aabb_intersect(&large, &small));
        assert!(aabb_intersect(&small, &large));
    }

    #[test]
    fn test_point_in_rect_edges() {
        let rect = Rect::new(10, 10, 20, 20);

        assert!(point_in_rect(10, 10, &rect));
        assert!(point_in_rect(29, 29, &rect));
        assert!(!point_in_rect(30, 15, &rect));
        assert!(!point_in_rect(9, 15, &rect));
    }

    #[test]
    fn test_overlapping_indices() {
        let blocks = vec![
            Block(Rect::new(0, 0, 10, 10)),
            Block(Rect::new(50, 50, 10, 10)),
            Block(Rect::new(5, 5, 10, 10)),
        ];

        assert_eq!(overlapping_indices(&Rect::new(0, 0, 8, 8), &blocks), vec![0, 2]);
    }

    #[test]
    fn test_snap_to_grid_handles_negatives() {
        assert_eq!(snap_to_grid(130, 64), 128);
        assert_eq!(snap_to_grid(64, 64), 64);
        assert_eq!(snap_to_grid(-1, 64), -64);
    }
}
