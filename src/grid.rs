// src/grid.rs

//! Grid layout: maps an image count plus a geometry snapshot to per-cell
//! pixel dimensions and (column, row) placements.

use crate::config::GridConfig;
use crate::geometry::GeometrySnapshot;

/// The resolved geometry for one image in one render pass. Derived data;
/// recomputed each pass, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPlacement {
    pub image_index: usize,
    pub grid_x: u32,
    pub grid_y: u32,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

/// Lazily yields one placement per image, in display order.
///
/// Cell size is `pixel_width / columns` by `pixel_height / rows` with floor
/// division; a remainder strip on the right or bottom edge is simply not
/// covered by any cell. Images past `columns * rows` are still emitted —
/// truncating to a maximum count is the caller's job before layout.
pub fn layout(
    image_count: usize,
    config: GridConfig,
    snapshot: GeometrySnapshot,
) -> impl Iterator<Item = CellPlacement> {
    let resolved = config.resolve();
    let columns = resolved.columns;
    let cell_width = u32::from(snapshot.pixel_width) / resolved.columns;
    let cell_height = u32::from(snapshot.pixel_height) / resolved.rows;

    (0..image_count).map(move |index| CellPlacement {
        image_index: index,
        grid_x: index as u32 % columns,
        grid_y: index as u32 / columns,
        pixel_width: cell_width,
        pixel_height: cell_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pixel_width: u16, pixel_height: u16) -> GeometrySnapshot {
        GeometrySnapshot {
            rows: 50,
            cols: 200,
            pixel_width,
            pixel_height,
        }
    }

    #[test]
    fn cell_size_is_floor_division_of_pixel_area() {
        // 1283 / 4 = 320 remainder 3; the 3-pixel strip stays uncovered.
        let placements: Vec<_> = layout(3, GridConfig::new(4, 4), snapshot(1283, 722)).collect();
        for p in &placements {
            assert_eq!(p.pixel_width, 320);
            assert_eq!(p.pixel_height, 180);
        }
    }

    #[test]
    fn cell_size_is_independent_of_image_count() {
        let few: Vec<_> = layout(2, GridConfig::new(4, 4), snapshot(800, 600)).collect();
        let many: Vec<_> = layout(40, GridConfig::new(4, 4), snapshot(800, 600)).collect();
        assert_eq!(few[0].pixel_width, many[0].pixel_width);
        assert_eq!(few[0].pixel_height, many[0].pixel_height);
    }

    #[test]
    fn placement_coordinates_follow_index_order() {
        let placements: Vec<_> = layout(6, GridConfig::new(4, 4), snapshot(800, 600)).collect();
        assert_eq!((placements[0].grid_x, placements[0].grid_y), (0, 0));
        assert_eq!((placements[3].grid_x, placements[3].grid_y), (3, 0));
        // i=5, c=4: x = 5 mod 4 = 1, y = 5 div 4 = 1.
        assert_eq!((placements[5].grid_x, placements[5].grid_y), (1, 1));
    }

    #[test]
    fn unset_config_resolves_to_four_by_four() {
        let placements: Vec<_> = layout(5, GridConfig::default(), snapshot(400, 400)).collect();
        assert_eq!(placements[0].pixel_width, 100);
        assert_eq!(placements[0].pixel_height, 100);
        assert_eq!((placements[4].grid_x, placements[4].grid_y), (0, 1));
    }

    #[test]
    fn images_past_grid_capacity_are_still_emitted() {
        let placements: Vec<_> = layout(20, GridConfig::new(4, 4), snapshot(400, 400)).collect();
        assert_eq!(placements.len(), 20);
        assert_eq!(
            (placements[19].grid_x, placements[19].grid_y),
            (3, 4) // row index beyond the configured 4 rows
        );
    }
}
