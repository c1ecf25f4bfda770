use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::BoardConfig;
use super::entities::{HexTile, TileBoard, TileCoord, TilePressed};
use crate::factory::TileFactory;
use crate::geometry::TileGeometry;
use crate::layout::GridCell;

/// Depth between consecutive tiles, so later tiles draw (and hit) on top.
const TILE_Z_STEP: f32 = 0.001;

// ── Pure helpers ───────────────────────────────────────────────────

/// World position of the container for a view of `view` logical pixels.
///
/// Screen space has its origin at the top-left with y down; the 2D camera
/// centres the world origin with y up.
pub fn board_origin(view: Vec2, grid_offset: Vec2) -> Vec2 {
    Vec2::new(-view.x * 0.5 + grid_offset.x, view.y * 0.5 - grid_offset.y)
}

/// Sprite centre, relative to the board, for a tile placed at `position`.
pub fn world_center(geometry: &TileGeometry, position: Vec2) -> Vec2 {
    let center = position + geometry.center_offset();
    Vec2::new(center.x, -center.y)
}

/// Local transform of the `order`-th tile placed at `position`.
pub fn tile_transform(geometry: &TileGeometry, position: Vec2, order: usize) -> Transform {
    let center = world_center(geometry, position);
    Transform::from_xyz(center.x, center.y, order as f32 * TILE_Z_STEP)
        .with_rotation(Quat::from_rotation_z(-geometry.rotation()))
}

/// The front-most tile whose hit polygon contains `world`.
pub fn topmost_tile_at<'a>(
    geometry: &TileGeometry,
    world: Vec2,
    tiles: impl IntoIterator<Item = (Entity, &'a GlobalTransform)>,
) -> Option<Entity> {
    tiles
        .into_iter()
        .filter(|(_, gt)| {
            let local = gt.affine().inverse().transform_point3(world.extend(0.0));
            geometry.contains(geometry.local_from_centered(local.truncate()))
        })
        .max_by(|(_, a), (_, b)| a.translation().z.total_cmp(&b.translation().z))
        .map(|(entity, _)| entity)
}

/// Viewport positions pressed this frame: every new touch, plus the cursor
/// when any mouse button went down.
pub fn pointer_presses(
    mouse: &ButtonInput<MouseButton>,
    touches: &Touches,
    cursor: Option<Vec2>,
) -> Vec<Vec2> {
    let mut presses: Vec<Vec2> = touches.iter_just_pressed().map(|t| t.position()).collect();
    if mouse.get_just_pressed().next().is_some()
        && let Some(cursor) = cursor
    {
        presses.push(cursor);
    }
    presses
}

// ── Startup ────────────────────────────────────────────────────────

/// Spawns the camera, builds the factory, and spawns one sprite per grid cell.
///
/// An invalid configuration is logged and ends the app instead of panicking.
pub fn spawn_board(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    cfg: Res<BoardConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut exit: MessageWriter<AppExit>,
) {
    commands.spawn((Name::new("Camera"), Camera2d));

    let factory = match TileFactory::new(&cfg.tiles, &mut *images) {
        Ok(factory) => factory,
        Err(e) => {
            error!("cannot build tile factory: {e}");
            exit.write(AppExit::error());
            return;
        }
    };
    let geometry = *factory.geometry();

    let view = windows
        .single()
        .map(|w| Vec2::new(w.width(), w.height()))
        .unwrap_or(cfg.window_size.as_vec2());
    let origin = board_origin(view, cfg.grid_offset);

    let board = commands
        .spawn((
            Name::new("TileBoard"),
            TileBoard { geometry },
            Transform::from_translation(origin.extend(0.0)),
            Visibility::default(),
        ))
        .id();

    let grid = factory.produce_grid(cfg.rows, cfg.columns);
    let mut order = 0;
    for (row, tiles) in grid.into_iter().enumerate() {
        for (column, tile) in tiles.into_iter().enumerate() {
            let cell = GridCell::new(row as i32, column as i32);
            let hex = cell.axial(geometry.orientation());
            let visual = tile.visual();
            let sprite = Sprite {
                color: visual.tint,
                ..Sprite::from_image(visual.texture.clone())
            };
            let transform = tile_transform(&geometry, visual.position, order);

            let entity = commands
                .spawn((
                    Name::new(format!("HexTile({},{})", cell.row, cell.column)),
                    sprite,
                    transform,
                    TileCoord { cell, hex },
                    HexTile { tile },
                ))
                .observe(on_tile_pressed)
                .id();
            commands.entity(board).add_child(entity);
            order += 1;
        }
    }

    info!(
        "spawned {order} {} tiles ({}x{}), tile size {:.2}x{:.2}",
        geometry.orientation(),
        cfg.rows,
        cfg.columns,
        geometry.width(),
        geometry.height()
    );
}

// ── Update ─────────────────────────────────────────────────────────

/// Keeps the board pinned to the window's top-left corner across resizes.
pub fn anchor_board(
    windows: Query<&Window, (With<PrimaryWindow>, Changed<Window>)>,
    mut boards: Query<&mut Transform, With<TileBoard>>,
    cfg: Res<BoardConfig>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let origin = board_origin(Vec2::new(window.width(), window.height()), cfg.grid_offset);
    for mut transform in &mut boards {
        transform.translation.x = origin.x;
        transform.translation.y = origin.y;
    }
}

/// Turns mouse presses and touch starts into [`TilePressed`] events.
///
/// At most one tile receives each press: the front-most one under the pointer.
pub fn dispatch_pointer_presses(
    mut commands: Commands,
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    boards: Query<&TileBoard>,
    tiles: Query<(Entity, &GlobalTransform), With<HexTile>>,
) {
    let cursor = windows.single().ok().and_then(Window::cursor_position);
    let presses = pointer_presses(&mouse, &touches, cursor);
    if presses.is_empty() {
        return;
    }

    let Ok((camera, cam_gt)) = cameras.single() else {
        return;
    };
    let Ok(board) = boards.single() else { return };

    for screen in presses {
        let Ok(world) = camera.viewport_to_world_2d(cam_gt, screen) else {
            continue;
        };
        if let Some(entity) = topmost_tile_at(&board.geometry, world, tiles.iter()) {
            commands.trigger(TilePressed { entity });
        }
    }
}

/// Per-tile press handler, registered as an observer when the tile spawns.
pub fn on_tile_pressed(press: On<TilePressed>, mut tiles: Query<(&mut HexTile, &TileCoord)>) {
    let entity = press.event().event_target();
    let Ok((mut hex_tile, coord)) = tiles.get_mut(entity) else {
        return;
    };
    let state = hex_tile.tile.handle_pointer_down();
    debug!(
        "tile ({}, {}) is now {state:?}",
        coord.cell.row, coord.cell.column
    );
}

/// Mirrors tile tint and position onto the sprite after any change.
pub fn sync_tile_visuals(
    boards: Query<&TileBoard>,
    mut tiles: Query<(&HexTile, &mut Sprite, &mut Transform), Changed<HexTile>>,
) {
    let Ok(board) = boards.single() else { return };
    for (hex_tile, mut sprite, mut transform) in &mut tiles {
        let visual = hex_tile.tile.visual();
        sprite.color = visual.tint;
        let center = world_center(&board.geometry, visual.position);
        transform.translation.x = center.x;
        transform.translation.y = center.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::TileStyle;
    use crate::geometry::Orientation;
    use crate::layout::cell_position;
    use crate::surface::hex_color;
    use crate::tile::TileState;

    fn style(orientation: Orientation) -> TileStyle {
        TileStyle {
            orientation,
            ..BoardConfig::default().tiles
        }
    }

    fn factory(orientation: Orientation) -> (TileFactory<Handle<Image>>, Assets<Image>) {
        let mut images = Assets::<Image>::default();
        let factory = TileFactory::new(&style(orientation), &mut images).unwrap();
        (factory, images)
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    // ── image surface ───────────────────────────────────────────────

    #[test]
    fn factory_stores_one_image() {
        let (factory, images) = factory(Orientation::Vertical);
        let _ = factory.produce_grid(3, 3);
        assert_eq!(images.len(), 1);
        let image = images.get(factory.texture()).unwrap();
        let size = factory.template().texture_size();
        assert_eq!((image.width(), image.height()), (size.x, size.y));
    }

    // ── frames ──────────────────────────────────────────────────────

    #[test]
    fn board_origin_is_top_left_plus_offset() {
        let origin = board_origin(Vec2::new(640.0, 480.0), Vec2::splat(-50.0));
        assert_eq!(origin, Vec2::new(-370.0, 290.0));
    }

    #[test]
    fn vertical_tile_centre_flips_y() {
        let (factory, _) = factory(Orientation::Vertical);
        let g = factory.geometry();
        let center = world_center(g, Vec2::new(10.0, 20.0));
        assert!(approx(center, Vec2::new(10.0 + g.width() / 2.0, -20.0 - g.height() / 2.0)));
    }

    #[test]
    fn horizontal_tiles_rotate_clockwise() {
        let (factory, _) = factory(Orientation::Horizontal);
        let g = factory.geometry();
        let t = tile_transform(g, Vec2::ZERO, 3);
        assert!(approx(t.translation.truncate(), Vec2::new(-g.height() / 2.0, -g.width() / 2.0)));
        assert!((t.translation.z - 3.0 * TILE_Z_STEP).abs() < 1e-6);
        let (axis, angle) = t.rotation.to_axis_angle();
        assert!((axis.z.signum() * angle + g.rotation()).abs() < 1e-4);
    }

    // ── hit testing ─────────────────────────────────────────────────

    #[test]
    fn press_at_tile_centre_hits_that_tile() {
        for orientation in [Orientation::Vertical, Orientation::Horizontal] {
            let (factory, _) = factory(orientation);
            let g = *factory.geometry();
            let mut world = World::new();
            let tiles: Vec<(Entity, GlobalTransform)> = (0..3)
                .map(|column| {
                    let pos = cell_position(&g, GridCell::new(1, column));
                    let t = tile_transform(&g, pos, column as usize);
                    (world.spawn_empty().id(), GlobalTransform::from(t))
                })
                .collect();

            for (entity, gt) in &tiles {
                let target = gt.translation().truncate();
                let hit = topmost_tile_at(&g, target, tiles.iter().map(|(e, gt)| (*e, gt)));
                assert_eq!(hit, Some(*entity), "{orientation}");
            }
        }
    }

    #[test]
    fn press_outside_every_tile_hits_nothing() {
        let (factory, _) = factory(Orientation::Vertical);
        let g = *factory.geometry();
        let mut world = World::new();
        let entity = world.spawn_empty().id();
        let gt = GlobalTransform::from(tile_transform(&g, Vec2::ZERO, 0));
        // Just outside the top-left corner of the bounding box.
        let miss = Vec2::new(1.0, -1.0);
        assert_eq!(topmost_tile_at(&g, miss, [(entity, &gt)]), None);
    }

    #[test]
    fn overlapping_hits_prefer_front_tile() {
        let (factory, _) = factory(Orientation::Vertical);
        let g = *factory.geometry();
        let mut world = World::new();
        let back = world.spawn_empty().id();
        let front = world.spawn_empty().id();
        let back_gt = GlobalTransform::from(tile_transform(&g, Vec2::ZERO, 0));
        let front_gt = GlobalTransform::from(tile_transform(&g, Vec2::ZERO, 1));
        let center = world_center(&g, Vec2::ZERO);
        let hit = topmost_tile_at(&g, center, [(front, &front_gt), (back, &back_gt)]);
        assert_eq!(hit, Some(front));
    }

    // ── pointer input ───────────────────────────────────────────────

    #[test]
    fn any_mouse_button_presses_at_cursor() {
        let touches = Touches::default();
        let cursor = Some(Vec2::new(12.0, 34.0));
        for button in [MouseButton::Left, MouseButton::Right, MouseButton::Middle] {
            let mut mouse = ButtonInput::<MouseButton>::default();
            mouse.press(button);
            assert_eq!(pointer_presses(&mouse, &touches, cursor), vec![Vec2::new(12.0, 34.0)]);
        }
    }

    #[test]
    fn no_press_without_button_or_cursor() {
        let touches = Touches::default();
        let idle = ButtonInput::<MouseButton>::default();
        assert!(pointer_presses(&idle, &touches, Some(Vec2::ONE)).is_empty());

        let mut mouse = ButtonInput::<MouseButton>::default();
        mouse.press(MouseButton::Left);
        assert!(pointer_presses(&mouse, &touches, None).is_empty());
    }

    #[test]
    fn held_button_presses_only_once() {
        let touches = Touches::default();
        let mut mouse = ButtonInput::<MouseButton>::default();
        mouse.press(MouseButton::Left);
        mouse.clear();
        assert!(mouse.pressed(MouseButton::Left));
        assert!(pointer_presses(&mouse, &touches, Some(Vec2::ONE)).is_empty());
    }

    // ── startup ─────────────────────────────────────────────────────

    fn board_app(rows: i32, columns: i32) -> App {
        let mut app = App::new();
        app.insert_resource(BoardConfig {
            rows,
            columns,
            ..BoardConfig::default()
        })
        .init_resource::<Assets<Image>>()
        .add_systems(Startup, spawn_board)
        .add_systems(Update, sync_tile_visuals);
        app.update();
        app
    }

    fn board_children(app: &mut App) -> Vec<Entity> {
        let world = app.world_mut();
        let board = world
            .query_filtered::<Entity, With<TileBoard>>()
            .single(world)
            .unwrap();
        world
            .get::<Children>(board)
            .map(|children| children.to_vec())
            .unwrap_or_default()
    }

    #[test]
    fn board_owns_one_child_per_cell() {
        let mut app = board_app(3, 4);
        let children = board_children(&mut app);
        assert_eq!(children.len(), 12);

        let world = app.world_mut();
        assert!(children.iter().all(|&e| world.get::<HexTile>(e).is_some()));
        assert_eq!(world.query::<&HexTile>().iter(world).count(), 12);
        assert_eq!(world.resource::<Assets<Image>>().len(), 1);
        assert!(app.should_exit().is_none());
    }

    #[test]
    fn non_positive_bounds_spawn_empty_board() {
        for (rows, columns) in [(0, 5), (5, 0), (-2, 3)] {
            let mut app = board_app(rows, columns);
            assert!(board_children(&mut app).is_empty());
            let world = app.world_mut();
            assert_eq!(world.query::<&HexTile>().iter(world).count(), 0);
            assert_eq!(world.resource::<Assets<Image>>().len(), 1);
        }
    }

    #[test]
    fn invalid_style_exits_without_spawning() {
        let mut app = App::new();
        let mut cfg = BoardConfig::default();
        cfg.tiles.side_length = -1.0;
        app.insert_resource(cfg)
            .init_resource::<Assets<Image>>()
            .add_systems(Startup, spawn_board);
        app.update();

        assert_eq!(app.should_exit(), Some(AppExit::error()));
        let world = app.world_mut();
        assert_eq!(world.query::<&TileBoard>().iter(world).count(), 0);
        assert_eq!(world.resource::<Assets<Image>>().len(), 0);
    }

    #[test]
    fn press_tints_sprite_on_next_update() {
        let mut app = board_app(2, 2);
        let children = board_children(&mut app);
        let (pressed, other) = (children[0], children[1]);

        app.world_mut().trigger(TilePressed { entity: pressed });
        app.update();

        let world = app.world();
        assert_eq!(world.get::<Sprite>(pressed).unwrap().color, hex_color(0x30a211));
        assert_eq!(world.get::<Sprite>(other).unwrap().color, Color::WHITE);

        app.world_mut().trigger(TilePressed { entity: pressed });
        app.update();
        assert_eq!(app.world().get::<Sprite>(pressed).unwrap().color, Color::WHITE);
    }

    // ── observer ────────────────────────────────────────────────────

    #[test]
    fn press_event_toggles_only_its_tile() {
        let (factory, _) = factory(Orientation::Vertical);
        let mut world = World::new();
        let mut spawn = |cell: GridCell| {
            world
                .spawn((
                    HexTile {
                        tile: factory.produce_cell(cell),
                    },
                    TileCoord {
                        cell,
                        hex: cell.axial(Orientation::Vertical),
                    },
                ))
                .observe(on_tile_pressed)
                .id()
        };
        let a = spawn(GridCell::new(0, 0));
        let b = spawn(GridCell::new(0, 1));

        world.trigger(TilePressed { entity: a });
        let tile_a = &world.get::<HexTile>(a).unwrap().tile;
        assert_eq!(tile_a.state(), TileState::Selected);
        assert_eq!(tile_a.visual().tint, hex_color(0x30a211));
        assert!(!world.get::<HexTile>(b).unwrap().tile.is_clicked());

        world.trigger(TilePressed { entity: a });
        let tile_a = &world.get::<HexTile>(a).unwrap().tile;
        assert_eq!(tile_a.state(), TileState::Unselected);
        assert_eq!(tile_a.visual().tint, Color::WHITE);
    }
}
