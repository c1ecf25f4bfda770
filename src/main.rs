//! Hex tile board viewer.
//!
//! Opens a window with a grid of hexagon tiles; clicking or touching a tile
//! toggles its highlight. Tab opens the world inspector, Escape quits.

use bevy::app::AppExit;
use bevy::prelude::*;
#[cfg(feature = "native")]
use bevy::remote::{RemotePlugin, http::RemoteHttpPlugin};
use bevy::window::WindowResolution;
use bevy_inspector_egui::quick::WorldInspectorPlugin;
use hex_tiles::GameState;
use hex_tiles::board::{BoardConfig, BoardPlugin};

/// Command-line overrides for [`BoardConfig`].
#[cfg(feature = "native")]
#[derive(clap::Parser, Debug)]
#[command(version, about = "Interactive hexagon tile board")]
struct Cli {
    /// Grid rows.
    #[arg(long, allow_negative_numbers = true)]
    rows: Option<i32>,
    /// Grid columns.
    #[arg(long, allow_negative_numbers = true)]
    columns: Option<i32>,
    /// Hexagon side length in pixels.
    #[arg(long, allow_negative_numbers = true)]
    side_length: Option<f32>,
    /// Border width in pixels.
    #[arg(long, allow_negative_numbers = true)]
    border: Option<f32>,
    /// `vertical` or `horizontal`.
    #[arg(long)]
    orientation: Option<hex_tiles::Orientation>,
}

#[cfg(feature = "native")]
impl Cli {
    fn apply(self, mut cfg: BoardConfig) -> BoardConfig {
        if let Some(rows) = self.rows {
            cfg.rows = rows;
        }
        if let Some(columns) = self.columns {
            cfg.columns = columns;
        }
        if let Some(side_length) = self.side_length {
            cfg.tiles.side_length = side_length;
            cfg.grid_offset = Vec2::splat(-side_length);
        }
        if let Some(border) = self.border {
            cfg.tiles.hex_border = border;
        }
        if let Some(orientation) = self.orientation {
            cfg.tiles.orientation = orientation;
        }
        cfg
    }
}

#[cfg(feature = "native")]
fn board_config() -> BoardConfig {
    use clap::Parser;
    Cli::parse().apply(BoardConfig::default())
}

#[cfg(not(feature = "native"))]
fn board_config() -> BoardConfig {
    BoardConfig::default()
}

fn main() {
    let config = board_config();
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hex Tiles".into(),
            resolution: WindowResolution::new(config.window_size.x, config.window_size.y),
            ..default()
        }),
        ..default()
    }))
    .register_type::<GameState>()
    .init_state::<GameState>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(BoardPlugin(config))
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(GameState::Debugging)));

    #[cfg(feature = "native")]
    app.add_plugins(RemotePlugin::default())
        .add_plugins(RemoteHttpPlugin::default());

    app.run();
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        let new_state = match state.get() {
            GameState::Running => GameState::Debugging,
            GameState::Debugging => GameState::Running,
        };
        info!("switching to {new_state:?}");
        next.set(new_state);
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
