#[macro_use]
extern crate derive_more;
#[macro_use]
extern crate log;

pub mod canvas;
pub mod config;
pub mod systems;

use crate::{
    config::{load_yaml, DISPLAY_CONFIG, LOGGER_CONFIG, SNAKE_CONFIG},
    systems::{draw_snake::DrawSnakeSystem, follow_pointer::FollowPointerSystem},
};
use amethyst::{
    core::transform::{Transform, TransformBundle},
    input::{is_close_requested, is_key_down, InputBundle, StringBindings},
    prelude::*,
    renderer::{
        camera::Camera,
        debug_drawing::{DebugLines, DebugLinesParams},
        plugins::{RenderDebugLines, RenderToWindow},
        types::DefaultBackend,
        RenderingBundle,
    },
    utils::application_root_dir,
    window::ScreenDimensions,
    winit::VirtualKeyCode,
    Application, Error, GameDataBuilder, LoggerConfig, SimpleState, StateEvent,
};
use slither_core::{
    chain::Chain,
    color::WHITE,
    config::{ChainConfig, Decorations},
};
use std::path::PathBuf;
use structopt::StructOpt;

const LINE_WIDTH: f32 = 1.5;

struct SlitherViewer {
    chain: Option<Chain>,
}

impl SlitherViewer {
    fn new(chain: Chain) -> Self {
        Self { chain: Some(chain) }
    }
}

impl SimpleState for SlitherViewer {
    fn on_start(&mut self, data: StateData<'_, GameData<'_, '_>>) {
        if let Some(chain) = self.chain.take() {
            data.world.insert(chain);
        }
        data.world.insert(DebugLines::new());
        data.world.insert(DebugLinesParams {
            line_width: LINE_WIDTH,
        });

        // World units are logical pixels with the origin in the bottom left corner.
        let (width, height) = {
            let screen = data.world.read_resource::<ScreenDimensions>();
            let hidpi_factor = screen.hidpi_factor() as f32;
            (screen.width() / hidpi_factor, screen.height() / hidpi_factor)
        };
        info!("drawing surface is {}x{} logical pixels", width, height);

        let mut transform = Transform::default();
        transform.set_translation_xyz(width * 0.5, height * 0.5, 10.0);

        data.world
            .create_entity()
            .with(Camera::standard_2d(width, height))
            .with(transform)
            .build();
    }

    fn handle_event(
        &mut self,
        _: StateData<'_, GameData<'_, '_>>,
        event: StateEvent,
    ) -> SimpleTrans {
        if let StateEvent::Window(event) = event {
            if is_close_requested(&event) || is_key_down(&event, VirtualKeyCode::Escape) {
                Trans::Quit
            } else {
                Trans::None
            }
        } else {
            Trans::None
        }
    }
}

fn logger_setup(logger_config_path: Option<PathBuf>) -> Result<(), Error> {
    let logger_config: LoggerConfig = load_yaml(logger_config_path, LOGGER_CONFIG)?;

    amethyst::Logger::from_config(logger_config).start();

    Ok(())
}

#[derive(StructOpt, Debug)]
struct Options {
    /// Snake configuration file, `config/snake.yaml` by default.
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,
    /// Logger configuration file, `config/logger.yaml` by default.
    #[structopt(long, parse(from_os_str))]
    logger_config: Option<PathBuf>,
    /// Overrides the number of segments.
    #[structopt(long)]
    segments: Option<usize>,
    /// One of none, eyes or eyes-and-legs.
    #[structopt(long)]
    decorations: Option<Decorations>,
}

impl Options {
    fn chain_config(&self) -> Result<ChainConfig, Error> {
        let mut chain_config: ChainConfig = load_yaml(self.config.clone(), SNAKE_CONFIG)?;
        if let Some(segments) = self.segments {
            chain_config.segments = segments;
        }
        if let Some(decorations) = self.decorations {
            chain_config.decorations = decorations;
        }
        Ok(chain_config)
    }
}

fn main() -> amethyst::Result<()> {
    let options = Options::from_args();

    let app_root = application_root_dir()?;
    let display_config_path = app_root.join(DISPLAY_CONFIG);
    let assets_dir = app_root.join("assets/");

    logger_setup(options.logger_config.clone())?;

    let chain_config = options.chain_config()?;
    let chain = Chain::new(&chain_config)?;
    info!(
        "snake of {} segments, reach {:?}",
        chain.len(),
        chain_config.reach
    );

    let (r, g, b) = WHITE;
    let game_data = GameDataBuilder::default()
        .with_bundle(TransformBundle::new())?
        .with_bundle(InputBundle::<StringBindings>::new())?
        .with(FollowPointerSystem, "follow_pointer", &["input_system"])
        .with(DrawSnakeSystem, "draw_snake", &["follow_pointer"])
        .with_bundle(
            RenderingBundle::<DefaultBackend>::new()
                .with_plugin(
                    RenderToWindow::from_config_path(display_config_path)?
                        .with_clear([r, g, b, 1.0]),
                )
                .with_plugin(RenderDebugLines::default()),
        )?;

    let mut game = Application::new(assets_dir, SlitherViewer::new(chain), game_data)?;

    game.run();

    Ok(())
}
