//! Scythefall main entry point.
//!
//! A small top-down action arena built on:
//! - **raylib** for windowing, input and drawing
//! - **bevy_ecs** for the actor simulation
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (or `--config`), falling back to defaults
//! 2. Build the [`Simulation`](scythefall::simulation::Simulation) and the arena scene
//! 3. Each frame: poll the keyboard, tick the simulation, upload new textures, draw
//!
//! `--headless N` skips the window and runs N frames with no input.
//!
//! # Running
//!
//! ```sh
//! cargo run --release
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use clap::Parser;
use raylib::prelude::*;

use scythefall::components::actor::{Actor, Health};
use scythefall::components::attack::Attack;
use scythefall::events::switchdebug::SwitchDebugEvent;
use scythefall::game;
use scythefall::resources::gameconfig::{DEFAULT_CONFIG_PATH, GameConfig};
use scythefall::resources::input::InputState;
use scythefall::simulation::Simulation;
use scythefall::systems::input::update_input_state;
use scythefall::systems::render::{LoadedTextures, render_actors};

/// Scythefall arena
#[derive(Parser)]
#[command(version, about = "Top-down arena: walk with WASD, swing with the arrow keys.")]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Attack template JSON file; overrides `[assets] attacks`.
    #[arg(long, value_name = "PATH")]
    attacks: Option<PathBuf>,

    /// Run this many frames without a window, then exit.
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u32>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using default settings", e);
    }
    let attacks_path = cli.attacks.or_else(|| config.attacks_path.clone());
    let attacks = game::load_attacks(attacks_path.as_deref());

    let mut sim = Simulation::new(config.simulation);
    game::setup(&mut sim, &config, attacks);

    match cli.headless {
        Some(frames) => run_headless(&mut sim, frames),
        None => run_window(&mut sim, &config),
    }
}

fn run_headless(sim: &mut Simulation, frames: u32) {
    let idle = InputState::default();
    for _ in 0..frames {
        sim.step(&idle, 1.0);
    }

    let mut wounded = 0;
    let mut health = sim.world_mut().query::<(&Actor, &Health)>();
    for (_, h) in health.iter(sim.world()) {
        if h.current < h.max {
            wounded += 1;
        }
    }
    log::info!(
        "Headless run finished after {} frames: {} actors, {} attacks alive, {} wounded",
        sim.time().frame_count,
        sim.count::<Actor>(),
        sim.count::<Attack>(),
        wounded
    );
}

fn run_window(sim: &mut Simulation, config: &GameConfig) {
    let (window_width, window_height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .title("Scythefall");
    if config.vsync {
        builder.vsync();
    }
    if config.fullscreen {
        builder.fullscreen();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);
    // Disable ESC to exit
    rl.set_exit_key(None);

    // world coordinates are in render pixels; scale them up to the window
    let camera = Camera2D {
        offset: Vector2::zero(),
        target: Vector2::zero(),
        rotation: 0.0,
        zoom: window_width as f32 / config.render_width.max(1) as f32,
    };
    let mut textures = LoadedTextures::new();
    let mut input = InputState::default();

    while !rl.window_should_close() {
        if update_input_state(&rl, &mut input) {
            sim.world_mut().trigger(SwitchDebugEvent {});
        }
        sim.set_input(input.clone());
        sim.tick(rl.get_frame_time());

        textures.upload_pending(sim.world_mut(), &mut rl, &thread);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::DARKGRAY);
        let mut d2 = d.begin_mode2D(camera);
        render_actors(sim.world_mut(), &mut d2, &textures);
    }
}
