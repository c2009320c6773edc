//! Frame driver for the actor simulation.
//!
//! [`Simulation`] owns the ECS [`World`] and the per-frame [`Schedule`]:
//!
//! ```text
//! player_update -> (sync) -> attack_update -> (sync) -> actor_setup
//! ```
//!
//! The sync points apply deferred commands, so an attack spawned by the
//! player is a live actor when `attack_update` runs in the same frame, and
//! damage events are delivered before the frame ends. Nothing here touches
//! raylib: the binary polls input and draws around [`Simulation::tick`], and
//! tests drive [`Simulation::step`] with scripted input.
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::actor::{Actor, ActorBundle};
use crate::components::player::PlayerBundle;
use crate::events::damage::apply_damage_observer;
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::input::InputState;
use crate::resources::simconfig::SimConfig;
use crate::resources::texturestore::{TextureHandle, TextureStore};
use crate::resources::worldtime::WorldTime;
use crate::systems::attack::attack_update;
use crate::systems::player::player_update;
use crate::systems::setup::actor_setup;
use crate::systems::time::{advance_world_time, update_world_time};

/// Systems run once per frame, in order.
pub fn frame_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((player_update, attack_update, actor_setup).chain());
    schedule
}

pub struct Simulation {
    world: World,
    schedule: Schedule,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(config);
        world.insert_resource(InputState::default());
        world.insert_resource(TextureStore::new());

        world.spawn(Observer::new(apply_damage_observer));
        world.spawn(Observer::new(switch_debug_observer));
        // observers must be registered before the first frame triggers events
        world.flush();

        Self {
            world,
            schedule: frame_schedule(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> SimConfig {
        *self.world.resource::<SimConfig>()
    }

    pub fn spawn_player(&mut self, position: Vector2) -> Entity {
        self.world.spawn(PlayerBundle::new(position)).id()
    }

    /// Register any actor bundle (player, attack, neutral body...).
    pub fn spawn_actor(&mut self, bundle: impl Bundle) -> Entity {
        self.world.spawn(bundle).id()
    }

    /// A solid neutral body, e.g. a wall or training dummy.
    pub fn spawn_solid(&mut self, position: Vector2, half_extent: f32, health: i32) -> Entity {
        self.spawn_actor(ActorBundle::solid(position, half_extent, health))
    }

    /// Replace the input snapshot read by the next frame.
    pub fn set_input(&mut self, input: InputState) {
        *self.world.resource_mut::<InputState>() = input;
    }

    /// Run one frame with `input` and an explicit frame time-scale.
    pub fn step(&mut self, input: &InputState, time_scale: f32) {
        self.set_input(input.clone());
        let reference_fps = self.config().reference_fps;
        advance_world_time(&mut self.world, time_scale / reference_fps, time_scale);
        self.run_frame();
    }

    /// Run one frame lasting `dt` seconds with the current input snapshot.
    pub fn tick(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.run_frame();
    }

    fn run_frame(&mut self) {
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
    }

    /// All live actors, in ECS archetype iteration order.
    ///
    /// The order is stable within a frame; spawning or despawning between
    /// frames may reshuffle it.
    pub fn actors(&mut self) -> Vec<Entity> {
        let mut query = self.world.query_filtered::<Entity, With<Actor>>();
        query.iter(&self.world).collect()
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.world.get_entity(entity).is_ok()
    }

    /// Remove an actor now. Removing an actor that is already gone is a no-op.
    pub fn remove_actor(&mut self, entity: Entity) -> bool {
        match self.world.get_entity_mut(entity) {
            Ok(actor) => {
                actor.despawn();
                true
            }
            Err(_) => false,
        }
    }

    pub fn load_asset(&mut self, path: &str) -> TextureHandle {
        self.world.resource_mut::<TextureStore>().load(path)
    }

    /// Number of live actors carrying component `T`.
    pub fn count<T: Component>(&mut self) -> usize {
        let mut query = self.world.query_filtered::<(), With<T>>();
        query.iter(&self.world).count()
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.world.get::<T>(entity)
    }

    pub fn get_mut<T: Component<Mutability = bevy_ecs::component::Mutable>>(
        &mut self,
        entity: Entity,
    ) -> Option<Mut<'_, T>> {
        self.world.get_mut::<T>(entity)
    }

    pub fn time(&self) -> WorldTime {
        *self.world.resource::<WorldTime>()
    }
}
