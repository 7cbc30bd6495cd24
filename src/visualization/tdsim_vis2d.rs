use bevy::log::warn;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::{Circle, Rectangle};

use crate::simulation::scenario::Scenario;
use crate::simulation::states::GravitySource;
use crate::simulation::stepper::{tick, TickReport};

/// Component tagging each observer disc with its index into Scenario.system.observers
#[derive(Component)]
struct ObserverIndex(pub usize);

/// Component tagging each clock hand with its observer index
#[derive(Component)]
struct HandIndex(pub usize);

/// Marker for the diagnostics text block
#[derive(Component)]
struct StatsText;

/// Report from the most recent tick, for the diagnostics overlay
#[derive(Resource, Default)]
struct LastTick(Option<TickReport>);

/// World-space → screen-space scaling factor for positions and radii
const SCALE: f32 = 50.0;

/// Drawn radius of an observer clock face in world units
const OBSERVER_RADIUS: f32 = 1.0;

/// Radians of hand rotation per proper second
const HAND_SCALE: f64 = 1.0;

/// Velocity change per held key-second, as a fraction of c
const VELOCITY_RATE: f64 = 0.25;

/// Observer palette, cycled when a scenario has more clocks than entries
fn observer_color(i: usize) -> Color {
    match i % 4 {
        0 => Color::srgb(0.0, 1.0, 1.0),
        1 => Color::srgb(1.0, 0.0, 1.0),
        2 => Color::srgb(1.0, 1.0, 0.0),
        _ => Color::srgb(0.4, 1.0, 0.4),
    }
}

pub fn run_2d(scenario: Scenario) {
    println!(
        "run_2d: starting Bevy 2D viewer with {} observers, {} sources",
        scenario.system.observers.len(),
        scenario.system.sources.len()
    );

    App::new()
        .insert_resource(scenario)
        .insert_resource(LastTick::default())
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_scene_system)
        .add_systems(
            Update,
            (
                input_system,
                simulation_step_system,
                spawn_new_sources_system,
                sync_hands_system,
                stats_text_system,
            )
                .chain(),
        )
        .run();
}

fn setup_scene_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());

    // One disc + child hand per observer clock
    for (i, obs) in scenario.system.observers.iter().enumerate() {
        let color = observer_color(i);
        let x = obs.x.x as f32 * SCALE;
        let y = obs.x.y as f32 * SCALE;

        commands
            .spawn((
                MaterialMesh2dBundle {
                    mesh: Mesh2dHandle(meshes.add(Circle::new(OBSERVER_RADIUS * SCALE))),
                    material: materials.add(ColorMaterial::from(color)),
                    transform: Transform::from_xyz(x, y, 0.0),
                    ..Default::default()
                },
                ObserverIndex(i),
            ))
            .with_children(|parent| {
                // Red hand, drawn above the face, pivoting around the center
                parent.spawn((
                    MaterialMesh2dBundle {
                        mesh: Mesh2dHandle(
                            meshes.add(Rectangle::new(0.08 * SCALE, OBSERVER_RADIUS * SCALE)),
                        ),
                        material: materials
                            .add(ColorMaterial::from(Color::srgb(1.0, 0.0, 0.0))),
                        transform: Transform::from_xyz(0.0, OBSERVER_RADIUS * SCALE * 0.5, 1.0),
                        ..Default::default()
                    },
                    HandIndex(i),
                ));
            });
    }

    // One grey disc per gravity source present at start
    for src in scenario.system.sources.iter() {
        spawn_source_disc(&mut commands, &mut meshes, &mut materials, src);
    }

    // Diagnostics overlay
    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 16.0,
                color: Color::WHITE,
                ..Default::default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..Default::default()
        }),
        StatsText,
    ));
}

fn spawn_source_disc(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    src: &GravitySource,
) {
    let radius_screen = (src.radius as f32).max(0.02) * SCALE;
    commands.spawn(MaterialMesh2dBundle {
        mesh: Mesh2dHandle(meshes.add(Circle::new(radius_screen))),
        material: materials.add(ColorMaterial::from(Color::srgb(0.53, 0.53, 0.53))),
        transform: Transform::from_xyz(src.x.x as f32 * SCALE, src.x.y as f32 * SCALE, -1.0),
        ..Default::default()
    });
}

/// Keyboard stand-in for the original velocity sliders and add-planet button:
/// Q/A raise/lower observer 1, W/S observer 2, P drops a planet
fn input_system(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut scenario: ResMut<Scenario>,
) {
    let c = scenario.parameters.c;
    let dv = VELOCITY_RATE * c * time.delta_seconds() as f64;

    let bindings = [
        (0usize, KeyCode::KeyQ, KeyCode::KeyA),
        (1usize, KeyCode::KeyW, KeyCode::KeyS),
    ];

    for (i, up, down) in bindings {
        let delta = match (keys.pressed(up), keys.pressed(down)) {
            (true, false) => dv,
            (false, true) => -dv,
            _ => continue,
        };
        if let Some(obs) = scenario.system.observers.get_mut(i) {
            // Same bounds as the original sliders: [0, 0.99 c]
            let v = (obs.clock.velocity() + delta).clamp(0.0, 0.99 * c);
            obs.clock.set_velocity(v);
        }
    }

    if keys.just_pressed(KeyCode::KeyP) {
        let source = next_planet(&scenario);
        scenario.system.add_source(source);
    }
}

/// Deterministic placement for user-added planets, driven by the scenario
/// seed and the running source count
fn next_planet(scenario: &Scenario) -> GravitySource {
    let k = scenario.parameters.seed + scenario.system.sources.len() as f64;
    let x = (k * 0.37).sin() * 5.0;
    let y = (k * 0.13).cos() * 5.0;

    // New planets inherit the last configured source's mass and radius so
    // they stay sensible in whatever unit system the scenario uses
    let (m, radius) = scenario
        .system
        .sources
        .last()
        .map(|s| (s.m, s.radius))
        .unwrap_or((1.0, 1.0));

    GravitySource {
        x: [x, y].into(),
        m,
        radius,
    }
}

/// One simulation tick per frame, driven by the renderer's elapsed time
fn simulation_step_system(
    time: Res<Time>,
    mut scenario: ResMut<Scenario>,
    mut last: ResMut<LastTick>,
) {
    // Split &mut Scenario into &mut fields in one destructuring step
    let Scenario { system, parameters } = &mut *scenario;

    let report = tick(system, parameters, time.delta_seconds() as f64);

    for fault in &report.faults {
        warn!("observer {} stalled this tick: {}", fault.observer, fault.error);
    }

    last.0 = Some(report);
}

/// Spawn discs for planets added since the last frame
fn spawn_new_sources_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut drawn: Local<Option<usize>>,
) {
    let already = drawn.unwrap_or(scenario.system.sources.len());
    for src in scenario.system.sources.iter().skip(already) {
        spawn_source_disc(&mut commands, &mut meshes, &mut materials, src);
    }
    *drawn = Some(scenario.system.sources.len());
}

/// Rotate each clock hand to its observer's proper-time angle
fn sync_hands_system(scenario: Res<Scenario>, mut query: Query<(&HandIndex, &mut Transform)>) {
    for (HandIndex(i), mut transform) in &mut query {
        if let Some(obs) = scenario.system.observers.get(*i) {
            let angle = obs.clock.hand_angle(HAND_SCALE) as f32;
            let rot = Quat::from_rotation_z(angle);
            transform.rotation = rot;
            transform.translation = rot * Vec3::new(0.0, OBSERVER_RADIUS * SCALE * 0.5, 1.0);
        }
    }
}

/// Refresh the on-screen dilation diagnostics
fn stats_text_system(
    scenario: Res<Scenario>,
    last: Res<LastTick>,
    mut query: Query<&mut Text, With<StatsText>>,
) {
    let Some(report) = &last.0 else {
        return;
    };

    let mut lines = String::new();
    for (i, readout) in report.readouts.iter().enumerate() {
        let v = scenario
            .system
            .observers
            .get(i)
            .map(|o| o.clock.velocity())
            .unwrap_or(0.0);
        match readout {
            Some(r) => lines.push_str(&format!(
                "observer {i}: v = {v:.3}  gamma = {:.4}  grav = {:.9}  combined = {:.4}  tau = {:.2}  pitch = {:.3}\n",
                r.kinematic,
                r.gravitational,
                r.combined,
                r.proper_time,
                r.pitch(),
            )),
            None => lines.push_str(&format!("observer {i}: v = {v:.3}  (stalled)\n")),
        }
    }

    for mut text in &mut query {
        text.sections[0].value = lines.clone();
    }
}
