use bevy::log::warn;
use bevy::prelude::*;
use bevy::math::primitives::{Cylinder, Sphere};

use crate::simulation::scenario::Scenario3D;
use crate::simulation::states::GravitySource3;
use crate::simulation::stepper::{tick_3d, TickReport};

/// Component tagging each clock hand with its observer index into
/// Scenario3D.system.observers
#[derive(Component)]
struct HandIndex3(pub usize);

/// Marker for the diagnostics text block
#[derive(Component)]
struct StatsText3;

/// Report from the most recent tick, for the diagnostics overlay
#[derive(Resource, Default)]
struct LastTick3(Option<TickReport>);

/// World-space → screen-space scaling factor for positions and radii
const SCALE3D: f32 = 50.0;

/// Distance of the camera from the origin along +Z
const CAMERA_DISTANCE: f32 = 750.0;

/// Drawn radius of an observer clock sphere in world units
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

/// Convenience entrypoint, mirroring run_2d(scenario: Scenario)
pub fn run_3d(scenario: Scenario3D) {
    println!(
        "run_3d: starting Bevy 3D viewer with {} observers, {} sources",
        scenario.system.observers.len(),
        scenario.system.sources.len()
    );

    App::new()
        .insert_resource(scenario)
        .insert_resource(LastTick3::default())
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_3d)
        .add_systems(
            Update,
            (
                input_3d,
                simulation_step_3d,
                spawn_new_sources_3d,
                sync_hands_3d,
                stats_text_3d,
            )
                .chain(),
        )
        .run();
}

/// Startup system: spawn camera, light, and one sphere + hand per observer
fn setup_3d(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scenario: Res<Scenario3D>,
) {
    // Simple 3D camera looking at the origin
    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.0, 0.0, 0.0)), // pure black
            ..Default::default()
        },
        transform: Transform::from_xyz(200.0, 150.0, CAMERA_DISTANCE)
            .looking_at(Vec3::ZERO, Vec3::Y),
        ..Default::default()
    });

    // Basic point light
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 1500.0,
            range: 1000.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(100.0, 100.0, CAMERA_DISTANCE),
        ..Default::default()
    });

    // One sphere + child clock hand per observer
    for (i, obs) in scenario.system.observers.iter().enumerate() {
        let radius_screen = OBSERVER_RADIUS * SCALE3D;

        commands
            .spawn(PbrBundle {
                mesh: meshes.add(Sphere::new(radius_screen).mesh()),
                material: materials.add(StandardMaterial {
                    base_color: observer_color(i),
                    ..Default::default()
                }),
                transform: Transform::from_xyz(
                    (obs.x.x as f32) * SCALE3D,
                    (obs.x.y as f32) * SCALE3D,
                    (obs.x.z as f32) * SCALE3D,
                ),
                ..Default::default()
            })
            .with_children(|parent| {
                // Red hand sticking out of the sphere, pivoting around its center
                parent.spawn((
                    PbrBundle {
                        mesh: meshes.add(Cylinder::new(0.05 * SCALE3D, 2.0 * SCALE3D)),
                        material: materials.add(StandardMaterial {
                            base_color: Color::srgb(1.0, 0.0, 0.0),
                            unlit: true,
                            ..Default::default()
                        }),
                        transform: Transform::from_xyz(0.0, radius_screen, 0.0),
                        ..Default::default()
                    },
                    HandIndex3(i),
                ));
            });
    }

    // One grey sphere per gravity source present at start
    for src in scenario.system.sources.iter() {
        spawn_source_sphere(&mut commands, &mut meshes, &mut materials, src);
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
        StatsText3,
    ));
}

fn spawn_source_sphere(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    src: &GravitySource3,
) {
    // Ensure a minimum visual radius so tiny bodies are still visible
    let radius_screen = (src.radius as f32).max(0.02) * SCALE3D;

    commands.spawn(PbrBundle {
        mesh: meshes.add(Sphere::new(radius_screen).mesh()),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.53, 0.53, 0.53),
            ..Default::default()
        }),
        transform: Transform::from_xyz(
            (src.x.x as f32) * SCALE3D,
            (src.x.y as f32) * SCALE3D,
            (src.x.z as f32) * SCALE3D,
        ),
        ..Default::default()
    });
}

/// Keyboard stand-in for the original velocity sliders and add-planet button:
/// Q/A raise/lower observer 1, W/S observer 2, P drops a planet
fn input_3d(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut scenario: ResMut<Scenario3D>,
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
fn next_planet(scenario: &Scenario3D) -> GravitySource3 {
    let k = scenario.parameters.seed + scenario.system.sources.len() as f64;
    let x = (k * 0.37).sin() * 5.0;
    let y = 0.0;
    let z = (k * 0.13).cos() * 5.0;

    // New planets inherit the last configured source's mass and radius so
    // they stay sensible in whatever unit system the scenario uses
    let (m, radius) = scenario
        .system
        .sources
        .last()
        .map(|s| (s.m, s.radius))
        .unwrap_or((1.0, 1.0));

    GravitySource3 {
        x: [x, y, z].into(),
        m,
        radius,
    }
}

/// One simulation tick per frame for the 3D scenario
fn simulation_step_3d(
    time: Res<Time>,
    mut scenario: ResMut<Scenario3D>,
    mut last: ResMut<LastTick3>,
) {
    let Scenario3D { system, parameters } = &mut *scenario;

    let report = tick_3d(system, parameters, time.delta_seconds() as f64);

    for fault in &report.faults {
        warn!("observer {} stalled this tick: {}", fault.observer, fault.error);
    }

    last.0 = Some(report);
}

/// Spawn spheres for planets added since the last frame
fn spawn_new_sources_3d(
    mut commands: Commands,
    scenario: Res<Scenario3D>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut drawn: Local<Option<usize>>,
) {
    let already = drawn.unwrap_or(scenario.system.sources.len());
    for src in scenario.system.sources.iter().skip(already) {
        spawn_source_sphere(&mut commands, &mut meshes, &mut materials, src);
    }
    *drawn = Some(scenario.system.sources.len());
}

/// Rotate each clock hand to its observer's proper-time angle
fn sync_hands_3d(scenario: Res<Scenario3D>, mut query: Query<(&HandIndex3, &mut Transform)>) {
    for (HandIndex3(i), mut transform) in &mut query {
        if let Some(obs) = scenario.system.observers.get(*i) {
            let angle = obs.clock.hand_angle(HAND_SCALE) as f32;
            let rot = Quat::from_rotation_z(angle);
            transform.rotation = rot;
            transform.translation = rot * Vec3::new(0.0, OBSERVER_RADIUS * SCALE3D, 0.0);
        }
    }
}

/// Refresh the on-screen dilation diagnostics
fn stats_text_3d(
    scenario: Res<Scenario3D>,
    last: Res<LastTick3>,
    mut query: Query<&mut Text, With<StatsText3>>,
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
