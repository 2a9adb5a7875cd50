// Dam-break viewer: draws each particle's visual position every frame.
//
// Usage: sph2d [params.json]
use bevy::prelude::*;
use sph2d::{DamController, SimulationError, SimulationParams, SphPlugin, SphState};

const PIXELS_PER_UNIT: f32 = 1000.0;
const PARTICLE_RADIUS: f32 = 0.01;

#[derive(Component)]
struct ParticleVisual {
    index: usize,
}

fn sim_to_world(position: Vec2, half_width: f32) -> Vec3 {
    Vec3::new(
        position.x * PIXELS_PER_UNIT,
        (position.y - half_width * 0.5) * PIXELS_PER_UNIT,
        0.0,
    )
}

fn init_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn spawn_particle_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    state: Res<SphState>,
) {
    let mesh = meshes.add(Circle::new(PARTICLE_RADIUS * PIXELS_PER_UNIT));
    let material = materials.add(Color::hsl(210.0, 0.7, 0.5));
    let half_width = state.params().half_width;

    for (index, particle) in state.particles().iter().enumerate() {
        commands.spawn((
            ParticleVisual { index },
            Mesh2d(mesh.clone()),
            MeshMaterial2d(material.clone()),
            Transform::from_translation(sim_to_world(particle.visual_position, half_width)),
        ));
    }
}

fn update_particle_transforms(
    state: Res<SphState>,
    mut query: Query<(&ParticleVisual, &mut Transform)>,
) {
    let particles = state.particles();
    let half_width = state.params().half_width;
    for (visual, mut transform) in query.iter_mut() {
        if let Some(particle) = particles.get(visual.index) {
            transform.translation = sim_to_world(particle.visual_position, half_width);
        }
    }
}

fn draw_boundaries(mut gizmos: Gizmos, state: Res<SphState>, dam: Res<DamController>) {
    let params = state.params();
    let top = params.half_width;
    let to_screen = |x: f32, y: f32| sim_to_world(Vec2::new(x, y), params.half_width).truncate();
    let wall = Color::srgb(0.6, 0.6, 0.65);

    gizmos.line_2d(
        to_screen(-params.half_width, params.ground),
        to_screen(params.half_width, params.ground),
        wall,
    );
    gizmos.line_2d(
        to_screen(-params.half_width, params.ground),
        to_screen(-params.half_width, top),
        wall,
    );
    gizmos.line_2d(
        to_screen(params.half_width, params.ground),
        to_screen(params.half_width, top),
        wall,
    );

    if dam.state().is_intact() {
        gizmos.line_2d(
            to_screen(params.dam_x, params.ground),
            to_screen(params.dam_x, top),
            Color::srgb(0.8, 0.5, 0.2),
        );
    }
}

fn main() -> Result<(), SimulationError> {
    let params = match std::env::args().nth(1) {
        Some(path) => SimulationParams::from_json_file(path)?,
        None => SimulationParams::default(),
    };
    let plugin = SphPlugin::dam_break(params)?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "sph2d - dam break".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(plugin)
        .add_systems(Startup, (init_camera, spawn_particle_visuals))
        .add_systems(Update, (update_particle_transforms, draw_boundaries))
        .run();

    Ok(())
}
