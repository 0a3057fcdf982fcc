//! Headless соак GUNMETAL
//!
//! Прогоняет арену 4 агентов без рендера: smoke-check детерминизма и
//! отсутствия паник на длинной дистанции.

use bevy::prelude::*;
use gunmetal_agent::{
    create_headless_app, AgentConfig, AgentState, AgentTuning, AmmoPickup, FlatNavMesh, Health,
    NavMesh, SimulationPlugin,
};

fn main() {
    let seed = 42;
    println!("Starting GUNMETAL headless soak (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);
    // Арена в размер карты из пресета
    app.insert_resource(NavMesh(Box::new(FlatNavMesh::sized(60.0, 60.0))));

    let tuning = AgentTuning::new(AgentConfig::deathmatch()).expect("preset must validate");

    let spawn_points = [
        Vec3::new(-20.0, 0.0, -20.0),
        Vec3::new(20.0, 0.0, -20.0),
        Vec3::new(-20.0, 0.0, 20.0),
        Vec3::new(20.0, 0.0, 20.0),
    ];
    for point in spawn_points {
        app.world_mut().spawn((
            Transform::from_translation(point),
            gunmetal_agent::Agent,
            tuning.share(),
        ));
    }
    for point in [Vec3::new(0.0, 0.0, -25.0), Vec3::new(0.0, 0.0, 25.0)] {
        app.world_mut()
            .spawn((Transform::from_translation(point), AmmoPickup::new(10.0)));
    }

    // 1000 тиков ≈ 16.7 секунд матча
    for tick in 0..1000 {
        app.update();

        if tick % 100 == 0 {
            let world = app.world_mut();
            let mut agents = world.query::<(&Health, &AgentState)>();
            let alive = agents.iter(world).filter(|(h, _)| h.is_alive()).count();
            let tracking = agents
                .iter(world)
                .filter(|(_, s)| matches!(s, AgentState::Tracking(_)))
                .count();
            println!("Tick {}: {} alive, {} tracking", tick, alive, tracking);
        }
    }

    println!("Soak complete");
}
