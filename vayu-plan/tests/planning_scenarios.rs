//! End-to-end planning scenarios.
//!
//! These tests run the full planner (growth, extraction, smoothing) against
//! small hand-built worlds and check the properties every produced path must
//! have.

use std::f64::consts::{FRAC_PI_2, PI};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use vayu_plan::planning::{Bounds, PathSmoother, path_length};
use vayu_plan::{
    CollisionChecker, CollisionConfig, Obstacle, PlanStatus, Planner, PlannerConfig,
    SmoothingConfig, Strategy, World, WorldPoint,
};

// ============================================================================
// Helpers
// ============================================================================

fn blocking_world() -> World {
    World::new(
        WorldPoint::ZERO,
        WorldPoint::new(5.0, 0.0),
        vec![Obstacle::new(WorldPoint::new(2.0, 0.0), 1.0, 4.0, 0.0)],
    )
    .unwrap()
}

fn tight_margin() -> CollisionConfig {
    CollisionConfig {
        margin: 0.2,
        ..Default::default()
    }
}

fn planner(strategy: Strategy, collision: CollisionConfig) -> Planner {
    Planner::new(
        PlannerConfig {
            strategy,
            ..Default::default()
        },
        collision,
        SmoothingConfig::default(),
    )
    .unwrap()
}

fn assert_segments_safe(checker: &CollisionChecker<'_>, path: &[WorldPoint]) {
    for pair in path.windows(2) {
        assert!(
            checker.is_segment_safe(pair[0], pair[1]),
            "unsafe segment {:?} -> {:?}",
            pair[0],
            pair[1]
        );
    }
}

// ============================================================================
// Open World
// ============================================================================

#[test]
fn test_open_world_multi_bias_reaches_goal() {
    let world = World::empty(WorldPoint::ZERO, WorldPoint::new(5.0, 0.0)).unwrap();
    let planner = Planner::new(
        PlannerConfig {
            strategy: Strategy::MultiBias,
            bounds: Bounds::square(8.0),
            max_iterations: 500,
            ..Default::default()
        },
        CollisionConfig {
            margin: 0.0,
            ..Default::default()
        },
        SmoothingConfig::default(),
    )
    .unwrap();

    for seed in 1..=5 {
        let result = planner.plan_with_rng(&world, &mut SmallRng::seed_from_u64(seed));
        assert_eq!(result.status, PlanStatus::Found, "seed {seed}");

        let raw = result.raw.as_ref().unwrap();
        assert_eq!(raw.waypoints.last(), Some(&WorldPoint::new(5.0, 0.0)));
        assert!(result.stats.iterations <= 500);

        // Nothing to avoid: the shortcut pass collapses to a straight line.
        let smoothed = result.smoothed.as_ref().unwrap();
        assert_eq!(smoothed.waypoints, vec![world.start(), world.goal()]);
        assert!((smoothed.length - 5.0).abs() < 1e-9);
    }
}

#[test]
fn test_open_world_rrt_star_best_effort() {
    let world = World::empty(WorldPoint::new(-2.0, -2.0), WorldPoint::new(3.0, 4.0)).unwrap();
    let planner = Planner::new(
        PlannerConfig {
            strategy: Strategy::RrtStar,
            max_iterations: 800,
            seed: 5,
            ..Default::default()
        },
        CollisionConfig::default(),
        SmoothingConfig::default(),
    )
    .unwrap();

    let result = planner.plan(&world);
    assert_eq!(result.status, PlanStatus::Found);
    assert_eq!(result.stats.iterations, 800);

    let raw = result.raw.unwrap();
    assert_eq!(raw.waypoints.first(), Some(&world.start()));
    assert_eq!(raw.waypoints.last(), Some(&world.goal()));
    // Never shorter than the straight line.
    assert!(raw.length >= world.start().distance(&world.goal()) - 1e-9);
}

// ============================================================================
// Blocking Obstacle
// ============================================================================

#[test]
fn test_direct_segment_blocked() {
    let world = blocking_world();
    let checker = CollisionChecker::new(&world, tight_margin());
    assert!(!checker.is_segment_safe(world.start(), world.goal()));
    assert!(!checker.is_colliding(world.start()));
    assert!(!checker.is_colliding(world.goal()));
}

#[test]
fn test_paths_route_around_obstacle() {
    let world = blocking_world();
    let checker = CollisionChecker::new(&world, tight_margin());

    for strategy in [Strategy::MultiBias, Strategy::RrtStar] {
        let planner = planner(strategy, tight_margin());
        for seed in [3, 17] {
            let result = planner.plan_with_rng(&world, &mut SmallRng::seed_from_u64(seed));
            assert_eq!(result.status, PlanStatus::Found, "{strategy} seed {seed}");

            let raw = result.raw.as_ref().unwrap();
            let smoothed = result.smoothed.as_ref().unwrap();

            for path in [&raw.waypoints, &smoothed.waypoints] {
                assert_eq!(path.first(), Some(&world.start()));
                assert_eq!(path.last(), Some(&world.goal()));
                assert_segments_safe(&checker, path);
            }

            // Going around is longer than going through.
            assert!(smoothed.length > 5.0);
            assert!(smoothed.waypoints.len() >= 3);
        }
    }
}

#[test]
fn test_default_config_paths_clear_inflated_obstacle() {
    let world = blocking_world();
    let checker = CollisionChecker::new(&world, tight_margin());

    for strategy in [Strategy::MultiBias, Strategy::RrtStar] {
        let planner = Planner::new(
            PlannerConfig {
                strategy,
                ..Default::default()
            },
            tight_margin(),
            SmoothingConfig::default(),
        )
        .unwrap();
        for seed in 1..=30 {
            let result = planner.plan_with_rng(&world, &mut SmallRng::seed_from_u64(seed));
            let (Some(raw), Some(smoothed)) = (&result.raw, &result.smoothed) else {
                panic!("{strategy} seed {seed}: no path");
            };
            assert!(
                checker.is_path_safe(&raw.waypoints),
                "{strategy} seed {seed}: raw path unsafe"
            );
            assert!(
                checker.is_path_safe(&smoothed.waypoints),
                "{strategy} seed {seed}: smoothed path unsafe"
            );
        }
    }
}

#[test]
fn test_point_only_mode_still_plans() {
    let world = blocking_world();
    let planner = Planner::new(
        PlannerConfig {
            check_steer_edge: false,
            seed: 3,
            ..Default::default()
        },
        tight_margin(),
        SmoothingConfig::default(),
    )
    .unwrap();

    let result = planner.plan(&world);
    assert_eq!(result.status, PlanStatus::Found);
    let raw = result.raw.unwrap();
    assert_eq!(raw.waypoints.first(), Some(&world.start()));
    assert_eq!(raw.waypoints.last(), Some(&world.goal()));
}

// ============================================================================
// Smoothing
// ============================================================================

#[test]
fn test_smoothing_properties() {
    let world = blocking_world();
    let checker = CollisionChecker::new(&world, tight_margin());
    let smoother = PathSmoother::new(&checker);
    let planner = planner(Strategy::MultiBias, tight_margin());

    for seed in 20..26 {
        let result = planner.plan_with_rng(&world, &mut SmallRng::seed_from_u64(seed));
        let (Some(raw), Some(smoothed)) = (result.raw, result.smoothed) else {
            continue;
        };

        assert!(smoothed.waypoints.len() <= raw.waypoints.len());
        assert!(smoothed.length <= raw.length + 1e-9);
        assert_segments_safe(&checker, &smoothed.waypoints);

        // Every smoothed waypoint comes from the raw path, in order.
        let mut remaining = raw.waypoints.iter();
        for p in &smoothed.waypoints {
            assert!(remaining.any(|q| q == p));
        }

        assert_eq!(smoother.smooth(&smoothed.waypoints), smoothed.waypoints);
        assert!((path_length(&smoothed.waypoints) - smoothed.length).abs() < 1e-12);
    }
}

// ============================================================================
// Exhaustion and Cancellation
// ============================================================================

#[test]
fn test_unreachable_goal_exhausts_multi_bias() {
    // Goal sits inside an obstacle, so no node can ever land near it.
    let world = World::new(
        WorldPoint::ZERO,
        WorldPoint::new(5.0, 0.0),
        vec![Obstacle::new(WorldPoint::new(5.0, 0.0), 2.0, 2.0, 0.0)],
    )
    .unwrap();
    let planner = Planner::new(
        PlannerConfig {
            max_iterations: 300,
            seed: 9,
            ..Default::default()
        },
        CollisionConfig::default(),
        SmoothingConfig::default(),
    )
    .unwrap();

    let result = planner.plan(&world);
    assert_eq!(result.status, PlanStatus::Exhausted);
    assert!(result.raw.is_none());
    assert!(result.smoothed.is_none());
    assert_eq!(result.stats.iterations, 300);
    assert!(result.stats.rejected_samples > 0);
    // The tree is still reported for diagnostics.
    assert_eq!(result.tree_edges.len(), result.stats.nodes - 1);

    // A failed run leaves nothing behind for the next one.
    let open = World::empty(WorldPoint::ZERO, WorldPoint::new(2.0, 2.0)).unwrap();
    assert!(planner.plan(&open).is_found());
}

#[test]
fn test_rrt_star_never_hard_fails() {
    let world = World::new(
        WorldPoint::ZERO,
        WorldPoint::new(5.0, 0.0),
        vec![Obstacle::new(WorldPoint::new(5.0, 0.0), 2.0, 2.0, 0.0)],
    )
    .unwrap();
    let planner = Planner::new(
        PlannerConfig {
            strategy: Strategy::RrtStar,
            max_iterations: 300,
            seed: 9,
            ..Default::default()
        },
        CollisionConfig::default(),
        SmoothingConfig::default(),
    )
    .unwrap();

    let result = planner.plan(&world);
    assert_eq!(result.status, PlanStatus::Found);
    assert_eq!(result.raw.unwrap().waypoints.last(), Some(&world.goal()));
}

#[test]
fn test_cancel_from_another_thread() {
    let world = blocking_world();
    let planner = Planner::new(
        PlannerConfig {
            strategy: Strategy::RrtStar,
            max_iterations: usize::MAX,
            ..Default::default()
        },
        CollisionConfig::default(),
        SmoothingConfig::default(),
    )
    .unwrap();
    let cancel = AtomicBool::new(false);

    let result = std::thread::scope(|s| {
        let handle = s.spawn(|| {
            planner.plan_with_cancel(&world, &mut SmallRng::seed_from_u64(4), &cancel)
        });
        std::thread::sleep(Duration::from_millis(50));
        cancel.store(true, Ordering::Relaxed);
        handle.join().unwrap()
    });

    assert_eq!(result.status, PlanStatus::Cancelled);
    assert!(result.raw.is_none());
    assert!(result.stats.iterations > 0);
    assert_eq!(result.tree_edges.len(), result.stats.nodes - 1);
}

// ============================================================================
// Concurrency and Determinism
// ============================================================================

#[test]
fn test_concurrent_plans_match_sequential() {
    let worlds = vec![
        blocking_world(),
        World::empty(WorldPoint::new(-4.0, 4.0), WorldPoint::new(4.0, -4.0)).unwrap(),
        World::new(
            WorldPoint::new(-5.0, 0.0),
            WorldPoint::new(5.0, 0.0),
            vec![
                Obstacle::new(WorldPoint::new(-1.5, 1.0), 0.8, 5.0, 0.4),
                Obstacle::new(WorldPoint::new(1.5, -1.0), 0.8, 5.0, -0.4),
            ],
        )
        .unwrap(),
    ];
    let planner = planner(Strategy::MultiBias, CollisionConfig::default());

    let sequential: Vec<_> = worlds
        .iter()
        .map(|w| planner.plan_with_rng(w, &mut SmallRng::seed_from_u64(11)))
        .collect();

    let concurrent: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = worlds
            .iter()
            .map(|w| {
                let planner = &planner;
                s.spawn(move || planner.plan_with_rng(w, &mut SmallRng::seed_from_u64(11)))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (a, b) in sequential.iter().zip(&concurrent) {
        assert_eq!(a.status, b.status);
        assert_eq!(a.raw, b.raw);
        assert_eq!(a.smoothed, b.smoothed);
        assert_eq!(a.tree_edges, b.tree_edges);
    }
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_rotated_rectangle_hand_case() {
    let rotated = Obstacle::new(WorldPoint::ZERO, 2.0, 6.0, FRAC_PI_2);
    let upright = Obstacle::new(WorldPoint::ZERO, 2.0, 6.0, 0.0);
    let swapped = Obstacle::new(WorldPoint::ZERO, 6.0, 2.0, 0.0);
    let p = WorldPoint::new(0.0, 2.9);

    assert!(!rotated.contains(p, 0.0));
    assert!(upright.contains(p, 0.0));
    assert_eq!(rotated.contains(p, 0.0), swapped.contains(p, 0.0));
}

#[test]
fn test_half_turn_symmetry_random_points() {
    let mut rng = SmallRng::seed_from_u64(2024);
    for _ in 0..200 {
        let yaw = rng.gen_range(-PI..PI);
        let a = Obstacle::new(WorldPoint::new(0.5, -1.0), 1.5, 3.0, yaw);
        let b = Obstacle::new(WorldPoint::new(0.5, -1.0), 1.5, 3.0, yaw + PI);
        let p = WorldPoint::new(rng.gen_range(-4.0..4.0), rng.gen_range(-4.0..4.0));
        assert_eq!(a.contains(p, 0.3), b.contains(p, 0.3), "yaw {yaw} at {p:?}");
    }
}

#[test]
fn test_zero_length_segment_is_safe_when_free() {
    let world = blocking_world();
    let checker = CollisionChecker::new(&world, tight_margin());
    let mut rng = SmallRng::seed_from_u64(77);
    for _ in 0..200 {
        let p = WorldPoint::new(rng.gen_range(-7.0..7.0), rng.gen_range(-7.0..7.0));
        assert_eq!(checker.is_segment_safe(p, p), !checker.is_colliding(p));
    }
}
