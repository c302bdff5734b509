//! Per-tick simulation phases for the flower.
//!
//! A tick runs, in order:
//! 1. Maturation
//!    - [`spawn_phase`]: append one stem segment when the schedule allows.
//!    - [`stem_maturation_phase`]: re-evaluate rest length and flexibility.
//!    - [`bloom_phase`]: advance the bloom accumulator once unlocked.
//!    - [`petal_spawn_phase`]: create the single petal batch.
//!    - [`petal_maturation_phase`]: grow petals, relax openness and stiffness.
//! 2. Physics
//!    - [`stem_physics_phase`]: springs, gravity and wind on every segment,
//!      root to tip.
//!    - [`petal_physics_phase`]: petal springs, then the reaction of every
//!      petal applied back onto its anchor segment.

use crate::{
    config::FlowerConfig,
    flower::{BloomMode, Environment},
    petal::{Petal, spawn_batch},
    reaction_buffer::ReactionBuffer,
    stem::{Stem, tangent_in},
    types::{ROOT, SegmentId},
};
use glam::Vec2;
use rand::Rng;
use tracing::{debug, info};

/// Forces produced by evaluating one petal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PetalForces {
    /// Net force acting on the petal tip.
    pub on_petal: Vec2,
    /// Force the petal exerts on its anchor; subtract it from the anchor.
    pub reaction: Vec2,
}

/// Appends a segment on top of the stem if `structural_age` has passed
/// `next_spawn_age` and the stem is below its cap.
///
/// The new segment's mass and flexibility depend on its generation (its
/// index in the chain). On success, the next spawn is scheduled
/// `spawn_interval` age units later.
///
/// ### Returns
/// The id of the new segment, or `None` if nothing was spawned.
pub fn spawn_phase(
    stem: &mut Stem,
    structural_age: f32,
    next_spawn_age: &mut f32,
    cfg: &FlowerConfig,
) -> Option<SegmentId> {
    if structural_age <= *next_spawn_age || stem.len() >= cfg.max_segments {
        return None;
    }

    let generation = stem.len();
    let id = stem.add_segment(
        stem.tip(),
        cfg.segment_mass(generation),
        structural_age,
        cfg.segment_rest_length,
        cfg.segment_flexibility(generation),
    );
    *next_spawn_age = structural_age + cfg.spawn_interval;

    debug!(segment = id, age = structural_age, "stem segment spawned");
    Some(id)
}

/// Evaluates the growth and flexibility curves of every non-root segment.
pub fn stem_maturation_phase(stem: &mut Stem, structural_age: f32, cfg: &FlowerConfig) {
    for seg in stem.segments_mut().iter_mut().skip(1) {
        seg.mature(structural_age, cfg);
    }
}

/// Returns the bloom factor after one tick.
///
/// In [`BloomMode::Natural`] the factor only ramps once the stem has more
/// than `bloom_min_segments` segments and the age is past
/// `bloom_start_age`. The factor never decreases and saturates at 1.
pub fn bloom_phase(
    bloom_factor: f32,
    segment_count: usize,
    structural_age: f32,
    dt: f32,
    mode: BloomMode,
    cfg: &FlowerConfig,
) -> f32 {
    let unlocked = match mode {
        BloomMode::Natural => {
            segment_count > cfg.bloom_min_segments && structural_age > cfg.bloom_start_age
        }
        BloomMode::Forced => true,
        BloomMode::Suppressed => false,
    };

    if unlocked {
        (bloom_factor + cfg.bloom_rate * dt).min(1.0)
    } else {
        bloom_factor
    }
}

/// Spawns the petal batch on the current top segment the first time the
/// bloom factor crosses `petal_spawn_threshold`.
///
/// ### Returns
/// `true` if the batch was created during this call.
pub fn petal_spawn_phase(
    petals: &mut Vec<Petal>,
    stem: &Stem,
    bloom_factor: f32,
    structural_age: f32,
    cfg: &FlowerConfig,
    rng: &mut impl Rng,
) -> bool {
    if !petals.is_empty() || cfg.petal_count == 0 || bloom_factor <= cfg.petal_spawn_threshold {
        return false;
    }

    let anchor = stem.tip();
    let anchor_pos = stem.segments()[anchor].position;
    petals.extend(spawn_batch(anchor, anchor_pos, structural_age, cfg, rng));

    info!(
        anchor,
        count = petals.len(),
        age = structural_age,
        "petals spawned"
    );
    true
}

pub fn petal_maturation_phase(
    petals: &mut [Petal],
    structural_age: f32,
    bloom_factor: f32,
    dt: f32,
    cfg: &FlowerConfig,
) {
    for petal in petals {
        petal.mature(structural_age, bloom_factor, dt, cfg);
    }
}

/// Moves every non-root segment one tick, in increasing index order.
///
/// Each segment feels:
/// - gravity scaled by its mass, and the wind at its position;
/// - a radial spring keeping it `current_rest_length` away from its parent,
///   on the side its parent's tangent points to (see [`radial_force`]);
/// - a bending spring pulling it to `parent + tangent(parent) * rest`, whose
///   strength fades as the segment becomes flexible.
///
/// Segments read their parent's position as already updated this tick. The
/// root is a fixed pivot and is never integrated.
pub fn stem_physics_phase(stem: &mut Stem, dt: f32, env: &Environment, cfg: &FlowerConfig) {
    let radial_k = cfg.base_stiffness * cfg.radial_factor;
    let segments = stem.segments_mut();

    for i in 1..segments.len() {
        let (done, rest) = segments.split_at_mut(i);
        let seg = &mut rest[0];
        let Some(parent) = seg.parent else {
            continue;
        };
        debug_assert!(parent < i, "segment {i} has parent {parent}");

        let parent_pos = done[parent].position;
        let tangent = tangent_in(done, parent);

        let mut force = env.gravity * seg.mass + env.wind.force_at(seg.position, env.time);
        force += radial_force(
            seg.position,
            parent_pos,
            tangent,
            seg.current_rest_length,
            radial_k,
        );

        let ideal = parent_pos + tangent * seg.current_rest_length;
        let bend_k = cfg.base_stiffness * (1.0 - seg.current_flexibility);
        force += (ideal - seg.position) * bend_k;

        integrate(
            &mut seg.position,
            &mut seg.velocity,
            force,
            seg.mass,
            dt,
            cfg.stem_damping,
        );
    }
}

/// Evaluates the forces on one petal given its anchor's position and local
/// stem direction.
///
/// The reaction is the full attachment spring force plus
/// `posture_feedback` of the posture spring force.
pub fn petal_forces(
    petal: &Petal,
    anchor_pos: Vec2,
    stem_dir: Vec2,
    env: &Environment,
    cfg: &FlowerConfig,
) -> PetalForces {
    let gravity = env.gravity * petal.mass;
    let wind = env.wind.force_at(petal.tip_position, env.time) * cfg.wind_surface_multiplier;

    let attachment = length_spring(
        petal.tip_position,
        anchor_pos,
        petal.current_length,
        cfg.attachment_stiffness,
    );

    let target = anchor_pos + petal.posture_direction(stem_dir) * petal.current_length;
    let posture = (target - petal.tip_position) * petal.stiffness;

    PetalForces {
        on_petal: gravity + wind + attachment + posture,
        reaction: attachment + posture * cfg.posture_feedback,
    }
}

/// Moves every petal tip one tick and feeds the petal reactions back into
/// the anchor segments' velocities.
///
/// Must run after [`stem_physics_phase`]: petals read their anchors'
/// positions as updated this tick. Reactions are collected in `reactions`
/// and applied once all petals have been evaluated. A petal anchored to the
/// root has nothing to push against and its reaction is dropped.
pub fn petal_physics_phase(
    petals: &mut [Petal],
    stem: &mut Stem,
    reactions: &mut ReactionBuffer,
    dt: f32,
    env: &Environment,
    cfg: &FlowerConfig,
) {
    reactions.ensure_len(stem.len());

    for petal in petals.iter_mut() {
        assert!(
            petal.anchor < stem.len(),
            "petal anchor {} out of range for {} segments",
            petal.anchor,
            stem.len()
        );
        let anchor_pos = stem.segments()[petal.anchor].position;
        let stem_dir = stem.tangent(petal.anchor);
        let forces = petal_forces(petal, anchor_pos, stem_dir, env, cfg);

        integrate(
            &mut petal.tip_position,
            &mut petal.tip_velocity,
            forces.on_petal,
            petal.mass,
            dt,
            cfg.petal_damping,
        );

        if petal.anchor != ROOT {
            reactions.add(petal.anchor, forces.reaction);
        }
    }

    apply_reactions(stem, reactions, dt);
}

/// Subtracts each recorded reaction, as an impulse over `dt`, from the
/// velocity of the segment it acts on.
pub fn apply_reactions(stem: &mut Stem, reactions: &ReactionBuffer, dt: f32) {
    let segments = stem.segments_mut();
    for id in reactions.loaded_indices() {
        let seg = &mut segments[id];
        seg.velocity -= reactions.total(id) * (dt / seg.mass);
    }
}

/// Radial spring between a segment and its parent.
///
/// In front of the parent (along `tangent`) this is a plain length spring.
/// A segment that has fallen behind its parent is pulled through it to
/// `parent + tangent * rest` instead, so the stem has no folded rest state.
#[inline]
fn radial_force(pos: Vec2, parent_pos: Vec2, tangent: Vec2, rest: f32, k: f32) -> Vec2 {
    if (pos - parent_pos).dot(tangent) < 0.0 {
        (parent_pos + tangent * rest - pos) * k
    } else {
        length_spring(pos, parent_pos, rest, k)
    }
}

/// Spring force on a body at `pos` that keeps it `rest` away from `anchor`.
///
/// Attracts when stretched, repels when compressed. A body sitting exactly
/// on the anchor has no defined direction and feels nothing.
#[inline]
fn length_spring(pos: Vec2, anchor: Vec2, rest: f32, k: f32) -> Vec2 {
    let delta = pos - anchor;
    let dist = delta.length();
    -delta.normalize_or_zero() * ((dist - rest) * k)
}

/// Semi-implicit Euler step with per-tick velocity damping.
#[inline]
fn integrate(position: &mut Vec2, velocity: &mut Vec2, force: Vec2, mass: f32, dt: f32, damping: f32) {
    debug_assert!(mass > 0.0);
    *velocity += force / mass * dt;
    *velocity *= damping;
    *position += *velocity * dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{rng::create_rng, types::UP, wind::CalmAir};

    fn calm_env(wind: &CalmAir) -> Environment<'_> {
        Environment {
            gravity: Vec2::ZERO,
            wind,
            time: 0.0,
        }
    }

    /// A root plus one grown segment standing straight up.
    fn two_segment_stem(cfg: &FlowerConfig) -> Stem {
        let mut stem = Stem::new(Vec2::ZERO, cfg.root_mass);
        let id = stem.add_segment(ROOT, 1.0, 0.0, 35.0, 0.5);
        let seg = &mut stem.segments_mut()[id];
        seg.current_rest_length = 35.0;
        seg.position = UP * 35.0;
        stem
    }

    #[test]
    fn spawn_phase_appends_on_tip_and_schedules_next() {
        let cfg = FlowerConfig::default();
        let mut stem = Stem::new(Vec2::ZERO, cfg.root_mass);
        let mut next = 0.0;

        assert_eq!(spawn_phase(&mut stem, 0.0, &mut next, &cfg), None);

        let id = spawn_phase(&mut stem, 0.5, &mut next, &cfg);
        assert_eq!(id, Some(1));
        assert_eq!(next, 0.5 + cfg.spawn_interval);

        let seg = &stem.segments()[1];
        assert_eq!(seg.parent, Some(ROOT));
        assert_eq!(seg.mass, cfg.segment_mass(1));
        assert_eq!(seg.target_flexibility, cfg.segment_flexibility(1));
        assert_eq!(seg.target_rest_length, cfg.segment_rest_length);
        assert_eq!(seg.spawn_age, 0.5);

        // Not due yet.
        assert_eq!(spawn_phase(&mut stem, 1.0, &mut next, &cfg), None);
        assert_eq!(stem.len(), 2);
    }

    #[test]
    fn spawn_phase_respects_cap() {
        let mut cfg = FlowerConfig::default();
        cfg.max_segments = 3;
        let mut stem = Stem::new(Vec2::ZERO, cfg.root_mass);
        let mut next = 0.0;

        for i in 0..20 {
            spawn_phase(&mut stem, 10.0 * (i + 1) as f32, &mut next, &cfg);
        }
        assert_eq!(stem.len(), 3);
    }

    #[test]
    fn stem_maturation_skips_root() {
        let cfg = FlowerConfig::default();
        let mut stem = Stem::new(Vec2::ZERO, cfg.root_mass);
        stem.add_segment(ROOT, 1.0, 1.0, 35.0, 0.5);

        stem_maturation_phase(&mut stem, 3.0, &cfg);

        assert_eq!(stem.segments()[ROOT].current_rest_length, 0.0);
        assert!(stem.segments()[1].current_rest_length > 0.0);
        assert!(stem.segments()[1].current_flexibility > 0.0);
    }

    #[test]
    fn bloom_phase_waits_for_both_thresholds() {
        let cfg = FlowerConfig::default();
        let dt = 0.1;
        let few = cfg.bloom_min_segments;
        let many = cfg.bloom_min_segments + 1;
        let young = cfg.bloom_start_age - 1.0;
        let old = cfg.bloom_start_age + 1.0;

        assert_eq!(bloom_phase(0.0, few, old, dt, BloomMode::Natural, &cfg), 0.0);
        assert_eq!(bloom_phase(0.0, many, young, dt, BloomMode::Natural, &cfg), 0.0);
        let b = bloom_phase(0.0, many, old, dt, BloomMode::Natural, &cfg);
        assert!((b - cfg.bloom_rate * dt).abs() < 1e-6);
    }

    #[test]
    fn bloom_phase_saturates_and_honors_overrides() {
        let cfg = FlowerConfig::default();
        assert_eq!(bloom_phase(0.999, 100, 100.0, 1.0, BloomMode::Natural, &cfg), 1.0);
        assert!(bloom_phase(0.0, 1, 0.0, 0.1, BloomMode::Forced, &cfg) > 0.0);
        assert_eq!(bloom_phase(0.3, 100, 100.0, 0.1, BloomMode::Suppressed, &cfg), 0.3);
    }

    #[test]
    fn petal_spawn_phase_spawns_once_on_tip() {
        let cfg = FlowerConfig::default();
        let mut stem = Stem::new(Vec2::ZERO, cfg.root_mass);
        stem.add_segment(ROOT, 1.0, 0.0, 35.0, 0.5);
        stem.segments_mut()[1].position = Vec2::new(0.0, -30.0);
        let mut petals = Vec::new();
        let mut rng = create_rng(1);

        assert!(!petal_spawn_phase(&mut petals, &stem, cfg.petal_spawn_threshold, 9.0, &cfg, &mut rng));
        assert!(petals.is_empty());

        assert!(petal_spawn_phase(&mut petals, &stem, 0.2, 9.0, &cfg, &mut rng));
        assert_eq!(petals.len(), cfg.petal_count);
        assert!(petals.iter().all(|p| p.anchor == 1));
        assert!(petals.iter().all(|p| p.tip_position == Vec2::new(0.0, -30.0)));

        stem.add_segment(1, 1.0, 0.0, 35.0, 0.5);
        assert!(!petal_spawn_phase(&mut petals, &stem, 0.9, 10.0, &cfg, &mut rng));
        assert_eq!(petals.len(), cfg.petal_count);
    }

    #[test]
    fn stem_physics_never_moves_root() {
        let cfg = FlowerConfig::default();
        let mut stem = two_segment_stem(&cfg);
        let wind = CalmAir;
        let env = Environment {
            gravity: Vec2::new(300.0, 900.0),
            wind: &wind,
            time: 0.0,
        };
        for _ in 0..100 {
            stem_physics_phase(&mut stem, 0.05, &env, &cfg);
        }
        assert_eq!(stem.segments()[ROOT].position, Vec2::ZERO);
        assert_eq!(stem.segments()[ROOT].velocity, Vec2::ZERO);
    }

    #[test]
    fn stem_physics_extends_segment_to_rest_length() {
        let cfg = FlowerConfig::default();
        let mut stem = Stem::new(Vec2::ZERO, cfg.root_mass);
        let id = stem.add_segment(ROOT, 1.0, 0.0, 35.0, 0.5);
        stem.segments_mut()[id].current_rest_length = 35.0;

        let wind = CalmAir;
        let env = calm_env(&wind);
        for _ in 0..2000 {
            stem_physics_phase(&mut stem, 0.016, &env, &cfg);
        }
        let pos = stem.segments()[id].position;
        assert!((pos - UP * 35.0).length() < 0.1, "segment at {pos}");
    }

    #[test]
    fn segment_behind_its_parent_recovers_to_the_tangent_side() {
        let cfg = FlowerConfig::default();
        let mut stem = two_segment_stem(&cfg);
        // Below the root, closer than rest length.
        stem.segments_mut()[1].position = -UP * 10.0;

        let wind = CalmAir;
        let env = calm_env(&wind);
        for _ in 0..2000 {
            stem_physics_phase(&mut stem, 0.016, &env, &cfg);
        }
        let pos = stem.segments()[1].position;
        assert!(pos.dot(UP) > 0.0, "segment still behind root at {pos}");
        assert!((pos - UP * 35.0).length() < 0.1, "segment at {pos}");
    }

    #[test]
    fn folded_chain_straightens() {
        let cfg = FlowerConfig::default();
        let mut stem = two_segment_stem(&cfg);
        let id = stem.add_segment(1, 1.0, 0.0, 35.0, 0.5);
        {
            let seg = &mut stem.segments_mut()[id];
            seg.current_rest_length = 35.0;
            // Folded back between the root and segment 1.
            seg.position = UP * 9.5;
        }

        let wind = CalmAir;
        let env = calm_env(&wind);
        for _ in 0..3000 {
            stem_physics_phase(&mut stem, 0.016, &env, &cfg);
        }
        let segs = stem.segments();
        for i in 1..segs.len() {
            let parent = segs[i - 1].position;
            assert!((segs[i].position - parent).dot(UP) > 0.0, "segment {i} folded");
            let err = (segs[i].position - (parent + UP * 35.0)).length();
            assert!(err < 0.1, "segment {i} is {err} away from rest");
        }
    }

    #[test]
    fn radial_force_matches_length_spring_in_front() {
        let parent = Vec2::new(1.0, -4.0);
        let front = parent + Vec2::new(3.0, -20.0);
        assert_eq!(
            radial_force(front, parent, UP, 35.0, 32.0),
            length_spring(front, parent, 35.0, 32.0)
        );
        // Right on top of the parent the direction is undefined: no push.
        assert_eq!(radial_force(parent, parent, UP, 35.0, 32.0), Vec2::ZERO);
    }

    #[test]
    fn radial_force_pulls_a_folded_segment_forward() {
        let behind = Vec2::new(0.0, 10.0);
        let f = radial_force(behind, Vec2::ZERO, UP, 35.0, 32.0);
        assert_eq!(f, (UP * 35.0 - behind) * 32.0);
        assert!(f.dot(UP) > 0.0);
        // A plain length spring would push it further back.
        assert!(length_spring(behind, Vec2::ZERO, 35.0, 32.0).dot(UP) < 0.0);
    }

    #[test]
    fn flexible_segment_bends_further_under_side_load() {
        let mut cfg = FlowerConfig::default();
        cfg.radial_factor = 0.0;
        let wind = CalmAir;
        let env = Environment {
            gravity: Vec2::new(50.0, 0.0),
            wind: &wind,
            time: 0.0,
        };

        let deflection = |flex: f32| {
            let mut stem = two_segment_stem(&cfg);
            stem.segments_mut()[1].current_flexibility = flex;
            for _ in 0..3000 {
                stem_physics_phase(&mut stem, 0.016, &env, &cfg);
            }
            stem.segments()[1].position.x
        };

        let rigid = deflection(0.0);
        let soft = deflection(0.8);
        assert!(rigid > 0.0);
        assert!(soft > rigid * 2.0, "rigid {rigid}, soft {soft}");
    }

    #[test]
    fn petal_forces_mirror_attachment_and_half_posture() {
        let cfg = FlowerConfig::default();
        let mut petal = Petal::new(1, Vec2::ZERO, 0.0, 0.0, 30.0, &cfg);
        petal.current_length = 20.0;
        petal.openness = 1.0;
        petal.stiffness = 4.0;
        petal.tip_position = Vec2::new(10.0, 5.0);

        let wind = CalmAir;
        let env = calm_env(&wind);
        let anchor = Vec2::ZERO;
        let f = petal_forces(&petal, anchor, UP, &env, &cfg);

        let attachment = length_spring(petal.tip_position, anchor, 20.0, cfg.attachment_stiffness);
        let posture = (Vec2::new(20.0, 0.0) - petal.tip_position) * 4.0;
        assert!((f.on_petal - (attachment + posture)).length() < 1e-4);
        assert!((f.reaction - (attachment + posture * 0.5)).length() < 1e-4);
    }

    #[test]
    fn petal_at_rest_exerts_only_its_weight_on_petal() {
        let cfg = FlowerConfig::default();
        let mut petal = Petal::new(1, Vec2::ZERO, 0.0, 0.0, 30.0, &cfg);
        petal.current_length = 20.0;
        petal.tip_position = UP * 20.0;

        let wind = CalmAir;
        let env = Environment {
            gravity: Vec2::new(0.0, 10.0),
            wind: &wind,
            time: 0.0,
        };
        let f = petal_forces(&petal, Vec2::ZERO, UP, &env, &cfg);
        assert!((f.on_petal - Vec2::new(0.0, 10.0) * petal.mass).length() < 1e-4);
        assert!(f.reaction.length() < 1e-4);
    }

    #[test]
    fn petal_physics_pushes_reaction_into_anchor_velocity() {
        let cfg = FlowerConfig::default();
        let mut stem = two_segment_stem(&cfg);
        let anchor_pos = stem.segments()[1].position;

        let mut petal = Petal::new(1, anchor_pos, 0.0, 0.0, 30.0, &cfg);
        petal.current_length = 20.0;
        petal.tip_position = anchor_pos + Vec2::new(35.0, 0.0);
        let mut petals = vec![petal.clone()];

        let wind = CalmAir;
        let env = calm_env(&wind);
        let dt = 0.016;
        let expected = petal_forces(&petal, anchor_pos, stem.tangent(1), &env, &cfg);
        let v_before = stem.segments()[1].velocity;
        let mass = stem.segments()[1].mass;

        let mut reactions = ReactionBuffer::with_len(0);
        petal_physics_phase(&mut petals, &mut stem, &mut reactions, dt, &env, &cfg);

        let v_after = stem.segments()[1].velocity;
        assert_eq!(v_after, v_before - expected.reaction * (dt / mass));
        // Stretched petal pulls the anchor toward itself.
        assert!(v_after.x > 0.0);
        // The tip is pulled back toward the anchor.
        assert!(petals[0].tip_velocity.x < 0.0);
        assert_eq!(reactions.loaded_indices().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn reactions_from_several_petals_accumulate() {
        let cfg = FlowerConfig::default();
        let mut stem = two_segment_stem(&cfg);
        let anchor_pos = stem.segments()[1].position;

        let mut petals: Vec<Petal> = (0..3)
            .map(|_| {
                let mut p = Petal::new(1, anchor_pos, 0.0, 0.0, 30.0, &cfg);
                p.current_length = 10.0;
                p.tip_position = anchor_pos + Vec2::new(0.0, 25.0);
                p
            })
            .collect();

        let wind = CalmAir;
        let env = calm_env(&wind);
        let single = petal_forces(&petals[0], anchor_pos, stem.tangent(1), &env, &cfg);
        let mut reactions = ReactionBuffer::with_len(0);
        petal_physics_phase(&mut petals, &mut stem, &mut reactions, 0.016, &env, &cfg);

        assert_eq!(reactions.loaded_indices().collect::<Vec<_>>(), vec![1]);
        assert!((reactions.total(1) - single.reaction * 3.0).length() < 1e-3);
        assert!(stem.segments()[1].velocity.y > 0.0);
    }

    #[test]
    fn root_anchored_petal_leaves_root_alone() {
        let cfg = FlowerConfig::default();
        let mut stem = Stem::new(Vec2::ZERO, cfg.root_mass);
        let mut petal = Petal::new(ROOT, Vec2::ZERO, 1.0, 0.0, 30.0, &cfg);
        petal.current_length = 10.0;
        petal.tip_position = Vec2::new(40.0, 40.0);
        let mut petals = vec![petal];

        let wind = CalmAir;
        let env = calm_env(&wind);
        let mut reactions = ReactionBuffer::with_len(0);
        petal_physics_phase(&mut petals, &mut stem, &mut reactions, 0.016, &env, &cfg);

        assert_eq!(stem.segments()[ROOT].velocity, Vec2::ZERO);
        assert!(!reactions.is_loaded(ROOT));
    }

    #[test]
    fn length_spring_is_zero_at_rest_and_on_anchor() {
        assert_eq!(length_spring(Vec2::new(0.0, -5.0), Vec2::ZERO, 5.0, 10.0), Vec2::ZERO);
        assert_eq!(length_spring(Vec2::ZERO, Vec2::ZERO, 5.0, 10.0), Vec2::ZERO);
        let pull = length_spring(Vec2::new(8.0, 0.0), Vec2::ZERO, 5.0, 10.0);
        assert_eq!(pull, Vec2::new(-30.0, 0.0));
        let push = length_spring(Vec2::new(2.0, 0.0), Vec2::ZERO, 5.0, 10.0);
        assert_eq!(push, Vec2::new(30.0, 0.0));
    }

    #[test]
    fn integrate_damps_per_tick() {
        let mut pos = Vec2::ZERO;
        let mut vel = Vec2::new(10.0, 0.0);
        integrate(&mut pos, &mut vel, Vec2::ZERO, 1.0, 0.5, 0.9);
        assert_eq!(vel, Vec2::new(9.0, 0.0));
        assert_eq!(pos, Vec2::new(4.5, 0.0));
    }
}
