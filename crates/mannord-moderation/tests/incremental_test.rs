//! Single-vote updates: exact rules, undo symmetry, monotonicity, frozen items.

use mannord_core::config::{Algorithm, MannordConfig};
use mannord_core::models::{
    Classification, EvidencePair, ItemRecord, ReliabilityTrail, UserRecord, VoteContribution,
};
use mannord_moderation::IncrementalController;
use mannord_propagation::{BetaPercentile, Saturation};

const EPS: f64 = 1e-9;

fn karger() -> IncrementalController {
    IncrementalController::from_config(&MannordConfig::default())
}

fn dirichlet() -> IncrementalController {
    IncrementalController::from_config(&MannordConfig {
        algorithm: Algorithm::Dirichlet,
        ..MannordConfig::default()
    })
}

fn item(weight: f64) -> ItemRecord {
    let mut item = ItemRecord::new("it".into(), "author".into(), None);
    item.weight = weight;
    item
}

fn scalar_user(raw: f64, normalization: f64) -> UserRecord {
    let mut user = UserRecord::new("u".into());
    user.reliability_raw = raw;
    user.reliability = Saturation::default().apply(raw) / normalization;
    user
}

fn evidence_user(evidence: EvidencePair, reliability: f64) -> UserRecord {
    let mut user = UserRecord::new("u".into());
    user.evidence = evidence;
    user.reliability = reliability;
    user
}

// --- Weighted-normalized ---

#[test]
fn karger_apply_uses_pre_update_weight() {
    let norm = 1.5;
    let mut it = item(0.5);
    let mut caster = scalar_user(3.0, norm);
    let rel_before = caster.reliability;

    let contribution = karger().apply(-1.0, &mut it, &mut caster, norm).unwrap();

    assert!((it.weight - (0.5 - rel_before)).abs() < EPS);
    assert!((caster.reliability_raw - 2.5).abs() < EPS);
    let expected_rel = Saturation::default().apply(2.5) / norm;
    assert!((caster.reliability - expected_rel).abs() < EPS);
    assert_eq!(
        contribution,
        VoteContribution::Scalar {
            weight_delta: -rel_before,
            raw_delta: -0.5,
            trail: ReliabilityTrail {
                before: rel_before,
                after: caster.reliability,
            },
        }
    );
}

#[test]
fn karger_add_then_remove_restores_state() {
    let controller = karger();
    for (answer, weight, raw, norm) in [
        (1.0, 0.0, 0.0, 1.0),
        (-1.0, 3.2, 4.7, 2.07),
        (1.0, -7.9, -2.5, 1.16),
        (-1.0, 9.99, 120.0, 6.3),
    ] {
        let mut it = item(weight);
        let mut caster = scalar_user(raw, norm);
        let (it0, caster0) = (it.clone(), caster.clone());

        let c = controller.apply(answer, &mut it, &mut caster, norm).unwrap();
        let karma = controller
            .undo(answer, Some(c), &mut it, &mut caster, norm)
            .unwrap();

        assert!(karma.is_none());
        assert!((it.weight - it0.weight).abs() < EPS);
        assert!((caster.reliability_raw - caster0.reliability_raw).abs() < EPS);
        assert!((caster.reliability - caster0.reliability).abs() < EPS);
    }
}

#[test]
fn karger_inverse_uses_current_state() {
    let norm = 2.0;
    let mut it = item(1.0);
    let mut caster = scalar_user(2.0, norm);
    let rel = caster.reliability;

    // No recorded contribution: the vote was absorbed by a batch run.
    karger().undo(1.0, None, &mut it, &mut caster, norm).unwrap();

    assert!((it.weight - (1.0 - rel)).abs() < EPS);
    assert!((caster.reliability_raw - (2.0 - it.weight)).abs() < EPS);
    let expected = Saturation::default().apply(caster.reliability_raw) / norm;
    assert!((caster.reliability - expected).abs() < EPS);
}

#[test]
fn karger_votes_move_weight_in_their_direction() {
    let controller = karger();
    for raw in [0.0, 0.3, 5.0, 40.0] {
        let mut ham = item(-0.4);
        let mut caster = scalar_user(raw, 1.3);
        controller.apply(1.0, &mut ham, &mut caster, 1.3).unwrap();
        assert!(ham.weight >= -0.4);

        let mut spam = item(0.4);
        let mut caster = scalar_user(raw, 1.3);
        controller.apply(-1.0, &mut spam, &mut caster, 1.3).unwrap();
        assert!(spam.weight <= 0.4);
    }
}

// --- Dirichlet ---

#[test]
fn dirichlet_spam_vote_moves_evidence_sides() {
    let controller = dirichlet();
    let mut it = item(0.0);
    it.evidence = EvidencePair::new(-1.0, 0.0);
    let mut caster = evidence_user(EvidencePair::new(0.0, 2.0), 0.25);

    let c = controller.apply(-1.0, &mut it, &mut caster, 1.0).unwrap();

    assert_eq!(it.evidence, EvidencePair::new(-1.25, 0.0));
    // Agreeing with a spam-leaning item counts as positive evidence for the caster.
    assert_eq!(caster.evidence, EvidencePair::new(0.0, 3.0));
    let stat = BetaPercentile::default();
    assert_eq!(it.weight, stat.item_weight(it.evidence).unwrap());
    assert_eq!(caster.reliability, stat.reliability(caster.evidence).unwrap());
    assert!(matches!(c, VoteContribution::Evidence { .. }));
}

#[test]
fn dirichlet_ham_vote_on_spam_item_is_negative_evidence() {
    let controller = dirichlet();
    let mut it = item(0.0);
    it.evidence = EvidencePair::new(-2.0, 0.5);
    let mut caster = evidence_user(EvidencePair::ZERO, 0.5);

    controller.apply(1.0, &mut it, &mut caster, 1.0).unwrap();

    assert_eq!(it.evidence, EvidencePair::new(-2.0, 1.0));
    assert_eq!(caster.evidence, EvidencePair::new(-2.0, 0.5));
    assert_eq!(caster.reliability, 0.0);
}

#[test]
fn dirichlet_add_then_remove_restores_state() {
    let controller = dirichlet();
    for (answer, item_ev, user_ev, rel) in [
        (-1.0, EvidencePair::new(-1.0, 0.0), EvidencePair::new(0.0, 2.0), 0.25),
        (1.0, EvidencePair::new(-0.5, 3.0), EvidencePair::new(-1.5, 4.0), 0.125),
        (1.0, EvidencePair::ZERO, EvidencePair::ZERO, 0.0),
    ] {
        let mut it = item(0.0);
        it.evidence = item_ev;
        let mut caster = evidence_user(user_ev, rel);
        let (it0, caster0) = (it.clone(), caster.clone());

        let c = controller.apply(answer, &mut it, &mut caster, 1.0).unwrap();
        controller
            .undo(answer, Some(c), &mut it, &mut caster, 1.0)
            .unwrap();

        assert_eq!(it.evidence, it0.evidence);
        assert_eq!(caster.evidence, caster0.evidence);
        let stat = BetaPercentile::default();
        assert_eq!(it.weight, stat.item_weight(it0.evidence).unwrap());
    }
}

#[test]
fn dirichlet_inverse_stays_sign_split() {
    let controller = dirichlet();
    let mut it = item(0.0);
    it.evidence = EvidencePair::new(-0.1, 0.0);
    // Reliability drifted upward since the vote was absorbed.
    let mut caster = evidence_user(EvidencePair::new(0.0, 0.05), 0.5);

    controller.undo(-1.0, None, &mut it, &mut caster, 1.0).unwrap();

    assert!(it.evidence.is_sign_split());
    assert!(caster.evidence.is_sign_split());
}

// --- Frozen items ---

#[test]
fn frozen_item_only_moves_caster_base() {
    let norm = 1.2;
    for controller in [karger(), dirichlet()] {
        let mut it = item(-12.0);
        it.frozen = true;
        it.classification = Classification::Spam;
        let mut caster = scalar_user(1.0, norm);
        caster.base_reliability = 1.0;

        let rel_before = caster.reliability;
        let c = controller.apply(-1.0, &mut it, &mut caster, norm).unwrap();

        assert_eq!(it.weight, -12.0);
        assert_eq!(
            c,
            VoteContribution::FrozenNudge {
                base_delta: 1.0,
                karma_delta: -1.0,
                trail: ReliabilityTrail {
                    before: rel_before,
                    after: caster.reliability,
                },
            }
        );
    }
}

#[test]
fn frozen_nudge_reverts_exactly() {
    let norm = 1.2;
    let controller = karger();
    let mut it = item(11.0);
    it.frozen = true;
    it.classification = Classification::Ham;
    let mut caster = scalar_user(0.7, norm);
    let caster0 = caster.clone();

    let c = controller.apply(-1.0, &mut it, &mut caster, norm).unwrap();
    assert_eq!(caster.base_reliability, -1.0);
    assert!((caster.reliability_raw - (0.7 - 1.0)).abs() < EPS);

    let karma = controller.undo(-1.0, Some(c), &mut it, &mut caster, norm).unwrap();
    assert_eq!(karma, Some(1.0));
    assert_eq!(caster.base_reliability, caster0.base_reliability);
    assert!((caster.reliability - caster0.reliability).abs() < EPS);
}

#[test]
fn dirichlet_frozen_nudge_reverts_exactly() {
    let controller = dirichlet();
    let mut it = item(0.7);
    it.frozen = true;
    it.classification = Classification::Ham;
    let mut caster = evidence_user(EvidencePair::new(-0.5, 2.0), 0.1);
    caster.base_evidence = EvidencePair::new(-0.5, 0.0);
    let caster0 = caster.clone();

    let c = controller.apply(-1.0, &mut it, &mut caster, 1.0).unwrap();
    assert_eq!(caster.base_evidence, EvidencePair::new(-1.5, 0.0));
    assert_eq!(caster.evidence, EvidencePair::new(-1.5, 2.0));

    controller.undo(-1.0, Some(c), &mut it, &mut caster, 1.0).unwrap();
    assert_eq!(caster.base_evidence, caster0.base_evidence);
    assert_eq!(caster.evidence, caster0.evidence);
}

#[test]
fn karma_nudges_invert() {
    for controller in [karger(), dirichlet()] {
        let mut author = UserRecord::new("a".into());
        let author0 = author.clone();
        controller.nudge_karma(&mut author, -1.0).unwrap();
        assert_ne!(author.karma, author0.karma);
        controller.revert_karma(&mut author, -1.0).unwrap();
        assert_eq!(author.karma.base_reliability, author0.karma.base_reliability);
        assert_eq!(author.karma.base_evidence, author0.karma.base_evidence);
    }
}

#[test]
fn new_item_seeded_from_author_karma() {
    let mut author = UserRecord::new("a".into());
    author.karma.reliability = 1.19;
    let mut it = item(0.0);
    karger().seed_item(&mut it, &author).unwrap();
    let expected = Saturation::default().apply(1.19 * 0.3);
    assert!((it.weight - expected).abs() < EPS);

    author.karma.evidence = EvidencePair::new(-3.0, 0.0);
    let mut it = item(0.0);
    dirichlet().seed_item(&mut it, &author).unwrap();
    assert_eq!(it.evidence, EvidencePair::new(-3.0, 0.0));
    assert!(it.weight < 0.0);
}

// --- Fixed-default reliability ---

fn default_reliability_user() -> UserRecord {
    // Written back by a batch run with fewer than two messages: the stored
    // reliability is the fixed default, not derived from the accumulator.
    let mut user = UserRecord::new("u".into());
    user.reliability_raw = 0.5;
    user.reliability = 0.5;
    user
}

#[test]
fn karger_undo_restores_fixed_default_reliability() {
    let norm = 2.07;
    let controller = karger();
    let mut it = item(-5.6);
    let mut caster = default_reliability_user();

    let c = controller.apply(-1.0, &mut it, &mut caster, norm).unwrap();
    assert!((caster.reliability - 0.5).abs() > 1e-3);
    controller.undo(-1.0, Some(c), &mut it, &mut caster, norm).unwrap();

    assert_eq!(caster.reliability, 0.5);
    assert!((caster.reliability_raw - 0.5).abs() < EPS);
    assert!((it.weight + 5.6).abs() < EPS);
}

#[test]
fn frozen_nudge_undo_restores_fixed_default_reliability() {
    let norm = 2.07;
    let controller = karger();
    let mut it = item(-12.0);
    it.frozen = true;
    it.classification = Classification::Spam;
    let mut caster = default_reliability_user();

    let c = controller.apply(1.0, &mut it, &mut caster, norm).unwrap();
    controller.undo(1.0, Some(c), &mut it, &mut caster, norm).unwrap();

    assert_eq!(caster.reliability, 0.5);
    assert_eq!(caster.base_reliability, 0.0);
}

#[test]
fn undo_rederives_reliability_after_later_changes() {
    let norm = 1.5;
    let controller = karger();
    let (mut a, mut b) = (item(2.0), item(-3.0));
    let mut caster = default_reliability_user();

    let first = controller.apply(1.0, &mut a, &mut caster, norm).unwrap();
    controller.apply(-1.0, &mut b, &mut caster, norm).unwrap();
    controller.undo(1.0, Some(first), &mut a, &mut caster, norm).unwrap();

    let derived = Saturation::default().apply(caster.reliability_raw) / norm;
    assert!((caster.reliability - derived).abs() < EPS);
}
