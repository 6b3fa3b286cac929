use mannord_core::models::{EvidencePair, NodeKey, UserPrior};
use mannord_core::traits::IPropagationEngine;
use mannord_propagation::{split_by_sign, BetaPercentile, KargerEngine, Saturation};
use proptest::prelude::*;

fn arb_votes() -> impl Strategy<Value = Vec<(u8, u8, bool)>> {
    prop::collection::vec((0u8..6, 0u8..4, any::<bool>()), 1..30)
}

// ── Saturation ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn saturation_is_odd_monotone_and_bounded(x in -1e6f64..1e6, dx in 1e-3f64..10.0) {
        let s = Saturation::default();
        prop_assert!((s.apply(x) + s.apply(-x)).abs() < 1e-9);
        prop_assert!(s.apply(x + dx) > s.apply(x));
        prop_assert!(s.apply(x).abs() < s.asymptote());
    }
}

// ── Sign split ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn split_by_sign_orders_opposite_values(a in 0.0f64..100.0, b in 0.0f64..100.0, flip in any::<bool>()) {
        let (x, y) = if flip { (a, -b) } else { (-a, b) };
        let pair = split_by_sign(x, y).unwrap();
        prop_assert!(pair.is_sign_split());
        prop_assert_eq!(pair.negative + pair.positive, x + y);
    }

    #[test]
    fn split_by_sign_rejects_shared_strict_sign(a in 1e-6f64..100.0, b in 1e-6f64..100.0) {
        prop_assert!(split_by_sign(a, b).is_err());
        prop_assert!(split_by_sign(-a, -b).is_err());
    }
}

// ── Beta percentile ─────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn reliability_monotone_in_each_side(n in 0.0f64..20.0, p in 0.0f64..20.0, d in 0.5f64..5.0) {
        let stat = BetaPercentile::default();
        let base = stat.reliability(EvidencePair::new(-n, p)).unwrap();
        let more_pos = stat.reliability(EvidencePair::new(-n, p + d)).unwrap();
        let more_neg = stat.reliability(EvidencePair::new(-(n + d), p)).unwrap();
        prop_assert!(more_pos >= base);
        prop_assert!(more_neg <= base);
        prop_assert!((0.0..=1.0).contains(&base));
    }
}

// ── Weighted-normalized engine ──────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn karger_outputs_are_finite_and_bounded(votes in arb_votes(), k in 0usize..15) {
        let mut engine = KargerEngine::default();
        for (u, it, ham) in &votes {
            let answer = if *ham { 1.0 } else { -1.0 };
            engine.add_vote(
                NodeKey::User(format!("u{u}").into()),
                format!("it{it}").into(),
                answer,
                UserPrior::default(),
            );
        }
        let outcome = engine.compute_all(k).unwrap();
        let bound = engine.saturation().asymptote() / outcome.normalization;
        prop_assert!(outcome.normalization > 0.0);
        for r in outcome.user_reliabilities.values() {
            prop_assert!(r.is_finite());
            prop_assert!(r.abs() <= bound.max(0.5) + 1e-9);
        }
        for w in outcome.item_weights.values() {
            prop_assert!(w.is_finite());
        }
    }

    #[test]
    fn karger_unanimous_votes_never_flip_sign(n_users in 2u8..6, n_items in 1u8..4, ham in any::<bool>()) {
        let answer = if ham { 1.0 } else { -1.0 };
        let mut engine = KargerEngine::default();
        for u in 0..n_users {
            for it in 0..n_items {
                engine.add_vote(
                    NodeKey::User(format!("u{u}").into()),
                    format!("it{it}").into(),
                    answer,
                    UserPrior::default(),
                );
            }
        }
        let outcome = engine.compute_all(10).unwrap();
        for w in outcome.item_weights.values() {
            prop_assert!(w * answer > 0.0);
        }
    }
}
