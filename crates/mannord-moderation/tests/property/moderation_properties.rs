use mannord_core::config::{Algorithm, MannordConfig};
use mannord_core::models::{Classification, EvidencePair, ItemId, ItemRecord, UserId, UserRecord, VoteKind};
use mannord_core::traits::IReputationStore;
use mannord_moderation::{IncrementalController, InMemoryStore, ReputationSystem};
use mannord_propagation::Saturation;
use proptest::prelude::*;

fn arb_kind() -> impl Strategy<Value = VoteKind> {
    prop_oneof![
        Just(VoteKind::FlagSpam),
        Just(VoteKind::FlagHam),
        Just(VoteKind::Upvote),
        Just(VoteKind::Downvote),
    ]
}

fn arb_events() -> impl Strategy<Value = Vec<(u8, u8, VoteKind)>> {
    prop::collection::vec((0u8..5, 0u8..3, arb_kind()), 0..25)
}

fn user(n: u8) -> UserId {
    UserId::new(format!("u{n}"))
}

fn item(n: u8) -> ItemId {
    ItemId::new(format!("i{n}"))
}

fn seeded_system() -> ReputationSystem<InMemoryStore> {
    let mut sys = ReputationSystem::new(InMemoryStore::new(), MannordConfig::default()).unwrap();
    for n in 0..3 {
        sys.add_item(item(n), UserId::from("author"), None, None).unwrap();
    }
    sys
}

fn dyadic(n: i32, scale: f64) -> f64 {
    f64::from(n) / scale
}

// ── Controller rules ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn karger_apply_undo_is_identity(
        spam in any::<bool>(),
        weight in -20.0f64..20.0,
        raw in -50.0f64..50.0,
        norm in 0.1f64..10.0,
    ) {
        let controller = IncrementalController::from_config(&MannordConfig::default());
        let answer = if spam { -1.0 } else { 1.0 };
        let mut it = ItemRecord::new("i".into(), "a".into(), None);
        it.weight = weight;
        let mut caster = UserRecord::new("u".into());
        caster.reliability_raw = raw;
        caster.reliability = Saturation::default().apply(raw) / norm;
        let (it0, caster0) = (it.clone(), caster.clone());

        let c = controller.apply(answer, &mut it, &mut caster, norm).unwrap();
        controller.undo(answer, Some(c), &mut it, &mut caster, norm).unwrap();

        prop_assert!((it.weight - it0.weight).abs() < 1e-9);
        prop_assert!((caster.reliability_raw - caster0.reliability_raw).abs() < 1e-9);
        prop_assert!((caster.reliability - caster0.reliability).abs() < 1e-9);
    }

    #[test]
    fn karger_vote_direction_is_monotone(
        weight in -20.0f64..20.0,
        raw in 0.0f64..50.0,
        norm in 0.1f64..10.0,
        spam in any::<bool>(),
    ) {
        let controller = IncrementalController::from_config(&MannordConfig::default());
        let mut it = ItemRecord::new("i".into(), "a".into(), None);
        it.weight = weight;
        let mut caster = UserRecord::new("u".into());
        caster.reliability_raw = raw;
        caster.reliability = Saturation::default().apply(raw) / norm;

        let answer = if spam { -1.0 } else { 1.0 };
        controller.apply(answer, &mut it, &mut caster, norm).unwrap();
        if spam {
            prop_assert!(it.weight <= weight);
        } else {
            prop_assert!(it.weight >= weight);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn dirichlet_apply_undo_is_identity(
        spam in any::<bool>(),
        item_n in 0i32..40, item_p in 0i32..40,
        user_n in 0i32..40, user_p in 0i32..40,
        rel in 0i32..8,
    ) {
        let config = MannordConfig { algorithm: Algorithm::Dirichlet, ..MannordConfig::default() };
        let controller = IncrementalController::from_config(&config);
        let answer = if spam { -1.0 } else { 1.0 };
        let mut it = ItemRecord::new("i".into(), "a".into(), None);
        it.evidence = EvidencePair::new(-dyadic(item_n, 4.0), dyadic(item_p, 4.0));
        let mut caster = UserRecord::new("u".into());
        caster.evidence = EvidencePair::new(-dyadic(user_n, 4.0), dyadic(user_p, 4.0));
        caster.reliability = dyadic(rel, 8.0);
        let (it0, caster0) = (it.clone(), caster.clone());

        let c = controller.apply(answer, &mut it, &mut caster, 1.0).unwrap();
        prop_assert!(it.evidence.is_sign_split());
        prop_assert!(caster.evidence.is_sign_split());
        controller.undo(answer, Some(c), &mut it, &mut caster, 1.0).unwrap();

        prop_assert_eq!(it.evidence, it0.evidence);
        prop_assert_eq!(caster.evidence, caster0.evidence);
    }
}

// ── System bookkeeping ──────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn spam_flag_count_matches_stored_flags(events in arb_events(), removals in prop::collection::vec((0u8..5, 0u8..3), 0..10)) {
        let mut sys = seeded_system();
        for (u, i, kind) in events {
            sys.cast_vote(&item(i), &user(u), kind).unwrap();
        }
        for (u, i) in removals {
            if sys.store().get_vote(&user(u), &item(i)).unwrap().is_some() {
                sys.remove_vote(&item(i), &user(u)).unwrap();
            }
        }
        for i in 0..3 {
            let flags = sys
                .store()
                .votes_on_item(&item(i))
                .unwrap()
                .iter()
                .filter(|v| v.kind == VoteKind::FlagSpam)
                .count();
            let record = sys.item(&item(i)).unwrap().unwrap();
            prop_assert_eq!(record.spam_flag_count as usize, flags);
        }
    }

    #[test]
    fn cast_then_remove_restores_system_state(
        events in arb_events(),
        extra in (0u8..7, 0u8..3, arb_kind()),
    ) {
        let mut sys = seeded_system();
        for (u, i, kind) in events {
            sys.cast_vote(&item(i), &user(u), kind).unwrap();
        }
        sys.run_offline().unwrap();
        let (u, i, kind) = extra;
        prop_assume!(sys.store().get_vote(&user(u), &item(i)).unwrap().is_none());

        let item_before = sys.item(&item(i)).unwrap().unwrap();
        let user_before = sys.user(&user(u)).unwrap();
        sys.cast_vote(&item(i), &user(u), kind).unwrap();
        sys.remove_vote(&item(i), &user(u)).unwrap();

        let item_after = sys.item(&item(i)).unwrap().unwrap();
        prop_assert!((item_after.weight - item_before.weight).abs() < 1e-9);
        prop_assert_eq!(item_after.spam_flag_count, item_before.spam_flag_count);
        if let Some(before) = user_before {
            let after = sys.user(&user(u)).unwrap().unwrap();
            prop_assert!((after.reliability_raw - before.reliability_raw).abs() < 1e-9);
            prop_assert!((after.base_reliability - before.base_reliability).abs() < 1e-9);
            prop_assert!((after.reliability - before.reliability).abs() < 1e-9);
        }
    }

    #[test]
    fn frozen_items_never_change_weight(events in arb_events()) {
        let mut sys = seeded_system();
        let mut store = sys.into_store();
        let mut frozen = store.get_item(&item(0)).unwrap().unwrap();
        frozen.weight = -25.0;
        frozen.frozen = true;
        frozen.classification = Classification::Spam;
        store.upsert_item(frozen).unwrap();
        sys = ReputationSystem::new(store, MannordConfig::default()).unwrap();

        for (u, i, kind) in events {
            sys.cast_vote(&item(i), &user(u), kind).unwrap();
        }
        sys.run_offline().unwrap();

        let record = sys.item(&item(0)).unwrap().unwrap();
        prop_assert_eq!(record.weight, -25.0);
        prop_assert!(record.frozen);
        prop_assert_eq!(record.classification, Classification::Spam);
    }
}
