//! Property tests for the invariants every view relies on.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use paddock_logic::eligibility::{evaluate, EligibilityState, Horse};
use paddock_logic::history::{paginate, sort, SortDirection, SortField, SortState, TrainingHistoryEntry};
use paddock_logic::modifiers::{net_effect, TraitModifier};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

fn modifier(effect: i32) -> TraitModifier {
    TraitModifier::new("t", "T", effect).for_all()
}

fn sort_field() -> impl Strategy<Value = SortField> {
    prop_oneof![
        Just(SortField::Date),
        Just(SortField::Discipline),
        Just(SortField::ScoreGain),
    ]
}

prop_compose! {
    fn history_entry()(
        day in 0i64..60,
        discipline in prop::sample::select(vec!["dressage", "polo", "racing", "reining", "mystery_event"]),
        prev in 0i32..100,
        gain in -10i32..20,
    ) -> TrainingHistoryEntry {
        TrainingHistoryEntry::new(
            format!("{day}-{discipline}-{prev}"),
            now() + Duration::days(day),
            discipline,
            prev,
            prev + gain,
        )
    }
}

proptest! {
    #[test]
    fn too_young_regardless_of_cooldown(age in 0u32..3, offset_mins in proptest::option::of(-10_000i64..10_000)) {
        let mut horse = Horse::new("h", age);
        horse.training_cooldown = offset_mins.map(|m| (now() + Duration::minutes(m)).into());
        prop_assert_eq!(evaluate(&horse, now()), EligibilityState::TooYoung);
    }

    #[test]
    fn working_age_follows_cooldown(age in 3u32..=20, offset_secs in -1_000_000i64..1_000_000) {
        let mut horse = Horse::new("h", age);
        horse.training_cooldown = Some((now() + Duration::seconds(offset_secs)).into());
        let expected = if offset_secs > 0 { EligibilityState::Cooldown } else { EligibilityState::Ready };
        prop_assert_eq!(evaluate(&horse, now()), expected);
    }

    #[test]
    fn net_effect_is_order_independent(
        base in -20i32..20,
        effects in prop::collection::vec(-20i32..20, 0..12),
    ) {
        let mods: Vec<_> = effects.iter().copied().map(modifier).collect();
        let mut reversed = mods.clone();
        reversed.reverse();

        let net = net_effect(base, &mods);
        prop_assert_eq!(net, net_effect(base, &reversed));
        prop_assert_eq!(net.total, base + effects.iter().sum::<i32>());
        prop_assert!(net.negative_sum >= 0);
    }

    #[test]
    fn pages_concatenate_to_sorted_sequence(
        history in prop::collection::vec(history_entry(), 0..60),
        field in sort_field(),
        page_size in 1usize..15,
    ) {
        let sorted = sort(&history, field, SortDirection::Descending);
        let first = paginate(&sorted, page_size, 1).unwrap();
        let mut rebuilt = Vec::new();
        for page_number in 1..=first.page_count.max(1) {
            let page = paginate(&sorted, page_size, page_number).unwrap();
            prop_assert!(page.rows.len() <= page_size);
            rebuilt.extend_from_slice(page.rows);
        }
        prop_assert_eq!(&rebuilt, &sorted);
        prop_assert!(paginate(&history, page_size, first.page_count.max(1) + 1).is_err());
    }

    #[test]
    fn third_click_restores_direction(start_field in sort_field(), field in sort_field()) {
        let initial = SortState::default().toggle(start_field);
        let once = initial.toggle(field);
        let thrice = once.toggle(field).toggle(field);
        prop_assert_eq!(once, thrice);
        prop_assert_ne!(once.direction, once.toggle(field).direction);
    }
}
