use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use publish_gate::filter::{FilterOptions, PublishFilter};
use publish_gate::item::{ItemMetadata, PublishState};
use publish_gate::types::ItemCollection;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn publish_value() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("draft".to_string())),
        Just(Some("private".to_string())),
        Just(Some("whenever".to_string())),
        (1990i32..2100, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| Some(format!("{:04}-{:02}-{:02}", y, m, d))),
        (1990i32..2100, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60).prop_map(|(y, m, d, h, min)| {
            Some(format!("{:04}-{:02}-{:02}T{:02}:{:02}Z", y, m, d, h, min))
        }),
        (1990i32..2100, 1u32..=12, 1u32..=28, 0u32..24, -12i32..=12).prop_map(
            |(y, m, d, h, offset)| {
                let sign = if offset < 0 { '-' } else { '+' };
                Some(format!(
                    "{:04}-{:02}-{:02}T{:02}:30{}{:02}:00",
                    y,
                    m,
                    d,
                    h,
                    sign,
                    offset.abs()
                ))
            }
        ),
        (1990i32..2100, 1u32..=12).prop_map(|(y, m)| Some(format!("{:04}-{:02}", y, m))),
        (1990i32..2100).prop_map(|y| Some(format!("{:04}", y))),
    ]
}

fn collection() -> impl Strategy<Value = ItemCollection> {
    prop::collection::btree_map("[a-z]{1,8}\\.md", publish_value(), 0..20).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(id, publish)| {
                let metadata = match publish {
                    Some(value) => ItemMetadata::with_publish(value),
                    None => ItemMetadata::new(),
                };
                (id, metadata)
            })
            .collect()
    })
}

fn filter_options() -> impl Strategy<Value = FilterOptions> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(draft, private, future)| {
        FilterOptions {
            draft,
            private,
            future,
        }
    })
}

proptest! {
    #[test]
    fn retention_follows_publish_state(original in collection(), options in filter_options()) {
        let filter = PublishFilter::<()>::new(options);
        let mut items = original.clone();
        let report = filter.apply(&mut items, now());

        for (id, metadata) in &original {
            let kept = items.contains_key(id);
            if let Some(PublishState::Unparsed(raw)) = metadata.publish_state() {
                prop_assert_eq!(raw.as_str(), "whenever");
            }
            match metadata.publish_state() {
                None => prop_assert!(kept),
                Some(PublishState::Draft) => prop_assert_eq!(kept, options.draft),
                Some(PublishState::Private) => prop_assert_eq!(kept, options.private),
                Some(PublishState::At(at)) if at > now() => {
                    prop_assert_eq!(kept, options.future);
                    prop_assert_eq!(report.deferred.contains(id), !options.future);
                    if !kept {
                        prop_assert_eq!(report.deferred.get(id), Some(metadata));
                    }
                }
                Some(_) => prop_assert!(kept),
            }
        }
        for id in report.deferred.ids() {
            prop_assert!(!report.drafts.iter().any(|d| d == id));
            prop_assert!(!report.private.iter().any(|p| p == id));
        }
        prop_assert_eq!(report.retained + report.removed(), original.len());
    }

    #[test]
    fn filtering_is_idempotent(original in collection(), options in filter_options()) {
        let filter = PublishFilter::<()>::new(options);
        let mut once = original.clone();
        filter.apply(&mut once, now());

        let mut twice = once.clone();
        let second = filter.apply(&mut twice, now());
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(second.removed(), 0);
    }

    #[test]
    fn classify_matches_apply(original in collection(), options in filter_options()) {
        let filter = PublishFilter::<()>::new(options);
        let decisions = filter.classify(&original, now());
        prop_assert_eq!(decisions.len(), original.len());

        let mut items = original.clone();
        filter.apply(&mut items, now());
        for (id, disposition) in decisions {
            let retained = disposition == publish_gate::filter::Disposition::Retain;
            prop_assert_eq!(items.contains_key(&id), retained);
        }
    }
}
