use std::collections::HashSet;

use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use resource_filter::{Record, Value, filter, filter_with_rng};

fn records(ids: Vec<i64>) -> Vec<Record> {
    ids.into_iter()
        .enumerate()
        .map(|(position, id)| {
            Record::from([
                ("position".to_string(), Value::Integer(position as i64)),
                ("instance_id".to_string(), Value::String(id.to_string())),
            ])
        })
        .collect()
}

proptest! {
    #[test]
    fn empty_query_is_identity(ids in prop::collection::vec(0i64..10, 0..20)) {
        let records = records(ids);
        let all: Vec<&Record> = records.iter().collect();
        prop_assert_eq!(filter(&records, "").unwrap(), all);
    }

    #[test]
    fn empty_records_stay_empty(query in "[a-z =~'|0-9]{0,30}") {
        let records: Vec<Record> = vec![];
        prop_assert!(filter(&records, &query).unwrap().is_empty());
    }

    #[test]
    fn take_and_top_are_prefixes(ids in prop::collection::vec(0i64..10, 0..20), n in 0usize..25) {
        let records = records(ids);
        let expected: Vec<&Record> = records.iter().take(n).collect();
        prop_assert_eq!(filter(&records, &format!("take {}", n)).unwrap(), expected.clone());
        prop_assert_eq!(filter(&records, &format!("top {}", n)).unwrap(), expected);
    }

    #[test]
    fn take_is_idempotent(ids in prop::collection::vec(0i64..10, 1..20), n in 0usize..25) {
        let records = records(ids);
        let query = format!("take {}", n);
        let once: Vec<Record> = filter(&records, &query).unwrap().into_iter().cloned().collect();
        let twice: Vec<Record> = filter(&once, &query).unwrap().into_iter().cloned().collect();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn sample_draws_distinct_inputs(
        ids in prop::collection::vec(0i64..10, 1..20),
        fraction in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let records = records(ids);
        let n = (records.len() as f64 * fraction) as usize;
        let mut rng = StdRng::seed_from_u64(seed);

        let picked = filter_with_rng(&records, &format!("sample {}", n), &mut rng).unwrap();
        prop_assert_eq!(picked.len(), n);

        let positions: HashSet<i64> = picked
            .iter()
            .filter_map(|r| match &r["position"] {
                Value::Integer(p) => Some(*p),
                _ => None,
            })
            .collect();
        prop_assert_eq!(positions.len(), n);
        for record in picked {
            prop_assert!(records.contains(record));
        }
    }

    #[test]
    fn where_keeps_exact_matches_in_order(
        ids in prop::collection::vec(0i64..5, 0..20),
        wanted in 0i64..5,
    ) {
        let records = records(ids);
        let expected: Vec<&Record> = records
            .iter()
            .filter(|r| r["instance_id"] == Value::String(wanted.to_string()))
            .collect();
        let result = filter(&records, &format!("where instance_id=='{}'", wanted)).unwrap();
        prop_assert_eq!(result, expected);
    }
}
