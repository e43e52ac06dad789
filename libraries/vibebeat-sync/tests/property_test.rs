//! Property-based tests for playlist membership.
//!
//! Any sequence of adds and removes applied through the orchestrator must
//! leave the mirror equal to a plain vector model: append on add, first
//! occurrence dropped on remove.

mod common;

use common::{loaded, FakeBackend};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Remove(usize),
}

const FILES: [&str; 3] = ["a.mp3", "b.mp3", "c.mp3"];

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..FILES.len()).prop_map(Op::Add),
        (0..FILES.len()).prop_map(Op::Remove),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn membership_matches_sequence_model(ops in prop::collection::vec(op(), 0..12)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let (sync, _log) = loaded(FakeBackend::with_songs(&FILES)).await;
            let id = sync.create_playlist("Mix", "").await.unwrap().unwrap();
            let mut model: Vec<&str> = Vec::new();

            for op in ops {
                match op {
                    Op::Add(i) => {
                        let before = sync.registry().get(id).unwrap().occurrences(FILES[i]);
                        sync.quick_add(id, FILES[i]).await.unwrap();
                        model.push(FILES[i]);
                        let after = sync.registry().get(id).unwrap().occurrences(FILES[i]);
                        prop_assert_eq!(after, before + 1);
                    }
                    Op::Remove(i) => {
                        sync.remove_song(id, FILES[i]).await.unwrap();
                        if let Some(pos) = model.iter().position(|f| *f == FILES[i]) {
                            model.remove(pos);
                        }
                    }
                }
            }

            let playlist = sync.registry().get(id).unwrap();
            prop_assert_eq!(playlist.filenames().collect::<Vec<_>>(), model);
            Ok(())
        })?;
    }
}
