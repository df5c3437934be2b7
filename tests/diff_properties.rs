// tests/diff_properties.rs

use std::collections::BTreeSet;

use proptest::prelude::*;

use monitdir::snapshot::{diff, Snapshot};

// Small alphabet so generated snapshots overlap often.
fn entries_strategy() -> impl Strategy<Value = BTreeSet<String>> {
    proptest::collection::btree_set("[a-e]{1,2}(/[a-c])?", 0..12)
}

fn snapshot(entries: &BTreeSet<String>) -> Snapshot {
    Snapshot::new(entries.iter().cloned(), 0)
}

proptest! {
    #[test]
    fn added_and_removed_are_mirror_images(a in entries_strategy(), b in entries_strategy()) {
        let (sa, sb) = (snapshot(&a), snapshot(&b));
        let forward = diff(&sa, &sb);
        let backward = diff(&sb, &sa);

        prop_assert_eq!(&forward.added, &backward.removed);
        prop_assert_eq!(&forward.removed, &backward.added);
    }

    #[test]
    fn diff_against_itself_is_empty(a in entries_strategy()) {
        let sa = snapshot(&a);
        prop_assert!(diff(&sa, &sa.clone()).is_empty());
    }

    #[test]
    fn applying_diff_reproduces_current(a in entries_strategy(), b in entries_strategy()) {
        let (sa, sb) = (snapshot(&a), snapshot(&b));
        let changes = diff(&sa, &sb);

        let mut rebuilt = sa.entries().clone();
        for removed in &changes.removed {
            prop_assert!(rebuilt.remove(removed));
        }
        for added in &changes.added {
            prop_assert!(rebuilt.insert(added.clone()));
        }
        prop_assert_eq!(&rebuilt, sb.entries());
    }
}
