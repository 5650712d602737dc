//! Pure set differencing of two host file sets.

use std::collections::HashSet;

/// Three-way split of two host file sets.
///
/// `additions` are paths only in the first set, in first-set order with
/// duplicates preserved; `omissions` are paths only in the second set, in
/// second-set order; `common` is the intersection, deduplicated in
/// first-set order. Paths are compared as opaque strings, exact and case
/// sensitive, with no normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSetDiff {
    pub additions: Vec<String>,
    pub omissions: Vec<String>,
    pub common: Vec<String>,
}

/// Split `host1` and `host2` file sets into additions, omissions and the
/// common paths handed to content comparison. No I/O, no failure modes.
pub fn diff_file_sets(host1: &[String], host2: &[String]) -> FileSetDiff {
    let set1: HashSet<&str> = host1.iter().map(String::as_str).collect();
    let set2: HashSet<&str> = host2.iter().map(String::as_str).collect();
    let mut diff = FileSetDiff::default();
    let mut seen = HashSet::new();
    for path in host1 {
        if !set2.contains(path.as_str()) {
            diff.additions.push(path.clone());
        } else if seen.insert(path.as_str()) {
            diff.common.push(path.clone());
        }
    }
    for path in host2 {
        if !set1.contains(path.as_str()) {
            diff.omissions.push(path.clone());
        }
    }
    diff
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn paths(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|path| path.to_string()).collect()
    }

    #[test]
    fn disjoint_sets_have_no_common_paths() {
        let diff = diff_file_sets(&paths(&["/etc/a"]), &paths(&["/etc/b"]));
        assert_eq!(diff.additions, vec!["/etc/a"]);
        assert_eq!(diff.omissions, vec!["/etc/b"]);
        assert!(diff.common.is_empty());
    }

    #[test]
    fn identical_sets_are_all_common() {
        let set = paths(&["/etc/a", "/etc/b"]);
        let diff = diff_file_sets(&set, &set);
        assert!(diff.additions.is_empty());
        assert!(diff.omissions.is_empty());
        assert_eq!(diff.common, set);
    }

    #[test]
    fn overlap_is_split_three_ways() {
        let host1 = paths(&["/etc/a", "/etc/b", "/etc/c"]);
        let host2 = paths(&["/etc/b", "/etc/c", "/etc/d"]);
        let diff = diff_file_sets(&host1, &host2);
        assert_eq!(diff.additions, vec!["/etc/a"]);
        assert_eq!(diff.omissions, vec!["/etc/d"]);
        assert_eq!(diff.common, vec!["/etc/b", "/etc/c"]);
    }

    #[test]
    fn paths_are_compared_exactly() {
        // case and trailing slashes are significant
        let diff = diff_file_sets(&paths(&["/etc/App", "/etc/x/"]), &paths(&["/etc/app", "/etc/x"]));
        assert_eq!(diff.additions, vec!["/etc/App", "/etc/x/"]);
        assert_eq!(diff.omissions, vec!["/etc/app", "/etc/x"]);
        assert!(diff.common.is_empty());
    }

    #[test]
    fn duplicate_additions_are_preserved() {
        let diff = diff_file_sets(&paths(&["/etc/a", "/etc/a"]), &paths(&[]));
        assert_eq!(diff.additions, vec!["/etc/a", "/etc/a"]);
    }

    #[test]
    fn common_paths_are_deduplicated() {
        let diff = diff_file_sets(&paths(&["/etc/a", "/etc/a"]), &paths(&["/etc/a"]));
        assert_eq!(diff.common, vec!["/etc/a"]);
        assert!(diff.additions.is_empty());
    }

    proptest! {
        #[test]
        fn split_invariants_hold(
            host1 in proptest::collection::vec("/[a-d]{1,2}", 0..12),
            host2 in proptest::collection::vec("/[a-d]{1,2}", 0..12),
        ) {
            let diff = diff_file_sets(&host1, &host2);
            for path in &diff.additions {
                prop_assert!(!host2.contains(path));
            }
            for path in &diff.omissions {
                prop_assert!(!host1.contains(path));
            }
            for path in &diff.common {
                prop_assert!(host1.contains(path) && host2.contains(path));
            }
            for path in &diff.additions {
                prop_assert!(!diff.omissions.contains(path));
            }
            // every input path lands in a bucket
            for path in &host1 {
                prop_assert!(diff.additions.contains(path) || diff.common.contains(path));
            }
            for path in &host2 {
                prop_assert!(diff.omissions.contains(path) || diff.common.contains(path));
            }
        }

        #[test]
        fn differencing_is_idempotent(
            host1 in proptest::collection::vec("/[a-d]{1,2}", 0..12),
            host2 in proptest::collection::vec("/[a-d]{1,2}", 0..12),
        ) {
            prop_assert_eq!(diff_file_sets(&host1, &host2), diff_file_sets(&host1, &host2));
        }
    }
}
