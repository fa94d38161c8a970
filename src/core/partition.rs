use std::collections::HashSet;

use crate::error::{PbsDoError, Result};

/// Split `tokens` into at most `group_count` contiguous groups.
///
/// Groups are ceiling-chunked: every group holds `ceil(total / group_count)`
/// tokens except possibly the last one, which may be shorter. An uneven
/// division can therefore produce fewer groups than requested: 5 tokens into
/// 4 groups yields sizes [2, 2, 1]. Concatenating the groups in order
/// reproduces the input exactly.
///
/// With `enforce_unique` the whole input is scanned up front and the first
/// repeated token aborts the split; no partial partition is returned.
pub fn partition(
    tokens: &[String],
    group_count: usize,
    enforce_unique: bool,
) -> Result<Vec<Vec<String>>> {
    if group_count < 1 {
        return Err(PbsDoError::InvalidGroupCount(group_count));
    }

    if enforce_unique {
        let mut seen = HashSet::new();
        for token in tokens {
            if !seen.insert(token.as_str()) {
                return Err(PbsDoError::DuplicateArgument(token.clone()));
            }
        }
    }

    let per_group = tokens.len().div_ceil(group_count);
    if per_group == 0 {
        return Ok(Vec::new());
    }
    Ok(tokens.chunks(per_group).map(|group| group.to_vec()).collect())
}

/// Iterate `tokens` in contiguous batches of `batch_size` elements; the last
/// batch may be shorter. `batch_size` must be at least 1.
pub fn chunks(tokens: &[String], batch_size: usize) -> impl Iterator<Item = &[String]> {
    tokens.chunks(batch_size)
}

/// Suffix for pluralizing count nouns in run summaries.
pub fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_partition_ceiling_chunk() {
        // perGroup = ceil(5 / 2) = 3
        let input = tokens(&["a", "b", "c", "d", "e"]);
        let groups = partition(&input, 2, false).unwrap();
        assert_eq!(groups, vec![tokens(&["a", "b", "c"]), tokens(&["d", "e"])]);
    }

    #[test]
    fn test_partition_can_shrink_group_count() {
        // perGroup = ceil(5 / 4) = 2, so only 3 groups are needed
        let input = tokens(&["a", "b", "c", "d", "e"]);
        let groups = partition(&input, 4, false).unwrap();
        assert_eq!(groups.len(), 3);
        let sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
    }

    #[test]
    fn test_partition_even_division() {
        let input = tokens(&["a", "b", "c", "d", "e", "f"]);
        let groups = partition(&input, 3, false).unwrap();
        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|g| g.len() == 2));
    }

    #[test]
    fn test_partition_more_groups_than_tokens() {
        let input = tokens(&["a", "b"]);
        let groups = partition(&input, 5, false).unwrap();
        assert_eq!(groups, vec![tokens(&["a"]), tokens(&["b"])]);
    }

    #[test]
    fn test_partition_preserves_order_and_coverage() {
        let input = tokens(&["t1", "t2", "t3", "t4", "t5", "t6", "t7"]);
        let groups = partition(&input, 3, false).unwrap();
        let flat: Vec<String> = groups.into_iter().flatten().collect();
        assert_eq!(flat, input);
    }

    #[test]
    fn test_partition_single_group() {
        let input = tokens(&["a", "b", "c"]);
        let groups = partition(&input, 1, false).unwrap();
        assert_eq!(groups, vec![input]);
    }

    #[test]
    fn test_partition_empty_input() {
        let groups = partition(&[], 3, false).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn test_partition_zero_groups_is_error() {
        let input = tokens(&["a"]);
        let err = partition(&input, 0, false).unwrap_err();
        assert!(matches!(err, PbsDoError::InvalidGroupCount(0)));
    }

    #[test]
    fn test_partition_rejects_duplicates_when_unique() {
        let input = tokens(&["a", "b", "a", "c"]);
        let err = partition(&input, 2, true).unwrap_err();
        match err {
            PbsDoError::DuplicateArgument(token) => assert_eq!(token, "a"),
            other => panic!("expected DuplicateArgument, got {other}"),
        }
    }

    #[test]
    fn test_partition_allows_duplicates_by_default() {
        let input = tokens(&["a", "a", "a"]);
        let groups = partition(&input, 3, false).unwrap();
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn test_partition_duplicates_span_groups() {
        // The duplicate scan covers the whole input, not each group
        let input = tokens(&["a", "b", "c", "a"]);
        assert!(partition(&input, 2, true).is_err());
    }

    #[test]
    fn test_chunks_batches() {
        let input = tokens(&["a", "b", "c", "d", "e"]);
        let batches: Vec<&[String]> = chunks(&input, 2).collect();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0], tokens(&["a", "b"]).as_slice());
        assert_eq!(batches[2], tokens(&["e"]).as_slice());
    }

    #[test]
    fn test_chunks_restartable() {
        let input = tokens(&["a", "b", "c"]);
        assert_eq!(chunks(&input, 2).count(), 2);
        assert_eq!(chunks(&input, 2).count(), 2);
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(0), "s");
        assert_eq!(plural(1), "");
        assert_eq!(plural(2), "s");
    }
}
