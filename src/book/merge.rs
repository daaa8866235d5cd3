use crate::models::DisplayOrder;

/// Concatenate the A4B view followed by the B4A view.
///
/// No dedup or re-sorting. Ids are left as assigned per direction, so the
/// result may hold one Green and one Orange order with the same `id`.
pub fn merge(a4b: &[DisplayOrder], b4a: &[DisplayOrder]) -> Vec<DisplayOrder> {
    let mut merged = Vec::with_capacity(a4b.len() + b4a.len());
    merged.extend_from_slice(a4b);
    merged.extend_from_slice(b4a);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::normalize;
    use crate::models::{Direction, RawOrder};

    #[test]
    fn test_merge_is_concatenation() {
        let a = normalize(
            Some(&[
                RawOrder::new("0xA", "1", "2", false),
                RawOrder::new("0xB", "3", "4", false),
            ]),
            Direction::AForB,
        );
        let b = normalize(
            Some(&[RawOrder::new("0xC", "5", "6", false)]),
            Direction::BForA,
        );

        let merged = merge(&a, &b);
        assert_eq!(merged.len(), 3);
        assert_eq!(&merged[..2], &a[..]);
        assert_eq!(&merged[2..], &b[..]);
        // per-direction ids collide in the merged view
        assert_eq!(merged[0].id, merged[2].id);
    }

    #[test]
    fn test_merge_with_empty_side() {
        let a = normalize(Some(&[RawOrder::new("0xA", "1", "2", false)]), Direction::AForB);
        assert_eq!(merge(&a, &[]), a);
        assert_eq!(merge(&[], &a), a);
        assert!(merge(&[], &[]).is_empty());
    }
}
