//! 上位候補の抽出

use crate::types::Candidate;

/// スコア降順で上位 `k` 件を残す
///
/// 安定ソートなので、同点の候補はカタログの並び順を保つ。
pub fn top_k(mut candidates: Vec<Candidate<'_>>, k: usize) -> Vec<Candidate<'_>> {
    candidates.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
    candidates.truncate(k);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CatalogEntry;

    fn candidates<'a>(entry: &'a CatalogEntry, ratios: &[f64]) -> Vec<Candidate<'a>> {
        ratios
            .iter()
            .enumerate()
            .map(|(i, &ratio)| Candidate {
                ratio,
                matched_index: i,
                matched_entry: entry,
            })
            .collect()
    }

    #[test]
    fn test_top_k_sorted_descending() {
        let entry = CatalogEntry::default();
        let top = top_k(candidates(&entry, &[0.1, 0.9, 0.5, 0.7]), 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].matched_index, 1);
        assert_eq!(top[1].matched_index, 3);
    }

    #[test]
    fn test_top_k_ties_keep_catalog_order() {
        let entry = CatalogEntry::default();
        let top = top_k(candidates(&entry, &[0.4, 0.8, 0.8, 0.8]), 2);
        assert_eq!(top[0].matched_index, 1);
        assert_eq!(top[1].matched_index, 2);
    }

    #[test]
    fn test_top_k_shorter_than_k() {
        let entry = CatalogEntry::default();
        let top = top_k(candidates(&entry, &[0.3]), 2);
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn test_top_k_empty() {
        assert!(top_k(Vec::new(), 2).is_empty());
    }
}
