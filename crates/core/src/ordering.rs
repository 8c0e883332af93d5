//! Display-rank rules for orderable collections.
//!
//! Every orderable table carries an integer rank column (`order_index` or
//! `display_order`). Lower ranks sort first; ties are broken by `id DESC`
//! so the most recently created row wins. Ranks are never renumbered on
//! delete, so gaps are normal.
//!
//! Promoting a row shifts every row in its scope down by one (the target
//! included) and then pins the target to [`TOP_RANK`], all in one
//! transaction. The SQL for that lives in `portfolio_db::rank`.

use crate::types::Rank;

/// Rank assigned to a promoted row.
pub const TOP_RANK: Rank = 0;

/// Secondary sort key applied after the rank column.
pub const TIE_BREAK: &str = "id DESC";

/// Rank for a new row appended to a scope whose current maximum is
/// `current_max` (`None` when the scope is empty).
pub fn next_rank(current_max: Option<Rank>) -> Rank {
    current_max.unwrap_or(TOP_RANK - 1) + 1
}

/// Use the caller's rank verbatim when given, otherwise append.
pub fn resolve_rank(explicit: Option<Rank>, current_max: Option<Rank>) -> Rank {
    explicit.unwrap_or_else(|| next_rank(current_max))
}

/// `ORDER BY` body for a rank column with the standard tie-break.
pub fn order_by(rank_column: &str) -> String {
    format!("{rank_column} ASC, {TIE_BREAK}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_scope_starts_at_zero() {
        assert_eq!(next_rank(None), 0);
    }

    #[test]
    fn appends_after_max() {
        assert_eq!(next_rank(Some(0)), 1);
        assert_eq!(next_rank(Some(41)), 42);
    }

    #[test]
    fn sequential_inserts_are_contiguous() {
        let mut max = None;
        let mut ranks = Vec::new();
        for _ in 0..4 {
            let r = next_rank(max);
            ranks.push(r);
            max = Some(r);
        }
        assert_eq!(ranks, vec![0, 1, 2, 3]);
    }

    #[test]
    fn explicit_rank_is_kept_verbatim() {
        assert_eq!(resolve_rank(Some(7), Some(2)), 7);
        assert_eq!(resolve_rank(Some(0), None), 0);
        assert_eq!(resolve_rank(None, Some(2)), 3);
    }

    #[test]
    fn order_by_includes_tie_break() {
        assert_eq!(order_by("display_order"), "display_order ASC, id DESC");
    }
}
