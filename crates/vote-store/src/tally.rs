//! Tally math for the voting view: increments, bar scaling, ordering.

use crate::domain::Item;

/// Smallest value the tallest bar is scaled against
pub const DEFAULT_MIN_SCALE: u32 = 10;

/// Add one vote to item `id` in place and return the updated record.
///
/// Returns `None` when no item has that id.
pub fn cast_vote(items: &mut [Item], id: u32) -> Option<Item> {
    let item = items.iter_mut().find(|item| item.id == id)?;
    item.add_vote();
    Some(item.clone())
}

/// Denominator for bar heights: the highest count, but never below `min_scale`
pub fn bar_scale(items: &[Item], min_scale: u32) -> u32 {
    items
        .iter()
        .map(|item| item.votes)
        .max()
        .unwrap_or(0)
        .max(min_scale)
        .max(1)
}

/// Bar height in percent of the column, clamped to 0..=100
pub fn bar_percent(votes: u32, scale: u32) -> f64 {
    if scale == 0 {
        return 0.0;
    }
    (f64::from(votes) / f64::from(scale) * 100.0).clamp(0.0, 100.0)
}

pub fn total_votes(items: &[Item]) -> u64 {
    items.iter().map(|item| u64::from(item.votes)).sum()
}

/// Items ordered by votes descending, ties broken by id
pub fn leaderboard(items: &[Item]) -> Vec<Item> {
    let mut ranked = items.to_vec();
    ranked.sort_by(|a, b| b.votes.cmp(&a.votes).then(a.id.cmp(&b.id)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Vec<Item> {
        vec![Item::new(1, "A"), Item::new(2, "B"), Item::new(3, "C")]
    }

    #[test]
    fn test_three_clicks_on_item_two() {
        let mut items = board();
        for _ in 0..3 {
            cast_vote(&mut items, 2);
        }
        assert_eq!(items[1].votes, 3);
        assert_eq!(items[0].votes, 0);
        assert_eq!(items[2].votes, 0);
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let mut items = board();
        assert!(cast_vote(&mut items, 99).is_none());
        assert_eq!(total_votes(&items), 0);
    }

    #[test]
    fn test_scale_has_floor() {
        let mut items = board();
        assert_eq!(bar_scale(&items, DEFAULT_MIN_SCALE), 10);
        items[0].votes = 25;
        assert_eq!(bar_scale(&items, DEFAULT_MIN_SCALE), 25);
        assert_eq!(bar_scale(&[], 0), 1);
    }

    #[test]
    fn test_bar_percent() {
        assert_eq!(bar_percent(5, 10), 50.0);
        assert_eq!(bar_percent(0, 10), 0.0);
        assert_eq!(bar_percent(30, 10), 100.0);
    }

    #[test]
    fn test_leaderboard_order() {
        let items = vec![
            Item::new(1, "A").with_votes(2),
            Item::new(2, "B").with_votes(5),
            Item::new(3, "C").with_votes(2),
        ];
        let ids: Vec<u32> = leaderboard(&items).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }
}
