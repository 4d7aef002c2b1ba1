use crate::stats::{count_by_item, count_by_user};
use crate::types::{CountTable, Interaction};

/// Result of a co-filtering pass, the count tables describe the retained interactions.
pub struct Filtered {
    pub interactions: Vec<Interaction>,
    pub user_counts: CountTable,
    pub item_counts: CountTable,
}

/// Removes interactions of items seen fewer than `min_sc` times, then interactions of users
/// with fewer than `min_uc` remaining interactions. A value of zero disables the respective
/// filter. This is a single pass: items may fall below `min_sc` after the user filter.
pub fn filter_triplets(interactions: Vec<Interaction>, min_uc: usize, min_sc: usize) -> Filtered {

    let mut interactions = interactions;

    if min_sc > 0 {
        let item_counts = count_by_item(&interactions);
        interactions.retain(|interaction| item_counts[&interaction.item] >= min_sc);
    }

    if min_uc > 0 {
        let user_counts = count_by_user(&interactions);
        interactions.retain(|interaction| user_counts[&interaction.user] >= min_uc);
    }

    let user_counts = count_by_user(&interactions);
    let item_counts = count_by_item(&interactions);

    Filtered { interactions, user_counts, item_counts }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn drops_users_below_minimum() {
        let interactions = vec![
            Interaction::new(0, 0, 1),
            Interaction::new(0, 1, 1),
            Interaction::new(1, 0, 0),
            Interaction::new(2, 1, 1),
            Interaction::new(2, 2, 0),
        ];

        let filtered = filter_triplets(interactions, 2, 0);

        assert_eq!(filtered.interactions, vec![
            Interaction::new(0, 0, 1),
            Interaction::new(0, 1, 1),
            Interaction::new(2, 1, 1),
            Interaction::new(2, 2, 0),
        ]);
        assert_eq!(filtered.user_counts.keys().cloned().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(filtered.item_counts.get(&1), Some(&2));
        assert_eq!(filtered.item_counts.len(), 3);
    }

    #[test]
    fn no_op_when_all_users_qualify() {
        let interactions = vec![
            Interaction::new(3, 0, 1),
            Interaction::new(1, 0, 0),
            Interaction::new(3, 2, 1),
            Interaction::new(1, 5, 1),
        ];

        let filtered = filter_triplets(interactions.clone(), 2, 0);

        assert_eq!(filtered.interactions, interactions);
        assert_eq!(filtered.user_counts, count_by_user(&interactions));
        assert_eq!(filtered.item_counts, count_by_item(&interactions));
    }

    #[test]
    fn item_filter_runs_before_user_filter_only_once() {
        // Item 9 is rare; dropping it leaves user 1 with a single interaction. Removing user 1
        // then leaves item 0 with a single interaction, which is kept.
        let interactions = vec![
            Interaction::new(0, 0, 1),
            Interaction::new(0, 1, 1),
            Interaction::new(1, 9, 1),
            Interaction::new(1, 0, 1),
            Interaction::new(2, 1, 1),
            Interaction::new(2, 2, 1),
            Interaction::new(3, 2, 1),
            Interaction::new(3, 1, 1),
        ];

        let filtered = filter_triplets(interactions, 2, 2);

        assert!(filtered.interactions.iter().all(|interaction| interaction.user != 1));
        assert_eq!(filtered.item_counts.get(&0), Some(&1));
        assert_eq!(filtered.item_counts.get(&9), None);
    }

    #[test]
    fn zero_thresholds_keep_everything() {
        let interactions = vec![Interaction::new(0, 0, 1)];
        let filtered = filter_triplets(interactions.clone(), 0, 0);
        assert_eq!(filtered.interactions, interactions);
    }
}
