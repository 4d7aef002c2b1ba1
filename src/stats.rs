use std::collections::BTreeSet;

use fnv::FnvHashMap;

use crate::types::{binarize, CountTable, Interaction, RawRecord};

/// Maps raw user and item identifiers to consecutive integer ids. Identifiers are sorted
/// before ids are assigned, so the same input always yields the same ids.
pub struct DataDictionary {
    user_dict: FnvHashMap<String,u32>,
    item_dict: FnvHashMap<String,u32>,
    num_interactions: u64,
}

impl DataDictionary {

    pub fn num_users(&self) -> usize {
        self.user_dict.len()
    }

    pub fn num_items(&self) -> usize {
        self.item_dict.len()
    }

    pub fn num_interactions(&self) -> u64 {
        self.num_interactions
    }

    pub fn from_records(records: &[RawRecord]) -> Self {

        let users: BTreeSet<&str> = records.iter().map(|record| record.uid.as_str()).collect();
        let items: BTreeSet<&str> = records.iter().map(|record| record.place.as_str()).collect();

        DataDictionary {
            user_dict: dense_ids(users),
            item_dict: dense_ids(items),
            num_interactions: records.len() as u64,
        }
    }

    /// Replaces identifiers by their dense ids and binarizes the ratings. Only valid for the
    /// records the dictionary was built from.
    pub fn encode(&self, records: &[RawRecord], rating_threshold: f64) -> Vec<Interaction> {
        records.iter()
            .map(|record| {
                Interaction::new(
                    self.user_dict[&record.uid],
                    self.item_dict[&record.place],
                    binarize(record.rating, rating_threshold),
                )
            })
            .collect()
    }
}

fn dense_ids(sorted_names: BTreeSet<&str>) -> FnvHashMap<String,u32> {

    let mut dict: FnvHashMap<String,u32> =
        FnvHashMap::with_capacity_and_hasher(sorted_names.len(), Default::default());

    for (index, name) in sorted_names.into_iter().enumerate() {
        dict.insert(name.to_owned(), index as u32);
    }

    dict
}

pub fn count_by_user(interactions: &[Interaction]) -> CountTable {
    let mut counts = CountTable::new();
    for interaction in interactions {
        *counts.entry(interaction.user).or_insert(0) += 1;
    }
    counts
}

pub fn count_by_item(interactions: &[Interaction]) -> CountTable {
    let mut counts = CountTable::new();
    for interaction in interactions {
        *counts.entry(interaction.item).or_insert(0) += 1;
    }
    counts
}

/// Population statistics of a set of interactions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataSummary {
    pub num_users: usize,
    pub num_items: usize,
    pub num_interactions: usize,
}

impl DataSummary {

    pub fn of_raw(records: &[RawRecord]) -> Self {
        let users: BTreeSet<&str> = records.iter().map(|record| record.uid.as_str()).collect();
        let items: BTreeSet<&str> = records.iter().map(|record| record.place.as_str()).collect();

        DataSummary {
            num_users: users.len(),
            num_items: items.len(),
            num_interactions: records.len(),
        }
    }

    pub fn from_counts(num_interactions: usize, user_counts: &CountTable, item_counts: &CountTable)
        -> Self {

        DataSummary {
            num_users: user_counts.len(),
            num_items: item_counts.len(),
            num_interactions,
        }
    }

    /// Percentage of the user-item matrix which is observed, zero for an empty population.
    pub fn sparsity(&self) -> f64 {
        let cells = self.num_users as f64 * self.num_items as f64;
        if cells == 0.0 {
            0.0
        } else {
            self.num_interactions as f64 / cells * 100.0
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn records() -> Vec<RawRecord> {
        vec![
            RawRecord::new("carol", "tower", 10.0),
            RawRecord::new("alice", "museum", 40.0),
            RawRecord::new("bob", "tower", 50.0),
            RawRecord::new("alice", "tower", 30.0),
        ]
    }

    #[test]
    fn ids_follow_lexicographic_order() {
        let data_dict = DataDictionary::from_records(&records());

        assert_eq!(data_dict.num_users(), 3);
        assert_eq!(data_dict.num_items(), 2);
        assert_eq!(data_dict.num_interactions(), 4);

        let sorted = vec![
            RawRecord::new("alice", "museum", 0.0),
            RawRecord::new("bob", "tower", 0.0),
            RawRecord::new("carol", "tower", 0.0),
        ];
        let ids: Vec<(u32, u32)> = data_dict.encode(&sorted, 30.0).iter()
            .map(|interaction| (interaction.user, interaction.item))
            .collect();
        assert_eq!(ids, vec![(0, 0), (1, 1), (2, 1)]);
    }

    #[test]
    fn encoding_maps_ids_and_binarizes() {
        let records = records();
        let data_dict = DataDictionary::from_records(&records);

        let interactions = data_dict.encode(&records, 30.0);

        assert_eq!(interactions, vec![
            Interaction::new(2, 1, 0),
            Interaction::new(0, 0, 1),
            Interaction::new(1, 1, 1),
            Interaction::new(0, 1, 0),
        ]);
    }

    #[test]
    fn counts_per_user_and_item() {
        let interactions = vec![
            Interaction::new(0, 3, 1),
            Interaction::new(0, 4, 1),
            Interaction::new(1, 3, 0),
        ];

        let user_counts = count_by_user(&interactions);
        let item_counts = count_by_item(&interactions);

        assert_eq!(user_counts.get(&0), Some(&2));
        assert_eq!(user_counts.get(&1), Some(&1));
        assert_eq!(item_counts.get(&3), Some(&2));
        assert_eq!(item_counts.get(&4), Some(&1));
    }

    #[test]
    fn sparsity_is_a_percentage() {
        let summary = DataSummary::of_raw(&records());

        assert_eq!(summary.num_users, 3);
        assert_eq!(summary.num_items, 2);
        assert!((summary.sparsity() - 4.0 / 6.0 * 100.0).abs() < 1e-9);

        let empty = DataSummary::of_raw(&[]);
        assert_eq!(empty.sparsity(), 0.0);
    }
}
