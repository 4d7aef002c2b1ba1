use fnv::{FnvHashMap, FnvHashSet};
use tracing::warn;

use crate::errors::PreprocessError;
use crate::types::{Interaction, NumerizedInteraction};

/// Output ids: items are numbered in order of their first appearance in the training
/// interactions, users in the order of the shuffled user population.
pub struct Vocabulary {
    unique_sid: Vec<u32>,
    unique_uid: Vec<u32>,
    show2id: FnvHashMap<u32,u32>,
    profile2id: FnvHashMap<u32,u32>,
}

impl Vocabulary {

    pub fn new(train: &[Interaction], shuffled_users: &[u32]) -> Self {

        let mut seen: FnvHashSet<u32> = FnvHashSet::default();
        let unique_sid: Vec<u32> = train.iter()
            .map(|interaction| interaction.item)
            .filter(|item| seen.insert(*item))
            .collect();

        let show2id = positions(&unique_sid);
        let profile2id = positions(shuffled_users);

        Vocabulary { unique_sid, unique_uid: shuffled_users.to_vec(), show2id, profile2id }
    }

    pub fn unique_sid(&self) -> &[u32] {
        &self.unique_sid
    }

    pub fn unique_uid(&self) -> &[u32] {
        &self.unique_uid
    }

    pub fn num_items(&self) -> usize {
        self.unique_sid.len()
    }

    pub fn num_users(&self) -> usize {
        self.unique_uid.len()
    }

    pub fn contains_item(&self, item: u32) -> bool {
        self.show2id.contains_key(&item)
    }

    pub fn contains_user(&self, user: u32) -> bool {
        self.profile2id.contains_key(&user)
    }

    /// Keeps only interactions with items seen during training.
    pub fn retain_train_items(&self, mut interactions: Vec<Interaction>) -> Vec<Interaction> {
        interactions.retain(|interaction| self.contains_item(interaction.item));
        interactions
    }

    /// Drops interactions whose user or item cannot be numerized and reports how many were lost.
    pub fn retain_known(&self, mut interactions: Vec<Interaction>, split: &str) -> Vec<Interaction> {
        let before = interactions.len();
        interactions.retain(|interaction| {
            self.contains_user(interaction.user) && self.contains_item(interaction.item)
        });

        let dropped = before - interactions.len();
        if dropped > 0 {
            warn!(split, dropped, "dropping interactions outside of the training vocabulary");
        }

        interactions
    }

    /// Maps interactions to output ids. Any id outside of the vocabulary is an error.
    pub fn numerize(&self, interactions: &[Interaction])
        -> Result<Vec<NumerizedInteraction>, PreprocessError> {

        interactions.iter()
            .map(|interaction| -> Result<NumerizedInteraction, PreprocessError> {
                let uid = *self.profile2id.get(&interaction.user)
                    .ok_or(PreprocessError::UnknownUser(interaction.user))?;
                let sid = *self.show2id.get(&interaction.item)
                    .ok_or(PreprocessError::UnknownItem(interaction.item))?;

                Ok(NumerizedInteraction { uid, sid, value: interaction.rating })
            })
            .collect()
    }
}

fn positions(ids: &[u32]) -> FnvHashMap<u32,u32> {
    let mut dict: FnvHashMap<u32,u32> =
        FnvHashMap::with_capacity_and_hasher(ids.len(), Default::default());
    for (index, id) in ids.iter().enumerate() {
        dict.insert(*id, index as u32);
    }
    dict
}

#[cfg(test)]
mod tests {

    use super::*;

    fn vocabulary() -> Vocabulary {
        let train = vec![
            Interaction::new(4, 12, 1),
            Interaction::new(4, 10, 0),
            Interaction::new(2, 12, 1),
            Interaction::new(2, 11, 1),
        ];
        Vocabulary::new(&train, &[4, 9, 2])
    }

    #[test]
    fn items_in_order_of_first_appearance() {
        let vocabulary = vocabulary();

        assert_eq!(vocabulary.unique_sid(), &[12, 10, 11]);
        assert_eq!(vocabulary.unique_uid(), &[4, 9, 2]);
        assert_eq!(vocabulary.num_items(), 3);
        assert_eq!(vocabulary.num_users(), 3);
    }

    #[test]
    fn numerize_uses_positions() {
        let vocabulary = vocabulary();

        let numerized = vocabulary.numerize(&[
            Interaction::new(9, 11, 1),
            Interaction::new(2, 12, 0),
        ]).unwrap();

        assert_eq!(numerized, vec![
            NumerizedInteraction { uid: 1, sid: 2, value: 1 },
            NumerizedInteraction { uid: 2, sid: 0, value: 0 },
        ]);
    }

    #[test]
    fn numerize_fails_on_unknown_ids() {
        let vocabulary = vocabulary();

        match vocabulary.numerize(&[Interaction::new(9, 99, 1)]) {
            Err(PreprocessError::UnknownItem(99)) => {},
            other => panic!("unexpected result {:?}", other),
        }

        match vocabulary.numerize(&[Interaction::new(5, 10, 1)]) {
            Err(PreprocessError::UnknownUser(5)) => {},
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn unknown_ids_are_dropped_before_numerizing() {
        let vocabulary = vocabulary();

        let interactions = vec![
            Interaction::new(9, 11, 1),
            Interaction::new(9, 99, 1),
            Interaction::new(5, 10, 1),
        ];

        assert_eq!(vocabulary.retain_train_items(interactions.clone()).len(), 2);
        assert_eq!(vocabulary.retain_known(interactions, "test_te"),
                   vec![Interaction::new(9, 11, 1)]);
    }
}
