/**
 * RecoSplit
 * Copyright (C) 2018 Sebastian Schelter
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

use std::cmp;
use std::collections::BTreeMap;

use rand::seq::index;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::Interaction;

/// Assignment of every user to exactly one of the train, validation and test groups.
/// `shuffled` holds all users in the permuted order the groups were cut from.
#[derive(Debug, Clone, PartialEq)]
pub struct UserPartition {
    pub shuffled: Vec<u32>,
    pub train: Vec<u32>,
    pub validation: Vec<u32>,
    pub test: Vec<u32>,
}

/// Shuffles the users and cuts off `floor(heldout_fraction * |users|)` users each for the test
/// group (at the end) and the validation group (right before it). The rest is used for training.
pub fn partition_users<R: Rng>(users: &[u32], heldout_fraction: f64, rng: &mut R) -> UserPartition {

    let mut shuffled = users.to_vec();
    shuffled.shuffle(rng);

    let num_users = shuffled.len();
    let num_heldout = cmp::min((heldout_fraction * num_users as f64) as usize, num_users / 2);

    let train_end = num_users - 2 * num_heldout;
    let validation_end = num_users - num_heldout;

    let train = shuffled[..train_end].to_vec();
    let validation = shuffled[train_end..validation_end].to_vec();
    let test = shuffled[validation_end..].to_vec();

    UserPartition { shuffled, train, validation, test }
}

/// Number of interactions to hold out for a user with `num_interactions` interactions. Users
/// with fewer than five interactions always hold out exactly one.
pub fn held_out_size(num_interactions: usize, test_prop: f64) -> usize {
    if num_interactions < 5 {
        1
    } else {
        cmp::max(1, (test_prop * num_interactions as f64) as usize)
    }
}

/// Splits the interactions of every user into a history part and a held-out part. Users are
/// visited in ascending id order and all draws come from `rng`, so the result depends on the
/// whole traversal. Relative order of interactions is preserved within each user.
pub fn split_train_test_proportion<R: Rng>(
    interactions: &[Interaction],
    test_prop: f64,
    progress_interval: usize,
    rng: &mut R,
) -> (Vec<Interaction>, Vec<Interaction>) {

    let mut interactions_by_user: BTreeMap<u32, Vec<Interaction>> = BTreeMap::new();
    for interaction in interactions {
        interactions_by_user.entry(interaction.user).or_insert_with(Vec::new).push(*interaction);
    }

    let mut history = Vec::with_capacity(interactions.len());
    let mut held_out = Vec::new();

    for (user_index, user_interactions) in interactions_by_user.values().enumerate() {

        let num_interactions = user_interactions.len();
        let te_size = held_out_size(num_interactions, test_prop);

        let mut selected = vec![false; num_interactions];
        for position in index::sample(rng, num_interactions, te_size).iter() {
            selected[position] = true;
        }

        for (interaction, is_held_out) in user_interactions.iter().zip(selected.iter()) {
            if *is_held_out {
                held_out.push(*interaction);
            } else {
                history.push(*interaction);
            }
        }

        if progress_interval > 0 && user_index % progress_interval == 0 {
            println!("{} users sampled", user_index);
        }
    }

    (history, held_out)
}
