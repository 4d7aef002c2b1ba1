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

use std::time::Instant;

use fnv::FnvHashSet;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

pub mod config;
pub mod errors;
pub mod filter;
pub mod io;
pub mod numerize;
pub mod split;
pub mod stats;
pub mod types;

use config::PreprocessingConfig;
use errors::PreprocessError;
use filter::filter_triplets;
use numerize::Vocabulary;
use split::{partition_users, split_train_test_proportion};
use stats::{DataDictionary, DataSummary};
use types::{Interaction, NumerizedInteraction, RawRecord};

pub const UNIQUE_SID_FILE: &str = "unique_sid.txt";
pub const UNIQUE_UID_FILE: &str = "unique_uid.txt";
pub const TRAIN_FILE: &str = "train.csv";
pub const VALIDATION_TR_FILE: &str = "validation_tr.csv";
pub const VALIDATION_TE_FILE: &str = "validation_te.csv";
pub const TEST_TR_FILE: &str = "test_tr.csv";
pub const TEST_TE_FILE: &str = "test_te.csv";

/// Sizes of what a preprocessing run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessingReport {
    pub num_users: usize,
    pub num_items: usize,
    pub num_train_users: usize,
    pub num_validation_users: usize,
    pub num_test_users: usize,
    pub train: usize,
    pub validation_tr: usize,
    pub validation_te: usize,
    pub test_tr: usize,
    pub test_te: usize,
}

/// Keeps the first occurrence of every (uid, place) pair.
pub fn drop_duplicates(records: Vec<RawRecord>) -> Vec<RawRecord> {
    let mut seen: FnvHashSet<(String, String)> =
        FnvHashSet::with_capacity_and_hasher(records.len(), Default::default());

    records.into_iter()
        .filter(|record| seen.insert((record.uid.clone(), record.place.clone())))
        .collect()
}

pub fn print_info(summary: &DataSummary) {
    println!("Users: {}", summary.num_users);
    println!("Places: {}", summary.num_items);
    println!("Reviews: {}", summary.num_interactions);
    println!("Sparsity: {:.3}%", summary.sparsity());
}

/// Reads, deduplicates and binarizes the raw reviews, and replaces raw identifiers by
/// dense ids.
pub fn load_data(config: &PreprocessingConfig) -> Result<Vec<Interaction>, PreprocessError> {

    let input_path = config.input_path();
    println!("Reading {}", input_path.display());

    let raw_records = io::read_raw_records(&input_path)?;
    let num_raw_records = raw_records.len();

    let records = drop_duplicates(raw_records);
    debug!(duplicates = num_raw_records - records.len(), "dropped duplicate reviews");

    print_info(&DataSummary::of_raw(&records));

    let data_dict = DataDictionary::from_records(&records);
    debug!(
        users = data_dict.num_users(),
        places = data_dict.num_items(),
        reviews = data_dict.num_interactions(),
        "assigned dense ids"
    );

    Ok(data_dict.encode(&records, config.rating_threshold))
}

fn select_users(interactions: &[Interaction], users: &[u32]) -> Vec<Interaction> {
    let users: FnvHashSet<u32> = users.iter().cloned().collect();
    interactions.iter()
        .filter(|interaction| users.contains(&interaction.user))
        .cloned()
        .collect()
}

/// Restricts the interactions of held-out users to training items and splits them per user
/// with a freshly seeded generator. With `cofilter` set, users left with fewer than
/// `min_user_count` interactions are removed before splitting.
fn split_heldout_users(
    interactions: &[Interaction],
    users: &[u32],
    vocabulary: &Vocabulary,
    config: &PreprocessingConfig,
    cofilter: bool,
) -> (Vec<Interaction>, Vec<Interaction>) {

    let mut heldout = vocabulary.retain_train_items(select_users(interactions, users));
    if cofilter {
        heldout = filter_triplets(heldout, config.min_user_count, 0).interactions;
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    split_train_test_proportion(
        &heldout,
        config.test_prop,
        config.progress_interval,
        &mut rng,
    )
}

fn numerize_split(vocabulary: &Vocabulary, interactions: Vec<Interaction>, split: &str)
    -> Result<Vec<NumerizedInteraction>, PreprocessError> {

    let interactions = vocabulary.retain_known(interactions, split);
    vocabulary.numerize(&interactions)
}

/// Runs the whole pipeline and writes the five splits plus the identifier lists to
/// `config.processed_dir`. Nothing is written if an error occurs before the output stage.
pub fn preprocess(config: &PreprocessingConfig) -> Result<PreprocessingReport, PreprocessError> {

    config.validate()?;

    let start = Instant::now();

    let interactions = load_data(config)?;

    let filtered = filter_triplets(interactions, config.min_user_count, config.min_item_count);
    let summary = DataSummary::from_counts(
        filtered.interactions.len(),
        &filtered.user_counts,
        &filtered.item_counts,
    );
    println!(
        "After filtering, there are {} reviews from {} users and {} places (sparsity: {:.3}%)",
        summary.num_interactions,
        summary.num_users,
        summary.num_items,
        summary.sparsity(),
    );

    let users: Vec<u32> = filtered.user_counts.keys().cloned().collect();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let partition = partition_users(&users, config.heldout_fraction, &mut rng);

    info!(
        train = partition.train.len(),
        validation = partition.validation.len(),
        test = partition.test.len(),
        "partitioned users"
    );

    let train_plays = select_users(&filtered.interactions, &partition.train);
    let vocabulary = Vocabulary::new(&train_plays, &partition.shuffled);

    let (validation_plays_tr, validation_plays_te) = split_heldout_users(
        &filtered.interactions, &partition.validation, &vocabulary, config, true);
    // Test users keep every interaction with a training item, even a single one.
    let (test_plays_tr, test_plays_te) =
        split_heldout_users(&filtered.interactions, &partition.test, &vocabulary, config, false);

    let outputs = vec![
        (TRAIN_FILE, numerize_split(&vocabulary, train_plays, "train")?),
        (VALIDATION_TR_FILE, numerize_split(&vocabulary, validation_plays_tr, "validation_tr")?),
        (VALIDATION_TE_FILE, numerize_split(&vocabulary, validation_plays_te, "validation_te")?),
        (TEST_TR_FILE, numerize_split(&vocabulary, test_plays_tr, "test_tr")?),
        (TEST_TE_FILE, numerize_split(&vocabulary, test_plays_te, "test_te")?),
    ];

    let out_dir = &config.processed_dir;
    io::create_output_dir(out_dir)?;

    println!("Writing identifiers to {}", out_dir.display());
    io::write_identifiers(&out_dir.join(UNIQUE_SID_FILE), vocabulary.unique_sid())?;
    io::write_identifiers(&out_dir.join(UNIQUE_UID_FILE), vocabulary.unique_uid())?;

    for (file_name, rows) in outputs.iter() {
        println!("Writing {} rows to {}", rows.len(), file_name);
        io::write_interactions(&out_dir.join(file_name), rows)?;
    }

    println!("Preprocessing took {}ms", start.elapsed().as_millis());

    Ok(PreprocessingReport {
        num_users: vocabulary.num_users(),
        num_items: vocabulary.num_items(),
        num_train_users: partition.train.len(),
        num_validation_users: partition.validation.len(),
        num_test_users: partition.test.len(),
        train: outputs[0].1.len(),
        validation_tr: outputs[1].1.len(),
        validation_te: outputs[2].1.len(),
        test_tr: outputs[3].1.len(),
        test_te: outputs[4].1.len(),
    })
}
