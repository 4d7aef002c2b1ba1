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

use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::process;

use getopts::{Matches, Options};

use recosplit::config::PreprocessingConfig;

fn main() {

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt("c", "config", "JSON file with preprocessing settings (optional). Command line \
        options take precedence over the file.", "PATH");
    opts.optopt("i", "input-dir", "Directory containing the raw reviews (optional, defaults to \
        ./raw_data/).", "PATH");
    opts.optopt("f", "input-file", "Name of the raw review file, a JSON array or JSON lines \
        with uid, place and rating fields (optional, defaults to tripadvisor.json).", "NAME");
    opts.optopt("o", "output-dir", "Directory for the generated splits (optional, defaults to \
        ./pre_data/).", "PATH");
    opts.optopt("u", "min-user-count", "Minimum number of reviews per user (optional, \
        defaults to 2).", "NUMBER");
    opts.optopt("s", "seed", "Seed for shuffling and sampling (optional, defaults to 98765).",
        "NUMBER");
    opts.optflag("h", "help", "Print this help menu");

    let matches = match opts.parse(&args[1..]) {
        Ok(matches) => matches,
        Err(failure) => {
            let hint = failure.to_string();
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    if matches.opt_present("h") {
        return print_usage_and_exit(&program, opts, None);
    }

    let config = match config_from(&matches) {
        Ok(config) => config,
        Err(failure) => {
            let hint = format!("Problem with options: {}", failure);
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    if let Err(failure) = run(&config) {
        eprintln!("Preprocessing failed: {}", failure);
        process::exit(1);
    }
}

fn print_usage_and_exit(
    program: &str,
    opts: Options,
    hint: Option<&str>
) {

    if let Some(hint) = hint {
        eprintln!("\n{}\n", hint);
    }

    let brief = format!("Usage: {} [options]", program);
    eprint!("{}", opts.usage(&brief));
    process::exit(if hint.is_some() { 2 } else { 0 });
}

fn config_from(matches: &Matches) -> Result<PreprocessingConfig, Box<dyn Error>> {

    let mut config = match matches.opt_str("c") {
        Some(path) => PreprocessingConfig::from_json_file(path)?,
        None => PreprocessingConfig::default(),
    };

    if let Some(dir) = matches.opt_str("i") {
        config.raw_data_dir = PathBuf::from(dir);
    }
    if let Some(file) = matches.opt_str("f") {
        config.input_file = file;
    }
    if let Some(dir) = matches.opt_str("o") {
        config.processed_dir = PathBuf::from(dir);
    }
    if let Some(min_user_count) = matches.opt_get("u")? {
        config.min_user_count = min_user_count;
    }
    if let Some(seed) = matches.opt_get("s")? {
        config.seed = seed;
    }

    Ok(config)
}

fn run(config: &PreprocessingConfig) -> Result<(), Box<dyn Error>> {

    let report = recosplit::preprocess(config)?;

    println!(
        "Wrote {} training, {}/{} validation and {}/{} test interactions for {} users and {} \
         places to {}",
        report.train,
        report.validation_tr,
        report.validation_te,
        report.test_tr,
        report.test_te,
        report.num_users,
        report.num_items,
        config.processed_dir.display(),
    );

    Ok(())
}
