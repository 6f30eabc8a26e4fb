// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use sproutbook::money;
use sproutbook::plant::{PlantMood, PlantStage};

#[test]
fn stage_thresholds_are_monotonic() {
    let mut last = PlantStage::Seed;
    for n in 0..100 {
        let stage = PlantStage::for_entry_count(n);
        assert!(stage >= last, "stage regressed at {} entries", n);
        last = stage;
    }
}

#[test]
fn stage_boundaries() {
    assert_eq!(PlantStage::for_entry_count(0), PlantStage::Seed);
    assert_eq!(PlantStage::for_entry_count(2), PlantStage::Seed);
    assert_eq!(PlantStage::for_entry_count(3), PlantStage::Sprout);
    assert_eq!(PlantStage::for_entry_count(7), PlantStage::Sprout);
    assert_eq!(PlantStage::for_entry_count(8), PlantStage::Seedling);
    assert_eq!(PlantStage::for_entry_count(15), PlantStage::Budding);
    assert_eq!(PlantStage::for_entry_count(25), PlantStage::Blooming);
    assert_eq!(PlantStage::for_entry_count(1000), PlantStage::Blooming);
}

#[test]
fn next_walks_the_table_and_saturates() {
    assert_eq!(PlantStage::Seed.next(), PlantStage::Sprout);
    assert_eq!(PlantStage::Budding.next(), PlantStage::Blooming);
    assert_eq!(PlantStage::Blooming.next(), PlantStage::Blooming);
}

#[test]
fn entries_to_next_counts_down() {
    assert_eq!(PlantStage::entries_to_next(0), Some(3));
    assert_eq!(PlantStage::entries_to_next(2), Some(1));
    assert_eq!(PlantStage::entries_to_next(3), Some(5));
    assert_eq!(PlantStage::entries_to_next(25), None);
}

#[test]
fn mood_is_a_pure_function_of_net_balance() {
    assert_eq!(
        PlantMood::for_net_balance(money::parse_amount("0.01")),
        PlantMood::Happy
    );
    assert_eq!(
        PlantMood::for_net_balance(money::parse_amount("-0.01")),
        PlantMood::Wilting
    );
    assert_eq!(
        PlantMood::for_net_balance(money::parse_amount("0")),
        PlantMood::Neutral
    );
}
