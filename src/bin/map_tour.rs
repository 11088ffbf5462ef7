//! Guided tour of `OrderedMap`.
//!
//! Walks through construction, lookup, insertion, erasure, node splicing and
//! comparisons, logging what each step observes. Set `RUST_LOG=debug` to also
//! see the map's own diagnostics (rejected insertion hints and the like).

use ordmap::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ordered map tour...");

    construction();
    checked_access();
    word_counts();
    reverse_iteration();
    insertion();
    erasure();
    swapping();
    node_splicing();
    merging();
    equal_ranges();
    comparisons();
    conditional_erase();

    tracing::info!("Tour finished");
}

fn construction() {
    let mut components: OrderedMap<String, i32> = [
        ("CPU".to_string(), 10),
        ("GPU".to_string(), 15),
        ("RAM".to_string(), 20),
    ]
    .into();
    tracing::info!("initially: {components}");

    *components.get_or_default("CPU".to_string()) = 25;
    *components.get_or_default("SSD".to_string()) = 30;
    tracing::info!("after modifications: {components}");

    let copied = components.clone();
    let moved = std::mem::take(&mut components);
    tracing::info!(
        "copied = {copied}, moved = {moved}, source after move has {} entries",
        components.len()
    );

    let by_magnitude = |left: &(f64, f64), right: &(f64, f64)| {
        left.0.hypot(left.1) < right.0.hypot(right.1)
    };
    let mut points = OrderedMap::with_comparator(by_magnitude);
    for point in [(5.0, -12.0), (3.0, 4.0), (-8.0, -15.0)] {
        points.insert(point, point.0.hypot(point.1));
    }
    for ((x, y), magnitude) in &points {
        tracing::info!("the magnitude of ({x}, {y}) is {magnitude}");
    }
}

fn checked_access() {
    let constants: OrderedMap<String, f64> = [
        ("e".to_string(), std::f64::consts::E),
        ("pi".to_string(), std::f64::consts::PI),
    ]
    .into();
    for key in ["pi", "tau", "e"] {
        match constants.at(key) {
            Ok(value) => tracing::info!("{key}: {value}"),
            Err(error) => tracing::warn!("{error}"),
        }
    }
}

fn word_counts() {
    let sentence = "this sentence is not a sentence this is a lie";
    let mut counts: OrderedMap<&str, usize> = OrderedMap::new();
    for word in sentence.split_whitespace() {
        *counts.get_or_default(word) += 1;
    }
    for (word, count) in &counts {
        tracing::info!("{count} occurrences of word '{word}'");
    }
}

fn reverse_iteration() {
    let coins: OrderedMap<u32, &str> = [
        (10, "dime"),
        (100, "dollar"),
        (50, "half dollar"),
        (5, "nickel"),
        (1, "penny"),
        (25, "quarter"),
    ]
    .into();
    tracing::info!("US coins in circulation, largest to smallest denomination:");
    for (value, name) in coins.iter().rev() {
        tracing::info!("{name:>12} = {value}c");
    }
}

fn insertion() {
    let mut heights: OrderedMap<String, f64> = OrderedMap::new();

    let (_, inserted) = heights.insert("Hinata".to_string(), 162.8);
    tracing::info!(inserted, "plain insert of Hinata");
    let (_, inserted) = heights.insert("Hinata".to_string(), 164.2);
    tracing::info!(inserted, "second insert of Hinata keeps the first height");

    let kageyama = heights.insert_hint(Position::END, "Kageyama".to_string(), 180.6);
    heights.insert_hint(kageyama, "Azumane".to_string(), 184.7);
    heights.insert_many([
        ("Sawamura".to_string(), 176.8),
        ("Hinata".to_string(), 170.0),
    ]);

    let (_, created) = heights.insert_or_assign("Tsukishima".to_string(), 188.3);
    tracing::info!(created, "insert_or_assign of a new key");
    let (height, created) = heights.insert_or_assign("Tsukishima".to_string(), 190.1);
    tracing::info!(created, height = *height, "insert_or_assign of an existing key");

    let mut built = 0;
    heights.try_emplace("Nishinoya".to_string(), || {
        built += 1;
        159.3
    });
    heights.try_emplace("Nishinoya".to_string(), || {
        built += 1;
        160.0
    });
    tracing::info!(built, "try_emplace only builds a value for absent keys");

    for (name, height) in &heights {
        tracing::info!("{name:>10} | {height}cm");
    }
}

fn erasure() {
    let mut numbers: OrderedMap<i32, &str> = [
        (1, "one"),
        (2, "two"),
        (3, "three"),
        (4, "four"),
        (5, "five"),
        (6, "six"),
    ]
    .into();

    let mut position = numbers.begin();
    while let Some((key, _)) = numbers.entry_at(position) {
        let next = if key % 2 == 1 {
            numbers.erase_at(position)
        } else {
            numbers.next_position(position)
        };
        position = next.unwrap_or(Position::END);
    }
    tracing::info!("odd keys erased while walking: {numbers}");

    let removed = numbers.erase(&2) + numbers.erase(&7);
    tracing::info!(removed, "erase by key: {numbers}");
}

fn swapping() {
    let mut alice: OrderedMap<i32, char> = [(1, 'a'), (2, 'b'), (3, 'c')].into();
    let mut bob: OrderedMap<i32, char> = [(7, 'Z'), (8, 'Y'), (9, 'X'), (10, 'W')].into();
    let two = alice.find(&2);

    tracing::info!("before swap: alice = {alice}, bob = {bob}");
    alice.swap(&mut bob);
    tracing::info!("after swap: alice = {alice}, bob = {bob}");

    if let Some((key, value)) = bob.entry_at(two) {
        tracing::info!("the position of key 2 now reads ({key}, {value}) through bob");
    }
}

fn node_splicing() {
    let mut map: OrderedMap<i32, char> = [(1, 'a'), (2, 'b'), (3, 'c')].into();
    tracing::info!("start: {map}");

    let Some(mut node) = map.extract(&1) else {
        tracing::warn!("key 1 vanished before extraction");
        return;
    };
    *node.key_mut() = 4;
    tracing::info!("after extract and before insert: {map}");

    let outcome = map.insert_node(node);
    tracing::info!(inserted = outcome.inserted, "end: {map}");
}

fn merging() {
    let mut target: OrderedMap<i32, String> = [
        (1, "apple".to_string()),
        (5, "pear".to_string()),
        (10, "banana".to_string()),
    ]
    .into();
    let mut source: OrderedMap<i32, String> = [
        (2, "zorro".to_string()),
        (4, "batman".to_string()),
        (5, "X".to_string()),
        (8, "alpaca".to_string()),
    ]
    .into();

    let moved = target.merge(&mut source);
    tracing::info!(moved, target = target.len(), source = source.len(), "merged");
    tracing::info!("target = {target}");
    tracing::info!("source keeps colliding entries: {source}");
}

fn equal_ranges() {
    let map: OrderedMap<i32, &str> = [(0, "zero"), (1, "one"), (2, "two")].into();

    for probe in [1, -1, 3] {
        let (lower, upper) = map.equal_range(&probe);
        let describe = |position: Position| {
            map.entry_at(position)
                .map_or_else(|| "end".to_string(), |(key, value)| format!("{key} ({value})"))
        };
        tracing::info!(
            probe,
            "equal_range spans [{}, {})",
            describe(lower),
            describe(upper)
        );
    }

    let middle: Vec<String> = map
        .range(0..2)
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    tracing::info!("range 0..2 yields {middle:?}");
}

fn comparisons() {
    let alice: OrderedMap<i32, char> = [(1, 'a'), (2, 'b'), (3, 'c')].into();
    let bob: OrderedMap<i32, char> = [(7, 'Z'), (8, 'Y'), (9, 'X'), (10, 'W')].into();
    let eve: OrderedMap<i32, char> = [(1, 'a'), (2, 'b'), (3, 'c')].into();

    for (name, other) in [("bob", &bob), ("eve", &eve)] {
        let equal = alice == *other;
        let less = alice < *other;
        let greater = alice > *other;
        tracing::info!(equal, less, greater, "alice compared with {name}");
    }

    let comparator = alice.key_comp();
    for key in [0, 2, 5] {
        let before_two = comparator.less(&key, &2);
        tracing::info!(key, before_two, "key_comp against 2");
    }
    let by_key = alice.value_comp();
    let before = by_key.less_entries((&1, &'z'), (&2, &'a'));
    tracing::info!(before, "value_comp only looks at keys");
}

fn conditional_erase() {
    let mut data: OrderedMap<i32, char> = [
        (1, 'a'),
        (2, 'b'),
        (3, 'c'),
        (4, 'd'),
        (5, 'e'),
        (4, 'f'),
        (5, 'g'),
        (5, 'g'),
    ]
    .into();
    tracing::info!("before: {data}");
    let removed = data.erase_if(|key, _| key & 1 == 1);
    tracing::info!(removed, "erased odd keys: {data}");

    if let Err(error) = data.verify() {
        tracing::error!("{error}");
    }
}
