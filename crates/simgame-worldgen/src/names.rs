//! Random world names and seed words for prefilling a new-world form.
//!
//! Generation never consults these; they only give the user a starting point.

use rand::Rng;

const ONSETS: [&str; 16] = [
    "B", "D", "F", "G", "K", "L", "M", "N", "P", "R", "S", "T", "V", "Z", "Th", "Br",
];
const VOWELS: [&str; 8] = ["a", "e", "i", "o", "u", "ae", "ia", "or"];
const CODAS: [&str; 8] = ["", "n", "r", "s", "th", "l", "m", "x"];
const SUFFIXES: [&str; 6] = ["", "ia", "os", "heim", "mark", "land"];

const SEED_WORDS: [&str; 24] = [
    "Coffee", "Granite", "Harbor", "Lantern", "Meadow", "Thistle", "Ember", "Glacier",
    "Canyon", "Willow", "Falcon", "Basalt", "Tundra", "Orchid", "Cinder", "Marble",
    "Juniper", "Breaker", "Quarry", "Saffron", "Drift", "Hollow", "Summit", "Atoll",
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, options: &[&'a str]) -> &'a str {
    options[rng.random_range(0..options.len())]
}

/// A pronounceable name of two or three syllables plus an optional suffix.
pub fn generate_world_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let syllables = rng.random_range(2..=3);
    let mut name = String::new();
    for i in 0..syllables {
        let onset = pick(rng, &ONSETS);
        if i == 0 {
            name.push_str(onset);
        } else {
            name.push_str(&onset.to_lowercase());
        }
        name.push_str(pick(rng, &VOWELS));
        name.push_str(pick(rng, &CODAS));
    }
    name.push_str(pick(rng, &SUFFIXES));
    name
}

/// One word from a fixed list, suitable as `seed_ascii`.
pub fn random_seed_word<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, &SEED_WORDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::validate_name;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_names_are_valid_world_names() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let name = generate_world_name(&mut rng);
            assert!(name.len() >= 4, "too short: {name}");
            assert!(name.chars().next().unwrap().is_ascii_uppercase(), "{name}");
            assert!(validate_name(&name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_names_deterministic_per_rng_seed() {
        let a = generate_world_name(&mut ChaCha8Rng::seed_from_u64(42));
        let b = generate_world_name(&mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_words_come_from_list() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            assert!(SEED_WORDS.contains(&random_seed_word(&mut rng)));
        }
    }
}
