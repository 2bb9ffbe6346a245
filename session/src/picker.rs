//! Uniform random selection over ordered option sets.

use rand::Rng;
use raid_roller_core::EmptySetError;

/// Picks one element uniformly at random from the provided option set.
///
/// Fails with [`EmptySetError`] when the set is empty; all configured option
/// sets are non-empty by construction.
pub fn pick<'a, T, R: Rng>(rng: &mut R, options: &'a [T]) -> Result<&'a T, EmptySetError> {
    if options.is_empty() {
        return Err(EmptySetError);
    }
    let index = rng.gen_range(0..options.len());
    Ok(&options[index])
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use raid_roller_core::EmptySetError;

    use super::pick;

    #[test]
    fn picks_elements_from_the_set() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let options = ["alpha", "beta", "gamma"];
        for _ in 0..32 {
            let value = pick(&mut rng, &options[..]).expect("non-empty set");
            assert!(options.contains(value));
        }
    }

    #[test]
    fn rejects_an_empty_set() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let options: [&str; 0] = [];
        assert_eq!(pick(&mut rng, &options[..]), Err(EmptySetError));
    }
}
