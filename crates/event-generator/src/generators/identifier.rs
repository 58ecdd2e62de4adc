//! Synthetic pooled identifiers (subscriber keys, message ids).

use rand::Rng;

pub const SUBSCRIBER_PREFIX: &str = "sub_";
pub const MESSAGE_PREFIX: &str = "msg_";

/// Draw `<prefix><n>` with `n` uniform in `1..=pool`.
pub fn pooled_key<R: Rng>(rng: &mut R, prefix: &str, pool: u32) -> String {
    let n = rng.gen_range(1..=pool.max(1));
    format!("{prefix}{n}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pooled_key_within_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1_000 {
            let key = pooled_key(&mut rng, SUBSCRIBER_PREFIX, 50);
            let n: u32 = key.strip_prefix("sub_").unwrap().parse().unwrap();
            assert!((1..=50).contains(&n));
        }
    }

    #[test]
    fn test_single_slot_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pooled_key(&mut rng, MESSAGE_PREFIX, 1), "msg_1");
    }
}
