//! Small helpers for generating test data and pacing test steps

use std::time::Duration;

use chrono::{NaiveDate, Utc};
use rand::Rng;

use super::constants::RANDOM_STRING_CHARSET;

/// Sleep for `duration` on the tokio timer.
///
/// Prefer waiting on a concrete page condition; a fixed delay is a last resort.
pub async fn wait(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Random string of `length` ASCII letters and digits
pub fn generate_random_string(length: usize) -> String {
    generate_random_string_with(&mut rand::rng(), length)
}

/// Like [`generate_random_string`], drawing from a caller-supplied RNG
pub fn generate_random_string_with<R: Rng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..RANDOM_STRING_CHARSET.len());
            RANDOM_STRING_CHARSET[idx] as char
        })
        .collect()
}

/// Today's UTC date as `YYYY-MM-DD`
pub fn current_date() -> String {
    format_date(Utc::now().date_naive())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn random_string_has_requested_length() {
        for length in [0, 1, 8, 64] {
            assert_eq!(generate_random_string(length).len(), length);
        }
    }

    #[test]
    fn random_string_is_alphanumeric() {
        let value = generate_random_string(256);
        assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let a = generate_random_string_with(&mut StdRng::seed_from_u64(7), 16);
        let b = generate_random_string_with(&mut StdRng::seed_from_u64(7), 16);
        assert_eq!(a, b);
    }

    #[test]
    fn date_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_date(date), "2024-03-07");
    }

    #[test]
    fn current_date_matches_shape() {
        let today = current_date();
        assert_eq!(today.len(), 10);
        assert!(NaiveDate::parse_from_str(&today, "%Y-%m-%d").is_ok());
    }

    #[tokio::test]
    async fn wait_sleeps_at_least_duration() {
        let start = std::time::Instant::now();
        wait(Duration::from_millis(20)).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
