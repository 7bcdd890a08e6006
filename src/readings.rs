//! Reading generator collaborator
//!
//! The scheduler treats the generator as a pure function from source id to
//! measurement; the synthetic implementation applies the fixed formulas and
//! stamps the capture time.

use beacon_shared::Reading;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

/// Produces one reading per source id; pure from the scheduler's view
pub trait ReadingGenerator: Send + Sync {
    fn generate(&self, source_id: u8) -> Reading;
}

/// `YYYY-MM-DD hh:mm:ss`, 19 visible characters
const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Deterministic simulated sensor: temperature `20.0 + 0.5 * id`, humidity
/// `60.0 + 1.0 * id`, capture time from the wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticGenerator;

impl ReadingGenerator for SyntheticGenerator {
    fn generate(&self, source_id: u8) -> Reading {
        Reading::synthesize(source_id).with_captured_at(timestamp_now())
    }
}

fn timestamp_now() -> String {
    // The format is infallible for any UTC wall-clock time
    OffsetDateTime::now_utc()
        .format(&TIMESTAMP_FORMAT)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_shared::TIMESTAMP_MAX_CHARS;

    #[test]
    fn test_generator_formula_over_full_range() {
        let generator = SyntheticGenerator;
        for id in 1..=9u8 {
            let reading = generator.generate(id);
            assert_eq!(reading.source_id, id);
            assert_eq!(reading.temperature, 20.0 + 0.5 * id as f32);
            assert_eq!(reading.humidity, 60.0 + id as f32);
        }
    }

    #[test]
    fn test_generator_known_reading() {
        let reading = SyntheticGenerator.generate(3);
        assert_eq!(reading.temperature, 21.5);
        assert_eq!(reading.humidity, 63.0);
    }

    #[test]
    fn test_timestamp_fits_wire_field() {
        let stamp = timestamp_now();
        assert_eq!(stamp.len(), TIMESTAMP_MAX_CHARS);
        assert!(stamp.is_ascii());
    }
}
