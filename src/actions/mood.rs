//! Mood factor - scales nearly every stat gain by how the student feels

/// Multiplier for a mood value (0.0-100.0)
///
/// Piecewise constant: a miserable student gets 0.65x out of every
/// productive hour, an elated one 1.25x.
pub fn mood_factor(mood: f64) -> f64 {
    if mood <= 0.0 {
        0.65
    } else if mood <= 25.0 {
        0.8
    } else if mood <= 40.0 {
        0.95
    } else if mood <= 60.0 {
        1.0
    } else if mood <= 75.0 {
        1.05
    } else if mood <= 90.0 {
        1.15
    } else {
        1.25
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let cases = [
            (0.0, 0.65),
            (25.0, 0.8),
            (26.0, 0.95),
            (40.0, 0.95),
            (41.0, 1.0),
            (60.0, 1.0),
            (61.0, 1.05),
            (75.0, 1.05),
            (76.0, 1.15),
            (90.0, 1.15),
            (91.0, 1.25),
            (100.0, 1.25),
        ];
        for (mood, expected) in cases {
            assert_eq!(mood_factor(mood), expected, "mood {}", mood);
        }
    }

    #[test]
    fn test_just_above_zero_is_low_band() {
        assert_eq!(mood_factor(0.01), 0.8);
    }

    #[test]
    fn test_step_function_is_monotonic() {
        let mut last = 0.0;
        for step in 0..=1000 {
            let factor = mood_factor(step as f64 / 10.0);
            assert!(factor >= last);
            last = factor;
        }
    }
}
