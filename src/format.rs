//! Thousands-grouped display strings for the day sheet.

/// Rounds to the nearest whole amount (halves away from zero) and groups
/// the digits with commas. Amounts that round to zero never show a sign.
pub fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = (rounded.abs() as i64).to_string();
    let grouped = group_digits(&digits);
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Groups a signed unit count with commas.
pub fn format_units(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let grouped = group_digits(&digits);
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn group_digits(raw: &str) -> String {
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (idx, ch) in raw.chars().enumerate() {
        if idx > 0 && (raw.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_every_three_digits() {
        assert_eq!(format_units(0), "0");
        assert_eq!(format_units(440), "440");
        assert_eq!(format_units(16_000), "16,000");
        assert_eq!(format_units(1_234_567), "1,234,567");
    }

    #[test]
    fn keeps_the_sign_on_negative_counts() {
        assert_eq!(format_units(-15_860), "-15,860");
        assert_eq!(format_units(-7), "-7");
    }

    #[test]
    fn amounts_round_halves_away_from_zero() {
        assert_eq!(format_amount(1_439.5), "1,440");
        assert_eq!(format_amount(1_439.4), "1,439");
        assert_eq!(format_amount(-0.5), "-1");
    }

    #[test]
    fn amounts_rounding_to_zero_lose_the_sign() {
        assert_eq!(format_amount(-0.4), "0");
        assert_eq!(format_amount(0.0), "0");
    }
}
