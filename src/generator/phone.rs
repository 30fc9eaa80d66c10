//! Local phone number synthesis.
//!
//! Numbers are random but follow each country's mobile format, so they
//! look right without ever dialing anywhere.

use crate::geo::CountryCode;

/// Generate a random phone number in the country's mobile format.
pub fn random_phone_number(country: CountryCode) -> String {
    match country {
        // Australian mobile: +61 4 dddd dddd
        CountryCode::Au => {
            let digits: String = (0..8).map(|_| fastrand::char('0'..='9')).collect();
            format!("+61 4 {} {}", &digits[..4], &digits[4..])
        }
        // Swiss mobile: +41 7x ddd dd dd with x in 5..=9
        CountryCode::Ch => {
            let prefix = ["75", "76", "77", "78", "79"][fastrand::usize(..5)];
            format!(
                "+41 {} {} {} {}",
                prefix,
                fastrand::u32(100..1000),
                fastrand::u32(10..100),
                fastrand::u32(10..100)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_au_phone_format() {
        let pattern = Regex::new(r"^\+61 4 \d{4} \d{4}$").unwrap();
        for _ in 0..100 {
            let phone = random_phone_number(CountryCode::Au);
            assert!(pattern.is_match(&phone), "bad AU phone: {phone}");
        }
    }

    #[test]
    fn test_ch_phone_format() {
        let pattern = Regex::new(r"^\+41 7[5-9] \d{3} \d{2} \d{2}$").unwrap();
        for _ in 0..100 {
            let phone = random_phone_number(CountryCode::Ch);
            assert!(pattern.is_match(&phone), "bad CH phone: {phone}");
        }
    }
}
