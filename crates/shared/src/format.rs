//! Money and text formatting helpers used by views

use rand::Rng;

use crate::error::FormatError;

const DAYS_PER_YEAR: f64 = 365.0;

/// Format an amount with exactly 2 decimal places
pub fn money(amount: f64) -> Result<String, FormatError> {
    if !amount.is_finite() {
        return Err(FormatError::InvalidMoney(amount.to_string()));
    }

    let formatted = format!("{:.2}", amount);
    Ok(if formatted == "-0.00" {
        "0.00".to_string()
    } else {
        formatted
    })
}

/// Format a numeric string with exactly 2 decimal places
pub fn money_from_str(amount: &str) -> Result<String, FormatError> {
    let parsed: f64 = amount
        .trim()
        .parse()
        .map_err(|_| FormatError::InvalidMoney(amount.to_string()))?;
    money(parsed)
}

/// Strip currency symbols and thousands separators from user input
pub fn clean_money_input(input: &str) -> String {
    input.trim_matches('$').replace(',', "")
}

/// Format an amount prefixed with its currency: `USD 1,234.50`
pub fn format_currency(amount: f64, currency: &str, decimals: u32) -> String {
    format!("{} {}", currency, number_format(amount, decimals))
}

/// Round half away from zero and group thousands with `,`
pub fn number_format(amount: f64, decimals: u32) -> String {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (amount.abs() * factor).round() / factor;
    let fixed = format!("{:.*}", decimals as usize, rounded);

    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = amount < 0.0 && rounded != 0.0;
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// `visa_type_name` -> `Visa Type Name`
pub fn humanize(input: &str) -> String {
    input
        .replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Divide, returning 0 for a zero denominator
pub fn safe_divide(numerator: f64, denominator: f64, round: Option<u32>) -> f64 {
    let result = if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    };

    match round {
        Some(places) => {
            let factor = 10f64.powi(places as i32);
            (result * factor).round() / factor
        }
        None => result,
    }
}

/// Random string of lowercase a-z
pub fn random_string(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| rng.gen_range(b'a'..=b'z') as char)
        .collect()
}

/// Render a day count or range (`30 - 400`) as days or years
pub fn days_to_string(days: &str) -> String {
    let parts: Option<Vec<String>> = days
        .split(" - ")
        .map(|part| {
            let days: f64 = part.trim().parse().ok()?;
            Some(describe_days(part, days))
        })
        .collect();

    match parts {
        Some(parts) => parts.join(" - "),
        None => format!("{} days", days),
    }
}

/// Counts under a year keep the caller's text (`"030"` stays `"030 days"`)
fn describe_days(text: &str, days: f64) -> String {
    let years = days / DAYS_PER_YEAR;
    if years < 1.0 {
        let unit = if days == 1.0 { "day" } else { "days" };
        return format!("{} {}", text, unit);
    }

    let years = (years * 10.0).round() / 10.0;
    let unit = if years == 1.0 { "year" } else { "years" };
    format!("{} {}", years, unit)
}
