//! Text formatting for the counter and the stations-remaining line

/// Shown when no stations are left
pub const NO_MORE_STATIONS: &str = "No more stations";
/// Shown while the last station runs
pub const LAST_STATION: &str = "Last station";
/// Appended to the number of stations left
pub const STATIONS_REMAINING_SUFFIX: &str = " stations remaining";

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [&str; 7] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
];

/// Format a number of seconds using the shortest of `H:MM:SS`, `M:SS` or `S`.
///
/// Hours appear only from 3600 seconds on. Minutes are zero-padded only when
/// hours are shown, and seconds are zero-padded only when minutes are shown.
pub fn format_elapsed(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}:{:02}", minutes, seconds)
    } else {
        seconds.to_string()
    }
}

/// Parse text in the shape produced by [`format_elapsed`] back into seconds.
///
/// Accepts `S`, `M:SS` and `H:MM:SS`. Leading components may be any size,
/// trailing ones must stay below 60.
pub fn parse_elapsed(text: &str) -> Option<u64> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    let is_number = |p: &&str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    if parts.len() > 3 || !parts.iter().all(is_number) {
        return None;
    }

    let mut total: u64 = 0;
    for (index, part) in parts.iter().enumerate() {
        let value: u64 = part.parse().ok()?;
        if index > 0 && value >= 60 {
            return None;
        }
        total = total.checked_mul(60)?.checked_add(value)?;
    }
    Some(total)
}

/// Text for the stations-remaining line
pub fn format_remaining(stations: u64) -> String {
    match stations {
        0 => NO_MORE_STATIONS.to_string(),
        1 => LAST_STATION.to_string(),
        n => format!("{}{}", to_sentence_case(&number_to_words(n)), STATIONS_REMAINING_SUFFIX),
    }
}

/// Upper-case the first character and lower-case the rest
pub fn to_sentence_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// English cardinal words, e.g. `1234` → `one thousand, two hundred thirty-four`
pub fn number_to_words(number: u64) -> String {
    if number == 0 {
        return ONES[0].to_string();
    }

    let mut groups = Vec::new();
    let mut rest = number;
    let mut scale = 0;
    while rest > 0 {
        let group = rest % 1000;
        if group > 0 {
            let words = below_thousand(group);
            groups.push(if SCALES[scale].is_empty() {
                words
            } else {
                format!("{} {}", words, SCALES[scale])
            });
        }
        rest /= 1000;
        scale += 1;
    }

    groups.reverse();
    groups.join(", ")
}

fn below_thousand(number: u64) -> String {
    let hundreds = number / 100;
    let rest = number % 100;

    match (hundreds, rest) {
        (0, rest) => below_hundred(rest),
        (hundreds, 0) => format!("{} hundred", ONES[hundreds as usize]),
        (hundreds, rest) => format!("{} hundred {}", ONES[hundreds as usize], below_hundred(rest)),
    }
}

fn below_hundred(number: u64) -> String {
    let number = number as usize;
    if number < 20 {
        return ONES[number].to_string();
    }
    match number % 10 {
        0 => TENS[number / 10].to_string(),
        units => format!("{}-{}", TENS[number / 10], ONES[units]),
    }
}
