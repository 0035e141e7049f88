/// Formats `n` as an English ordinal: 1 -> "1st", 12 -> "12th", 22 -> "22nd".
///
/// Negative numbers keep their sign and take the suffix of their magnitude,
/// so -1 -> "-1st" and -11 -> "-11th".
pub fn nth_number(n: i64) -> String {
    format!("{}{}", n, suffix(n.unsigned_abs()))
}

fn suffix(n: u64) -> &'static str {
    if n > 3 && n < 21 {
        return "th";
    }

    // 111th, 112th, 113th
    if let 11..=13 = n % 100 {
        return "th";
    }

    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
