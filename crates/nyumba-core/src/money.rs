//! Kenyan shilling formatting.

/// Group an integer amount into thousands with commas: `120000` -> `"120,000"`.
pub fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a monthly rent as `KSh 45,000`.
pub fn format_ksh(amount: u64) -> String {
    format!("KSh {}", group_thousands(amount))
}
