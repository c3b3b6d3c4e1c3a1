//! Spreadsheet-style column labels
//!
//! Columns are labelled with bijective base-26: there is no zero digit, so
//! 1 -> A, 26 -> Z, 27 -> AA, 52 -> AZ, 53 -> BA, 702 -> ZZ, 703 -> AAA.

/// Label for a 1-based column index (`1 -> "A"`).
///
/// Index 0 has no label and yields an empty string.
pub fn column_label(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Labels for the first `count` columns, in order.
pub fn column_labels(count: usize) -> Vec<String> {
    (1..=count).map(column_label).collect()
}

/// Inverse of [`column_label`]: `"A" -> Some(1)`, `"AA" -> Some(27)`.
///
/// Accepts lowercase letters. Returns `None` for empty or non-alphabetic input.
pub fn column_index(label: &str) -> Option<usize> {
    if label.is_empty() {
        return None;
    }

    let mut n: usize = 0;
    for ch in label.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        n = n.checked_mul(26)?.checked_add(digit)?;
    }
    Some(n)
}

/// A1-style name for a 0-based cell position: `(2, 1) -> "B3"`.
pub fn cell_name(row: usize, col: usize) -> String {
    format!("{}{}", column_label(col + 1), row + 1)
}

/// Parse an A1-style name into a 0-based `(row, col)`.
pub fn parse_cell_name(name: &str) -> Option<(usize, usize)> {
    let name = name.trim();
    let split = name.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = name.split_at(split);

    let col = column_index(letters)?;
    let row: usize = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row - 1, col - 1))
}
