#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::engine::possible::index_of;

const CELL_WIDTH: usize = 9;
const LINE_WIDTH: usize = 93;

/// Draws the 9x9 grid as text. Each cell shows the concatenation of its
/// remaining candidate digits, left-aligned in a fixed-width column, with
/// ` | ` separators after columns 3 and 6 and a dashed line after rows 3
/// and 6.
pub fn grid(is_possible: impl Fn(usize) -> bool) -> String {
    let mut out = String::new();
    for row in 1..=9u8 {
        for col in 1..=9u8 {
            let mut cell = String::new();
            for digit in 1..=9u8 {
                if is_possible(index_of(row, col, digit)) {
                    cell.push(char::from(b'0' + digit));
                }
            }
            out.push_str(&format!("{cell:<CELL_WIDTH$}"));
            match col {
                3 | 6 => out.push_str(" | "),
                9 => {}
                _ => out.push(' '),
            }
        }
        out.push('\n');
        if row == 3 || row == 6 {
            out.push_str(&"-".repeat(LINE_WIDTH));
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_grid_layout() {
        let text = grid(|i| i < 729);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines.iter().all(|line| line.len() == LINE_WIDTH));
        assert_eq!(lines[3], "-".repeat(LINE_WIDTH));
        assert_eq!(lines[7], "-".repeat(LINE_WIDTH));
        assert!(lines[0].starts_with("123456789 123456789 123456789 | "));
    }

    #[test]
    fn test_single_candidate_cell() {
        // Only digit 5 in R1C1, everything else empty.
        let text = grid(|i| i == index_of(1, 1, 5));
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("5         "));
    }
}
