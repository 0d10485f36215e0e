//! The rule families a puzzle can be built from.

mod anti_king;
mod corner_mark;
mod counting_circles;
mod killer_cage;
mod no_repeats;
mod no_x;
mod region_count;
mod touching_sum;
mod wheel;
mod whisper;

pub use anti_king::AntiKing;
pub use corner_mark::CornerMark;
pub use counting_circles::CountingCircles;
pub use killer_cage::KillerCage;
pub use no_repeats::NoRepeats;
pub use no_x::NoX;
pub use region_count::RegionCount;
pub use touching_sum::NoTouchingSum;
pub use wheel::Wheel;
pub use whisper::GermanWhisper;

use crate::engine::possible::{Cell, GRID_SIZE};

fn check_cell((row, col): Cell) {
    assert!(
        (1..=GRID_SIZE).contains(&row) && (1..=GRID_SIZE).contains(&col),
        "cell R{row}C{col} is off the grid"
    );
}

fn check_cells(cells: &[Cell]) {
    for &cell in cells {
        check_cell(cell);
    }
}
