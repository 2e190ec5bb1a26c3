//! Ticket generation.
//!
//! The construction guarantees every structural invariant by shape
//! rather than by retry:
//!
//! 1. Per row, sample 5 of the 9 columns to fill — 5 numbers / 4 blanks
//!    per row, always.
//! 2. Per column, sample as many distinct values from the column's
//!    range as it has filled rows, sort ascending, assign top to
//!    bottom — strictly increasing down the column, always.
//!
//! Column ranges are disjoint, so ticket-wide distinctness follows for
//! free.

use rand::Rng;
use rand::seq::index;
use tambola_protocol::Ticket;

/// Generates one structurally valid ticket from the given RNG source.
pub fn generate_ticket<R: Rng + ?Sized>(rng: &mut R) -> Ticket {
    let mut grid = [[0u8; Ticket::COLS]; Ticket::ROWS];

    // Which cells hold a number.
    let mut filled = [[false; Ticket::COLS]; Ticket::ROWS];
    for row in filled.iter_mut() {
        for col in index::sample(rng, Ticket::COLS, 5) {
            row[col] = true;
        }
    }

    for col in 0..Ticket::COLS {
        let rows: Vec<usize> = (0..Ticket::ROWS)
            .filter(|&row| filled[row][col])
            .collect();
        if rows.is_empty() {
            continue;
        }

        let (start, end) = column_range(col);
        let width = (end - start + 1) as usize;
        // 3 rows against a width-10 range; can't fail, but the sort
        // assignment below silently mis-places values if it ever did.
        assert!(
            rows.len() <= width,
            "column {col} needs {} values from a range of {width}",
            rows.len()
        );

        let mut values: Vec<u8> = index::sample(rng, width, rows.len())
            .into_iter()
            .map(|offset| start + offset as u8)
            .collect();
        values.sort_unstable();

        for (&row, value) in rows.iter().zip(values) {
            grid[row][col] = value;
        }
    }

    Ticket::from_grid(grid)
}

/// Inclusive numeric range of a ticket column: `[10c+1, 10c+10]`, with
/// the last column capped at 90.
pub fn column_range(col: usize) -> (u8, u8) {
    let start = col as u8 * 10 + 1;
    let end = if col == Ticket::COLS - 1 { 90 } else { start + 9 };
    (start, end)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    // A spread of seeds rather than one lucky ticket.
    fn sample_tickets(count: u64) -> impl Iterator<Item = Ticket> {
        (0..count).map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            generate_ticket(&mut rng)
        })
    }

    #[test]
    fn test_each_row_has_five_numbers_and_four_blanks() {
        for ticket in sample_tickets(200) {
            for row in 0..Ticket::ROWS {
                let numbers = ticket.row_numbers(row).count();
                assert_eq!(numbers, 5, "row {row} of {ticket:?}");
            }
        }
    }

    #[test]
    fn test_all_numbers_distinct_ticket_wide() {
        for ticket in sample_tickets(200) {
            let all: Vec<u8> = ticket.numbers().collect();
            let unique: HashSet<u8> = all.iter().copied().collect();
            assert_eq!(all.len(), unique.len(), "{ticket:?}");
            assert_eq!(all.len(), 15);
        }
    }

    #[test]
    fn test_columns_respect_their_ranges() {
        for ticket in sample_tickets(200) {
            for col in 0..Ticket::COLS {
                let (start, end) = column_range(col);
                for row in 0..Ticket::ROWS {
                    let value = ticket.value(row, col);
                    if value != 0 {
                        assert!(
                            (start..=end).contains(&value),
                            "col {col}: {value} outside [{start}, {end}]"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_columns_strictly_increase_top_to_bottom() {
        for ticket in sample_tickets(200) {
            for col in 0..Ticket::COLS {
                let values: Vec<u8> = (0..Ticket::ROWS)
                    .map(|row| ticket.value(row, col))
                    .filter(|&value| value != 0)
                    .collect();
                for pair in values.windows(2) {
                    assert!(pair[0] < pair[1], "col {col} of {ticket:?}");
                }
            }
        }
    }

    #[test]
    fn test_column_range_bounds() {
        assert_eq!(column_range(0), (1, 10));
        assert_eq!(column_range(4), (41, 50));
        assert_eq!(column_range(8), (81, 90));
    }

    #[test]
    fn test_tickets_vary_across_seeds() {
        let mut rng_a = StdRng::seed_from_u64(1);
        let mut rng_b = StdRng::seed_from_u64(2);
        assert_ne!(generate_ticket(&mut rng_a), generate_ticket(&mut rng_b));
    }
}
