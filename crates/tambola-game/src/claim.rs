//! Claim validation: does a ticket satisfy a pattern given the numbers
//! drawn so far?

use std::collections::HashSet;

use tambola_protocol::{ClaimKind, Ticket};

/// Tests `kind` against `ticket` and the drawn-number set. Pure; the
/// room actor decides what to do with the verdict.
///
/// FOUR_CORNERS ignores corner cells that are blank: only the corners
/// that hold a number must have been drawn.
pub fn validate_claim(ticket: &Ticket, drawn: &HashSet<u8>, kind: ClaimKind) -> bool {
    match kind {
        ClaimKind::Quick5 => {
            ticket.numbers().filter(|n| drawn.contains(n)).count() >= 5
        }
        ClaimKind::FirstLine => row_complete(ticket, drawn, 0),
        ClaimKind::SecondLine => row_complete(ticket, drawn, 1),
        ClaimKind::ThirdLine => row_complete(ticket, drawn, 2),
        ClaimKind::FourCorners => ticket
            .corners()
            .iter()
            .filter(|&&n| n != 0)
            .all(|n| drawn.contains(n)),
        ClaimKind::Tambola => ticket.numbers().all(|n| drawn.contains(&n)),
    }
}

fn row_complete(ticket: &Ticket, drawn: &HashSet<u8>, row: usize) -> bool {
    ticket.row_numbers(row).all(|n| drawn.contains(&n))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A fixed ticket so every assertion is deterministic:
    ///
    /// ```text
    /// row 0:  1  .  21  31  .  51  .  71  .
    /// row 1:  .  11 22  .  41  .  61  .  81
    /// row 2:  5  12  .  35  .  55  .  .  90
    /// ```
    fn ticket() -> Ticket {
        Ticket::from_grid([
            [1, 0, 21, 31, 0, 51, 0, 71, 0],
            [0, 11, 22, 0, 41, 0, 61, 0, 81],
            [5, 12, 0, 35, 0, 55, 0, 0, 90],
        ])
    }

    fn drawn(numbers: &[u8]) -> HashSet<u8> {
        numbers.iter().copied().collect()
    }

    #[test]
    fn test_quick5_needs_five_hits_anywhere() {
        let t = ticket();
        assert!(!validate_claim(&t, &drawn(&[1, 11, 12, 21]), ClaimKind::Quick5));
        assert!(validate_claim(&t, &drawn(&[1, 11, 12, 21, 90]), ClaimKind::Quick5));
        // Drawn numbers not on the ticket don't count.
        assert!(!validate_claim(
            &t,
            &drawn(&[2, 3, 4, 6, 7, 8, 1]),
            ClaimKind::Quick5
        ));
    }

    #[test]
    fn test_line_claims_require_the_whole_row() {
        let t = ticket();
        let row0 = [1, 21, 31, 51, 71];

        assert!(validate_claim(&t, &drawn(&row0), ClaimKind::FirstLine));
        // One short of the row.
        assert!(!validate_claim(
            &t,
            &drawn(&[1, 21, 31, 51]),
            ClaimKind::FirstLine
        ));
        // Row 0 complete says nothing about rows 1 and 2.
        assert!(!validate_claim(&t, &drawn(&row0), ClaimKind::SecondLine));
        assert!(!validate_claim(&t, &drawn(&row0), ClaimKind::ThirdLine));

        assert!(validate_claim(
            &t,
            &drawn(&[11, 22, 41, 61, 81]),
            ClaimKind::SecondLine
        ));
        assert!(validate_claim(
            &t,
            &drawn(&[5, 12, 35, 55, 90]),
            ClaimKind::ThirdLine
        ));
    }

    #[test]
    fn test_four_corners_uses_non_blank_corners() {
        let t = ticket();
        // Corners of the fixture: (0,0)=1, (0,8)=0, (2,0)=5, (2,8)=90.
        assert!(validate_claim(&t, &drawn(&[1, 5, 90]), ClaimKind::FourCorners));
        assert!(!validate_claim(&t, &drawn(&[1, 5]), ClaimKind::FourCorners));
    }

    #[test]
    fn test_four_corners_all_blank_is_trivially_satisfied() {
        // Degenerate layout: every corner blank. The kept rule treats
        // this as satisfied even with nothing drawn.
        let t = Ticket::from_grid([
            [0, 11, 21, 31, 41, 51, 0, 0, 0],
            [1, 12, 22, 0, 0, 0, 61, 71, 0],
            [0, 13, 23, 33, 43, 53, 0, 0, 0],
        ]);
        assert!(validate_claim(&t, &drawn(&[]), ClaimKind::FourCorners));
    }

    #[test]
    fn test_tambola_requires_every_number() {
        let t = ticket();
        let all: Vec<u8> = t.numbers().collect();

        assert!(!validate_claim(&t, &drawn(&all[..14]), ClaimKind::Tambola));
        assert!(validate_claim(&t, &drawn(&all), ClaimKind::Tambola));
        // Extra drawn numbers don't hurt.
        let mut more = all.clone();
        more.extend([2, 3, 4]);
        assert!(validate_claim(&t, &drawn(&more), ClaimKind::Tambola));
    }

    #[test]
    fn test_empty_drawn_set_fails_everything_but_blank_corners() {
        let t = ticket();
        let none = drawn(&[]);
        assert!(!validate_claim(&t, &none, ClaimKind::Quick5));
        assert!(!validate_claim(&t, &none, ClaimKind::FirstLine));
        assert!(!validate_claim(&t, &none, ClaimKind::Tambola));
        // The fixture has three non-blank corners, so this fails too.
        assert!(!validate_claim(&t, &none, ClaimKind::FourCorners));
    }
}
