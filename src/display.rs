//! ASCII board rendering, used by solution playback files and handy when
//! debugging a deal by eye.

use std::io::{self, Write};

use crate::game::{KlondikeGame, NUM_FOUNDATION_PILES, NUM_TABLEAU_PILES};

const CARD_BACK: [&str; 4] = [".---.", "|///|", "|///|", "'---'"];
const CARD_FRONT: [&str; 4] = [".---.", "|   |", "|   |", "'---'"];
const CARD_BLANK: &str = "     ";
const CARD_GAP: &str = "  ";
const BORDER: &str = "----------------------------------------------------------------\n";
const CARD_HEIGHT: usize = 4;

/// Render the whole board: stock with a caret under the cursor card, the
/// four foundations, then the tableau with overlapped card boxes.
pub fn write_game<W: Write>(game: &KlondikeGame, out: &mut W) -> io::Result<()> {
    out.write_all(BORDER.as_bytes())?;

    // Stock as one line of entries, cursor marked on the line below.
    let header = "stock: ";
    write!(out, "{header}")?;
    let mut caret_line = " ".repeat(header.len());
    for (i, card) in game.stock.iter().enumerate() {
        let entry = format!("{card}, ");
        write!(out, "{entry}")?;
        if i < game.stock_position {
            caret_line.push_str(&" ".repeat(entry.len()));
        }
    }
    writeln!(out)?;
    writeln!(out, "{caret_line}^")?;

    // Foundations: top card of each, or blank space.
    for row in 0..CARD_HEIGHT {
        for k in 0..NUM_FOUNDATION_PILES {
            let pile = &game.foundation[k];
            if !pile.has_cards() {
                write!(out, "{CARD_BLANK}{CARD_GAP}")?;
                continue;
            }
            let card = pile.from_top(0);
            if row == 1 {
                write!(out, "|{card}|")?;
            } else {
                write!(out, "{}", CARD_FRONT[row])?;
            }
            write!(out, "{CARD_GAP}")?;
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(out)?;

    // Tableau: two text rows per overlapped card, full box for the last.
    let half_height = CARD_HEIGHT / 2;
    let mut row = 0;
    loop {
        let card_index = row / half_height;
        let draw_index = row % half_height;
        let mut printed_something = false;
        let mut line = String::new();
        for k in 0..NUM_TABLEAU_PILES {
            let pile = &game.tableau[k];
            if !pile.has_cards() || pile.size() < card_index {
                line.push_str(CARD_BLANK);
                line.push_str(CARD_GAP);
                continue;
            }
            printed_something = true;
            if card_index == pile.size() {
                // Bottom half of the last card in the pile.
                let card = &pile[card_index - 1];
                let art = if card.is_face_up() { CARD_FRONT } else { CARD_BACK };
                line.push_str(art[draw_index + half_height]);
            } else {
                let card = &pile[card_index];
                if card.is_face_up() {
                    if draw_index == 1 {
                        line.push('|');
                        line.push_str(&card.to_string());
                        line.push('|');
                    } else {
                        line.push_str(CARD_FRONT[draw_index]);
                    }
                } else {
                    line.push_str(CARD_BACK[draw_index]);
                }
            }
            line.push_str(CARD_GAP);
        }
        if !printed_something {
            break;
        }
        writeln!(out, "{line}")?;
        row += 1;
    }

    out.write_all(BORDER.as_bytes())
}
