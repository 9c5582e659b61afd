//! Small helpers for consistent terminal output.

use cardroom_engine::cards::Card;
use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Space-separated card list, `-` when empty.
pub fn format_cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "-".to_string();
    }
    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardroom_engine::cards::parse_cards;

    #[test]
    fn formats_card_lists() {
        assert_eq!(format_cards(&[]), "-");
        let cards = parse_cards("As 10h").unwrap();
        assert_eq!(format_cards(&cards), "A♠ 10♥");
    }

    #[test]
    fn prefixes_messages() {
        let mut buf = Vec::new();
        write_error(&mut buf, "boom").unwrap();
        display_warning(&mut buf, "careful").unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Error: boom\nWARNING: careful\n");
    }
}
