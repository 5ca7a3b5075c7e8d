//! On-screen Mansi character picker
//!
//! Letters a standard Russian layout lacks (ӈ, ӑ, ӗ, ...) are offered as keys that
//! append to the input text.

use crate::shared::types::{Direction, Language};

pub const MANSI_KEYS: &[char] = &[
    'а', 'в', 'г', 'д', 'е', 'ё', 'ж', 'з', 'и', 'й', 'к', 'л', 'м', 'н', 'о',
    'п', 'р', 'с', 'т', 'у', 'ф', 'х', 'ц', 'ч', 'ш', 'щ', 'ъ', 'ы', 'ь', 'э',
    'ю', 'я', 'ӈ', 'ӑ', 'ӗ', 'ӱ', 'ҥ', 'ӟ',
];

/// The picker is offered only while the user is typing Mansi.
pub fn picker_visible(direction: Direction) -> bool {
    direction.source() == Language::Mansi
}

pub fn key_at(index: usize) -> Option<char> {
    MANSI_KEYS.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_set() {
        assert_eq!(MANSI_KEYS.len(), 38);
        assert_eq!(key_at(0), Some('а'));
        assert_eq!(key_at(32), Some('ӈ'));
        assert_eq!(key_at(37), Some('ӟ'));
        assert_eq!(key_at(38), None);
    }

    #[test]
    fn test_picker_only_for_mansi_input() {
        assert!(!picker_visible(Direction::RussianToMansi));
        assert!(picker_visible(Direction::MansiToRussian));
    }
}
