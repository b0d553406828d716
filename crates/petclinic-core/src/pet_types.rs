//! Fixed list of pet type labels offered by the pet forms.

/// The pet type catalogue. Types are plain labels; nothing is persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct PetTypes;

const ALL: [&str; 5] = ["Cat", "Dog", "Bird", "Horse", "Rabbit"];

impl PetTypes {
    /// Every known pet type, in display order.
    pub const fn find_all() -> &'static [&'static str] {
        &ALL
    }

    /// Whether `label` is one of [`find_all`](Self::find_all), exactly.
    pub fn contains(label: &str) -> bool {
        ALL.contains(&label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_types_in_display_order() {
        assert_eq!(PetTypes::find_all(), ["Cat", "Dog", "Bird", "Horse", "Rabbit"]);
    }

    #[test]
    fn contains_is_exact() {
        assert!(PetTypes::contains("Dog"));
        assert!(!PetTypes::contains("dog"));
        assert!(!PetTypes::contains("Snake"));
    }
}
