//! Keyboard modifier state.
//!
//! [`ModifierFlags`] is the live bitset of modifiers a decoder tracks.
//! [`Modifier`] names a single modifier key and carries the one rule that
//! distinguishes them: whether the modifier is **latched** (toggled by each
//! press, like Caps Lock) or **momentary** (held only while the key is down).

use bitflags::bitflags;

use super::key::Key;

bitflags! {
    /// Set of currently held (or latched) modifier keys.
    ///
    /// The empty set is the initial state of every decoder.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u8 {
        const LEFT_SHIFT = 1 << 0;
        const RIGHT_SHIFT = 1 << 1;
        const LEFT_ALT = 1 << 2;
        const RIGHT_ALT = 1 << 3;
        const CAPS_LOCK = 1 << 4;
    }
}

impl ModifierFlags {
    /// No modifiers held.
    pub const NONE: Self = Self::empty();

    /// Returns `true` if either Shift modifier is held.
    pub fn is_shift(&self) -> bool {
        self.intersects(Self::LEFT_SHIFT | Self::RIGHT_SHIFT)
    }

    /// Returns `true` if either Alt modifier is held.
    pub fn is_alt(&self) -> bool {
        self.intersects(Self::LEFT_ALT | Self::RIGHT_ALT)
    }

    /// Returns `true` if Caps Lock is toggled on.
    pub fn is_caps_lock(&self) -> bool {
        self.contains(Self::CAPS_LOCK)
    }

    /// Applies a press of `modifier`.
    ///
    /// Latched modifiers flip their bit; momentary modifiers set it.
    pub fn press(&mut self, modifier: Modifier) {
        if modifier.is_latched() {
            self.toggle(modifier.flag());
        } else {
            self.insert(modifier.flag());
        }
    }

    /// Applies a release of `modifier`.
    ///
    /// Momentary modifiers clear their bit.  A latched modifier ignores its
    /// release: its state only changes on the next press.
    pub fn release(&mut self, modifier: Modifier) {
        if !modifier.is_latched() {
            self.remove(modifier.flag());
        }
    }
}

/// A single tracked modifier key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    LeftShift,
    RightShift,
    LeftAlt,
    RightAlt,
    CapsLock,
}

impl Modifier {
    /// Returns the modifier a key controls, or `None` for ordinary keys.
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::LeftShift => Some(Modifier::LeftShift),
            Key::RightShift => Some(Modifier::RightShift),
            Key::LeftAlt => Some(Modifier::LeftAlt),
            Key::RightAlt => Some(Modifier::RightAlt),
            Key::CapsLock => Some(Modifier::CapsLock),
            _ => None,
        }
    }

    /// Returns the bit this modifier occupies in [`ModifierFlags`].
    pub fn flag(self) -> ModifierFlags {
        match self {
            Modifier::LeftShift => ModifierFlags::LEFT_SHIFT,
            Modifier::RightShift => ModifierFlags::RIGHT_SHIFT,
            Modifier::LeftAlt => ModifierFlags::LEFT_ALT,
            Modifier::RightAlt => ModifierFlags::RIGHT_ALT,
            Modifier::CapsLock => ModifierFlags::CAPS_LOCK,
        }
    }

    /// Returns `true` if each press toggles this modifier rather than holding it.
    pub fn is_latched(self) -> bool {
        matches!(self, Modifier::CapsLock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_MODIFIERS: [Modifier; 5] = [
        Modifier::LeftShift,
        Modifier::RightShift,
        Modifier::LeftAlt,
        Modifier::RightAlt,
        Modifier::CapsLock,
    ];

    #[test]
    fn test_default_is_none() {
        assert_eq!(ModifierFlags::default(), ModifierFlags::NONE);
        assert!(ModifierFlags::NONE.is_empty());
    }

    #[test]
    fn test_predicates_cover_both_sides() {
        assert!(ModifierFlags::LEFT_SHIFT.is_shift());
        assert!(ModifierFlags::RIGHT_SHIFT.is_shift());
        assert!(ModifierFlags::LEFT_ALT.is_alt());
        assert!(ModifierFlags::RIGHT_ALT.is_alt());
        assert!(ModifierFlags::CAPS_LOCK.is_caps_lock());

        assert!(!ModifierFlags::CAPS_LOCK.is_shift());
        assert!(!ModifierFlags::LEFT_SHIFT.is_alt());
        assert!(!ModifierFlags::RIGHT_ALT.is_caps_lock());
    }

    #[test]
    fn test_only_caps_lock_is_latched() {
        for modifier in ALL_MODIFIERS {
            assert_eq!(modifier.is_latched(), modifier == Modifier::CapsLock, "{modifier:?}");
        }
    }

    #[test]
    fn test_from_key_recognizes_only_modifier_keys() {
        assert_eq!(Modifier::from_key(Key::LeftShift), Some(Modifier::LeftShift));
        assert_eq!(Modifier::from_key(Key::RightShift), Some(Modifier::RightShift));
        assert_eq!(Modifier::from_key(Key::LeftAlt), Some(Modifier::LeftAlt));
        assert_eq!(Modifier::from_key(Key::RightAlt), Some(Modifier::RightAlt));
        assert_eq!(Modifier::from_key(Key::CapsLock), Some(Modifier::CapsLock));
        assert_eq!(Modifier::from_key(Key::Enter), None);
        assert_eq!(Modifier::from_key(Key::LowerA), None);
    }

    #[test]
    fn test_flags_are_distinct_single_bits() {
        let mut union = ModifierFlags::NONE;
        for modifier in ALL_MODIFIERS {
            let flag = modifier.flag();
            assert_eq!(flag.bits().count_ones(), 1);
            assert!(!union.intersects(flag), "{modifier:?} overlaps another modifier");
            union |= flag;
        }
        assert_eq!(union, ModifierFlags::all());
    }

    #[test]
    fn test_caps_lock_press_twice_is_involution_from_every_state() {
        for bits in 0..=ModifierFlags::all().bits() {
            // Arrange
            let original = ModifierFlags::from_bits_truncate(bits);
            let mut flags = original;

            // Act
            flags.press(Modifier::CapsLock);
            flags.press(Modifier::CapsLock);

            // Assert
            assert_eq!(flags, original);
        }
    }

    #[test]
    fn test_momentary_press_then_release_restores_previous_state() {
        for modifier in ALL_MODIFIERS.into_iter().filter(|m| !m.is_latched()) {
            for bits in 0..=ModifierFlags::all().bits() {
                let original = ModifierFlags::from_bits_truncate(bits);
                if original.contains(modifier.flag()) {
                    continue;
                }
                let mut flags = original;

                flags.press(modifier);
                assert!(flags.contains(modifier.flag()));
                flags.release(modifier);

                assert_eq!(flags, original, "{modifier:?} from {original:?}");
            }
        }
    }

    #[test]
    fn test_caps_lock_release_is_ignored() {
        // Arrange
        let mut flags = ModifierFlags::CAPS_LOCK | ModifierFlags::LEFT_SHIFT;

        // Act
        flags.release(Modifier::CapsLock);

        // Assert
        assert_eq!(flags, ModifierFlags::CAPS_LOCK | ModifierFlags::LEFT_SHIFT);
    }

    #[test]
    fn test_releasing_one_shift_keeps_the_other() {
        let mut flags = ModifierFlags::LEFT_SHIFT | ModifierFlags::RIGHT_SHIFT;
        flags.release(Modifier::LeftShift);
        assert!(flags.is_shift());
        assert_eq!(flags, ModifierFlags::RIGHT_SHIFT);
    }
}
