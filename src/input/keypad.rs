//! The on-screen keypad layout.

use super::{Action, KeyKind};

/// One keypad button: the value it carries and its role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VirtualKey {
    pub value: &'static str,
    pub kind: KeyKind,
}

impl VirtualKey {
    const fn new(value: &'static str, kind: KeyKind) -> Self {
        Self { value, kind }
    }

    pub fn action(&self) -> Option<Action> {
        Action::from_virtual(self.value, self.kind)
    }
}

/// Keypad rows, top to bottom.
pub const KEYPAD: &[&[VirtualKey]] = &[
    &[
        VirtualKey::new("C", KeyKind::Util),
        VirtualKey::new("⌫", KeyKind::Util),
        VirtualKey::new("%", KeyKind::Op),
        VirtualKey::new("÷", KeyKind::Op),
    ],
    &[
        VirtualKey::new("7", KeyKind::Num),
        VirtualKey::new("8", KeyKind::Num),
        VirtualKey::new("9", KeyKind::Num),
        VirtualKey::new("×", KeyKind::Op),
    ],
    &[
        VirtualKey::new("4", KeyKind::Num),
        VirtualKey::new("5", KeyKind::Num),
        VirtualKey::new("6", KeyKind::Num),
        VirtualKey::new("−", KeyKind::Op),
    ],
    &[
        VirtualKey::new("1", KeyKind::Num),
        VirtualKey::new("2", KeyKind::Num),
        VirtualKey::new("3", KeyKind::Num),
        VirtualKey::new("+", KeyKind::Op),
    ],
    &[
        VirtualKey::new("0", KeyKind::Num),
        VirtualKey::new(".", KeyKind::Num),
        VirtualKey::new("=", KeyKind::Eq),
    ],
];

/// Find the keypad key carrying `value`.
pub fn find_key(value: &str) -> Option<VirtualKey> {
    KEYPAD
        .iter()
        .flat_map(|row| row.iter())
        .find(|key| key.value == value)
        .copied()
}
