use crate::input::KEYPAD;

/// Render the keypad grid, one row per line.
pub fn render_keypad() -> String {
    KEYPAD
        .iter()
        .map(|row| {
            row.iter()
                .map(|key| format!("[{:^3}]", key.value))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypad_rows() {
        let rendered = render_keypad();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), KEYPAD.len());
        assert_eq!(lines[0], "[ C ][ ⌫ ][ % ][ ÷ ]");
        assert_eq!(lines[4], "[ 0 ][ . ][ = ]");
    }
}
