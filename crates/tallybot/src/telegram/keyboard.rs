use teloxide::types::{KeyboardButton, KeyboardMarkup};

use tallycore::MENU_LAYOUT;

/// Persistent reply keyboard with the main menu buttons
pub fn main_menu() -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = MENU_LAYOUT
        .iter()
        .map(|row| row.iter().map(|command| KeyboardButton::new(command.label())).collect())
        .collect();

    KeyboardMarkup::new(rows).resize_keyboard()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tallycore::MenuCommand;

    #[test]
    fn test_main_menu_rows() {
        let keyboard = main_menu();
        let texts: Vec<Vec<&str>> = keyboard
            .keyboard
            .iter()
            .map(|row| row.iter().map(|button| button.text.as_str()).collect())
            .collect();

        assert_eq!(
            texts,
            vec![
                vec![MenuCommand::RegistrationStatus.label(), MenuCommand::ExchangeRates.label()],
                vec![MenuCommand::SavingTips.label(), MenuCommand::PersonalFinances.label()],
                vec![MenuCommand::ViewExpenses.label()],
            ]
        );
        assert!(keyboard.resize_keyboard);
    }
}
