//! Routing of one inbound text to exactly one handler
//!
//! A user parked in a flow step always gets that step, whatever the text
//! says. Only idle users have their text matched against commands.

use std::str::FromStr;

use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::conversation::state::StateTag;

/// Command and menu button vocabulary, matched literally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
pub enum MenuCommand {
    #[strum(serialize = "/start")]
    Start,
    #[strum(serialize = "Регистрация в телеграм боте")]
    RegistrationStatus,
    #[strum(serialize = "Курс валют")]
    ExchangeRates,
    #[strum(serialize = "Советы по экономии")]
    SavingTips,
    #[strum(serialize = "Личные финансы")]
    PersonalFinances,
    #[strum(serialize = "Посмотреть расходы")]
    ViewExpenses,
}

impl MenuCommand {
    /// Exact text that triggers this command
    pub fn label(self) -> &'static str {
        self.into()
    }
}

/// Reply keyboard rows
pub const MENU_LAYOUT: [&[MenuCommand]; 3] = [
    &[MenuCommand::RegistrationStatus, MenuCommand::ExchangeRates],
    &[MenuCommand::SavingTips, MenuCommand::PersonalFinances],
    &[MenuCommand::ViewExpenses],
];

/// Handler selected for a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Continue the flow step bound to this tag
    Flow(StateTag),
    Command(MenuCommand),
    /// Idle user, text matches nothing
    Unmatched,
}

/// Selects the handler for `text` given the user's current tag.
pub fn route(tag: StateTag, text: &str) -> Route {
    if !tag.is_idle() {
        return Route::Flow(tag);
    }
    match parse_command(text) {
        Some(command) => Route::Command(command),
        None => Route::Unmatched,
    }
}

/// Literal command match.
///
/// Slash commands also match in their Telegram forms `/start@bot_name`
/// and `/start payload`; button labels must match exactly.
pub fn parse_command(text: &str) -> Option<MenuCommand> {
    if text.starts_with('/') {
        let head = text.split_whitespace().next().unwrap_or(text);
        let name = head.split('@').next().unwrap_or(head);
        return MenuCommand::from_str(name).ok();
    }
    MenuCommand::from_str(text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_label_routes_to_its_command() {
        for command in MenuCommand::iter() {
            assert_eq!(route(StateTag::Idle, command.label()), Route::Command(command));
        }
    }

    #[test]
    fn flow_step_wins_over_menu_labels() {
        for tag in [StateTag::AwaitingCategory1, StateTag::AwaitingExpense3] {
            for command in MenuCommand::iter() {
                assert_eq!(route(tag, command.label()), Route::Flow(tag));
            }
            assert_eq!(route(tag, "anything"), Route::Flow(tag));
        }
    }

    #[test]
    fn start_command_forms() {
        assert_eq!(parse_command("/start"), Some(MenuCommand::Start));
        assert_eq!(parse_command("/start@tally_bot"), Some(MenuCommand::Start));
        assert_eq!(parse_command("/start ref42"), Some(MenuCommand::Start));
        assert_eq!(parse_command("/stop"), None);
        assert_eq!(parse_command("start"), None);
    }

    #[test]
    fn labels_are_not_trimmed_or_case_folded() {
        assert_eq!(parse_command(" Курс валют"), None);
        assert_eq!(parse_command("курс валют"), None);
        assert_eq!(route(StateTag::Idle, "hello"), Route::Unmatched);
    }

    #[test]
    fn layout_covers_every_menu_button_once() {
        let buttons: Vec<MenuCommand> = MENU_LAYOUT.iter().flat_map(|row| row.iter().copied()).collect();
        assert_eq!(buttons.len(), 5);
        for command in MenuCommand::iter().filter(|c| *c != MenuCommand::Start) {
            assert_eq!(buttons.iter().filter(|b| **b == command).count(), 1);
        }
    }
}
