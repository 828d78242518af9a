//! User-facing texts

use crate::services::rates::RateQuote;
use crate::storage::{Slot, UserRecord};

pub const NOT_REGISTERED_HINT: &str =
    "Вы не зарегистрированы. Пожалуйста, введите команду /start, чтобы зарегистрироваться и указать категории.";
pub const INVALID_NUMBER: &str = "Пожалуйста, введите корректное число для расходов!";
pub const FINANCES_NOT_FOUND: &str = "Категории расходов не найдены. Зарегистрируйтесь и введите категории.";
pub const EXPENSES_NOT_FOUND: &str = "Данных о расходах не найдено. Зарегистрируйтесь и введите расходы.";
pub const RATES_UNAVAILABLE: &str = "Не удалось получить данные о курсе валют!";
pub const RATES_FAILED: &str = "Произошла ошибка при получении курса валют!";
pub const STORE_FAILURE: &str = "Не удалось сохранить данные. Попробуйте отправить то же сообщение ещё раз.";
pub const INTERNAL_FAILURE: &str = "Что-то пошло не так. Начните заново из меню.";

/// Renders an amount the way users typed it: whole numbers keep one decimal (`100.0`).
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

pub fn greeting(name: &str) -> String {
    format!(
        "Привет, {}! Я ваш личный финансовый помощник. \nДавайте начнем с того, как назвать категории расходов.",
        name
    )
}

pub fn ask_category(slot: Slot) -> &'static str {
    match slot {
        Slot::First => "Введите название для первой категории:",
        Slot::Second => "Введите название для второй категории:",
        Slot::Third => "Введите название для третьей категории:",
    }
}

pub fn already_registered(name: &str) -> String {
    format!("{}, вы уже зарегистрированы!", name)
}

pub fn categories_saved(record: &UserRecord) -> String {
    let mut text = String::from("Категории сохранены:\n");
    for (slot, category, _) in record.entries() {
        text.push_str(&format!("{}. {}\n", slot.number(), category));
    }
    text.push_str("Теперь вы можете начать вводить расходы. Для этого выберите одну из опций в меню:");
    text
}

pub fn current_expenses(name: &str, record: &UserRecord) -> String {
    let lines: Vec<String> = record
        .entries()
        .map(|(slot, category, total)| {
            format!(
                "{}. {} - текущие расходы: {} руб.",
                slot.number(),
                category,
                format_amount(total)
            )
        })
        .collect();
    format!("{}, вот ваши текущие расходы:\n{}", name, lines.join("\n"))
}

pub fn ask_expense(category: &str) -> String {
    format!("Введите новые расходы для категории {}:", category)
}

/// Confirmation for one step; `next` is the category asked for next, if any.
pub fn expense_added(category: &str, total: f64, next: Option<&str>) -> String {
    let confirmation = format!(
        "Новые расходы для категории {} успешно добавлены! Текущая сумма: {} руб.",
        category,
        format_amount(total)
    );
    match next {
        Some(next) => format!("{}\n{}", confirmation, ask_expense(next)),
        None => confirmation,
    }
}

pub fn totals_summary(name: &str, record: &UserRecord) -> String {
    let lines: Vec<String> = record
        .entries()
        .map(|(slot, category, total)| format!("{}. {} - {} руб.", slot.number(), category, format_amount(total)))
        .collect();
    format!("{}, ваши текущие расходы:\n{}", name, lines.join("\n"))
}

pub fn expenses_report(name: &str, record: &UserRecord) -> String {
    let lines: Vec<String> = record
        .entries()
        .map(|(slot, category, total)| format!("{}. {}: {} руб.", slot.number(), category, format_amount(total)))
        .collect();
    format!("{}, ваши расходы:\n{}", name, lines.join("\n"))
}

pub fn exchange_rates(quote: &RateQuote) -> String {
    format!("1 USD - {:.2} RUB\n1 EUR - {:.2} RUB", quote.usd_rub, quote.eur_rub)
}
