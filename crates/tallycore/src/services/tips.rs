use rand::Rng;

pub const TIPS: [&str; 10] = [
    "Совет 1: Ведите бюджет и следите за своими расходами.",
    "Совет 2: Откладывайте часть доходов на сбережения.",
    "Совет 3: Покупайте товары по скидкам и распродажам.",
    "Совет 4: Избегайте импульсивных покупок – давайте себе время на размышления перед каждой крупной покупкой.",
    "Совет 5: Используйте общественный транспорт или карпул, чтобы сократить расходы на бензин и обслуживание автомобиля.",
    "Совет 6: Планируйте покупки заранее и составляйте список перед походом в магазин, чтобы избежать лишних трат.",
    "Совет 7: Установите себе финансовые цели и откладывайте деньги на конкретные цели, такие как отпуск или крупные покупки.",
    "Совет 8: Используйте программы лояльности и кэшбэк-сервисы для экономии на повседневных расходах.",
    "Совет 9: Экономьте электроэнергию, выключая устройства, которые не используете, и используя энергосберегающие лампы.",
    "Совет 10: Готовьте еду дома – это поможет значительно сэкономить по сравнению с походами в кафе и рестораны.",
];

/// Picks one saving tip uniformly at random
pub fn random_tip() -> &'static str {
    TIPS[rand::thread_rng().gen_range(0..TIPS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_tip_comes_from_list() {
        for _ in 0..50 {
            assert!(TIPS.contains(&random_tip()));
        }
    }
}
