//! Localization catalog for the tariff calculator.
//!
//! - One immutable translation table per supported language, selected once.
//! - `format_message` substitutes `{name}` placeholders into a template.

use std::collections::HashMap;

/// Supported interface languages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    Ru,
    En,
    Uz,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
            Language::Uz => "uz",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ru" => Some(Language::Ru),
            "en" => Some(Language::En),
            "uz" => Some(Language::Uz),
            _ => None,
        }
    }

    /// Returns the translation table for this language.
    pub fn messages(self) -> &'static Translations {
        match self {
            Language::Ru => &RU,
            Language::En => &EN,
            Language::Uz => &UZ,
        }
    }
}

/// Complete message set for one language. Templates may contain `{name}`
/// placeholders resolved through [`format_message`].
#[derive(Debug)]
pub struct Translations {
    // Calculator
    pub calculator_title: &'static str,
    pub calculator_description: &'static str,
    pub origin_city: &'static str,
    pub destination_city: &'static str,
    pub tariff_type: &'static str,
    pub weight: &'static str,
    pub calculate: &'static str,
    pub clear: &'static str,

    // Validation
    pub fill_all_fields: &'static str,
    pub select_cities_first: &'static str,
    pub correct_weight: &'static str,

    // Tariff types
    pub office_office: &'static str,
    pub office_door: &'static str,
    pub door_office: &'static str,
    pub door_door: &'static str,
    pub office_postamat: &'static str,
    pub door_postamat: &'static str,

    // Warehouse warnings
    pub warehouse_warning: &'static str,
    pub no_origin_warehouse: &'static str,
    pub no_destination_warehouse: &'static str,
    pub no_warehouses: &'static str,
    pub no_origin_locker: &'static str,
    pub no_destination_locker: &'static str,
    pub no_lockers: &'static str,
    pub no_origin_warehouse_and_destination_locker: &'static str,

    // Results
    pub calculation_results: &'static str,
    pub found_variants: &'static str,
    pub delivery_time: &'static str,
    pub days: &'static str,

    // Request failures
    pub calculation_error: &'static str,
    pub calculation_failed: &'static str,
}

static RU: Translations = Translations {
    calculator_title: "Расчет стоимости доставки",
    calculator_description: "Выберите города, тип тарифа и вес посылки для расчета",
    origin_city: "Город отправления",
    destination_city: "Город назначения",
    tariff_type: "Тип тарифа",
    weight: "Вес (кг)",
    calculate: "Рассчитать стоимость",
    clear: "Очистить",

    fill_all_fields: "Пожалуйста, заполните все поля",
    select_cities_first: "Сначала выберите города отправления и назначения",
    correct_weight: "Пожалуйста, введите корректный вес",

    office_office: "Офис → Офис",
    office_door: "Офис → Дверь",
    door_office: "Дверь → Офис",
    door_door: "Дверь → Дверь",
    office_postamat: "Офис → Постамат",
    door_postamat: "Дверь → Постамат",

    warehouse_warning: "Предупреждение о пункте выдачи",
    no_origin_warehouse: "В городе отправки \"{city}\" нет пункта выдачи Fargo",
    no_destination_warehouse: "В городе доставки \"{city}\" нет пункта выдачи Fargo",
    no_warehouses: "В городах отправки и доставки нет пунктов выдачи Fargo",
    no_origin_locker: "В городе отправки \"{city}\" нет постамата Fargo",
    no_destination_locker: "В городе доставки \"{city}\" нет постамата Fargo",
    no_lockers: "В городах отправки и доставки нет постаматов Fargo",
    no_origin_warehouse_and_destination_locker: "В городе отправки \"{originCity}\" нет пункта выдачи Fargo, а в городе доставки \"{destinationCity}\" нет постамата Fargo",

    calculation_results: "Результаты расчета",
    found_variants: "Найдено {count} вариант(ов) доставки",
    delivery_time: "Время доставки: {time} дн.",
    days: "дн.",

    calculation_error: "Ошибка расчета: {status}",
    calculation_failed: "Произошла ошибка при расчете тарифа",
};

static EN: Translations = Translations {
    calculator_title: "Delivery Cost Calculator",
    calculator_description: "Select cities, tariff type and package weight for calculation",
    origin_city: "Origin City",
    destination_city: "Destination City",
    tariff_type: "Tariff Type",
    weight: "Weight (kg)",
    calculate: "Calculate Cost",
    clear: "Clear",

    fill_all_fields: "Please fill in all fields",
    select_cities_first: "Please select origin and destination cities first",
    correct_weight: "Please enter a valid weight",

    office_office: "Office → Office",
    office_door: "Office → Door",
    door_office: "Door → Office",
    door_door: "Door → Door",
    office_postamat: "Office → Locker",
    door_postamat: "Door → Locker",

    warehouse_warning: "Pickup Point Warning",
    no_origin_warehouse: "No Fargo pickup point in origin city \"{city}\"",
    no_destination_warehouse: "No Fargo pickup point in destination city \"{city}\"",
    no_warehouses: "No Fargo pickup points in origin and destination cities",
    no_origin_locker: "No Fargo locker in origin city \"{city}\"",
    no_destination_locker: "No Fargo locker in destination city \"{city}\"",
    no_lockers: "No Fargo lockers in origin and destination cities",
    no_origin_warehouse_and_destination_locker: "No Fargo pickup point in origin city \"{originCity}\" and no locker in destination city \"{destinationCity}\"",

    calculation_results: "Calculation Results",
    found_variants: "Found {count} delivery option(s)",
    delivery_time: "Delivery time: {time} days",
    days: "days",

    calculation_error: "Calculation error: {status}",
    calculation_failed: "An error occurred while calculating the tariff",
};

static UZ: Translations = Translations {
    calculator_title: "Yetkazib berish narxini hisoblash",
    calculator_description: "Hisoblash uchun shaharlar, tarif turi va jo'natma og'irligini tanlang",
    origin_city: "Jo'natish shahri",
    destination_city: "Yetkazish shahri",
    tariff_type: "Tarif turi",
    weight: "Og'irligi (kg)",
    calculate: "Narxni hisoblash",
    clear: "Tozalash",

    fill_all_fields: "Iltimos, barcha maydonlarni to'ldiring",
    select_cities_first: "Avval jo'natish va yetkazish shaharlarini tanlang",
    correct_weight: "Iltimos, to'g'ri og'irlikni kiriting",

    office_office: "Ofis → Ofis",
    office_door: "Ofis → Eshik",
    door_office: "Eshik → Ofis",
    door_door: "Eshik → Eshik",
    office_postamat: "Ofis → Postamat",
    door_postamat: "Eshik → Postamat",

    warehouse_warning: "Yetkazib berish punkti haqida ogohlantirish",
    no_origin_warehouse: "Jo'natish shahri \"{city}\"da Fargo yetkazib berish punkti yo'q",
    no_destination_warehouse: "Yetkazish shahri \"{city}\"da Fargo yetkazib berish punkti yo'q",
    no_warehouses: "Jo'natish va yetkazish shaharlarida Fargo yetkazib berish punktlari yo'q",
    no_origin_locker: "Jo'natish shahri \"{city}\"da Fargo postamati yo'q",
    no_destination_locker: "Yetkazish shahri \"{city}\"da Fargo postamati yo'q",
    no_lockers: "Jo'natish va yetkazish shaharlarida Fargo postamatlar yo'q",
    no_origin_warehouse_and_destination_locker: "Jo'natish shahri \"{originCity}\"da Fargo yetkazib berish punkti yo'q va yetkazish shahri \"{destinationCity}\"da postamat yo'q",

    calculation_results: "Hisoblash natijalari",
    found_variants: "{count} ta yetkazib berish variantlari topildi",
    delivery_time: "Yetkazib berish vaqti: {time} kun",
    days: "kun",

    calculation_error: "Hisoblash xatosi: {status}",
    calculation_failed: "Tarifni hisoblashda xatolik yuz berdi",
};

/// Substitutes `{name}` placeholders in `template` with values from `params`.
///
/// Placeholders without a matching parameter are left untouched, so a missing
/// value degrades to a visible token instead of corrupting the message.
/// Malformed tokens (`{}`, unterminated `{`, non-word characters) are copied
/// through verbatim.
pub fn format_message(template: &str, params: &HashMap<&str, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after.find('}');
        match end {
            Some(end)
                if end > 0
                    && after[..end]
                        .chars()
                        .all(|c| c.is_alphanumeric() || c == '_') =>
            {
                let name = &after[..end];
                match params.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
