//! Display-language tables for the rendered report.
//!
//! The report ships in two languages that differ only in label text and in
//! whether the technical footer carries a version line. Both are options of
//! one formatter rather than separate code paths.

/// Report display language.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Locale {
    Uk,
    Ru,
}

impl Locale {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "uk" => Some(Self::Uk),
            "ru" => Some(Self::Ru),
            _ => None,
        }
    }

    pub(crate) fn labels(self) -> &'static Labels {
        match self {
            Self::Uk => &UK,
            Self::Ru => &RU,
        }
    }
}

/// Rendering options: display language plus the optional version footer line
/// (historically only the Russian report carried it).
#[derive(Clone, Copy, Debug)]
pub struct ReportStyle {
    pub locale: Locale,
    pub include_version_footer: bool,
}

impl ReportStyle {
    pub fn new(locale: Locale, include_version_footer: bool) -> Self {
        Self {
            locale,
            include_version_footer,
        }
    }

    /// Locale with its historical footer default.
    pub fn for_locale(locale: Locale) -> Self {
        Self {
            locale,
            include_version_footer: locale == Locale::Ru,
        }
    }
}

pub(crate) struct Labels {
    pub title: &'static str,
    pub candidate: &'static str,
    pub telegram: &'static str,
    pub submitted_at: &'static str,
    pub timing_heading: &'static str,
    pub total_view: &'static str,
    pub total_typing: &'static str,
    pub items_count: &'static str,
    pub items_heading: &'static str,
    pub item_time_view: &'static str,
    pub item_time_typing: &'static str,
    pub ads_copy: &'static str,
    pub analysis: &'static str,
    pub materials: &'static str,
    pub landing: &'static str,
    pub video: &'static str,
    pub tech_heading: &'static str,
    pub page: &'static str,
    pub device: &'static str,
    pub version: &'static str,
}

static UK: Labels = Labels {
    title: "📋 НОВИЙ КАНДИДАТ - FB ADS TEST",
    candidate: "👤 Кандидат:",
    telegram: "📱 Telegram:",
    submitted_at: "🕐 Дата проходження:",
    timing_heading: "⏱ Статистика часу:",
    total_view: "Загальний час перегляду:",
    total_typing: "Загальний час набору:",
    items_count: "Кількість товарів:",
    items_heading: "📝 ВІДПОВІДІ ПО ТОВАРАХ:",
    item_time_view: "Час: перегляд",
    item_time_typing: "набір",
    ads_copy: "📢 РЕКЛАМНИЙ ТЕКСТ:",
    analysis: "🔍 АНАЛІЗ ТА РЕКОМЕНДАЦІЇ:",
    materials: "🔗 Матеріали:",
    landing: "Лендінг",
    video: "Відео",
    tech_heading: "💻 Технічні дані:",
    page: "Сторінка:",
    device: "Пристрій:",
    version: "Версія:",
};

static RU: Labels = Labels {
    title: "📋 НОВЫЙ КАНДИДАТ - FB ADS TEST",
    candidate: "👤 Кандидат:",
    telegram: "📱 Telegram:",
    submitted_at: "🕐 Дата прохождения:",
    timing_heading: "⏱ Статистика времени:",
    total_view: "Общее время просмотра:",
    total_typing: "Общее время набора:",
    items_count: "Количество товаров:",
    items_heading: "📝 ОТВЕТЫ ПО ТОВАРАМ:",
    item_time_view: "Время: просмотр",
    item_time_typing: "набор",
    ads_copy: "📢 РЕКЛАМНЫЙ ТЕКСТ:",
    analysis: "🔍 АНАЛИЗ И РЕКОМЕНДАЦИИ:",
    materials: "🔗 Материалы:",
    landing: "Лендинг",
    video: "Видео",
    tech_heading: "💻 Технические данные:",
    page: "Страница:",
    device: "Устройство:",
    version: "Версия:",
};
