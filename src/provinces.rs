//! Static reference dataset of Iran's 31 provinces.
//!
//! Ids match the province features of the boundary dataset the map loads. The data is
//! immutable; the store only ever copies entries out of it.

use crate::models::Province;

/// `(id, Persian name, English name)` for every province.
const PROVINCES: [(u32, &str, &str); 31] = [
    (1, "تهران", "Tehran"),
    (2, "البرز", "Alborz"),
    (3, "اصفهان", "Isfahan"),
    (4, "فارس", "Fars"),
    (5, "خراسان رضوی", "Razavi Khorasan"),
    (6, "آذربایجان شرقی", "East Azerbaijan"),
    (7, "آذربایجان غربی", "West Azerbaijan"),
    (8, "اردبیل", "Ardabil"),
    (9, "بوشهر", "Bushehr"),
    (10, "چهارمحال و بختیاری", "Chaharmahal and Bakhtiari"),
    (11, "خراسان جنوبی", "South Khorasan"),
    (12, "خراسان شمالی", "North Khorasan"),
    (13, "خوزستان", "Khuzestan"),
    (14, "زنجان", "Zanjan"),
    (15, "سمنان", "Semnan"),
    (16, "سیستان و بلوچستان", "Sistan and Baluchestan"),
    (17, "قزوین", "Qazvin"),
    (18, "قم", "Qom"),
    (19, "کردستان", "Kurdistan"),
    (20, "کرمان", "Kerman"),
    (21, "کرمانشاه", "Kermanshah"),
    (22, "کهگیلویه و بویراحمد", "Kohgiluyeh and Boyer-Ahmad"),
    (23, "گلستان", "Golestan"),
    (24, "گیلان", "Gilan"),
    (25, "لرستان", "Lorestan"),
    (26, "مازندران", "Mazandaran"),
    (27, "مرکزی", "Markazi"),
    (28, "هرمزگان", "Hormozgan"),
    (29, "همدان", "Hamadan"),
    (30, "ایلام", "Ilam"),
    (31, "یزد", "Yazd"),
];

fn to_province((id, name_fa, name_en): (u32, &str, &str)) -> Province {
    Province {
        id,
        name_fa: name_fa.to_string(),
        name_en: name_en.to_string(),
    }
}

/// All provinces in dataset order.
#[must_use]
pub fn all() -> Vec<Province> {
    PROVINCES.into_iter().map(to_province).collect()
}

/// Looks a province up by id.
#[must_use]
pub fn find_by_id(id: u32) -> Option<Province> {
    PROVINCES
        .into_iter()
        .find(|(province_id, _, _)| *province_id == id)
        .map(to_province)
}

/// Looks a province up by its Persian or English name.
///
/// Surrounding whitespace is ignored and English names match case-insensitively, so
/// spreadsheet cells like `" tehran "` resolve.
#[must_use]
pub fn find_by_name(name: &str) -> Option<Province> {
    let wanted = name.trim();
    if wanted.is_empty() {
        return None;
    }
    PROVINCES
        .into_iter()
        .find(|(_, name_fa, name_en)| *name_fa == wanted || name_en.eq_ignore_ascii_case(wanted))
        .map(to_province)
}
