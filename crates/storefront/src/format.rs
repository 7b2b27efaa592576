//! Display helpers shared by the views

use chrono::{DateTime, Utc};

/// Characters of a description shown on a product card
pub const EXCERPT_LEN: usize = 100;

/// Price in roubles with two decimals, e.g. `₽1299.00`
pub fn price(value: f64) -> String {
    format!("₽{value:.2}")
}

pub fn stock_label(stock: i64) -> String {
    if stock > 0 {
        format!("В наличии: {stock} шт.")
    } else {
        "Нет в наличии".to_string()
    }
}

/// Russian plural of "review" for `count`
pub fn reviews_word(count: u32) -> &'static str {
    let tens = count % 100;
    let units = count % 10;
    if (11..=14).contains(&tens) {
        "отзывов"
    } else if units == 1 {
        "отзыв"
    } else if (2..=4).contains(&units) {
        "отзыва"
    } else {
        "отзывов"
    }
}

/// `(4.5) • 12 отзывов`
pub fn rating_summary(rating: f64, reviews_count: u32) -> String {
    format!("({rating}) • {reviews_count} {}", reviews_word(reviews_count))
}

/// First [`EXCERPT_LEN`] characters of `text`, with `...` when cut
pub fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_LEN) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Review date, e.g. `02 Mar 2024`
pub fn review_date(at: &DateTime<Utc>) -> String {
    at.format("%d %b %Y").to_string()
}

/// Uppercased first letter of a name, used as an avatar
pub fn initial(name: &str) -> Option<String> {
    name.chars().next().map(|c| c.to_uppercase().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_price() {
        assert_eq!(price(1299.0), "₽1299.00");
        assert_eq!(price(0.5), "₽0.50");
    }

    #[test]
    fn test_stock_label() {
        assert_eq!(stock_label(3), "В наличии: 3 шт.");
        assert_eq!(stock_label(0), "Нет в наличии");
    }

    #[test]
    fn test_reviews_word() {
        assert_eq!(reviews_word(0), "отзывов");
        assert_eq!(reviews_word(1), "отзыв");
        assert_eq!(reviews_word(3), "отзыва");
        assert_eq!(reviews_word(5), "отзывов");
        assert_eq!(reviews_word(11), "отзывов");
        assert_eq!(reviews_word(21), "отзыв");
        assert_eq!(reviews_word(114), "отзывов");
        assert_eq!(rating_summary(4.5, 2), "(4.5) • 2 отзыва");
    }

    #[test]
    fn test_excerpt_counts_characters() {
        let short = "Видеокарта";
        assert_eq!(excerpt(short), short);

        let long = "ж".repeat(EXCERPT_LEN + 1);
        let cut = excerpt(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), EXCERPT_LEN + 3);

        let exact = "a".repeat(EXCERPT_LEN);
        assert_eq!(excerpt(&exact), exact);
    }

    #[test]
    fn test_review_date_and_initial() {
        let at = Utc.with_ymd_and_hms(2024, 3, 2, 11, 45, 0).unwrap();
        assert_eq!(review_date(&at), "02 Mar 2024");
        assert_eq!(initial("анна").as_deref(), Some("А"));
        assert_eq!(initial(""), None);
    }
}
