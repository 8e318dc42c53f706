use time::{macros::format_description, OffsetDateTime};
use uuid::Uuid;

pub mod logging;
pub mod persistence;
pub mod serde_ext;
pub mod version;

pub fn generate_id(prefix: &str) -> String {
    let value = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &value[..12])
}

/// Today's UTC date as `YYYY-MM-DD`.
pub fn today_iso() -> String {
    let date = OffsetDateTime::now_utc().date();
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_prefixed_and_unique() {
        let a = generate_id("PAY");
        let b = generate_id("PAY");
        assert!(a.starts_with("PAY-"));
        assert_eq!(a.len(), "PAY-".len() + 12);
        assert_ne!(a, b);
    }

    #[test]
    fn today_is_iso_date() {
        let today = today_iso();
        assert_eq!(today.len(), 10);
        assert_eq!(&today[4..5], "-");
        assert_eq!(&today[7..8], "-");
        assert!(time::Date::parse(&today, format_description!("[year]-[month]-[day]")).is_ok());
    }
}
