use std::env;
use sea_orm::DatabaseConnection;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    /// Site used when the request host matches no registered domain.
    pub default_site_id: i64,
    pub default_site_domain: String,
    pub default_site_name: String,
    pub pagebreak_separator: String,
    pub default_locale: String,
    pub page_size: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
}

pub const DEFAULT_PAGEBREAK_SEPARATOR: &str = "<!-- pagebreak -->";

impl Config {
    pub fn init() -> Config {
        let server_host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .expect("PORT must be a number");

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let default_site_id = env::var("DEFAULT_SITE_ID")
            .unwrap_or_else(|_| "1".to_string())
            .parse::<i64>()
            .expect("DEFAULT_SITE_ID must be a number");
        let default_site_domain = env::var("DEFAULT_SITE_DOMAIN").unwrap_or_else(|_| "example.com".to_string());
        let default_site_name = env::var("DEFAULT_SITE_NAME").unwrap_or_else(|_| default_site_domain.clone());

        let pagebreak_separator = env::var("PAGEBREAK_SEPARATOR")
            .unwrap_or_else(|_| DEFAULT_PAGEBREAK_SEPARATOR.to_string());
        let default_locale = env::var("DEFAULT_LOCALE")
            .map(|code| to_locale(&code))
            .unwrap_or_else(|_| "en_US".to_string());
        let page_size = env::var("PAGE_SIZE")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .expect("PAGE_SIZE must be a number");

        Config {
            server_host,
            server_port,
            database_url,
            default_site_id,
            default_site_domain,
            default_site_name,
            pagebreak_separator,
            default_locale,
            page_size,
        }
    }
}

/// Turn a language code such as `en-us` into a locale name such as `en_US`.
pub fn to_locale(language: &str) -> String {
    match language.split_once('-') {
        Some((lang, country)) => {
            let country = if country.len() > 2 {
                // sr-latn style script subtags keep their title case
                let mut chars = country.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
                    None => String::new(),
                }
            } else {
                country.to_ascii_uppercase()
            };
            format!("{}_{}", lang.to_ascii_lowercase(), country)
        }
        None => language.to_ascii_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_language_codes_to_locales() {
        assert_eq!(to_locale("en-us"), "en_US");
        assert_eq!(to_locale("pt-BR"), "pt_BR");
        assert_eq!(to_locale("sr-latn"), "sr_Latn");
        assert_eq!(to_locale("de"), "de");
    }
}
