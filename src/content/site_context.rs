use std::collections::HashMap;

use crate::entities::{site, site_var};
use crate::error::{AppError, AppResult};

/// A site together with all of its variables, loaded once per request.
#[derive(Debug, Clone)]
pub struct SiteContext {
    pub site: site::Model,
    vars: HashMap<String, String>,
}

impl SiteContext {
    pub fn new(site: site::Model, vars: HashMap<String, String>) -> Self {
        Self { site, vars }
    }

    /// Build from stored rows. Two rows with the same name is an integrity
    /// error, never silently resolved.
    pub fn from_rows(site: site::Model, rows: Vec<site_var::Model>) -> AppResult<Self> {
        let mut vars = HashMap::with_capacity(rows.len());
        for row in rows {
            if vars.contains_key(&row.name) {
                return Err(AppError::Integrity { site_id: site.id, name: row.name });
            }
            vars.insert(row.name, row.value);
        }
        Ok(Self::new(site, vars))
    }

    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Stored value for `name`, or `default`, passed through `parse`.
    pub fn get_value<T>(&self, name: &str, default: &str, parse: impl FnOnce(&str) -> T) -> T {
        parse(self.var(name).unwrap_or(default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures;

    fn row(id: i64, name: &str, value: &str) -> site_var::Model {
        site_var::Model { id, site_id: 1, name: name.into(), value: value.into() }
    }

    #[test]
    fn typed_lookup_falls_back_to_default() {
        let ctx = SiteContext::from_rows(fixtures::site(), vec![row(1, "items_per_page", "25")]).unwrap();

        assert_eq!(ctx.get_value("items_per_page", "10", |v| v.parse::<u64>().unwrap()), 25);
        assert_eq!(ctx.get_value("feed_size", "10", |v| v.parse::<u64>().unwrap()), 10);
        assert_eq!(ctx.get_value("analytics_id", "", str::to_string), "");
    }

    #[test]
    fn duplicate_names_are_an_integrity_error() {
        let err = SiteContext::from_rows(
            fixtures::site(),
            vec![row(1, "default_icon", "star"), row(2, "default_icon", "moon")],
        )
        .unwrap_err();

        assert!(matches!(err, AppError::Integrity { site_id: 1, ref name } if name == "default_icon"));
    }
}
