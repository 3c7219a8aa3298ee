//! Copyright notice resolution.
//!
//! Notice templates are trusted rich text written by site administrators. A
//! pair of braces `{}` marks where the year goes; `{{` and `}}` are literal
//! braces.

use chrono::{DateTime, Datelike, Utc};

use super::{site_context::SiteContext, ContentBase};
use crate::utils::html_utils::escape_html;

/// Substitute `year` into the first `{}` of `template`.
pub fn format_notice(template: &str, year: i32) -> String {
    let mut out = String::with_capacity(template.len() + 4);
    let mut substituted = false;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('{', Some('{')) | ('}', Some('}')) => {
                chars.next();
                out.push(c);
            }
            ('{', Some('}')) if !substituted => {
                chars.next();
                out.push_str(&year.to_string());
                substituted = true;
            }
            _ => out.push(c),
        }
    }
    out
}

/// Item notice, then the site's `copyright_notice`, then a generated notice
/// naming `copyright_holder` (or the site name).
pub fn content_notice(base: &ContentBase<'_>, ctx: &SiteContext, now: DateTime<Utc>) -> String {
    let year = base.copyright_year(now);

    if !base.custom_copyright_notice.is_empty() {
        return format_notice(base.custom_copyright_notice, year);
    }
    if let Some(notice) = ctx.var("copyright_notice").filter(|n| !n.is_empty()) {
        return format_notice(notice, year);
    }
    let holder = ctx.get_value("copyright_holder", &ctx.site.name, escape_html);
    format!("© Copyright {} {}. All rights reserved.", year, holder)
}

/// Year for a media asset: its own date, else when it was uploaded, else now.
pub fn media_copyright_year(
    own_date: Option<DateTime<Utc>>,
    uploaded_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> i32 {
    own_date.or(uploaded_at).unwrap_or(now).year()
}

/// Media assets have no site-level fallback: custom notice or nothing.
pub fn media_notice(custom_notice: &str, year: i32) -> String {
    if custom_notice.is_empty() {
        String::new()
    } else {
        format_notice(custom_notice, year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{fixtures, LiveContent};
    use chrono::TimeZone;
    use std::collections::HashMap;

    fn ctx(vars: &[(&str, &str)]) -> SiteContext {
        SiteContext::new(
            fixtures::site(),
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn formats_year_at_braces() {
        assert_eq!(format_notice("<b>© {} ACME</b>", 2021), "<b>© 2021 ACME</b>");
        assert_eq!(format_notice("{{literal}} {}", 1999), "{literal} 1999");
        assert_eq!(format_notice("no placeholder", 2020), "no placeholder");
        assert_eq!(format_notice("{} and {}", 2020), "2020 and {}");
    }

    #[test]
    fn notice_precedence() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let published = Utc.with_ymd_and_hms(2019, 5, 4, 0, 0, 0).unwrap();
        let mut article = fixtures::article("a", Some(published));

        // generated, holder from site name
        assert_eq!(
            article.content_base().copyright_year(now),
            2019
        );
        let item = crate::content::SectionedArticle { article: article.clone(), section: fixtures::section("news") };
        assert_eq!(item.copyright_notice(&ctx(&[]), now), "© Copyright 2019 Example. All rights reserved.");

        // generated, explicit holder
        assert_eq!(
            item.copyright_notice(&ctx(&[("copyright_holder", "Jane & Co")]), now),
            "© Copyright 2019 Jane &amp; Co. All rights reserved."
        );

        // site template beats generated
        let site_ctx = ctx(&[("copyright_notice", "Site {}"), ("copyright_holder", "Ignored")]);
        assert_eq!(item.copyright_notice(&site_ctx, now), "Site 2019");

        // item template beats site template
        article.custom_copyright_notice = "Item {}".into();
        let item = crate::content::SectionedArticle { article, section: fixtures::section("news") };
        assert_eq!(item.copyright_notice(&site_ctx, now), "Item 2019");
    }

    #[test]
    fn unpublished_items_use_current_year() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let section = fixtures::section("news");
        assert_eq!(section.copyright_notice(&ctx(&[]), now), "© Copyright 2024 Example. All rights reserved.");
    }

    #[test]
    fn media_notice_has_no_site_fallback() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let taken = Utc.with_ymd_and_hms(2011, 1, 1, 0, 0, 0).unwrap();
        let uploaded = Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(media_copyright_year(Some(taken), Some(uploaded), now), 2011);
        assert_eq!(media_copyright_year(None, Some(uploaded), now), 2015);
        assert_eq!(media_copyright_year(None, None, now), 2024);

        assert_eq!(media_notice("", 2011), "");
        assert_eq!(media_notice("Photo © {}", 2011), "Photo © 2011");
    }
}
