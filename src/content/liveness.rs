use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Select};

use crate::entities::{article, home_page, page, section, status::ContentStatus};

/// Content tables that carry the liveness columns.
pub trait OpenGraphEntity: EntityTrait {
    fn site_column() -> Self::Column;
    fn status_column() -> Self::Column;
    fn published_time_column() -> Self::Column;
    fn expiration_time_column() -> Self::Column;
}

macro_rules! open_graph_entity {
    ($($model:ident),+ $(,)?) => {$(
        impl OpenGraphEntity for $model::Entity {
            fn site_column() -> Self::Column {
                $model::Column::SiteId
            }
            fn status_column() -> Self::Column {
                $model::Column::Status
            }
            fn published_time_column() -> Self::Column {
                $model::Column::PublishedTime
            }
            fn expiration_time_column() -> Self::Column {
                $model::Column::ExpirationTime
            }
        }
    )+};
}

open_graph_entity!(section, page, home_page, article);

/// SQL form of `ContentBase::is_live`.
pub fn live_condition<E: OpenGraphEntity>(now: DateTime<Utc>) -> Condition {
    Condition::all()
        .add(E::status_column().eq(ContentStatus::Usable))
        .add(E::published_time_column().lte(now))
        .add(
            Condition::any()
                .add(E::expiration_time_column().is_null())
                .add(E::expiration_time_column().gt(now)),
        )
}

/// Live items of one site, newest first. Stays a plain `Select` so callers
/// can add filters and paginate.
pub fn live<E: OpenGraphEntity>(site_id: i64, now: DateTime<Utc>) -> Select<E> {
    E::find()
        .filter(E::site_column().eq(site_id))
        .filter(live_condition::<E>(now))
        .order_by_desc(E::published_time_column())
}
