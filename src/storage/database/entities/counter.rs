use sea_orm::entity::prelude::*;

/// Accumulated counter value
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "counter")]
pub struct Model {
    /// Metric name
    #[sea_orm(primary_key, auto_increment = false)]
    pub metric_id: String,

    /// Sum of every applied delta
    pub metric_value: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
