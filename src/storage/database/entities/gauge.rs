use sea_orm::entity::prelude::*;

/// Last reported gauge value
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "gauge")]
pub struct Model {
    /// Metric name
    #[sea_orm(primary_key, auto_increment = false)]
    pub metric_id: String,

    pub metric_value: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
