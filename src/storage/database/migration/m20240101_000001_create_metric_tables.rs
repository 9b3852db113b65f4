use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Counter::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Counter::MetricId)
                            .string_len(255)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Counter::MetricValue).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Gauge::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Gauge::MetricId)
                            .string_len(255)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Gauge::MetricValue).double().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Gauge::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Counter::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Counter {
    Table,
    MetricId,
    MetricValue,
}

#[derive(DeriveIden)]
enum Gauge {
    Table,
    MetricId,
    MetricValue,
}
