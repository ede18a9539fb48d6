use sea_orm_migration::prelude::*;

/// Casinos (赌场)
#[derive(DeriveIden)]
enum Casinos {
    Table,
    Id,
    Location,
    Country,
    City,
    Status,
    CreatedAt,
    UpdatedAt,
}

/// Casino groups (赌场分组)
#[derive(DeriveIden)]
enum CasinoGroups {
    Table,
    Id,
    CasinoIds,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Casinos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Casinos::Id)
                            .string_len(128)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Casinos::Location).string_len(255).not_null())
                    .col(ColumnDef::new(Casinos::Country).string_len(128).not_null())
                    .col(ColumnDef::new(Casinos::City).string_len(128).not_null())
                    .col(
                        ColumnDef::new(Casinos::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Casinos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Casinos::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CasinoGroups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CasinoGroups::Id)
                            .string_len(128)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CasinoGroups::CasinoIds)
                            .array(ColumnType::Text)
                            .not_null()
                            .default(Expr::cust("'{}'")),
                    )
                    .col(
                        ColumnDef::new(CasinoGroups::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(CasinoGroups::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(CasinoGroups::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(CasinoGroups::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Casinos::Table).to_owned())
            .await?;

        Ok(())
    }
}
