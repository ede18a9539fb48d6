use sea_orm_migration::prelude::*;

/// Jackpots (奖池)
#[derive(DeriveIden)]
enum Jackpots {
    Table,
    Id,
    Name,
    AmountCents,
    MaxAmountCents,
    Active,
    Contributions,
    AllowedLevels,
    CasinoId,
    MachineId,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 金额统一使用美分 (bigint) 保存，避免浮点误差
/// version 用于乐观锁: 每次写入 +1，写入时按 id + version 条件更新
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Jackpots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Jackpots::Id)
                            .string_len(128)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Jackpots::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Jackpots::AmountCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Jackpots::MaxAmountCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Jackpots::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Jackpots::Contributions)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Jackpots::AllowedLevels)
                            .array(ColumnType::Integer)
                            .not_null()
                            .default(Expr::cust("'{}'")),
                    )
                    .col(ColumnDef::new(Jackpots::CasinoId).string_len(128).null())
                    .col(ColumnDef::new(Jackpots::MachineId).string_len(128).null())
                    .col(
                        ColumnDef::new(Jackpots::Version)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Jackpots::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Jackpots::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 奖池名称唯一（按名称进行 spin）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_jackpots_name_unique")
                    .table(Jackpots::Table)
                    .col(Jackpots::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_jackpots_active")
                    .table(Jackpots::Table)
                    .col(Jackpots::Active)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Jackpots::Table).to_owned())
            .await?;
        Ok(())
    }
}
