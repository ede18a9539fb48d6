use sea_orm_migration::prelude::*;

/// Transactions (交易流水)
#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    TransactionType,
    AmountCents,
    PlayerId,
    MachineId,
    JackpotId,
    Details,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Transactions::TransactionType)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::AmountCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Transactions::PlayerId).string_len(128).null())
                    .col(ColumnDef::new(Transactions::MachineId).string_len(128).null())
                    .col(ColumnDef::new(Transactions::JackpotId).string_len(128).null())
                    .col(ColumnDef::new(Transactions::Details).json_binary().null())
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 列表按时间倒序
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_transactions_created_at")
                    .table(Transactions::Table)
                    .col(Transactions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_transactions_player")
                    .table(Transactions::Table)
                    .col(Transactions::PlayerId)
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
                    .table(Transactions::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
