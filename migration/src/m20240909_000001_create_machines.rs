use sea_orm_migration::prelude::*;

/// Gaming machines (机台)
#[derive(DeriveIden)]
enum Machines {
    Table,
    Id,
    FriendlyId,
    CasinoId,
    AreaId,
    InstallDate,
    ManufacturerId,
    BaseAccounting,
    SerialNumber,
    Status,
    CreatedAt,
    UpdatedAt,
}

/// Machine groups (机台分组)
#[derive(DeriveIden)]
enum MachineGroups {
    Table,
    Id,
    MachineIds,
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
                    .table(Machines::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Machines::Id)
                            .string_len(128)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Machines::FriendlyId)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Machines::CasinoId).string_len(128).not_null())
                    .col(ColumnDef::new(Machines::AreaId).string_len(128).not_null())
                    .col(ColumnDef::new(Machines::InstallDate).date().not_null())
                    .col(
                        ColumnDef::new(Machines::ManufacturerId)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Machines::BaseAccounting)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Machines::SerialNumber)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Machines::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Machines::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Machines::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 按赌场查询机台
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_machines_casino")
                    .table(Machines::Table)
                    .col(Machines::CasinoId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MachineGroups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MachineGroups::Id)
                            .string_len(128)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MachineGroups::MachineIds)
                            .array(ColumnType::Text)
                            .not_null()
                            .default(Expr::cust("'{}'")),
                    )
                    .col(
                        ColumnDef::new(MachineGroups::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(MachineGroups::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(MachineGroups::UpdatedAt)
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
                    .table(MachineGroups::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Machines::Table).to_owned())
            .await?;

        Ok(())
    }
}
