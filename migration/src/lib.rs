pub use sea_orm_migration::prelude::*;

mod m20240902_000001_create_jackpots;
mod m20240905_000001_create_casinos;
mod m20240909_000001_create_machines;
mod m20240912_000001_create_users_and_players;
mod m20240916_000001_create_transactions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240902_000001_create_jackpots::Migration),
            Box::new(m20240905_000001_create_casinos::Migration),
            Box::new(m20240909_000001_create_machines::Migration),
            Box::new(m20240912_000001_create_users_and_players::Migration),
            Box::new(m20240916_000001_create_transactions::Migration),
        ]
    }
}
