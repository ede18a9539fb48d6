pub mod casino_groups;
pub mod casinos;
pub mod jackpots;
pub mod machine_groups;
pub mod machines;
pub mod players;
pub mod status;
pub mod transactions;
pub mod users;

pub use casino_groups as casino_group_entity;
pub use casinos as casino_entity;
pub use jackpots as jackpot_entity;
pub use machine_groups as machine_group_entity;
pub use machines as machine_entity;
pub use players as player_entity;
pub use status::EntityStatus;
pub use transactions as transaction_entity;
pub use users as user_entity;
