pub mod casino;
pub mod casino_group;
pub mod floor;
pub mod jackpot;
pub mod machine;
pub mod machine_group;
pub mod player;
pub mod transaction;
pub mod user;

pub use casino::casino_config;
pub use casino_group::casino_group_config;
pub use floor::floor_config;
pub use jackpot::jackpot_config;
pub use machine::machine_config;
pub use machine_group::machine_group_config;
pub use player::player_config;
pub use transaction::transaction_config;
pub use user::user_config;
