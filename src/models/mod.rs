pub mod casino;
pub mod casino_group;
pub mod common;
pub mod jackpot;
pub mod machine;
pub mod machine_group;
pub mod player;
pub mod transaction;
pub mod user;

pub use casino::*;
pub use casino_group::*;
pub use common::*;
pub use jackpot::*;
pub use machine::*;
pub use machine_group::*;
pub use player::*;
pub use transaction::*;
pub use user::*;
