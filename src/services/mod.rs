pub mod casino_group_service;
pub mod casino_service;
pub mod jackpot_directory;
pub mod jackpot_service;
pub mod machine_group_service;
pub mod machine_service;
pub mod player_service;
pub mod transaction_service;
pub mod user_service;

pub use casino_group_service::*;
pub use casino_service::CasinoService;
pub use jackpot_directory::*;
pub use jackpot_service::*;
pub use machine_group_service::*;
pub use machine_service::*;
pub use player_service::*;
pub use transaction_service::*;
pub use user_service::*;
