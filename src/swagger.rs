use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::engine::SpinOutcome;
use crate::entities::EntityStatus;
use crate::events::JackpotWonEvent;
use crate::handlers;
use crate::models::*;
use crate::utils::PageInfo;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi
            .components
            .get_or_insert_with(Default::default)
            .add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::floor::spin,
        handlers::floor::active_jackpots,
        handlers::floor::jackpot_amount,
        handlers::floor::events,
        handlers::jackpot::create_jackpot,
        handlers::jackpot::list_jackpots,
        handlers::jackpot::count_jackpots,
        handlers::jackpot::get_jackpot,
        handlers::jackpot::update_jackpot,
        handlers::jackpot::set_amount,
        handlers::jackpot::set_trigger,
        handlers::jackpot::set_levels,
        handlers::jackpot::activate_jackpot,
        handlers::jackpot::deactivate_jackpot,
        handlers::jackpot::reset_jackpot,
        handlers::casino::create_casino,
        handlers::casino::list_casinos,
        handlers::casino::update_casino,
        handlers::casino::activate_casino,
        handlers::casino::deactivate_casino,
        handlers::casino_group::create_casino_group,
        handlers::casino_group::list_casino_groups,
        handlers::casino_group::update_casino_group,
        handlers::casino_group::activate_casino_group,
        handlers::casino_group::deactivate_casino_group,
        handlers::machine_group::create_machine_group,
        handlers::machine_group::list_machine_groups,
        handlers::machine_group::update_machine_group,
        handlers::machine_group::activate_machine_group,
        handlers::machine_group::deactivate_machine_group,
        handlers::machine::create_machine,
        handlers::machine::list_machines,
        handlers::machine::update_machine,
        handlers::machine::activate_machine,
        handlers::machine::deactivate_machine,
        handlers::user::get_current_user,
        handlers::user::create_user,
        handlers::user::list_users,
        handlers::user::update_user,
        handlers::user::activate_user,
        handlers::user::deactivate_user,
        handlers::player::create_player,
        handlers::player::list_players,
        handlers::player::update_player,
        handlers::player::activate_player,
        handlers::player::deactivate_player,
        handlers::player::delete_player,
        handlers::player::get_balance,
        handlers::player::set_balance,
        handlers::transaction::record_transaction,
        handlers::transaction::list_transactions,
        handlers::transaction::get_transaction,
    ),
    components(
        schemas(
            ErrorBody,
            ErrorDetail,
            CountResponse,
            EntityStatus,
            SpinOutcome,
            SpinRequest,
            SpinResponse,
            JackpotWonEvent,
            CreateJackpotRequest,
            UpdateJackpotRequest,
            SetAmountRequest,
            SetTriggerRequest,
            SetLevelsRequest,
            JackpotResponse,
            JackpotAmountResponse,
            CreateCasinoRequest,
            UpdateCasinoRequest,
            CasinoResponse,
            CreateCasinoGroupRequest,
            UpdateCasinoGroupRequest,
            CasinoGroupResponse,
            CreateMachineGroupRequest,
            UpdateMachineGroupRequest,
            MachineGroupResponse,
            CreateMachineRequest,
            UpdateMachineRequest,
            MachineResponse,
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
            CreatePlayerRequest,
            UpdatePlayerRequest,
            SetBalanceRequest,
            PlayerResponse,
            BalanceResponse,
            CreateTransactionRequest,
            TransactionResponse,
            PageInfo,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "floor", description = "Machine-facing spin and display API (no token)"),
        (name = "jackpots", description = "Jackpot administration API"),
        (name = "casinos", description = "Casino management API"),
        (name = "casino-groups", description = "Casino group management API"),
        (name = "machine-groups", description = "Machine group management API"),
        (name = "machines", description = "Gaming machine management API"),
        (name = "users", description = "Administrator management API"),
        (name = "players", description = "Player management API"),
        (name = "transactions", description = "Transaction log API"),
    ),
    info(
        title = "Jackpot Backend API",
        version = "1.0.0",
        description = "Casino jackpot administration REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
