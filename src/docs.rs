// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,

        // --- Properties ---
        handlers::properties::list_properties,
        handlers::properties::create_property,
        handlers::properties::get_property,
        handlers::properties::add_application,

        // --- ARTs ---
        handlers::arts::list_arts,
        handlers::arts::create_art,
        handlers::arts::get_rt_profile,

        // --- Lots ---
        handlers::lots::list_lots,
        handlers::lots::create_lot,
        handlers::lots::search_lot,
        handlers::lots::add_movement,
        handlers::lots::public_trace,

        // --- Reports ---
        handlers::documents::export_applications_csv,
        handlers::documents::lot_report_pdf,

        // --- Professionals ---
        handlers::professionals::list_professionals,
        handlers::professionals::create_professional,

        // --- Analysis ---
        handlers::analysis::compliance,
        handlers::analysis::activity,
        handlers::analysis::usage,

        // --- Notifications ---
        handlers::notifications::list_notifications,
        handlers::notifications::mark_as_read,
        handlers::notifications::mark_all_as_read,

        // --- NF-e ---
        handlers::nfe::list_invoices,
        handlers::nfe::import_invoice,

        // --- Audit / Settings ---
        handlers::audit::list_audit_logs,
        handlers::settings::get_map_token,
        handlers::settings::update_map_token,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Registros ---
            models::property::EnvironmentalRegistry,
            models::property::Application,
            models::property::Property,
            models::art::Art,
            models::art::FullArt,
            models::lot::MovementKind,
            models::lot::Movement,
            models::lot::Lot,
            models::professional::RegisteredProfessional,
            models::nfe::NfeData,
            models::audit::AuditLogEntry,

            // --- Análises ---
            models::analysis::LotSearch,
            models::analysis::ComplianceChecks,
            models::analysis::ComplianceVerdict,
            models::analysis::ComplianceResult,
            models::analysis::StateActivity,
            models::analysis::ActivityReport,
            models::analysis::UsageEntry,
            models::analysis::UsageReport,
            models::analysis::RtProfile,
            models::notification::Notification,
            models::notification::NotificationFeed,
            models::settings::MapTokenSettings,

            // --- Payloads ---
            models::property::CreatePropertyPayload,
            models::property::CreateApplicationPayload,
            models::art::CreateArtPayload,
            models::lot::CreateLotPayload,
            models::lot::AddMovementPayload,
            models::professional::CreateProfessionalPayload,
            models::settings::UpdateMapTokenPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário e Perfil"),
        (name = "Properties", description = "Propriedades rurais, CAR e aplicações"),
        (name = "ARTs", description = "Receituários e responsáveis técnicos"),
        (name = "Lots", description = "Lotes de insumos e movimentações"),
        (name = "Public", description = "Consulta pública de rastreabilidade"),
        (name = "Reports", description = "Exportação CSV e PDF"),
        (name = "Professionals", description = "Cadastro de profissionais (CREA)"),
        (name = "Analysis", description = "Conformidade e indicadores"),
        (name = "Notifications", description = "Alertas de aplicações agendadas"),
        (name = "NF-e", description = "Importação de notas fiscais"),
        (name = "Audit", description = "Log de auditoria"),
        (name = "Settings", description = "Configurações")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
