//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data`. It only holds
//! domain services and ports, so handlers stay testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::TokenService;
use crate::domain::{
    ConsultationService, DoctorService, LoginService, PatientService, StoredProcedureGateway,
    UserAccountService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: LoginService,
    pub doctors: DoctorService,
    pub patients: PatientService,
    pub user_accounts: UserAccountService,
    pub consultations: ConsultationService,
    pub tokens: Arc<dyn TokenService>,
}

impl HttpState {
    /// Wire every catalogue service to a single gateway.
    pub fn new(
        gateway: StoredProcedureGateway,
        tokens: Arc<dyn TokenService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            login: LoginService::new(gateway.clone(), Arc::clone(&tokens), clock),
            doctors: DoctorService::new(gateway.clone()),
            patients: PatientService::new(gateway.clone()),
            user_accounts: UserAccountService::new(gateway.clone()),
            consultations: ConsultationService::new(gateway),
            tokens,
        }
    }
}
