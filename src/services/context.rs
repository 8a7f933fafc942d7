use uuid::Uuid;

/// Per-request identity, threaded explicitly through every service call so
/// the core never reads ambient request state.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub company_id: Uuid,
}
