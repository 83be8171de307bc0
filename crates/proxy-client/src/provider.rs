//! The `ProxyProvider` trait defines the interface for all ArmorIQ
//! proxy backends (REST, mock/test).

use async_trait::async_trait;
use aq_domain::error::Result;
use serde_json::Value;

use crate::types::{PolicyCreate, PolicyUpdate};

/// Abstraction over the ArmorIQ proxy's admin API surface.
///
/// Implementations may talk to the real proxy or a test double.  Read
/// methods return `Ok(None)` when the proxy answered with an empty body,
/// which the facade renders as a response without a body.
#[async_trait]
pub trait ProxyProvider: Send + Sync {
    /// Proxy health and inventory snapshot (GET /health).
    async fn health(&self) -> Result<Option<Value>>;

    /// Recent audit log entries (GET /api/audit-logs).
    async fn audit_logs(&self) -> Result<Option<Value>>;

    /// Registered MCP endpoints (GET /api/endpoints).
    async fn endpoints(&self) -> Result<Option<Value>>;

    /// All agent policies (GET /api/policies).
    async fn list_policies(&self) -> Result<Option<Value>>;

    /// A single agent policy (GET /api/policies/{agentId}).
    async fn policy(&self, agent_id: &str) -> Result<Option<Value>>;

    /// Create a new agent policy (POST /api/policies, expects 201).
    async fn create_policy(&self, req: PolicyCreate) -> Result<Option<Value>>;

    /// Update an existing policy (PUT /api/policies/{agentId}).
    async fn update_policy(&self, agent_id: &str, req: PolicyUpdate) -> Result<Option<Value>>;

    /// Delete a policy (DELETE /api/policies/{agentId}, expects 204).
    async fn delete_policy(&self, agent_id: &str) -> Result<()>;
}
