//! Orchestration-related API endpoints

use crate::ComputeClient;
use crate::error::Result;
use ocompute_core::domain::instance::Instance;
use ocompute_core::domain::orchestration::Orchestration;
use ocompute_core::dto::orchestration::{OrchestrationRecord, OrchestrationRequest};
use tracing::{debug, info};

impl ComputeClient {
    // =============================================================================
    // Orchestration Lifecycle
    // =============================================================================

    /// Submit a new orchestration
    ///
    /// The orchestration is created in the stopped state; call
    /// [`ComputeClient::start_orchestration`] to launch its instances.
    pub async fn create_orchestration(&self, req: &OrchestrationRequest) -> Result<Orchestration> {
        let url = format!("{}/orchestration/", self.base_url);
        info!("Creating orchestration {}", req.name);

        let response = self.client.post(&url).json(req).send().await?;
        let record: OrchestrationRecord = self.handle_response(response).await?;

        Ok(record.into())
    }

    /// Get an orchestration by name
    ///
    /// # Arguments
    /// * `name` - Fully qualified name, or a name relative to the container or user
    pub async fn get_orchestration(&self, name: &str) -> Result<Orchestration> {
        let url = self.object_url("orchestration", name);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let record: OrchestrationRecord = self
            .handle_response(response)
            .await
            .map_err(|e| e.or_not_found(&format!("orchestration {}", name)))?;

        Ok(record.into())
    }

    /// List all orchestrations in the account's container
    pub async fn list_orchestrations(&self) -> Result<Vec<Orchestration>> {
        let url = self.container_url("orchestration");
        let records: Vec<OrchestrationRecord> = self.get_list(&url).await?;

        Ok(records.into_iter().map(Orchestration::from).collect())
    }

    /// Ask the service to launch every object of an orchestration
    pub async fn start_orchestration(&self, name: &str) -> Result<()> {
        self.orchestration_action(name, "START").await
    }

    /// Ask the service to tear down every object of an orchestration
    pub async fn stop_orchestration(&self, name: &str) -> Result<()> {
        self.orchestration_action(name, "STOP").await
    }

    /// Delete an orchestration
    ///
    /// The orchestration must be stopped first.
    pub async fn delete_orchestration(&self, name: &str) -> Result<()> {
        let url = self.object_url("orchestration", name);
        info!("Deleting orchestration {}", name);

        let response = self.client.delete(&url).send().await?;
        self.handle_empty_response(response).await
    }

    /// Instances launched by an orchestration
    ///
    /// Instances carry a reference to their orchestration; the container's
    /// instances are filtered on it.
    pub async fn orchestration_instances(
        &self,
        orchestration: &Orchestration,
    ) -> Result<Vec<Instance>> {
        let instances = self.list_instances().await?;

        Ok(instances
            .into_iter()
            .filter(|instance| instance.belongs_to(&orchestration.name))
            .collect())
    }

    async fn orchestration_action(&self, name: &str, action: &str) -> Result<()> {
        let url = self.object_url("orchestration", name);
        info!("Requesting {} of orchestration {}", action, name);

        let response = self
            .client
            .put(&url)
            .query(&[("action", action)])
            .send()
            .await?;

        self.handle_empty_response(response)
            .await
            .map_err(|e| e.or_not_found(&format!("orchestration {}", name)))
    }
}
