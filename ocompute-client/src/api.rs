//! Compute API abstraction
//!
//! Workflows are written against [`ComputeApi`] rather than the HTTP client
//! so they can be exercised without a live endpoint.

use async_trait::async_trait;
use ocompute_core::domain::identity::IdentityDomain;
use ocompute_core::domain::image::ImageList;
use ocompute_core::domain::instance::Instance;
use ocompute_core::domain::orchestration::Orchestration;
use ocompute_core::domain::shape::Shape;
use ocompute_core::dto::orchestration::OrchestrationRequest;

use crate::ComputeClient;
use crate::error::Result;

/// Operations the CLI needs from the compute service
#[async_trait]
pub trait ComputeApi: Send + Sync {
    /// Identity domain object names are scoped by
    fn identity(&self) -> &IdentityDomain;

    /// User the session belongs to
    fn username(&self) -> &str;

    /// Submit a new orchestration
    async fn create_orchestration(&self, req: &OrchestrationRequest) -> Result<Orchestration>;

    /// Fetch an orchestration by name
    async fn get_orchestration(&self, name: &str) -> Result<Orchestration>;

    /// Launch an orchestration's objects
    async fn start_orchestration(&self, name: &str) -> Result<()>;

    /// Tear down an orchestration's objects
    async fn stop_orchestration(&self, name: &str) -> Result<()>;

    /// Delete a stopped orchestration
    async fn delete_orchestration(&self, name: &str) -> Result<()>;

    /// Instances launched by an orchestration
    async fn orchestration_instances(&self, orchestration: &Orchestration)
    -> Result<Vec<Instance>>;

    /// Fetch an instance by name
    async fn get_instance(&self, name: &str) -> Result<Instance>;

    /// Delete a standalone instance
    async fn delete_instance(&self, name: &str) -> Result<()>;

    async fn list_instances(&self) -> Result<Vec<Instance>>;

    async fn list_orchestrations(&self) -> Result<Vec<Orchestration>>;

    async fn list_images(&self) -> Result<Vec<ImageList>>;

    async fn list_shapes(&self) -> Result<Vec<Shape>>;
}

#[async_trait]
impl ComputeApi for ComputeClient {
    fn identity(&self) -> &IdentityDomain {
        ComputeClient::identity(self)
    }

    fn username(&self) -> &str {
        ComputeClient::username(self)
    }

    async fn create_orchestration(&self, req: &OrchestrationRequest) -> Result<Orchestration> {
        ComputeClient::create_orchestration(self, req).await
    }

    async fn get_orchestration(&self, name: &str) -> Result<Orchestration> {
        ComputeClient::get_orchestration(self, name).await
    }

    async fn start_orchestration(&self, name: &str) -> Result<()> {
        ComputeClient::start_orchestration(self, name).await
    }

    async fn stop_orchestration(&self, name: &str) -> Result<()> {
        ComputeClient::stop_orchestration(self, name).await
    }

    async fn delete_orchestration(&self, name: &str) -> Result<()> {
        ComputeClient::delete_orchestration(self, name).await
    }

    async fn orchestration_instances(
        &self,
        orchestration: &Orchestration,
    ) -> Result<Vec<Instance>> {
        ComputeClient::orchestration_instances(self, orchestration).await
    }

    async fn get_instance(&self, name: &str) -> Result<Instance> {
        ComputeClient::get_instance(self, name).await
    }

    async fn delete_instance(&self, name: &str) -> Result<()> {
        ComputeClient::delete_instance(self, name).await
    }

    async fn list_instances(&self) -> Result<Vec<Instance>> {
        ComputeClient::list_instances(self).await
    }

    async fn list_orchestrations(&self) -> Result<Vec<Orchestration>> {
        ComputeClient::list_orchestrations(self).await
    }

    async fn list_images(&self) -> Result<Vec<ImageList>> {
        ComputeClient::list_images(self).await
    }

    async fn list_shapes(&self) -> Result<Vec<Shape>> {
        ComputeClient::list_shapes(self).await
    }
}
