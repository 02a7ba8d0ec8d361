//! Resource handles
//!
//! A handle owns the last snapshot fetched for a remote resource and the
//! API it came from. `refresh` replaces the snapshot with the current remote
//! state; lifecycle verbs act on the resource by name.

use async_trait::async_trait;
use ocompute_core::domain::instance::Instance;
use ocompute_core::domain::orchestration::Orchestration;

use crate::api::ComputeApi;
use crate::error::Result;

/// A remote resource whose status can be re-read
#[async_trait]
pub trait Refresh: Send {
    /// Re-fetch remote state into the handle
    async fn refresh(&mut self) -> Result<()>;

    /// Status from the most recent snapshot
    fn status(&self) -> &str;
}

/// Handle on a remote orchestration
pub struct OrchestrationHandle<'a, A: ComputeApi + ?Sized> {
    api: &'a A,
    snapshot: Orchestration,
}

impl<'a, A: ComputeApi + ?Sized> OrchestrationHandle<'a, A> {
    /// Wrap an already fetched snapshot
    pub fn new(api: &'a A, snapshot: Orchestration) -> Self {
        Self { api, snapshot }
    }

    /// Fetch an orchestration by name
    pub async fn fetch(api: &'a A, name: &str) -> Result<Self> {
        let snapshot = api.get_orchestration(name).await?;
        Ok(Self::new(api, snapshot))
    }

    /// Last fetched state
    pub fn snapshot(&self) -> &Orchestration {
        &self.snapshot
    }

    /// Identifier shown to the operator
    pub fn id(&self) -> &str {
        self.snapshot.id()
    }

    pub async fn start(&self) -> Result<()> {
        self.api.start_orchestration(&self.snapshot.name).await
    }

    pub async fn stop(&self) -> Result<()> {
        self.api.stop_orchestration(&self.snapshot.name).await
    }

    /// Delete the orchestration, consuming the handle
    pub async fn delete(self) -> Result<()> {
        self.api.delete_orchestration(&self.snapshot.name).await
    }

    /// Instances currently owned by the orchestration
    pub async fn instances(&self) -> Result<Vec<Instance>> {
        self.api.orchestration_instances(&self.snapshot).await
    }
}

#[async_trait]
impl<'a, A: ComputeApi + ?Sized> Refresh for OrchestrationHandle<'a, A> {
    async fn refresh(&mut self) -> Result<()> {
        self.snapshot = self.api.get_orchestration(&self.snapshot.name).await?;
        Ok(())
    }

    fn status(&self) -> &str {
        &self.snapshot.status
    }
}

/// Handle on a remote instance
pub struct InstanceHandle<'a, A: ComputeApi + ?Sized> {
    api: &'a A,
    snapshot: Instance,
}

impl<'a, A: ComputeApi + ?Sized> InstanceHandle<'a, A> {
    /// Wrap an already fetched snapshot
    pub fn new(api: &'a A, snapshot: Instance) -> Self {
        Self { api, snapshot }
    }

    /// Fetch an instance by name
    pub async fn fetch(api: &'a A, name: &str) -> Result<Self> {
        let snapshot = api.get_instance(name).await?;
        Ok(Self::new(api, snapshot))
    }

    /// Last fetched state
    pub fn snapshot(&self) -> &Instance {
        &self.snapshot
    }

    /// Delete the instance, consuming the handle
    pub async fn delete(self) -> Result<()> {
        self.api.delete_instance(&self.snapshot.name).await
    }
}

#[async_trait]
impl<'a, A: ComputeApi + ?Sized> Refresh for InstanceHandle<'a, A> {
    async fn refresh(&mut self) -> Result<()> {
        self.snapshot = self.api.get_instance(&self.snapshot.name).await?;
        Ok(())
    }

    fn status(&self) -> &str {
        &self.snapshot.status
    }
}
