//! In-memory compute API and recorders for workflow tests

use std::cell::Cell;
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use ocompute_client::{ClientError, ComputeApi, Result};
use ocompute_core::domain::identity::IdentityDomain;
use ocompute_core::domain::image::ImageList;
use ocompute_core::domain::instance::Instance;
use ocompute_core::domain::orchestration::Orchestration;
use ocompute_core::domain::shape::Shape;
use ocompute_core::dto::orchestration::OrchestrationRequest;

use crate::output::summary::SummaryRow;
use crate::service::lifecycle::Reporter;
use crate::service::poller::PollObserver;

/// Build an instance in the `acme` container
pub fn instance(id: &str, orchestration: Option<&str>) -> Instance {
    Instance {
        name: format!("/Compute-acme/{}", id),
        label: Some(id.to_string()),
        status: "running".to_string(),
        hostname: Some(format!("{}.internal", id.replace('/', "-"))),
        ip_address: Some("10.0.0.5".to_string()),
        public_ip_addresses: vec![],
        image: Some("/oracle/public/oel_6.6_20GB".to_string()),
        shape: Some("oc3".to_string()),
        orchestration: orchestration.map(str::to_string),
        vcable_id: None,
    }
}

#[derive(Default)]
struct FakeState {
    calls: Vec<String>,
    statuses: VecDeque<String>,
    orchestration: Option<Orchestration>,
    instances: Vec<Instance>,
}

/// Compute API double
///
/// Every `get_orchestration` consumes the next scripted status; once the
/// script runs out the last status sticks.
pub struct FakeCompute {
    identity: IdentityDomain,
    state: Mutex<FakeState>,
}

impl FakeCompute {
    pub fn new() -> Self {
        Self {
            identity: IdentityDomain::new("acme", false),
            state: Mutex::new(FakeState::default()),
        }
    }

    pub fn with_statuses(self, statuses: &[&str]) -> Self {
        self.state
            .lock()
            .unwrap()
            .statuses
            .extend(statuses.iter().map(|s| s.to_string()));
        self
    }

    pub fn with_instance(self, instance: Instance) -> Self {
        self.state.lock().unwrap().instances.push(instance);
        self
    }

    pub fn with_orchestration(self, id: &str) -> Self {
        self.state.lock().unwrap().orchestration = Some(Orchestration {
            name: format!("/Compute-acme/{}", id),
            description: Some(format!("{} by jdoe via ocompute", id)),
            status: "ready".to_string(),
            instance_count: 1,
        });
        self
    }

    /// Calls made so far, as `operation:name`
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl ComputeApi for FakeCompute {
    fn identity(&self) -> &IdentityDomain {
        &self.identity
    }

    fn username(&self) -> &str {
        "jdoe"
    }

    async fn create_orchestration(&self, req: &OrchestrationRequest) -> Result<Orchestration> {
        self.record(format!("create:{}", req.name));
        let orchestration = Orchestration {
            name: req.name.clone(),
            description: Some(req.description.clone()),
            status: "stopped".to_string(),
            instance_count: req.instances().count(),
        };
        self.state.lock().unwrap().orchestration = Some(orchestration.clone());
        Ok(orchestration)
    }

    async fn get_orchestration(&self, name: &str) -> Result<Orchestration> {
        self.record(format!("get_orchestration:{}", name));
        let qualified = self.identity.qualify("jdoe", name);
        let mut state = self.state.lock().unwrap();
        let next = state.statuses.pop_front();
        let orchestration = state
            .orchestration
            .as_mut()
            .filter(|orchestration| orchestration.name == qualified)
            .ok_or_else(|| ClientError::NotFound(format!("orchestration {}", name)))?;
        if let Some(status) = next {
            orchestration.status = status;
        }
        Ok(orchestration.clone())
    }

    async fn start_orchestration(&self, name: &str) -> Result<()> {
        self.record(format!("start:{}", name));
        Ok(())
    }

    async fn stop_orchestration(&self, name: &str) -> Result<()> {
        self.record(format!("stop:{}", name));
        Ok(())
    }

    async fn delete_orchestration(&self, name: &str) -> Result<()> {
        self.record(format!("delete_orchestration:{}", name));
        Ok(())
    }

    async fn orchestration_instances(
        &self,
        orchestration: &Orchestration,
    ) -> Result<Vec<Instance>> {
        self.record(format!("instances:{}", orchestration.name));
        let state = self.state.lock().unwrap();
        Ok(state
            .instances
            .iter()
            .filter(|instance| instance.belongs_to(&orchestration.name))
            .cloned()
            .collect())
    }

    async fn get_instance(&self, name: &str) -> Result<Instance> {
        self.record(format!("get_instance:{}", name));
        let qualified = self.identity.qualify("jdoe", name);
        let state = self.state.lock().unwrap();
        state
            .instances
            .iter()
            .find(|instance| instance.name == qualified)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("instance {}", name)))
    }

    async fn delete_instance(&self, name: &str) -> Result<()> {
        self.record(format!("delete_instance:{}", name));
        Ok(())
    }

    async fn list_instances(&self) -> Result<Vec<Instance>> {
        Ok(self.state.lock().unwrap().instances.clone())
    }

    async fn list_orchestrations(&self) -> Result<Vec<Orchestration>> {
        Ok(self.state.lock().unwrap().orchestration.iter().cloned().collect())
    }

    async fn list_images(&self) -> Result<Vec<ImageList>> {
        Ok(vec![])
    }

    async fn list_shapes(&self) -> Result<Vec<Shape>> {
        Ok(vec![])
    }
}

/// Confirmation double with a fixed answer
pub struct Answer {
    agree: bool,
    asked: Cell<usize>,
}

impl Answer {
    pub fn yes() -> Self {
        Self {
            agree: true,
            asked: Cell::new(0),
        }
    }

    pub fn no() -> Self {
        Self {
            agree: false,
            asked: Cell::new(0),
        }
    }

    /// Number of times the operator was asked
    pub fn asked(&self) -> usize {
        self.asked.get()
    }
}

impl crate::service::prompt::Confirm for Answer {
    fn confirm(&self, _question: &str) -> std::io::Result<bool> {
        self.asked.set(self.asked.get() + 1);
        Ok(self.agree)
    }
}

/// Reporter that keeps a compact log of what was reported
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<String>,
}

impl PollObserver for Recorder {
    fn status_changed(&mut self, status: &str) {
        self.events.push(format!("changed:{}", status));
    }

    fn still_waiting(&mut self) {
        self.events.push(".".to_string());
    }

    fn reached(&mut self, status: &str) {
        self.events.push(format!("reached:{}", status));
    }
}

impl Reporter for Recorder {
    fn message(&mut self, text: &str) {
        self.events.push(format!("message:{}", text));
    }

    fn summary(&mut self, title: Option<&str>, rows: &[SummaryRow]) {
        let heading = title.or_else(|| rows.first().map(|(label, _)| *label));
        self.events
            .push(format!("summary:{}", heading.unwrap_or_default()));
    }
}
