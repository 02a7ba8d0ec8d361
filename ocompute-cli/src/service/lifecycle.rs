//! Orchestration lifecycle
//!
//! Creation: `Requested -> Starting -> Polling(ready) -> Ready`.
//! Teardown: `Ready -> Stopping -> Polling(stopped) -> Deleted`.
//!
//! Every step runs to completion before the next one starts, and the first
//! failure aborts the rest of the sequence.

use ocompute_client::{ComputeApi, InstanceHandle, OrchestrationHandle};
use ocompute_core::domain::instance::Instance;
use ocompute_core::domain::status::{READY, STOPPED};
use ocompute_core::dto::instance::{InstanceRequest, Networking, PublicIp};
use ocompute_core::dto::orchestration::OrchestrationRequest;
use tracing::{info, warn};

use crate::error::WorkflowError;
use crate::output::summary::{SummaryRow, instance_summary, orchestration_summary};
use crate::service::poller::{PollObserver, PollSettings, wait_for_status};
use crate::service::prompt::Confirm;

/// Destination of workflow output
///
/// Presentation is up to the implementor; workflows only decide what is
/// reported and in which order.
pub trait Reporter: PollObserver {
    /// A line of progress text
    fn message(&mut self, text: &str);

    /// A block of key/value rows, optionally headed by a title
    fn summary(&mut self, title: Option<&str>, rows: &[SummaryRow]);
}

/// Properties of a server to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSpec {
    /// Name of both the orchestration and its instance
    pub name: String,
    pub shape: String,
    pub image: String,
    pub label: String,
    pub public_ip: Option<PublicIp>,
    /// Fully qualified SSH key names
    pub sshkeys: Vec<String>,
}

/// Instance request for a server spec
pub fn instance_request<A: ComputeApi + ?Sized>(api: &A, spec: &ServerSpec) -> InstanceRequest {
    InstanceRequest {
        name: api.identity().qualify(api.username(), &spec.name),
        shape: spec.shape.clone(),
        image: spec.image.clone(),
        label: spec.label.clone(),
        sshkeys: spec.sshkeys.clone(),
        networking: spec.public_ip.as_ref().map(Networking::from),
    }
}

/// Orchestration request wrapping exactly one instance request
pub fn orchestration_request<A: ComputeApi + ?Sized>(
    api: &A,
    spec: &ServerSpec,
) -> OrchestrationRequest {
    OrchestrationRequest::new(
        api.identity().qualify(api.username(), &spec.name),
        format!("{} by {} via ocompute", spec.name, api.username()),
        vec![instance_request(api, spec)],
    )
}

/// Drives create and delete workflows against an injected API
pub struct Lifecycle<'a, A: ComputeApi + ?Sized, R: Reporter + ?Sized> {
    api: &'a A,
    confirm: &'a dyn Confirm,
    reporter: &'a mut R,
    poll: PollSettings,
}

impl<'a, A: ComputeApi + ?Sized, R: Reporter + ?Sized> Lifecycle<'a, A, R> {
    pub fn new(
        api: &'a A,
        confirm: &'a dyn Confirm,
        reporter: &'a mut R,
        poll: PollSettings,
    ) -> Self {
        Self {
            api,
            confirm,
            reporter,
            poll,
        }
    }

    /// Create an orchestration for one server, start it and wait until ready
    ///
    /// Returns the orchestration's single instance for bootstrapping.
    ///
    /// # Errors
    /// - [`WorkflowError::ServerCreate`] if the orchestration owns zero or
    ///   several instances once ready
    /// - [`WorkflowError::Timeout`] if it does not become ready in time
    pub async fn create_server(&mut self, spec: &ServerSpec) -> Result<Instance, WorkflowError> {
        let request = orchestration_request(self.api, spec);
        let created = self.api.create_orchestration(&request).await?;
        let mut orchestration = OrchestrationHandle::new(self.api, created);

        orchestration.start().await?;
        info!("Started orchestration {}", orchestration.id());
        self.reporter.message(&format!(
            "Orchestration {} started - waiting for it to complete...",
            orchestration.id()
        ));

        wait_for_status(&mut orchestration, READY, &self.poll, &mut *self.reporter).await?;
        self.reporter.message("Orchestration started successfully.");
        self.reporter
            .summary(None, &orchestration_summary(orchestration.snapshot()));

        let instances = orchestration.instances().await?;
        for instance in &instances {
            self.reporter.summary(
                Some(&format!("Instance {}", instance.id())),
                &instance_summary(instance),
            );
        }

        single_instance(instances)
    }

    /// Delete a standalone instance after confirmation
    ///
    /// Instances owned by an orchestration are refused without prompting.
    pub async fn delete_server(&mut self, id: &str) -> Result<(), WorkflowError> {
        let instance = InstanceHandle::fetch(self.api, id).await?;
        self.reporter
            .summary(None, &instance_summary(instance.snapshot()));

        if let Some(orchestration) = &instance.snapshot().orchestration {
            return Err(WorkflowError::OwnedByOrchestration {
                orchestration: orchestration.clone(),
            });
        }

        self.require_confirmation("Do you really want to delete this server")?;

        self.reporter.message("Deleting the instance...");
        instance.delete().await?;
        info!("Deleted instance {}", id);
        self.reporter.message("Delete request complete.");

        Ok(())
    }

    /// Stop an orchestration, wait until stopped, then delete it
    pub async fn delete_orchestration(&mut self, id: &str) -> Result<(), WorkflowError> {
        let mut orchestration = OrchestrationHandle::fetch(self.api, id).await?;
        self.reporter
            .summary(None, &orchestration_summary(orchestration.snapshot()));

        self.require_confirmation("Do you really want to delete this orchestration")?;

        self.reporter
            .message("Stopping the orchestration and any instances...");
        orchestration.stop().await?;
        wait_for_status(&mut orchestration, STOPPED, &self.poll, &mut *self.reporter).await?;

        self.reporter
            .message("Deleting the orchestration and any instances...");
        orchestration.delete().await?;
        info!("Deleted orchestration {}", id);
        self.reporter.message("Delete request complete.");

        Ok(())
    }

    /// Delete orchestrations in order, each confirmed on its own
    ///
    /// The first failure or declined confirmation leaves the remaining
    /// orchestrations untouched.
    pub async fn delete_orchestrations(&mut self, ids: &[String]) -> Result<(), WorkflowError> {
        for id in ids {
            self.delete_orchestration(id).await?;
        }
        Ok(())
    }

    fn require_confirmation(&self, question: &str) -> Result<(), WorkflowError> {
        if self.confirm.confirm(question)? {
            Ok(())
        } else {
            Err(WorkflowError::Declined)
        }
    }
}

/// The one instance a single-server orchestration must own
fn single_instance(mut instances: Vec<Instance>) -> Result<Instance, WorkflowError> {
    match instances.len() {
        0 => Err(WorkflowError::ServerCreate(
            "The orchestration did not create any servers".to_string(),
        )),
        1 => Ok(instances.remove(0)),
        count => {
            warn!("Orchestration owns {} instances", count);
            Err(WorkflowError::ServerCreate(
                "The orchestration created more than one server, but we were only expecting 1"
                    .to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fake::{Answer, FakeCompute, Recorder, instance};
    use serde_json::json;
    use tokio::time::Duration;

    fn poll() -> PollSettings {
        PollSettings {
            interval: Duration::from_secs(2),
            timeout: Duration::from_secs(60),
        }
    }

    fn spec() -> ServerSpec {
        ServerSpec {
            name: "x".to_string(),
            shape: "s".to_string(),
            image: "img".to_string(),
            label: "l".to_string(),
            public_ip: Some(PublicIp::Pool),
            sshkeys: vec!["/Compute-acme/jdoe@example.com/key1".to_string()],
        }
    }

    #[test]
    fn test_instance_request_fields() {
        let api = FakeCompute::new();
        let request = instance_request(&api, &spec());

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "name": "/Compute-acme/jdoe/x",
                "shape": "s",
                "imagelist": "img",
                "label": "l",
                "sshkeys": ["/Compute-acme/jdoe@example.com/key1"],
                "networking": { "eth0": { "nat": "ippool:/oracle/public/ippool" } }
            })
        );
    }

    #[test]
    fn test_orchestration_request_wraps_one_instance() {
        let api = FakeCompute::new();
        let request = orchestration_request(&api, &spec());

        assert_eq!(request.name, "/Compute-acme/jdoe/x");
        assert_eq!(request.description, "x by jdoe via ocompute");
        assert_eq!(request.instances().count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_server_returns_single_instance() {
        let api = FakeCompute::new()
            .with_statuses(&["starting", "starting", "ready"])
            .with_instance(instance("jdoe/x/4f1c", Some("/Compute-acme/jdoe/x")))
            .with_instance(instance("jdoe/other/1", None));
        let mut reporter = Recorder::default();

        let created = Lifecycle::new(&api, &Answer::yes(), &mut reporter, poll())
            .create_server(&spec())
            .await
            .unwrap();

        assert_eq!(created, instance("jdoe/x/4f1c", Some("/Compute-acme/jdoe/x")));
        assert_eq!(
            api.calls(),
            vec![
                "create:/Compute-acme/jdoe/x",
                "start:/Compute-acme/jdoe/x",
                "get_orchestration:/Compute-acme/jdoe/x",
                "get_orchestration:/Compute-acme/jdoe/x",
                "get_orchestration:/Compute-acme/jdoe/x",
                "instances:/Compute-acme/jdoe/x",
            ]
        );
        assert_eq!(
            reporter.events,
            vec![
                "message:Orchestration jdoe/x started - waiting for it to complete...",
                "changed:starting",
                ".",
                "reached:ready",
                "message:Orchestration started successfully.",
                "summary:Orchestration ID",
                "summary:Instance jdoe/x/4f1c",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_server_without_instances_fails() {
        let api = FakeCompute::new().with_statuses(&["ready"]);
        let mut reporter = Recorder::default();

        let err = Lifecycle::new(&api, &Answer::yes(), &mut reporter, poll())
            .create_server(&spec())
            .await
            .unwrap_err();

        assert!(
            matches!(err, WorkflowError::ServerCreate(ref msg) if msg.contains("did not create any servers"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_server_with_two_instances_fails() {
        let api = FakeCompute::new()
            .with_statuses(&["ready"])
            .with_instance(instance("jdoe/x/1", Some("/Compute-acme/jdoe/x")))
            .with_instance(instance("jdoe/x/2", Some("/Compute-acme/jdoe/x")));
        let mut reporter = Recorder::default();

        let err = Lifecycle::new(&api, &Answer::yes(), &mut reporter, poll())
            .create_server(&spec())
            .await
            .unwrap_err();

        assert!(
            matches!(err, WorkflowError::ServerCreate(ref msg) if msg.contains("only expecting 1"))
        );
        assert_eq!(api.calls().last().unwrap(), "instances:/Compute-acme/jdoe/x");
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_server_timeout_stops_the_workflow() {
        let api = FakeCompute::new()
            .with_statuses(&["starting"])
            .with_instance(instance("jdoe/x/1", Some("/Compute-acme/jdoe/x")));
        let mut reporter = Recorder::default();
        let settings = PollSettings {
            interval: Duration::from_secs(2),
            timeout: Duration::from_secs(5),
        };

        let err = Lifecycle::new(&api, &Answer::yes(), &mut reporter, settings)
            .create_server(&spec())
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::Timeout { seconds: 5 }));
        assert!(!api.calls().iter().any(|call| call.starts_with("instances:")));
    }

    #[tokio::test]
    async fn test_delete_orchestrated_server_is_refused() {
        let api = FakeCompute::new()
            .with_instance(instance("jdoe/x/4f1c", Some("/Compute-acme/jdoe/x")));
        let confirm = Answer::yes();
        let mut reporter = Recorder::default();

        let err = Lifecycle::new(&api, &confirm, &mut reporter, poll())
            .delete_server("jdoe/x/4f1c")
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::OwnedByOrchestration { .. }));
        assert_eq!(confirm.asked(), 0);
        assert!(!api.calls().iter().any(|call| call.starts_with("delete")));
        assert_eq!(reporter.events, vec!["summary:Server Label"]);
    }

    #[tokio::test]
    async fn test_delete_standalone_server() {
        let api = FakeCompute::new().with_instance(instance("jdoe/solo", None));
        let confirm = Answer::yes();
        let mut reporter = Recorder::default();

        Lifecycle::new(&api, &confirm, &mut reporter, poll())
            .delete_server("jdoe/solo")
            .await
            .unwrap();

        assert_eq!(confirm.asked(), 1);
        let deletes: Vec<_> = api
            .calls()
            .into_iter()
            .filter(|call| call.starts_with("delete"))
            .collect();
        assert_eq!(deletes, vec!["delete_instance:/Compute-acme/jdoe/solo"]);
    }

    #[tokio::test]
    async fn test_declined_delete_issues_no_call() {
        let api = FakeCompute::new().with_instance(instance("jdoe/solo", None));
        let confirm = Answer::no();
        let mut reporter = Recorder::default();

        let err = Lifecycle::new(&api, &confirm, &mut reporter, poll())
            .delete_server("jdoe/solo")
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::Declined));
        assert_eq!(confirm.asked(), 1);
        assert!(!api.calls().iter().any(|call| call.starts_with("delete")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_orchestration_stops_waits_then_deletes() {
        let api = FakeCompute::new()
            .with_statuses(&["ready", "stopping", "stopped"])
            .with_orchestration("jdoe/x");
        let confirm = Answer::yes();
        let mut reporter = Recorder::default();

        Lifecycle::new(&api, &confirm, &mut reporter, poll())
            .delete_orchestration("jdoe/x")
            .await
            .unwrap();

        assert_eq!(confirm.asked(), 1);
        assert_eq!(
            api.calls(),
            vec![
                "get_orchestration:jdoe/x",
                "stop:/Compute-acme/jdoe/x",
                "get_orchestration:/Compute-acme/jdoe/x",
                "get_orchestration:/Compute-acme/jdoe/x",
                "delete_orchestration:/Compute-acme/jdoe/x",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_orchestration_timeout_skips_delete() {
        let api = FakeCompute::new()
            .with_statuses(&["ready", "stopping"])
            .with_orchestration("jdoe/x");
        let mut reporter = Recorder::default();
        let settings = PollSettings {
            interval: Duration::from_secs(2),
            timeout: Duration::from_secs(10),
        };

        let err = Lifecycle::new(&api, &Answer::yes(), &mut reporter, settings)
            .delete_orchestration("jdoe/x")
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::Timeout { seconds: 10 }));
        assert!(
            !api
                .calls()
                .iter()
                .any(|call| call.starts_with("delete_orchestration"))
        );
    }

    #[tokio::test]
    async fn test_declined_orchestration_delete_issues_no_call() {
        let api = FakeCompute::new().with_orchestration("jdoe/x");
        let confirm = Answer::no();
        let mut reporter = Recorder::default();

        let err = Lifecycle::new(&api, &confirm, &mut reporter, poll())
            .delete_orchestration("jdoe/x")
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::Declined));
        assert_eq!(confirm.asked(), 1);
        assert_eq!(api.calls(), vec!["get_orchestration:jdoe/x"]);
        assert_eq!(reporter.events, vec!["summary:Orchestration ID"]);
    }

    #[tokio::test]
    async fn test_delete_orchestrations_stops_at_declined() {
        let api = FakeCompute::new().with_orchestration("jdoe/x");
        let confirm = Answer::no();
        let mut reporter = Recorder::default();

        let err = Lifecycle::new(&api, &confirm, &mut reporter, poll())
            .delete_orchestrations(&["jdoe/x".to_string(), "jdoe/y".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::Declined));
        assert_eq!(confirm.asked(), 1);
        assert_eq!(api.calls(), vec!["get_orchestration:jdoe/x"]);
    }

    #[tokio::test]
    async fn test_delete_orchestrations_stops_at_missing() {
        let api = FakeCompute::new().with_orchestration("jdoe/x");
        let confirm = Answer::yes();
        let mut reporter = Recorder::default();

        let err = Lifecycle::new(&api, &confirm, &mut reporter, poll())
            .delete_orchestrations(&["jdoe/gone".to_string(), "jdoe/x".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::Client(ref e) if e.is_not_found()));
        assert_eq!(confirm.asked(), 0);
        assert_eq!(api.calls(), vec!["get_orchestration:jdoe/gone"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_orchestrations_in_order() {
        let api = FakeCompute::new()
            .with_statuses(&["ready", "stopped"])
            .with_orchestration("jdoe/x");
        let confirm = Answer::yes();
        let mut reporter = Recorder::default();

        Lifecycle::new(&api, &confirm, &mut reporter, poll())
            .delete_orchestrations(&["jdoe/x".to_string()])
            .await
            .unwrap();

        assert_eq!(confirm.asked(), 1);
        assert_eq!(
            api.calls().last().map(String::as_str),
            Some("delete_orchestration:/Compute-acme/jdoe/x")
        );
    }

    #[test]
    fn test_single_instance_cardinality() {
        assert!(single_instance(vec![]).is_err());
        assert!(single_instance(vec![instance("a", None)]).is_ok());
        assert!(single_instance(vec![instance("a", None), instance("b", None)]).is_err());
    }
}
