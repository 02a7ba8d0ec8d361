//! Resource summaries
//!
//! Key/value rows in a fixed order. Absent values are rendered as `none`
//! rather than left out, so every summary of a kind has the same shape.

use ocompute_core::domain::instance::Instance;
use ocompute_core::domain::orchestration::Orchestration;

/// Placeholder for absent values
pub const NONE: &str = "none";

/// A labelled value
pub type SummaryRow = (&'static str, String);

fn or_none(value: Option<&str>) -> String {
    value.unwrap_or(NONE).to_string()
}

/// Summary of an instance
pub fn instance_summary(instance: &Instance) -> Vec<SummaryRow> {
    let public_ips = if instance.public_ip_addresses.is_empty() {
        NONE.to_string()
    } else {
        instance.public_ip_addresses.join(", ")
    };

    vec![
        ("Server Label", or_none(instance.label.as_deref())),
        ("Status", instance.status.clone()),
        ("Hostname", or_none(instance.hostname.as_deref())),
        ("IP Address", or_none(instance.ip_address.as_deref())),
        ("Public IP Addresses", public_ips),
        ("Image", or_none(instance.image.as_deref())),
        ("Shape", or_none(instance.shape.as_deref())),
        ("Orchestration", or_none(instance.orchestration.as_deref())),
    ]
}

/// Summary of an orchestration
pub fn orchestration_summary(orchestration: &Orchestration) -> Vec<SummaryRow> {
    vec![
        ("Orchestration ID", orchestration.id().to_string()),
        ("Description", or_none(orchestration.description.as_deref())),
        ("Status", orchestration.status.clone()),
        ("Instance Count", orchestration.instance_count.to_string()),
    ]
}
