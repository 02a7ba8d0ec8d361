//! Instance-related API endpoints

use crate::ComputeClient;
use crate::error::Result;
use ocompute_core::domain::instance::Instance;
use ocompute_core::dto::instance::InstanceRecord;
use ocompute_core::dto::network::IpAssociation;
use tracing::{debug, info};

impl ComputeClient {
    /// Get an instance by name, including its public IP addresses
    ///
    /// # Arguments
    /// * `name` - Fully qualified name, or a name relative to the container or user
    pub async fn get_instance(&self, name: &str) -> Result<Instance> {
        let url = self.object_url("instance", name);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let record: InstanceRecord = self
            .handle_response(response)
            .await
            .map_err(|e| e.or_not_found(&format!("instance {}", name)))?;

        let associations = self.list_ip_associations().await?;
        let public_ips = public_ips_for(&record, &associations);

        Ok(Instance::from_record(record, public_ips))
    }

    /// List all instances in the account's container
    pub async fn list_instances(&self) -> Result<Vec<Instance>> {
        let url = self.container_url("instance");
        let records: Vec<InstanceRecord> = self.get_list(&url).await?;
        let associations = self.list_ip_associations().await?;

        Ok(records
            .into_iter()
            .map(|record| {
                let public_ips = public_ips_for(&record, &associations);
                Instance::from_record(record, public_ips)
            })
            .collect())
    }

    /// Delete a standalone instance
    pub async fn delete_instance(&self, name: &str) -> Result<()> {
        let url = self.object_url("instance", name);
        info!("Deleting instance {}", name);

        let response = self.client.delete(&url).send().await?;
        self.handle_empty_response(response)
            .await
            .map_err(|e| e.or_not_found(&format!("instance {}", name)))
    }

    /// List public IP associations in the account's container
    pub async fn list_ip_associations(&self) -> Result<Vec<IpAssociation>> {
        let url = self.container_url("ip/association");
        self.get_list(&url).await
    }
}

/// Public addresses attached to an instance's virtual cable
fn public_ips_for(record: &InstanceRecord, associations: &[IpAssociation]) -> Vec<String> {
    let Some(vcable) = record.vcable_id.as_deref() else {
        return Vec::new();
    };

    associations
        .iter()
        .filter(|association| association.vcable == vcable)
        .map(|association| association.ip.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn association(ip: &str, vcable: &str) -> IpAssociation {
        IpAssociation {
            name: format!("assoc-{}", ip),
            ip: ip.to_string(),
            vcable: vcable.to_string(),
        }
    }

    #[test]
    fn test_public_ips_matched_on_vcable() {
        let record: InstanceRecord = serde_json::from_value(json!({
            "name": "/Compute-acme/jdoe/web01/4f1c",
            "state": "running",
            "vcable_id": "/Compute-acme/jdoe/vc1"
        }))
        .unwrap();
        let associations = vec![
            association("129.152.1.1", "/Compute-acme/jdoe/vc1"),
            association("129.152.1.2", "/Compute-acme/jdoe/vc2"),
            association("129.152.1.3", "/Compute-acme/jdoe/vc1"),
        ];

        assert_eq!(
            public_ips_for(&record, &associations),
            vec!["129.152.1.1", "129.152.1.3"]
        );
    }

    #[test]
    fn test_no_vcable_means_no_public_ips() {
        let record: InstanceRecord = serde_json::from_value(json!({
            "name": "/Compute-acme/jdoe/web01/4f1c",
            "state": "starting"
        }))
        .unwrap();

        assert!(public_ips_for(&record, &[association("129.152.1.1", "vc1")]).is_empty());
    }
}
