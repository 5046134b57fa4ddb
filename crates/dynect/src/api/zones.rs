//! Zone request surface.

use serde_json::{Value, json};

use dynect_core::{ApiResponse, RequestParams, Result};

use crate::client::Client;

impl Client {
    /// List the zones visible to this customer.
    pub async fn list_zones(&self) -> Result<ApiResponse> {
        self.request(RequestParams::get("Zone")).await
    }

    /// Fetch one zone.
    pub async fn get_zone(&self, zone: &str) -> Result<ApiResponse> {
        self.request(RequestParams::get(format!("Zone/{zone}"))).await
    }

    /// Create a zone with an administrative contact and a default TTL.
    pub async fn create_zone(&self, zone: &str, rname: &str, ttl: u32) -> Result<ApiResponse> {
        let body = json!({"rname": rname, "ttl": ttl});
        self.request(RequestParams::post(format!("Zone/{zone}")).body(body))
            .await
    }

    /// Publish pending changes to a zone.  Frequently resolves through a
    /// job.
    pub async fn publish_zone(&self, zone: &str) -> Result<ApiResponse> {
        self.put_zone(zone, json!({"publish": true})).await
    }

    /// Freeze a zone against changes.
    pub async fn freeze_zone(&self, zone: &str) -> Result<ApiResponse> {
        self.put_zone(zone, json!({"freeze": true})).await
    }

    /// Thaw a frozen zone.
    pub async fn thaw_zone(&self, zone: &str) -> Result<ApiResponse> {
        self.put_zone(zone, json!({"thaw": true})).await
    }

    async fn put_zone(&self, zone: &str, body: Value) -> Result<ApiResponse> {
        self.request(RequestParams::put(format!("Zone/{zone}")).body(body))
            .await
    }

    /// Delete a zone.
    pub async fn delete_zone(&self, zone: &str) -> Result<ApiResponse> {
        self.request(RequestParams::delete(format!("Zone/{zone}")))
            .await
    }

    /// List the node names under a zone, optionally below one fqdn.
    pub async fn node_list(&self, zone: &str, fqdn: Option<&str>) -> Result<ApiResponse> {
        let path = match fqdn {
            Some(fqdn) => format!("NodeList/{zone}/{fqdn}"),
            None => format!("NodeList/{zone}"),
        };
        self.request(RequestParams::get(path)).await
    }
}
