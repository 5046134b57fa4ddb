//! Record request surface.
//!
//! Record types are plain path segments (`A`, `AAAA`, `CNAME`, ...) and
//! `rdata` passes through to the API unvalidated.

use serde_json::{Value, json};

use dynect_core::{ApiResponse, RequestParams, Result};

use crate::client::Client;

impl Client {
    /// List every record under a zone, optionally scoped to one fqdn.
    pub async fn all_records(&self, zone: &str, fqdn: Option<&str>) -> Result<ApiResponse> {
        let path = match fqdn {
            Some(fqdn) => format!("AllRecord/{zone}/{fqdn}"),
            None => format!("AllRecord/{zone}"),
        };
        self.request(RequestParams::get(path)).await
    }

    /// Fetch records of one type at an fqdn, or a single record by id.
    pub async fn get_record(
        &self,
        rtype: &str,
        zone: &str,
        fqdn: &str,
        record_id: Option<&str>,
    ) -> Result<ApiResponse> {
        self.request(RequestParams::get(record_path(rtype, zone, fqdn, record_id)))
            .await
    }

    /// Create a record.
    pub async fn create_record(
        &self,
        rtype: &str,
        zone: &str,
        fqdn: &str,
        rdata: Value,
        ttl: Option<u32>,
    ) -> Result<ApiResponse> {
        self.request(
            RequestParams::post(record_path(rtype, zone, fqdn, None)).body(record_body(rdata, ttl)),
        )
        .await
    }

    /// Replace a record's rdata.
    pub async fn update_record(
        &self,
        rtype: &str,
        zone: &str,
        fqdn: &str,
        record_id: &str,
        rdata: Value,
        ttl: Option<u32>,
    ) -> Result<ApiResponse> {
        self.request(
            RequestParams::put(record_path(rtype, zone, fqdn, Some(record_id)))
                .body(record_body(rdata, ttl)),
        )
        .await
    }

    /// Delete a record by id.
    pub async fn delete_record(
        &self,
        rtype: &str,
        zone: &str,
        fqdn: &str,
        record_id: &str,
    ) -> Result<ApiResponse> {
        self.request(RequestParams::delete(record_path(
            rtype,
            zone,
            fqdn,
            Some(record_id),
        )))
        .await
    }
}

fn record_path(rtype: &str, zone: &str, fqdn: &str, record_id: Option<&str>) -> String {
    match record_id {
        Some(id) => format!("{rtype}Record/{zone}/{fqdn}/{id}"),
        None => format!("{rtype}Record/{zone}/{fqdn}"),
    }
}

fn record_body(rdata: Value, ttl: Option<u32>) -> Value {
    let mut body = json!({"rdata": rdata});
    if let Some(ttl) = ttl {
        body["ttl"] = ttl.into();
    }
    body
}
