//! DNS record operations

use crate::api_errors::capture_errors;
use crate::error::{DnsMadeEasyError, Result, TransportError, require};
use crate::http_client::{ApiRequest, Transport};
use crate::records::{DnsRecord, records_from_json};
use crate::types::ApiOutcome;

use super::{DnsMadeEasy, decode_body, failure, log_failure, records_path};

impl<T: Transport> DnsMadeEasy<T> {
    /// List the records of a domain, optionally filtered by type and GTD location.
    ///
    /// Empty filters are treated as absent. Every returned record carries `domain`.
    pub async fn list_dns_records(
        &self,
        domain: &str,
        record_type: Option<&str>,
        gtd_location: Option<&str>,
    ) -> Result<ApiOutcome<Vec<DnsRecord>>> {
        require(domain, "domain")?;

        let operation = format!("Unable to retrieve DNS records for: {domain}.");
        let path = records_path(domain, record_type, gtd_location);
        let response = self.send(ApiRequest::get(path), &operation).await?;

        if response.status != 200 {
            return Ok(failure(&response, None, &operation));
        }

        let records: Vec<DnsRecord> = records_from_json(decode_body(&response, &operation)?)
            .into_iter()
            .map(|record| record.with_domain(domain))
            .collect();
        log::debug!("Found {} records for {domain}", records.len());
        Ok(ApiOutcome::Success(records))
    }

    /// Create a record. On success the value is the `x-dnsme-requestId` of the call.
    pub async fn add_dns_record(
        &self,
        domain: &str,
        record: Option<&DnsRecord>,
    ) -> Result<ApiOutcome<Option<String>>> {
        require(domain, "domain")?;
        let Some(record) = record else {
            log::warn!("Rejected call: record is required");
            return Err(DnsMadeEasyError::MissingArgument("record"));
        };

        let operation = format!("Unable to add DNS record: {} ({domain})", record.describe());
        let body = serde_json::to_string(record).map_err(|e| {
            DnsMadeEasyError::request(&operation, TransportError::Serialization(e.to_string()))
        })?;
        let response = self
            .send(ApiRequest::post(records_path(domain, None, None), body), &operation)
            .await?;

        if response.status == 201 {
            log::info!(
                "Added {} record '{}' to {domain}",
                record.record_type(),
                record.name()
            );
            return Ok(ApiOutcome::Success(response.request_id));
        }

        let mut errors = vec![operation.clone()];
        errors.extend(capture_errors(&response.body, response.status, Some(400)));
        log_failure(&operation, response.status, &errors);
        Ok(ApiOutcome::failure(response.status, errors))
    }
}
