//! Domain operations

use serde_json::Value;

use crate::error::{Result, require};
use crate::http_client::{ApiRequest, Transport};
use crate::types::{ApiOutcome, Domain, DomainListing};

use super::{
    DnsMadeEasy, decode_body, decode_fault, domain_path, domains_path, failure, log_failure,
};

impl<T: Transport> DnsMadeEasy<T> {
    /// List all domains in the account.
    pub async fn list_domains(&self) -> Result<ApiOutcome<DomainListing>> {
        let operation = "Unable to retrieve domain listing.";
        let response = self.send(ApiRequest::get(domains_path()), operation).await?;

        if response.status == 200 {
            return Ok(ApiOutcome::Success(DomainListing::from_body(&response.body)));
        }
        Ok(failure(&response, None, operation))
    }

    /// Delete every domain in the account.
    pub async fn delete_all_domains(&self) -> Result<ApiOutcome<()>> {
        let operation = "Unable to delete all domains.";
        let response = self
            .send(ApiRequest::delete(domains_path()), operation)
            .await?;

        if response.status == 200 {
            log::info!("Deleted all domains");
            return Ok(ApiOutcome::Success(()));
        }
        Ok(failure(&response, None, operation))
    }

    /// Fetch one domain by name.
    pub async fn get_domain(&self, name: &str) -> Result<ApiOutcome<Domain>> {
        require(name, "domain")?;

        let operation = format!("Unable to retrieve domain info for: {name}.");
        let response = self
            .send(ApiRequest::get(domain_path(name)), &operation)
            .await?;

        if response.status == 200 {
            let value = decode_body(&response, &operation)?;
            let domain = Domain::from_value(value)
                .map_err(|e| decode_fault(&operation, &response.body, &e))?;
            return Ok(ApiOutcome::Success(domain));
        }
        Ok(failure(&response, None, &operation))
    }

    /// Delete one domain.
    ///
    /// The API answers 404 with an empty body for unknown domains, so that case
    /// gets a synthesized message instead of the captured ones.
    pub async fn delete_domain(&self, name: &str) -> Result<ApiOutcome<()>> {
        require(name, "domain")?;

        let operation = format!("Unable to delete domain: {name}.");
        let response = self
            .send(ApiRequest::delete(domain_path(name)), &operation)
            .await?;

        match response.status {
            200 => {
                log::info!("Deleted domain {name}");
                Ok(ApiOutcome::Success(()))
            }
            404 => {
                let errors = vec![format!("Unable to delete domain: {name}. Domain not found.")];
                log_failure(&operation, 404, &errors);
                Ok(ApiOutcome::failure(404, errors))
            }
            _ => Ok(failure(&response, None, &operation)),
        }
    }

    /// Create a domain.
    pub async fn add_domain(&self, name: &str) -> Result<ApiOutcome<Domain>> {
        require(name, "domain")?;

        let operation = format!("Unable to add domain: {name}.");
        let response = self
            .send(ApiRequest::put(domain_path(name)), &operation)
            .await?;

        if response.status == 201 {
            // An empty 201 body still means the domain exists.
            let domain = match decode_body(&response, &operation)? {
                Value::Null => Domain::named(name),
                value => Domain::from_value(value)
                    .map_err(|e| decode_fault(&operation, &response.body, &e))?,
            };
            log::info!("Added domain {}", domain.name);
            return Ok(ApiOutcome::Success(domain));
        }
        Ok(failure(&response, Some(400), &operation))
    }
}
