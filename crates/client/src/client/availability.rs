//! Availability API operations.

use reqwest::Method;

use super::{decode, CalderaClient};
use crate::error::Result;
use caldera_core::availability::{AvailabilityRequest, AvailabilityResponse, AvailablePeriodResult};

impl CalderaClient {
    /// Periods in which the requested participants are available.
    pub fn availability(
        &self,
        request: &AvailabilityRequest,
    ) -> Result<Vec<AvailablePeriodResult>> {
        let response = self.send_json(Method::POST, "/v1/availability", request)?;
        let body: AvailabilityResponse = decode(&response)?;
        Ok(body.available_periods)
    }
}
