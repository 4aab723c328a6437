use crate::domain::model::{ProbeReport, QueryRequest};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn query_request(&self) -> QueryRequest;
    fn timeout(&self) -> Option<Duration>;
    fn headers(&self) -> &[(String, String)];
    fn cancel_after(&self) -> Option<Duration>;
}

#[async_trait]
pub trait Probe: Send + Sync {
    fn endpoint(&self) -> &str;
    async fn probe(&self) -> Result<ProbeReport>;
}
