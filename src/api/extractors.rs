use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};

use crate::api::error::ApiError;
use crate::finance_store::models::{FinanceSnapshot, SnapshotPayload};

/// Decodes a save request into a [`FinanceSnapshot`], filling every omitted
/// optional field with its default. Undecodable bodies surface as [`ApiError`]
/// so they share the `{success:false,message}` envelope.
pub struct SnapshotExtractor(pub FinanceSnapshot);

#[async_trait]
impl<S> FromRequest<S> for SnapshotExtractor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<SnapshotPayload>::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_payload(format!("Failed to parse JSON: {}", e.body_text())))?;

        Ok(SnapshotExtractor(FinanceSnapshot::from(payload)))
    }
}
