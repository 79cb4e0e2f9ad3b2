//! Pure steps from a fetched job opening to embedding input.
//!
//! `fetch → extract_job_info → SimilarityPayload::from → prepare_embedding_text`
//! Only the first step touches the network.

use crate::errors::RecruitError;
use crate::recruit::{extract_job_info, JobRecord, RecruitClient};
use crate::text::clean_description;

/// Job fields kept alongside the text for similarity work
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMetadata {
    pub salary: String,
    pub status: String,
    pub remote: bool,
    pub experience_required: String,
    pub client: String,
}

/// Markup-free view of a job opening, ready to be embedded
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityPayload {
    pub job_id: String,
    pub requisition_number: String,
    pub title: String,
    pub clean_description: String,
    pub raw_description: String,
    pub metadata: SimilarityMetadata,
}

impl From<&JobRecord> for SimilarityPayload {
    fn from(job: &JobRecord) -> Self {
        Self {
            job_id: job.job_id.clone(),
            requisition_number: job.requisition_number.clone(),
            title: job.job_title.clone(),
            clean_description: clean_description(&job.job_description),
            raw_description: job.job_description.clone(),
            metadata: SimilarityMetadata {
                salary: job.salary.clone(),
                status: job.status.clone(),
                remote: job.remote_job,
                experience_required: job.work_experience.clone(),
                client: job.client_name.clone(),
            },
        }
    }
}

/// Fetches a job opening and turns it into a similarity payload.
///
/// `Ok(None)` means the platform answered but had no record to offer.
pub async fn job_for_similarity(
    client: &RecruitClient,
    job_id: &str,
) -> Result<Option<SimilarityPayload>, RecruitError> {
    let raw = client.fetch_job(job_id).await?;
    Ok(extract_job_info(&raw).map(|job| SimilarityPayload::from(&job)))
}
