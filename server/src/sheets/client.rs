//! Sheet Service Client
//!
//! One GET per fetch against the external sheet service; any non-success
//! status is a fetch failure. No retries.

use super::Sheet;

/// Fetch a sheet by id.
pub async fn fetch_sheet(
    http: &reqwest::Client,
    base_url: &str,
    sheet_id: &str,
) -> reqwest::Result<Sheet> {
    http.get(format!("{base_url}/{sheet_id}"))
        .send()
        .await?
        .error_for_status()?
        .json::<Sheet>()
        .await
}
