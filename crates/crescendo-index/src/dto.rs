//! Wire DTOs for the release index API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crescendo_entity::release::{Release, ReleaseState};

/// Request body for the release query endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleasesRequest {
    /// Artist names to match.
    pub artists: Vec<String>,
    /// First day of the query window (inclusive).
    pub date_from: NaiveDate,
    /// Last day of the query window (inclusive); omitted means unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
}

/// Response body of the release query endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleasesResponse {
    /// The matching releases.
    pub releases: Vec<ReleaseDto>,
}

/// One release as the index reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDto {
    /// The releasing artist's name.
    pub artist: String,
    /// Title of the release.
    pub album_title: String,
    /// The day the release comes out.
    pub release_date: NaiveDate,
    /// The day the release was announced.
    pub announcement_date: NaiveDate,
    /// Lifecycle state.
    pub state: ReleaseState,
    /// Reissue flag.
    #[serde(default)]
    pub reissue: bool,
}

impl From<ReleaseDto> for Release {
    fn from(dto: ReleaseDto) -> Self {
        Self {
            artist: dto.artist,
            album_title: dto.album_title,
            release_date: dto.release_date,
            announcement_date: dto.announcement_date,
            state: dto.state,
            reissue: dto.reissue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_index_payload() {
        let json = r#"{
            "releases": [{
                "artist": "Opeth",
                "albumTitle": "Damnation",
                "releaseDate": "2024-06-24",
                "announcementDate": "2024-03-01",
                "state": "OK",
                "reissue": true
            }]
        }"#;
        let response: ReleasesResponse = serde_json::from_str(json).expect("deserialize");
        let release: Release = response.releases[0].clone().into();
        assert_eq!(release.artist, "Opeth");
        assert_eq!(release.state, ReleaseState::Ok);
        assert!(release.reissue);
    }

    #[test]
    fn test_request_omits_unbounded_date_to() {
        let request = ReleasesRequest {
            artists: vec!["Opeth".to_string()],
            date_from: NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
            date_to: None,
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert!(json.get("dateTo").is_none());
        assert_eq!(json["dateFrom"], "2024-06-14");
    }
}
