use super::resource::{HubView, ResourceMetadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a scan summary (one BOM import job) on the hub.
///
/// Every status is either pending or done; the error statuses are a subset of
/// the done ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanSummaryStatus {
    Unstarted,
    Scanning,
    SavingScanData,
    ScanDataSaveComplete,
    RequestedMatchJob,
    Matching,
    BomVersionCheck,
    BuildingBom,
    Complete,
    Cancelled,
    Cloned,
    ErrorScanning,
    ErrorSavingScanData,
    ErrorMatching,
    ErrorBuildingBom,
    Error,
}

impl ScanSummaryStatus {
    pub const ALL: [ScanSummaryStatus; 16] = [
        Self::Unstarted,
        Self::Scanning,
        Self::SavingScanData,
        Self::ScanDataSaveComplete,
        Self::RequestedMatchJob,
        Self::Matching,
        Self::BomVersionCheck,
        Self::BuildingBom,
        Self::Complete,
        Self::Cancelled,
        Self::Cloned,
        Self::ErrorScanning,
        Self::ErrorSavingScanData,
        Self::ErrorMatching,
        Self::ErrorBuildingBom,
        Self::Error,
    ];

    pub fn is_pending(self) -> bool {
        matches!(
            self,
            Self::Unstarted
                | Self::Scanning
                | Self::SavingScanData
                | Self::ScanDataSaveComplete
                | Self::RequestedMatchJob
                | Self::Matching
                | Self::BomVersionCheck
                | Self::BuildingBom
        )
    }

    pub fn is_done(self) -> bool {
        !self.is_pending()
    }

    /// Cancelled counts as an error: the BOM was never built.
    pub fn is_error(self) -> bool {
        matches!(
            self,
            Self::Cancelled
                | Self::ErrorScanning
                | Self::ErrorSavingScanData
                | Self::ErrorMatching
                | Self::ErrorBuildingBom
                | Self::Error
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unstarted => "UNSTARTED",
            Self::Scanning => "SCANNING",
            Self::SavingScanData => "SAVING_SCAN_DATA",
            Self::ScanDataSaveComplete => "SCAN_DATA_SAVE_COMPLETE",
            Self::RequestedMatchJob => "REQUESTED_MATCH_JOB",
            Self::Matching => "MATCHING",
            Self::BomVersionCheck => "BOM_VERSION_CHECK",
            Self::BuildingBom => "BUILDING_BOM",
            Self::Complete => "COMPLETE",
            Self::Cancelled => "CANCELLED",
            Self::Cloned => "CLONED",
            Self::ErrorScanning => "ERROR_SCANNING",
            Self::ErrorSavingScanData => "ERROR_SAVING_SCAN_DATA",
            Self::ErrorMatching => "ERROR_MATCHING",
            Self::ErrorBuildingBom => "ERROR_BUILDING_BOM",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for ScanSummaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scan summary as returned by a code location's `scans` link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummaryView {
    pub status: ScanSummaryStatus,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "_meta", default)]
    pub meta: ResourceMetadata,
}

impl HubView for ScanSummaryView {
    fn meta(&self) -> &ResourceMetadata {
        &self.meta
    }
}
