//! Scan flow state machine backing the scan screens. One instance models a
//! single flow; cancellation discards it and a fresh flow starts at `Ready`.

use thiserror::Error;

use crate::items::{catalog, Item};
use crate::scan::barcode::{self, BarcodeError};

/// What the flow is scanning for. Receipt scans end at `Success` and the
/// caller awards a deterministic point value through the balance engine;
/// product scans continue into the lookup sub-states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanKind {
    Receipt,
    Product,
}

/// Product resolved by a lookup, from the catalog or the fallback list.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProduct {
    pub barcode: i64,
    pub name: String,
    pub points: i64,
}

impl From<&Item> for ResolvedProduct {
    fn from(item: &Item) -> Self {
        Self {
            barcode: item.barcode,
            name: item.name.clone(),
            points: item.credit_value,
        }
    }
}

impl From<&catalog::FallbackProduct> for ResolvedProduct {
    fn from(product: &catalog::FallbackProduct) -> Self {
        Self {
            barcode: product.barcode,
            name: product.name.to_string(),
            points: product.points,
        }
    }
}

/// Catalog-then-fallback resolution: a missing catalog item is retried
/// against the static product list before reporting not-found.
pub fn resolve_catalog_hit(item: Option<&Item>, barcode: i64) -> Option<ResolvedProduct> {
    item.map(ResolvedProduct::from)
        .or_else(|| catalog::find_fallback(barcode).map(ResolvedProduct::from))
}

/// Lookup sub-states of a product scan.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupState {
    Loading,
    Found(ResolvedProduct),
    NotFound,
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanStage {
    /// Idle; accepts a camera trigger or manual entry. Carries the message
    /// of the last failed attempt, if any.
    Ready { error: Option<String> },
    /// Camera is held.
    Scanning,
    /// A code was captured. Product scans carry the lookup sub-state.
    Success {
        barcode: i64,
        lookup: Option<LookupState>,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScanFlowError {
    #[error(transparent)]
    Validation(#[from] BarcodeError),

    #[error("cannot {action} while {stage}")]
    InvalidTransition {
        stage: &'static str,
        action: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct ScanFlow {
    kind: ScanKind,
    stage: ScanStage,
    camera_held: bool,
}

impl ScanFlow {
    pub fn new(kind: ScanKind) -> Self {
        Self {
            kind,
            stage: ScanStage::Ready { error: None },
            camera_held: false,
        }
    }

    pub fn kind(&self) -> ScanKind {
        self.kind
    }

    pub fn stage(&self) -> &ScanStage {
        &self.stage
    }

    /// Whether the camera resource is currently acquired.
    pub fn camera_held(&self) -> bool {
        self.camera_held
    }

    pub fn completed_barcode(&self) -> Option<i64> {
        match self.stage {
            ScanStage::Success { barcode, .. } => Some(barcode),
            _ => None,
        }
    }

    fn stage_name(&self) -> &'static str {
        match self.stage {
            ScanStage::Ready { .. } => "ready",
            ScanStage::Scanning => "scanning",
            ScanStage::Success { .. } => "finished",
        }
    }

    fn invalid(&self, action: &'static str) -> ScanFlowError {
        ScanFlowError::InvalidTransition {
            stage: self.stage_name(),
            action,
        }
    }

    fn succeed(&mut self, code: i64) {
        let lookup = match self.kind {
            ScanKind::Receipt => None,
            ScanKind::Product => Some(LookupState::Loading),
        };
        self.stage = ScanStage::Success {
            barcode: code,
            lookup,
        };
    }

    /// Starts the camera. Only valid while idle.
    pub fn begin_camera(&mut self) -> Result<(), ScanFlowError> {
        match self.stage {
            ScanStage::Ready { .. } => {
                self.camera_held = true;
                self.stage = ScanStage::Scanning;
                Ok(())
            }
            _ => Err(self.invalid("start the camera")),
        }
    }

    /// The camera captured a code. Releases the camera; an unparsable
    /// capture falls back to `Ready` with the validation message.
    pub fn camera_scanned(&mut self, code: &str) -> Result<i64, ScanFlowError> {
        if self.stage != ScanStage::Scanning {
            return Err(self.invalid("deliver a scan"));
        }
        self.camera_held = false;
        match barcode::parse(code) {
            Ok(parsed) => {
                self.succeed(parsed);
                Ok(parsed)
            }
            Err(e) => {
                self.stage = ScanStage::Ready {
                    error: Some(e.to_string()),
                };
                Err(e.into())
            }
        }
    }

    /// Camera cancellation or failure. Releases the camera and returns to
    /// `Ready` carrying the error message.
    pub fn camera_failed(&mut self, message: impl Into<String>) -> Result<(), ScanFlowError> {
        if self.stage != ScanStage::Scanning {
            return Err(self.invalid("report a camera failure"));
        }
        self.camera_held = false;
        self.stage = ScanStage::Ready {
            error: Some(message.into()),
        };
        Ok(())
    }

    /// Manual numeric entry from the idle screen. Invalid input keeps the
    /// flow in `Ready` with the validation message.
    pub fn submit_manual(&mut self, input: &str) -> Result<i64, ScanFlowError> {
        if !matches!(self.stage, ScanStage::Ready { .. }) {
            return Err(self.invalid("enter a barcode"));
        }
        match barcode::parse(input) {
            Ok(parsed) => {
                self.succeed(parsed);
                Ok(parsed)
            }
            Err(e) => {
                self.stage = ScanStage::Ready {
                    error: Some(e.to_string()),
                };
                Err(e.into())
            }
        }
    }

    fn lookup_mut(&mut self, action: &'static str) -> Result<&mut LookupState, ScanFlowError> {
        let invalid = self.invalid(action);
        match &mut self.stage {
            ScanStage::Success {
                lookup: Some(lookup),
                ..
            } => Ok(lookup),
            _ => Err(invalid),
        }
    }

    /// Resolves the pending lookup with the catalog-then-fallback result.
    pub fn resolve_lookup(
        &mut self,
        product: Option<ResolvedProduct>,
    ) -> Result<(), ScanFlowError> {
        let lookup = self.lookup_mut("resolve a lookup")?;
        if *lookup != LookupState::Loading {
            return Err(ScanFlowError::InvalidTransition {
                stage: "finished",
                action: "resolve a lookup",
            });
        }
        *lookup = match product {
            Some(p) => LookupState::Found(p),
            None => LookupState::NotFound,
        };
        Ok(())
    }

    /// Fails the pending lookup with an error message.
    pub fn fail_lookup(&mut self, message: impl Into<String>) -> Result<(), ScanFlowError> {
        let message = message.into();
        let lookup = self.lookup_mut("fail a lookup")?;
        if *lookup != LookupState::Loading {
            return Err(ScanFlowError::InvalidTransition {
                stage: "finished",
                action: "fail a lookup",
            });
        }
        *lookup = LookupState::Error { message };
        Ok(())
    }

    /// Retries a missed or failed lookup. Returns to the lookup's loading
    /// state, not to the scan states.
    pub fn retry_lookup(&mut self) -> Result<(), ScanFlowError> {
        let lookup = self.lookup_mut("retry a lookup")?;
        match lookup {
            LookupState::NotFound | LookupState::Error { .. } => {
                *lookup = LookupState::Loading;
                Ok(())
            }
            _ => Err(ScanFlowError::InvalidTransition {
                stage: "finished",
                action: "retry a lookup",
            }),
        }
    }

    /// Aborts the whole flow from any state, discarding transient state and
    /// releasing the camera if it was held.
    pub fn cancel(&mut self) {
        self.camera_held = false;
        self.stage = ScanStage::Ready { error: None };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_error(flow: &ScanFlow) -> Option<&str> {
        match flow.stage() {
            ScanStage::Ready { error } => error.as_deref(),
            _ => None,
        }
    }

    #[test]
    fn manual_entry_goes_straight_to_success() {
        let mut flow = ScanFlow::new(ScanKind::Receipt);
        assert_eq!(flow.submit_manual("12345678").unwrap(), 12345678);
        assert_eq!(flow.completed_barcode(), Some(12345678));
        // Receipt scans have no lookup sub-state.
        assert!(matches!(
            flow.stage(),
            ScanStage::Success { lookup: None, .. }
        ));
    }

    #[test]
    fn invalid_manual_entry_stays_ready_with_message() {
        let mut flow = ScanFlow::new(ScanKind::Product);
        assert!(flow.submit_manual("1234").is_err());
        assert_eq!(ready_error(&flow), Some("Barcode should be 8-13 digits long"));

        assert!(flow.submit_manual("abc12345").is_err());
        assert_eq!(ready_error(&flow), Some("Barcode should only contain numbers"));

        // Still usable after failed attempts.
        assert!(flow.submit_manual("12345678").is_ok());
    }

    #[test]
    fn camera_scan_happy_path() {
        let mut flow = ScanFlow::new(ScanKind::Product);
        flow.begin_camera().unwrap();
        assert!(flow.camera_held());
        assert_eq!(flow.stage(), &ScanStage::Scanning);

        flow.camera_scanned("5700000000001").unwrap();
        assert!(!flow.camera_held());
        assert!(matches!(
            flow.stage(),
            ScanStage::Success {
                barcode: 5700000000001,
                lookup: Some(LookupState::Loading),
            }
        ));
    }

    #[test]
    fn camera_failure_returns_to_ready_and_releases_camera() {
        let mut flow = ScanFlow::new(ScanKind::Product);
        flow.begin_camera().unwrap();
        flow.camera_failed("Scanning was cancelled").unwrap();
        assert!(!flow.camera_held());
        assert_eq!(ready_error(&flow), Some("Scanning was cancelled"));
    }

    #[test]
    fn camera_cannot_start_twice() {
        let mut flow = ScanFlow::new(ScanKind::Product);
        flow.begin_camera().unwrap();
        assert!(flow.begin_camera().is_err());
    }

    #[test]
    fn manual_entry_is_rejected_mid_scan() {
        let mut flow = ScanFlow::new(ScanKind::Product);
        flow.begin_camera().unwrap();
        let err = flow.submit_manual("12345678").unwrap_err();
        assert_eq!(err.to_string(), "cannot enter a barcode while scanning");
    }

    #[test]
    fn product_lookup_found_via_fallback() {
        let mut flow = ScanFlow::new(ScanKind::Product);
        flow.submit_manual("5700000000002").unwrap();

        // No catalog row; the fallback list still knows the barcode.
        let hit = resolve_catalog_hit(None, 5700000000002);
        flow.resolve_lookup(hit.clone()).unwrap();

        let hit = hit.unwrap();
        assert_eq!(hit.name, "Bananas");
        assert_eq!(hit.points, 6);
        assert!(matches!(
            flow.stage(),
            ScanStage::Success {
                lookup: Some(LookupState::Found(_)),
                ..
            }
        ));
    }

    #[test]
    fn product_lookup_not_found_then_retry() {
        let mut flow = ScanFlow::new(ScanKind::Product);
        flow.submit_manual("99999999").unwrap();

        flow.resolve_lookup(resolve_catalog_hit(None, 99999999)).unwrap();
        assert!(matches!(
            flow.stage(),
            ScanStage::Success {
                lookup: Some(LookupState::NotFound),
                ..
            }
        ));

        // Retry goes back to the lookup's loading state, not the scan state.
        flow.retry_lookup().unwrap();
        assert!(matches!(
            flow.stage(),
            ScanStage::Success {
                lookup: Some(LookupState::Loading),
                ..
            }
        ));
    }

    #[test]
    fn product_lookup_error_then_retry() {
        let mut flow = ScanFlow::new(ScanKind::Product);
        flow.submit_manual("12345678").unwrap();
        flow.fail_lookup("Unable to fetch product details. Please try again.")
            .unwrap();
        assert!(matches!(
            flow.stage(),
            ScanStage::Success {
                lookup: Some(LookupState::Error { .. }),
                ..
            }
        ));

        flow.retry_lookup().unwrap();
        assert!(matches!(
            flow.stage(),
            ScanStage::Success {
                lookup: Some(LookupState::Loading),
                ..
            }
        ));
    }

    #[test]
    fn found_lookup_cannot_retry() {
        let mut flow = ScanFlow::new(ScanKind::Product);
        flow.submit_manual("5700000000001").unwrap();
        flow.resolve_lookup(resolve_catalog_hit(None, 5700000000001))
            .unwrap();
        assert!(flow.retry_lookup().is_err());
    }

    #[test]
    fn receipt_success_has_no_lookup_to_resolve() {
        let mut flow = ScanFlow::new(ScanKind::Receipt);
        flow.submit_manual("12345678").unwrap();
        assert!(flow.resolve_lookup(None).is_err());
        assert!(flow.retry_lookup().is_err());
    }

    #[test]
    fn cancel_resets_everything_from_any_state() {
        let mut flow = ScanFlow::new(ScanKind::Product);
        flow.begin_camera().unwrap();
        flow.cancel();
        assert!(!flow.camera_held());
        assert_eq!(flow.stage(), &ScanStage::Ready { error: None });

        flow.submit_manual("12345678").unwrap();
        flow.cancel();
        assert_eq!(flow.stage(), &ScanStage::Ready { error: None });
        assert_eq!(flow.completed_barcode(), None);
    }

    #[test]
    fn catalog_hit_prefers_the_database_item() {
        use rust_decimal_macros::dec;
        use uuid::Uuid;

        let item = Item {
            id: Uuid::new_v4(),
            barcode: 5700000000001,
            name: "Organic Apples".into(),
            price: dec!(24.50),
            category: "produce".into(),
            credit_value: 8,
            healthy: true,
        };
        let hit = resolve_catalog_hit(Some(&item), 5700000000001).unwrap();
        assert_eq!(hit.name, "Organic Apples");
        assert_eq!(hit.points, 8);
    }
}
