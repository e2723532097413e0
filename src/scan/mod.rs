pub mod barcode;
pub mod flow;

pub use barcode::BarcodeError;
pub use flow::{LookupState, ResolvedProduct, ScanFlow, ScanKind, ScanStage};
