//! JSON format exporter.

use serde::Serialize;

use crate::error::ComparisonFailure;
use crate::report::PackageReport;
use crate::types::PackageDescription;

/// Export a package report to JSON.
pub fn export(report: &PackageReport, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
}

#[derive(Serialize)]
struct FailureDocument {
    description: PackageDescription,
    error: String,
    message: String,
}

/// Export a package-level failure to JSON, shaped like a report header.
pub fn export_failure(
    failure: &ComparisonFailure,
    pretty: bool,
) -> Result<String, serde_json::Error> {
    let document = FailureDocument {
        description: PackageDescription {
            package_id: failure.package_id.clone(),
            versions: failure.versions.clone(),
        },
        error: failure.report_text(),
        message: failure.message(),
    };
    if pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FactsProviderError;
    use crate::report::fixtures::acme_report;
    use std::path::PathBuf;

    #[test]
    fn test_export_json() {
        let output = export(&acme_report(), false).unwrap();
        assert!(output.contains("\"package_id\":\"Acme.Lib\""));
        assert!(output.contains("\"missing_types\":[\"Acme.Lib.Gadget\"]"));
        assert!(output.contains("\"compare_set_identity\":\"Acme.Dup\""));
    }

    #[test]
    fn test_export_json_pretty() {
        let output = export(&acme_report(), true).unwrap();
        assert!(output.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["compare_sets"][0]["missing"]["types"][0]["methods"][0], "Stop()");
    }

    #[test]
    fn test_export_failure() {
        let failure = ComparisonFailure::new(
            &PackageDescription::new("Acme.Lib", "1.0.0", "2.0.0"),
            FactsProviderError::NotFound {
                module: PathBuf::from("1.0.0/Acme.Lib.json"),
            },
        );

        let output = export_failure(&failure, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["description"]["package_id"], "Acme.Lib");
        assert_eq!(value["description"]["versions"]["right_version"], "2.0.0");
        assert!(value["error"]
            .as_str()
            .unwrap()
            .starts_with("Acme.Lib comparison between 1.0.0 and 2.0.0 has failed"));
        assert!(value["message"].as_str().unwrap().contains("Acme.Lib.json"));
    }
}
