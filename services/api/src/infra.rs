use metrics_exporter_prometheus::PrometheusHandle;
use org_realign::error::AppError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Reads and parses a JSON input file given on the command line.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use org_realign::assessment::AssessmentData;
    use std::io::Write;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{name}", std::process::id()));
        let mut file = std::fs::File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        path
    }

    #[test]
    fn read_json_parses_assessments() {
        let path = temp_file(
            "assessment.json",
            r#"{"id": "a-1", "responses": []}"#,
        );
        let data: AssessmentData = read_json(&path).expect("valid assessment");
        assert_eq!(data.id.0, "a-1");
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn read_json_reports_malformed_input() {
        let path = temp_file("broken.json", "{");
        let result: Result<AssessmentData, _> = read_json(&path);
        assert!(matches!(result, Err(AppError::Input(_))));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn read_json_reports_missing_files() {
        let result: Result<AssessmentData, _> = read_json(Path::new("/nonexistent/input.json"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
