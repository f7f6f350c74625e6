use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON or YAML file as a generic serde_json::Value.
///
/// `.yaml` / `.yml` files are parsed as YAML; everything else as JSON.
pub fn read_document_value(path: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    let value = if is_yaml(&canonical) {
        serde_yaml::from_str::<Value>(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str::<Value>(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };
    Ok(value)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Resolve and validate the path.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_detected_by_extension() {
        assert!(is_yaml(Path::new("factors.yaml")));
        assert!(is_yaml(Path::new("/tmp/app.yml")));
        assert!(!is_yaml(Path::new("factors.json")));
        assert!(!is_yaml(Path::new("factors")));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = read_document_value("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_reads_yaml_factors() {
        let path = std::env::temp_dir().join(format!("tfe-factors-{}.yaml", std::process::id()));
        fs::write(&path, "totalAssets: 1000\nsales: 900\nonTimePaymentRate: 0.9\n").unwrap();
        let value = read_document_value(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(value["totalAssets"], serde_json::json!(1000));
        assert_eq!(value["onTimePaymentRate"], serde_json::json!(0.9));
    }
}
