//! Catalog sources and load-time validation
//!
//! The catalog is a static, versioned JSON asset. A snapshot is embedded in the
//! binary; deployments can point `CATALOG_PATH` at a newer file instead.

use std::collections::HashSet;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::{Catalog, QuotaUnit};

/// Snapshot shipped with the binary
const EMBEDDED_SNAPSHOT: &str = include_str!("../../data/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Catalog contains no platforms")]
    Empty,
    #[error("Duplicate platform name: {0}")]
    DuplicatePlatform(String),
    #[error("Platform {0} has no plans")]
    NoPlans(String),
    #[error("Platform {platform} has duplicate plan name: {plan}")]
    DuplicatePlan { platform: String, plan: String },
    #[error("Plan {platform}/{plan} has no options")]
    NoOptions { platform: String, plan: String },
    #[error("Invalid value for {field} in {location}")]
    InvalidValue { location: String, field: &'static str },
}

/// Where the raw catalog document comes from
#[cfg_attr(test, mockall::automock)]
pub trait CatalogSource: Send + Sync {
    /// Returns the raw JSON document
    fn read(&self) -> Result<String, CatalogError>;

    /// Source description for logging
    fn describe(&self) -> String;
}

/// The snapshot compiled into the binary
pub struct EmbeddedCatalog;

impl CatalogSource for EmbeddedCatalog {
    fn read(&self) -> Result<String, CatalogError> {
        Ok(EMBEDDED_SNAPSHOT.to_string())
    }

    fn describe(&self) -> String {
        "embedded snapshot".to_string()
    }
}

/// A catalog file on disk
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalog {
    fn read(&self) -> Result<String, CatalogError> {
        std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Reads, parses and validates a catalog
pub fn load_catalog(source: &dyn CatalogSource) -> Result<Catalog, CatalogError> {
    let raw = source.read()?;
    let catalog: Catalog = serde_json::from_str(&raw)?;
    validate(&catalog)?;

    tracing::info!(
        source = %source.describe(),
        version = %catalog.version,
        snapshot_date = %catalog.snapshot_date,
        platforms = catalog.platforms.len(),
        plans = catalog.plan_count(),
        options = catalog.triples().count(),
        "Catalog loaded"
    );

    Ok(catalog)
}

/// Rejects structural defects; quota/unit mismatches are only logged since
/// the engine prices them as unbounded
pub fn validate(catalog: &Catalog) -> Result<(), CatalogError> {
    if catalog.platforms.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut platform_names = HashSet::new();
    for platform in &catalog.platforms {
        if !platform_names.insert(platform.name.as_str()) {
            return Err(CatalogError::DuplicatePlatform(platform.name.clone()));
        }
        if platform.plans.is_empty() {
            return Err(CatalogError::NoPlans(platform.name.clone()));
        }
        require(platform.setup_days >= 0.0, &platform.name, "setup_days")?;

        let mut plan_names = HashSet::new();
        for plan in &platform.plans {
            let location = format!("{}/{}", platform.name, plan.name);

            if !plan_names.insert(plan.name.as_str()) {
                return Err(CatalogError::DuplicatePlan {
                    platform: platform.name.clone(),
                    plan: plan.name.clone(),
                });
            }
            if plan.options.is_empty() {
                return Err(CatalogError::NoOptions {
                    platform: platform.name.clone(),
                    plan: plan.name.clone(),
                });
            }

            require(plan.monthly_cost >= 0.0, &location, "monthly_cost")?;
            require(plan.gui_parallel > 0, &location, "gui_parallel")?;
            require(plan.api_parallel != Some(0), &location, "api_parallel")?;
            require(plan.avg_time_per_clip_min > 0.0, &location, "avg_time_per_clip_min")?;

            if (plan.quota_unit == QuotaUnit::Unlimited) != (plan.quota == 0) {
                tracing::warn!(
                    plan = %location,
                    quota = plan.quota,
                    quota_unit = ?plan.quota_unit,
                    "Quota does not match its unit, options on this plan will be priced as unbounded"
                );
            }

            for option in &plan.options {
                let location = format!("{}/{}", location, option.id);
                require(option.max_duration_sec > 0.0, &location, "max_duration_sec")?;
                require(option.cost.average() >= 0.0, &location, "cost")?;
            }
        }
    }

    Ok(())
}

fn require(condition: bool, location: &str, field: &'static str) -> Result<(), CatalogError> {
    if condition {
        Ok(())
    } else {
        Err(CatalogError::InvalidValue {
            location: location.to_string(),
            field,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quantity;
    use crate::services::units;

    fn document(plans: &str) -> String {
        format!(
            r#"{{
                "version": "test",
                "snapshot_date": "2025-06-01",
                "platforms": [{{
                    "name": "Kestrel",
                    "api_access": "full",
                    "setup_days": 0.5,
                    "tech_level": "intermediate",
                    "reputation": "recognized",
                    "plans": {}
                }}]
            }}"#,
            plans
        )
    }

    const VALID_PLAN: &str = r#"[{
        "name": "Standard",
        "tier": "standard",
        "monthly_cost": 10.0,
        "quota": 660,
        "quota_unit": "credits",
        "gui_parallel": 2,
        "api_parallel": 4,
        "avg_time_per_clip_min": 4.0,
        "options": [{
            "id": "kestrel-v2",
            "name": "Kestrel v2",
            "max_duration_sec": 5,
            "resolution": "1080p",
            "audio": false,
            "cost_unit": "credits",
            "cost": [8, 12],
            "features": ["keyframe-editor"]
        }]
    }]"#;

    fn mock_source(document: String) -> MockCatalogSource {
        let mut source = MockCatalogSource::new();
        source.expect_read().times(1).returning(move || Ok(document.clone()));
        source
            .expect_describe()
            .returning(|| "mock".to_string());
        source
    }

    #[test]
    fn test_embedded_snapshot_is_valid() {
        let catalog = load_catalog(&EmbeddedCatalog).unwrap();
        assert!(!catalog.platforms.is_empty());
        assert!(catalog.triples().count() >= catalog.platforms.len());

        for (platform, plan, option) in catalog.triples() {
            let cps = units::cost_per_second(option, plan);
            assert!(
                cps >= Quantity::ZERO,
                "{}/{}/{} priced at {}",
                platform.name,
                plan.name,
                option.id,
                cps
            );
        }
    }

    #[test]
    fn test_load_valid_document() {
        let source = mock_source(document(VALID_PLAN));
        let catalog = load_catalog(&source).unwrap();

        assert_eq!(catalog.version, "test");
        let platform = catalog.platform("Kestrel").unwrap();
        assert_eq!(platform.plans[0].api_parallel, Some(4));
        assert_eq!(platform.plans[0].options[0].cost.average(), 10.0);
    }

    #[test]
    fn test_platform_without_plans_rejected() {
        let source = mock_source(document("[]"));
        assert!(matches!(
            load_catalog(&source),
            Err(CatalogError::NoPlans(name)) if name == "Kestrel"
        ));
    }

    #[test]
    fn test_plan_without_options_rejected() {
        let plans = VALID_PLAN.replacen(
            r#""options": [{"#,
            r#""options": [], "unused": [{"#,
            1,
        );
        let source = mock_source(document(&plans));
        assert!(matches!(
            load_catalog(&source),
            Err(CatalogError::NoOptions { .. })
        ));
    }

    #[test]
    fn test_zero_clip_time_rejected() {
        let plans = VALID_PLAN.replace(
            r#""avg_time_per_clip_min": 4.0"#,
            r#""avg_time_per_clip_min": 0"#,
        );
        let source = mock_source(document(&plans));
        assert!(matches!(
            load_catalog(&source),
            Err(CatalogError::InvalidValue {
                field: "avg_time_per_clip_min",
                ..
            })
        ));
    }

    #[test]
    fn test_quota_mismatch_is_tolerated() {
        let plans = VALID_PLAN.replace(r#""quota": 660"#, r#""quota": 0"#);
        let source = mock_source(document(&plans));
        assert!(load_catalog(&source).is_ok());
    }

    #[test]
    fn test_malformed_json() {
        let source = mock_source("{ not json".to_string());
        assert!(matches!(load_catalog(&source), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_read_failure_propagates() {
        let mut source = MockCatalogSource::new();
        source.expect_read().returning(|| Err(CatalogError::Empty));
        assert!(matches!(load_catalog(&source), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_missing_file() {
        let source = FileCatalog::new("/nonexistent/catalog.json");
        assert!(matches!(load_catalog(&source), Err(CatalogError::Io { .. })));
    }
}
