//! Deployment environment and stack request model
//!
//! A [`StackRequest`] is built once from CLI arguments and passed by
//! reference to every operation. Stack names, template paths and parameter
//! file paths all default deterministically from the environment, so two
//! operators running the same command target the same stack.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Stack name prefix for the three-tier architecture stack
pub const THREE_TIER_PREFIX: &str = "three-tier-app";

/// Stack name prefix for the WAF protection stack
pub const WAF_PREFIX: &str = "waf-protection";

/// Stack name prefix for the WAF log-analysis dashboard stack
pub const DASHBOARD_PREFIX: &str = "waf-dashboard";

/// Default provisioning region
pub const DEFAULT_REGION: &str = "us-east-1";

/// Value of the Project tag applied to every stack
pub const PROJECT_TAG: &str = "three-tier-app";

/// Target deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => Err(CoreError::InvalidEnvironment(other.to_string())),
        }
    }
}

/// Immutable description of one stack operation target
///
/// Built once at startup; no field changes after construction. The
/// parameter file path is a function of the environment only, never of the
/// stack name override.
#[derive(Debug, Clone)]
pub struct StackRequest {
    pub environment: Environment,
    pub stack_name: String,
    pub region: String,
    pub template_path: PathBuf,
    pub parameters_path: PathBuf,
}

impl StackRequest {
    /// Request for the base three-tier architecture stack
    pub fn three_tier(
        environment: Environment,
        stack_name: Option<String>,
        region: Option<String>,
    ) -> Self {
        Self {
            environment,
            stack_name: stack_name
                .unwrap_or_else(|| default_stack_name(THREE_TIER_PREFIX, environment)),
            region: region.unwrap_or_else(|| DEFAULT_REGION.to_string()),
            template_path: PathBuf::from("cloudformation/three-tier-architecture.yaml"),
            parameters_path: PathBuf::from(format!("parameters/{}-parameters.json", environment)),
        }
    }

    /// Request for the WAF protection stack
    pub fn waf(
        environment: Environment,
        stack_name: Option<String>,
        region: Option<String>,
    ) -> Self {
        Self {
            environment,
            stack_name: stack_name.unwrap_or_else(|| default_stack_name(WAF_PREFIX, environment)),
            region: region.unwrap_or_else(|| DEFAULT_REGION.to_string()),
            template_path: PathBuf::from("cloudformation/waf-protection.yaml"),
            parameters_path: PathBuf::from(format!(
                "parameters/waf-{}-parameters.json",
                environment
            )),
        }
    }

    /// Request for the WAF dashboard stack
    ///
    /// The dashboard is only ever created as an add-on of the WAF stack, so
    /// teardown is the common case here; template and parameter paths are
    /// still populated for completeness.
    pub fn waf_dashboard(environment: Environment, region: Option<String>) -> Self {
        Self {
            environment,
            stack_name: default_stack_name(DASHBOARD_PREFIX, environment),
            region: region.unwrap_or_else(|| DEFAULT_REGION.to_string()),
            template_path: PathBuf::from("cloudformation/waf-dashboard.yaml"),
            parameters_path: PathBuf::from(format!(
                "parameters/waf-{}-parameters.json",
                environment
            )),
        }
    }

    /// Tag set submitted with create/update operations
    pub fn tags(&self) -> Vec<(String, String)> {
        vec![
            ("Environment".to_string(), self.environment.to_string()),
            ("Project".to_string(), PROJECT_TAG.to_string()),
        ]
    }
}

/// Deterministic default stack name: `<prefix>-<environment>`
pub fn default_stack_name(prefix: &str, environment: Environment) -> String {
    format!("{}-{}", prefix, environment)
}
