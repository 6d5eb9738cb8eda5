//! Package classification by job kind.

use cimatrix_core::JobKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Packages outside the integration module that still run as integration tests.
const FLAGGED_INTEGRATION_PACKAGES: &[&str] = &[
    "github.com/pulumi/pulumi/pkg/v3/cmd/pulumi",
    "github.com/pulumi/pulumi/pkg/v3/codegen/testing/utils",
    "github.com/pulumi/pulumi/pkg/v3/graph/dotconv",
    "github.com/pulumi/pulumi/pkg/v3/testing/integration",
    "github.com/pulumi/pulumi/sdk/v3/go/auto",
    "github.com/pulumi/pulumi/sdk/v3/go/auto/debug",
    "github.com/pulumi/pulumi/sdk/v3/go/auto/optdestroy",
    "github.com/pulumi/pulumi/sdk/v3/go/auto/optremove",
    "github.com/pulumi/pulumi/sdk/v3/go/common/constant",
    "github.com/pulumi/pulumi/sdk/v3/go/common/util/retry",
    "github.com/pulumi/pulumi/sdk/v3/nodejs/npm",
];

/// Rules deciding which packages hold integration tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierRules {
    /// Every package under this root belongs to the integration module.
    pub integration_prefix: String,
    /// Individually flagged integration packages.
    pub integration_packages: BTreeSet<String>,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            integration_prefix: "github.com/pulumi/pulumi/tests".to_string(),
            integration_packages: FLAGGED_INTEGRATION_PACKAGES
                .iter()
                .map(|pkg| pkg.to_string())
                .collect(),
        }
    }
}

/// Filters discovered packages down to the requested job kind.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    rules: ClassifierRules,
}

impl Classifier {
    pub fn new(rules: ClassifierRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ClassifierRules {
        &self.rules
    }

    pub fn is_integration_test(&self, package: &str) -> bool {
        package.starts_with(&self.rules.integration_prefix)
            || self.rules.integration_packages.contains(package)
    }

    pub fn classify(&self, kind: JobKind, packages: BTreeSet<String>) -> BTreeSet<String> {
        match kind {
            JobKind::IntegrationTest => packages
                .into_iter()
                .filter(|pkg| self.is_integration_test(pkg))
                .collect(),
            JobKind::UnitTest => packages
                .into_iter()
                .filter(|pkg| !self.is_integration_test(pkg))
                .collect(),
            JobKind::AllTest => packages,
        }
    }
}
