// ─── Branch Rules ───
// Maps a game version to the Fabric API branch suffix ("1.14", "1.15", …).
// The table is data: it can be replaced from a JSON file without a rebuild.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ActionError, ActionResult};

/// How a rule matches a game version string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionMatcher {
    Exact(String),
    Prefix(String),
}

impl VersionMatcher {
    pub fn matches(&self, game_version: &str) -> bool {
        match self {
            VersionMatcher::Exact(v) => game_version == v,
            VersionMatcher::Prefix(p) => game_version.starts_with(p.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRule {
    #[serde(flatten)]
    pub matcher: VersionMatcher,
    pub branch: String,
}

/// Ordered rule list; the first matching rule wins.
///
/// JSON form:
/// ```json
/// { "rules": [ { "exact": "1.14.4", "branch": "1.14" },
///              { "prefix": "20w", "branch": "1.16" } ],
///   "default": "1.15" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchTable {
    pub rules: Vec<BranchRule>,
    #[serde(rename = "default")]
    pub default_branch: String,
}

impl Default for BranchTable {
    // Snapshot of the ecosystem in early 2020. Newer releases need new rows.
    fn default() -> Self {
        Self {
            rules: vec![
                BranchRule {
                    matcher: VersionMatcher::Exact("1.14.4".into()),
                    branch: "1.14".into(),
                },
                BranchRule {
                    matcher: VersionMatcher::Prefix("20w".into()),
                    branch: "1.16".into(),
                },
            ],
            default_branch: "1.15".into(),
        }
    }
}

impl BranchTable {
    pub fn branch_for(&self, game_version: &str) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(game_version))
            .map(|rule| rule.branch.as_str())
            .unwrap_or(&self.default_branch)
    }

    pub fn from_json(json: &str) -> ActionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn load(path: &Path) -> ActionResult<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ActionError::io(path, e))?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.14.4", "1.14")]
    #[case("20w12a", "1.16")]
    #[case("20w06a", "1.16")]
    #[case("1.15.2", "1.15")]
    #[case("1.14.3", "1.15")]
    #[case("1.16", "1.15")]
    fn default_table(#[case] game: &str, #[case] expected: &str) {
        assert_eq!(BranchTable::default().branch_for(game), expected);
    }

    #[test]
    fn first_matching_rule_wins() {
        let table = BranchTable::from_json(
            r#"{
                "rules": [
                    {"prefix": "1.16", "branch": "1.16"},
                    {"exact": "1.16.1", "branch": "never"}
                ],
                "default": "1.17"
            }"#,
        )
        .unwrap();

        assert_eq!(table.branch_for("1.16.1"), "1.16");
        assert_eq!(table.branch_for("1.17"), "1.17");
    }

    #[test]
    fn json_round_trips_default_table() {
        let json = serde_json::to_string(&BranchTable::default()).unwrap();
        assert!(json.contains(r#""exact":"1.14.4""#));
        assert_eq!(BranchTable::from_json(&json).unwrap(), BranchTable::default());
    }

    #[tokio::test]
    async fn load_reports_missing_file_path() {
        let err = BranchTable::load(Path::new("/nonexistent/branches.json"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("branches.json"));
    }
}
