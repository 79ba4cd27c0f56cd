//! Subsets of aws CLI JSON output that teardown reads.

use serde::Deserialize;

pub const STATUS_DELETE_COMPLETE: &str = "DELETE_COMPLETE";
pub const STATUS_DELETE_FAILED: &str = "DELETE_FAILED";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackSummary {
    pub stack_name: String,
    pub stack_status: String,
    #[serde(default)]
    pub stack_status_reason: Option<String>,
}

impl StackSummary {
    pub fn is_deleted(&self) -> bool {
        self.stack_status == STATUS_DELETE_COMPLETE
    }

    pub fn is_delete_failed(&self) -> bool {
        self.stack_status == STATUS_DELETE_FAILED
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeStacksOutput {
    #[serde(default)]
    pub stacks: Vec<StackSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyPairInfo {
    pub key_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeKeyPairsOutput {
    #[serde(default)]
    pub key_pairs: Vec<KeyPairInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_stacks_parses_relevant_fields() {
        let json = r#"{
            "Stacks": [
                {
                    "StackId": "arn:aws:cloudformation:us-west-2:1:stack/eksctl-prod-1-cluster/abc",
                    "StackName": "eksctl-prod-1-cluster",
                    "StackStatus": "DELETE_FAILED",
                    "StackStatusReason": "The following resource(s) failed to delete: [VPC]",
                    "CreationTime": "2019-01-01T00:00:00Z"
                }
            ]
        }"#;
        let parsed: DescribeStacksOutput = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.stacks.len(), 1);
        assert!(parsed.stacks[0].is_delete_failed());
        assert!(!parsed.stacks[0].is_deleted());
        assert!(
            parsed.stacks[0]
                .stack_status_reason
                .as_deref()
                .unwrap()
                .contains("[VPC]")
        );
    }

    #[test]
    fn test_empty_outputs() {
        let stacks: DescribeStacksOutput = serde_json::from_str("{}").unwrap();
        assert!(stacks.stacks.is_empty());
        let keys: DescribeKeyPairsOutput = serde_json::from_str(r#"{"KeyPairs": []}"#).unwrap();
        assert!(keys.key_pairs.is_empty());
    }
}
