use crate::azure::models::JsonPatchOperation;
use serde_json::{Map, Value};

/// Builds a work item patch document out of individual field values.
///
/// Every field present contributes exactly one `add` operation; absent or
/// blank values contribute nothing, so untouched fields stay as they are
/// upstream.
#[derive(Debug, Default)]
pub struct FieldPatch {
    operations: Vec<JsonPatchOperation>,
}

impl FieldPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.operations
            .push(JsonPatchOperation::add_field(field, value.into()));
        self
    }

    pub fn optional_field(self, field: &str, value: Option<String>) -> Self {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(value) => self.field(field, value),
            None => self,
        }
    }

    /// Adds one operation per entry of a free-form `{reference name: value}` map.
    pub fn fields(mut self, fields: Map<String, Value>) -> Self {
        for (field, value) in fields {
            self = self.field(&field, value);
        }
        self
    }

    pub fn into_operations(self) -> Vec<JsonPatchOperation> {
        self.operations
    }
}

/// Maps friendly link names to Azure DevOps link type reference names.
/// Anything else is assumed to already be a reference name.
pub fn link_type_reference(link_type: &str) -> &str {
    match link_type.to_lowercase().as_str() {
        "parent" => "System.LinkTypes.Hierarchy-Reverse",
        "child" => "System.LinkTypes.Hierarchy-Forward",
        "related" => "System.LinkTypes.Related",
        "duplicate" => "System.LinkTypes.Duplicate-Forward",
        "duplicate of" => "System.LinkTypes.Duplicate-Reverse",
        "dependency" | "successor" => "System.LinkTypes.Dependency-Forward",
        "predecessor" => "System.LinkTypes.Dependency-Reverse",
        _ => link_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azure::models::PatchOp;
    use serde_json::json;

    #[test]
    fn test_optional_fields_are_skipped_when_absent_or_blank() {
        let operations = FieldPatch::new()
            .field("System.Title", "Title")
            .optional_field("System.Description", None)
            .optional_field("System.AssignedTo", Some(" ".to_string()))
            .optional_field("System.AreaPath", Some("Fabrikam\\Web".to_string()))
            .into_operations();

        assert_eq!(operations.len(), 2);
        assert!(operations.iter().all(|op| op.op == PatchOp::Add));
        assert_eq!(operations[1].path, "/fields/System.AreaPath");
        assert_eq!(operations[1].value, Some(json!("Fabrikam\\Web")));
    }

    #[test]
    fn test_free_form_fields_keep_values() {
        let mut fields = Map::new();
        fields.insert("Microsoft.VSTS.Common.Priority".to_string(), json!(2));
        let operations = FieldPatch::new().fields(fields).into_operations();

        assert_eq!(operations.len(), 1);
        assert_eq!(operations[0].path, "/fields/Microsoft.VSTS.Common.Priority");
        assert_eq!(operations[0].value, Some(json!(2)));
    }

    #[test]
    fn test_link_type_reference() {
        assert_eq!(link_type_reference("Parent"), "System.LinkTypes.Hierarchy-Reverse");
        assert_eq!(link_type_reference("related"), "System.LinkTypes.Related");
        assert_eq!(
            link_type_reference("Microsoft.VSTS.Common.TestedBy-Forward"),
            "Microsoft.VSTS.Common.TestedBy-Forward"
        );
    }
}
