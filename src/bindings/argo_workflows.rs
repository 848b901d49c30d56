//! Generated tool table for the Argo Workflows API.
//!
//! Regenerate against the upstream OpenAPI document rather than editing
//! individual entries.

use crate::descriptor::{Method, ParamType, ParameterSpec, ToolDescriptor};

pub fn catalog() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new("list_workflows", Method::Get, "/api/v1/workflows/{namespace}")
            .summary("List workflows in a namespace")
            .param(ParameterSpec::path("namespace", ParamType::String))
            .param(
                ParameterSpec::query("labelSelector", ParamType::String)
                    .describe("Kubernetes label selector"),
            )
            .param(ParameterSpec::query("fieldSelector", ParamType::String))
            .response_shape("WorkflowList"),
        ToolDescriptor::new("get_workflow", Method::Get, "/api/v1/workflows/{namespace}/{name}")
            .summary("Get a workflow")
            .param(ParameterSpec::path("namespace", ParamType::String))
            .param(ParameterSpec::path("name", ParamType::String))
            .param(ParameterSpec::query("fields", ParamType::String))
            .response_shape("Workflow"),
        ToolDescriptor::new("create_workflow", Method::Post, "/api/v1/workflows/{namespace}")
            .summary("Create a workflow")
            .param(ParameterSpec::path("namespace", ParamType::String))
            .param(
                ParameterSpec::body_raw("workflow", ParamType::Object)
                    .required()
                    .describe("Workflow manifest wrapped in a create request"),
            ),
        ToolDescriptor::new(
            "submit_workflow",
            Method::Post,
            "/api/v1/workflows/{namespace}/submit",
        )
        .summary("Submit a workflow from a template or cron workflow")
        .param(ParameterSpec::path("namespace", ParamType::String))
        .param(
            ParameterSpec::body_field("resourceKind", ParamType::String, "resourceKind")
                .required()
                .describe("Kind of the source resource: WorkflowTemplate or CronWorkflow"),
        )
        .param(
            ParameterSpec::body_field("resourceName", ParamType::String, "resourceName").required(),
        )
        .param(
            ParameterSpec::body_field("labels", ParamType::String, "submitOptions.labels")
                .describe("Comma-separated labels applied to the submitted workflow"),
        )
        .param(
            ParameterSpec::body_field("entryPoint", ParamType::String, "submitOptions.entryPoint"),
        ),
        ToolDescriptor::new(
            "delete_workflow",
            Method::Delete,
            "/api/v1/workflows/{namespace}/{name}",
        )
        .summary("Delete a workflow")
        .param(ParameterSpec::path("namespace", ParamType::String))
        .param(ParameterSpec::path("name", ParamType::String))
        .param(ParameterSpec::query("force", ParamType::Boolean)),
        ToolDescriptor::new(
            "retry_workflow",
            Method::Put,
            "/api/v1/workflows/{namespace}/{name}/retry",
        )
        .summary("Retry a failed workflow")
        .param(ParameterSpec::path("namespace", ParamType::String))
        .param(ParameterSpec::path("name", ParamType::String))
        .param(
            ParameterSpec::body_field(
                "restartSuccessful",
                ParamType::Boolean,
                "restartSuccessful",
            )
            .describe("Also restart successful nodes matching the selector"),
        )
        .param(
            ParameterSpec::body_field("nodeFieldSelector", ParamType::String, "nodeFieldSelector"),
        ),
        ToolDescriptor::new(
            "stop_workflow",
            Method::Put,
            "/api/v1/workflows/{namespace}/{name}/stop",
        )
        .summary("Stop a workflow, running exit handlers")
        .param(ParameterSpec::path("namespace", ParamType::String))
        .param(ParameterSpec::path("name", ParamType::String))
        .param(ParameterSpec::body_field("message", ParamType::String, "message"))
        .param(
            ParameterSpec::body_field("nodeFieldSelector", ParamType::String, "nodeFieldSelector"),
        ),
        ToolDescriptor::new(
            "suspend_workflow",
            Method::Put,
            "/api/v1/workflows/{namespace}/{name}/suspend",
        )
        .summary("Suspend a running workflow")
        .param(ParameterSpec::path("namespace", ParamType::String))
        .param(ParameterSpec::path("name", ParamType::String)),
        ToolDescriptor::new(
            "resume_workflow",
            Method::Put,
            "/api/v1/workflows/{namespace}/{name}/resume",
        )
        .summary("Resume a suspended workflow")
        .param(ParameterSpec::path("namespace", ParamType::String))
        .param(ParameterSpec::path("name", ParamType::String))
        .param(
            ParameterSpec::body_field("nodeFieldSelector", ParamType::String, "nodeFieldSelector"),
        ),
        ToolDescriptor::new(
            "list_workflow_templates",
            Method::Get,
            "/api/v1/workflow-templates/{namespace}",
        )
        .summary("List workflow templates")
        .param(ParameterSpec::path("namespace", ParamType::String))
        .response_shape("WorkflowTemplateList"),
        ToolDescriptor::new(
            "get_workflow_template",
            Method::Get,
            "/api/v1/workflow-templates/{namespace}/{name}",
        )
        .summary("Get a workflow template")
        .param(ParameterSpec::path("namespace", ParamType::String))
        .param(ParameterSpec::path("name", ParamType::String))
        .response_shape("WorkflowTemplate"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_descriptors_are_valid() {
        for descriptor in catalog() {
            descriptor.validate().unwrap();
        }
    }

    #[test]
    fn test_submit_uses_nested_submit_options() {
        let catalog = catalog();
        let submit = catalog.iter().find(|d| d.name == "submit_workflow").unwrap();
        let labels = submit.param_named("labels").unwrap();
        assert_eq!(labels.json_path.as_deref(), Some("submitOptions.labels"));
    }
}
