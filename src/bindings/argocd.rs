//! Generated tool table for the Argo CD API.
//!
//! Regenerate against the upstream OpenAPI document rather than editing
//! individual entries.

use crate::descriptor::{Method, ParamType, ParameterSpec, ToolDescriptor};

pub fn catalog() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new("list_applications", Method::Get, "/api/v1/applications")
            .summary("List applications")
            .param(
                ParameterSpec::query("projects", ParamType::StringList)
                    .describe("Restrict the listing to these projects"),
            )
            .param(ParameterSpec::query("selector", ParamType::String).describe("Label selector"))
            .param(ParameterSpec::query("repo", ParamType::String).describe("Repository URL filter"))
            .response_shape("ApplicationList"),
        ToolDescriptor::new("get_application", Method::Get, "/api/v1/applications/{name}")
            .summary("Get an application by name")
            .param(ParameterSpec::path("name", ParamType::String))
            .param(
                ParameterSpec::query("refresh", ParamType::String)
                    .describe("Force a reconciliation refresh: normal or hard"),
            )
            .response_shape("Application"),
        ToolDescriptor::new("create_application", Method::Post, "/api/v1/applications")
            .summary("Create an application")
            .param(
                ParameterSpec::body_raw("application", ParamType::Object)
                    .required()
                    .describe("Full application manifest"),
            )
            .param(
                ParameterSpec::query("upsert", ParamType::Boolean)
                    .describe("Update the application if it already exists"),
            ),
        ToolDescriptor::new("update_application", Method::Put, "/api/v1/applications/{name}")
            .summary("Update an application")
            .param(ParameterSpec::path("name", ParamType::String))
            .param(ParameterSpec::body_raw("application", ParamType::Object).required()),
        ToolDescriptor::new("delete_application", Method::Delete, "/api/v1/applications/{name}")
            .summary("Delete an application")
            .param(ParameterSpec::path("name", ParamType::String))
            .param(
                ParameterSpec::query("cascade", ParamType::Boolean)
                    .describe("Also delete the application's resources"),
            )
            .param(ParameterSpec::query("propagationPolicy", ParamType::String)),
        ToolDescriptor::new("sync_application", Method::Post, "/api/v1/applications/{name}/sync")
            .summary("Trigger a sync")
            .param(ParameterSpec::path("name", ParamType::String))
            .param(
                ParameterSpec::body_field("revision", ParamType::String, "revision")
                    .describe("Revision to sync to; defaults to the tracked revision"),
            )
            .param(ParameterSpec::body_field("prune", ParamType::Boolean, "prune"))
            .param(ParameterSpec::body_field("dryRun", ParamType::Boolean, "dryRun")),
        ToolDescriptor::new(
            "rollback_application",
            Method::Post,
            "/api/v1/applications/{name}/rollback",
        )
        .summary("Roll back to a previously deployed version")
        .param(ParameterSpec::path("name", ParamType::String))
        .param(
            ParameterSpec::body_field("id", ParamType::Integer, "id")
                .required()
                .describe("History ID to roll back to"),
        )
        .param(ParameterSpec::body_field("prune", ParamType::Boolean, "prune")),
        ToolDescriptor::new(
            "terminate_operation",
            Method::Delete,
            "/api/v1/applications/{name}/operation",
        )
        .summary("Terminate the currently running operation")
        .param(ParameterSpec::path("name", ParamType::String)),
        ToolDescriptor::new(
            "get_resource_tree",
            Method::Get,
            "/api/v1/applications/{name}/resource-tree",
        )
        .summary("Get the application resource tree")
        .param(ParameterSpec::path("name", ParamType::String))
        .response_shape("ApplicationTree"),
        // Stream-shaped upstream endpoint, bound as a plain GET returning
        // the full payload.
        ToolDescriptor::new("stream_applications", Method::Get, "/api/v1/stream/applications")
            .summary("Watch applications (single full response)")
            .param(ParameterSpec::query("projects", ParamType::StringList))
            .param(ParameterSpec::query("name", ParamType::String)),
        ToolDescriptor::new("list_projects", Method::Get, "/api/v1/projects")
            .summary("List projects")
            .param(ParameterSpec::query("name", ParamType::String))
            .response_shape("AppProjectList"),
        ToolDescriptor::new("get_project", Method::Get, "/api/v1/projects/{name}")
            .summary("Get a project by name")
            .param(ParameterSpec::path("name", ParamType::String))
            .response_shape("AppProject"),
        ToolDescriptor::new("list_repositories", Method::Get, "/api/v1/repositories")
            .summary("List configured repositories")
            .response_shape("RepositoryList"),
        ToolDescriptor::new("get_version", Method::Get, "/api/version")
            .summary("Get the Argo CD server version"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ParamLocation;

    #[test]
    fn test_catalog_descriptors_are_valid() {
        for descriptor in catalog() {
            descriptor.validate().unwrap();
        }
    }

    #[test]
    fn test_stream_endpoint_is_plain_get() {
        let catalog = catalog();
        let stream = catalog
            .iter()
            .find(|d| d.name == "stream_applications")
            .unwrap();
        assert_eq!(stream.method, Method::Get);
        assert!(stream.params_at(ParamLocation::BodyRaw).next().is_none());
    }
}
