//! Generated tool table for the PagerDuty REST API v2.
//!
//! Regenerate against the upstream OpenAPI document rather than editing
//! individual entries.

use crate::descriptor::{Method, ParamType, ParameterSpec, ToolDescriptor};

pub fn catalog() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new("list_incidents", Method::Get, "/incidents")
            .summary("List incidents")
            .param(
                ParameterSpec::query("statuses", ParamType::StringList)
                    .describe("Filter by status: triggered, acknowledged, resolved"),
            )
            .param(ParameterSpec::query("urgencies", ParamType::StringList))
            .param(ParameterSpec::query("since", ParamType::String).describe("ISO8601 start time"))
            .param(ParameterSpec::query("until", ParamType::String).describe("ISO8601 end time"))
            .param(
                ParameterSpec::query("limit", ParamType::Integer)
                    .default_value(serde_json::json!(25)),
            )
            .param(ParameterSpec::query("offset", ParamType::Integer))
            .response_shape("IncidentList"),
        ToolDescriptor::new("get_incident", Method::Get, "/incidents/{id}")
            .summary("Get an incident by ID")
            .param(ParameterSpec::path("id", ParamType::String))
            .response_shape("Incident"),
        ToolDescriptor::new("create_incident", Method::Post, "/incidents")
            .summary("Create an incident")
            .param(
                ParameterSpec::header("From", ParamType::String)
                    .required()
                    .describe("Email address of a valid PagerDuty user"),
            )
            .param(
                ParameterSpec::body_field("title", ParamType::String, "incident.title")
                    .required()
                    .describe("Succinct incident summary"),
            )
            .param(
                ParameterSpec::body_field("type", ParamType::String, "incident.type")
                    .default_value(serde_json::json!("incident")),
            )
            .param(
                ParameterSpec::body_field("service_id", ParamType::String, "incident.service.id")
                    .required(),
            )
            .param(
                ParameterSpec::body_field(
                    "service_type",
                    ParamType::String,
                    "incident.service.type",
                )
                .default_value(serde_json::json!("service_reference")),
            )
            .param(
                ParameterSpec::body_field("urgency", ParamType::String, "incident.urgency")
                    .describe("high or low"),
            )
            .param(
                ParameterSpec::body_field("details", ParamType::String, "incident.body.details")
                    .describe("Additional incident details"),
            )
            .param(
                ParameterSpec::body_field("body_type", ParamType::String, "incident.body.type")
                    .default_value(serde_json::json!("incident_body")),
            )
            .response_shape("Incident"),
        ToolDescriptor::new("update_incident", Method::Put, "/incidents/{id}")
            .summary("Update an incident (acknowledge, resolve, reassign)")
            .param(ParameterSpec::path("id", ParamType::String))
            .param(ParameterSpec::header("From", ParamType::String).required())
            .param(
                ParameterSpec::body_field("type", ParamType::String, "incident.type")
                    .default_value(serde_json::json!("incident_reference")),
            )
            .param(
                ParameterSpec::body_field("status", ParamType::String, "incident.status")
                    .describe("acknowledged or resolved"),
            )
            .param(
                ParameterSpec::body_field("resolution", ParamType::String, "incident.resolution"),
            ),
        ToolDescriptor::new("list_incident_notes", Method::Get, "/incidents/{id}/notes")
            .summary("List notes on an incident")
            .param(ParameterSpec::path("id", ParamType::String)),
        ToolDescriptor::new("create_incident_note", Method::Post, "/incidents/{id}/notes")
            .summary("Add a note to an incident")
            .param(ParameterSpec::path("id", ParamType::String))
            .param(ParameterSpec::header("From", ParamType::String).required())
            .param(
                ParameterSpec::body_field("content", ParamType::String, "note.content").required(),
            ),
        ToolDescriptor::new("list_services", Method::Get, "/services")
            .summary("List services")
            .param(ParameterSpec::query("query", ParamType::String))
            .param(ParameterSpec::query("limit", ParamType::Integer))
            .param(ParameterSpec::query("offset", ParamType::Integer))
            .response_shape("ServiceList"),
        ToolDescriptor::new("get_service", Method::Get, "/services/{id}")
            .summary("Get a service by ID")
            .param(ParameterSpec::path("id", ParamType::String))
            .response_shape("Service"),
        ToolDescriptor::new("list_escalation_policies", Method::Get, "/escalation_policies")
            .summary("List escalation policies")
            .param(ParameterSpec::query("query", ParamType::String)),
        ToolDescriptor::new("list_oncalls", Method::Get, "/oncalls")
            .summary("List on-call entries")
            .param(ParameterSpec::query("schedule_ids", ParamType::StringList))
            .param(ParameterSpec::query("user_ids", ParamType::StringList))
            .param(ParameterSpec::query("until", ParamType::String)),
        ToolDescriptor::new("list_users", Method::Get, "/users")
            .summary("List users")
            .param(ParameterSpec::query("query", ParamType::String))
            .param(ParameterSpec::query("limit", ParamType::Integer)),
        ToolDescriptor::new("get_user", Method::Get, "/users/{id}")
            .summary("Get a user by ID")
            .param(ParameterSpec::path("id", ParamType::String))
            .response_shape("User"),
        // The source OpenAPI ships no body schema for addons; a raw body
        // keeps the payload in the caller's hands until that is fixed.
        ToolDescriptor::new("create_addon", Method::Post, "/addons")
            .summary("Install an add-on")
            .param(
                ParameterSpec::body_raw("body", ParamType::Object)
                    .describe("Add-on install payload"),
            ),
    ]
}
