//! Generated tool table for the Splunk Observability (SignalFx) API.
//!
//! Detector and muting rules arrive as flat dot-and-index body parameters
//! and are reassembled into nested JSON at dispatch time. Regenerate
//! against the upstream OpenAPI document rather than editing entries.

use crate::descriptor::{Method, ParamType, ParameterSpec, ToolDescriptor};

pub fn catalog() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new("list_detectors", Method::Get, "/v2/detector")
            .summary("List detectors")
            .param(ParameterSpec::query("name", ParamType::String).describe("Name filter"))
            .param(
                ParameterSpec::query("limit", ParamType::Integer)
                    .default_value(serde_json::json!(50)),
            )
            .param(ParameterSpec::query("offset", ParamType::Integer))
            .response_shape("DetectorList"),
        ToolDescriptor::new("get_detector", Method::Get, "/v2/detector/{id}")
            .summary("Get a detector by ID")
            .param(ParameterSpec::path("id", ParamType::String))
            .response_shape("Detector"),
        ToolDescriptor::new("create_detector", Method::Post, "/v2/detector")
            .summary("Create a detector")
            .param(ParameterSpec::body_field("name", ParamType::String, "name").required())
            .param(ParameterSpec::body_field("description", ParamType::String, "description"))
            .param(
                ParameterSpec::body_field("programText", ParamType::String, "programText")
                    .required()
                    .describe("SignalFlow program the detector evaluates"),
            )
            .param(
                ParameterSpec::body_field(
                    "rule_detect_label",
                    ParamType::String,
                    "rules[0].detectLabel",
                )
                .required()
                .describe("Detect label the first rule fires on"),
            )
            .param(
                ParameterSpec::body_field("rule_severity", ParamType::String, "rules[0].severity")
                    .required()
                    .describe("Critical, Major, Minor, Warning, or Info"),
            )
            .param(
                ParameterSpec::body_field(
                    "rule_disabled",
                    ParamType::Boolean,
                    "rules[0].disabled",
                )
                .default_value(serde_json::json!(false)),
            )
            .param(
                ParameterSpec::body_field(
                    "notification_type",
                    ParamType::String,
                    "rules[0].notifications[0].type",
                )
                .describe("Notification target type, e.g. Email"),
            )
            .param(
                ParameterSpec::body_field(
                    "notification_email",
                    ParamType::String,
                    "rules[0].notifications[0].email",
                ),
            )
            .response_shape("Detector"),
        ToolDescriptor::new("update_detector", Method::Put, "/v2/detector/{id}")
            .summary("Update a detector")
            .param(ParameterSpec::path("id", ParamType::String))
            .param(ParameterSpec::body_raw("body", ParamType::Object).required()),
        ToolDescriptor::new("delete_detector", Method::Delete, "/v2/detector/{id}")
            .summary("Delete a detector")
            .param(ParameterSpec::path("id", ParamType::String)),
        ToolDescriptor::new("list_alert_mutings", Method::Get, "/v2/alertmuting")
            .summary("List alert muting rules")
            .param(ParameterSpec::query("include", ParamType::String)),
        ToolDescriptor::new("create_alert_muting", Method::Post, "/v2/alertmuting")
            .summary("Create an alert muting rule")
            .param(ParameterSpec::body_field("description", ParamType::String, "description"))
            .param(
                ParameterSpec::body_field("startTime", ParamType::Integer, "startTime")
                    .required()
                    .describe("Epoch milliseconds"),
            )
            .param(
                ParameterSpec::body_field("stopTime", ParamType::Integer, "stopTime")
                    .describe("Epoch milliseconds; 0 mutes until removed"),
            )
            .param(
                ParameterSpec::body_field(
                    "filter_property",
                    ParamType::String,
                    "filters[0].property",
                )
                .required(),
            )
            .param(
                ParameterSpec::body_field(
                    "filter_value",
                    ParamType::String,
                    "filters[0].propertyValue",
                )
                .required(),
            ),
        ToolDescriptor::new("list_dashboards", Method::Get, "/v2/dashboard")
            .summary("List dashboards")
            .param(ParameterSpec::query("name", ParamType::String))
            .param(ParameterSpec::query("limit", ParamType::Integer))
            .response_shape("DashboardList"),
        ToolDescriptor::new("get_dashboard", Method::Get, "/v2/dashboard/{id}")
            .summary("Get a dashboard by ID")
            .param(ParameterSpec::path("id", ParamType::String))
            .response_shape("Dashboard"),
        ToolDescriptor::new("send_events", Method::Post, "/v2/event")
            .summary("Send custom events")
            .param(
                ParameterSpec::body_raw("events", ParamType::Object)
                    .required()
                    .describe("Event payload array or object"),
            ),
        ToolDescriptor::new("list_active_incidents", Method::Get, "/v2/incident")
            .summary("List active incidents")
            .param(ParameterSpec::query("limit", ParamType::Integer))
            .param(ParameterSpec::query("offset", ParamType::Integer)),
    ]
}
