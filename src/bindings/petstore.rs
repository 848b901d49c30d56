//! Generated tool table for the Swagger Petstore API.
//!
//! Regenerate against the upstream OpenAPI document rather than editing
//! individual entries.

use crate::descriptor::{Method, ParamType, ParameterSpec, ToolDescriptor};

pub fn catalog() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new("get_pet_by_id", Method::Get, "/pet/{petId}")
            .summary("Find pet by ID")
            .description("Returns a single pet.")
            .param(
                ParameterSpec::path("petId", ParamType::Integer).describe("ID of pet to return"),
            )
            .response_shape("Pet"),
        ToolDescriptor::new("find_pets_by_status", Method::Get, "/pet/findByStatus")
            .summary("Finds pets by status")
            .description("Multiple status values can be provided as a list or comma-separated.")
            .param(
                ParameterSpec::query("status", ParamType::StringList)
                    .describe("Status values to filter by: available, pending, sold"),
            )
            .response_shape("[Pet]"),
        ToolDescriptor::new("find_pets_by_tags", Method::Get, "/pet/findByTags")
            .summary("Finds pets by tags")
            .param(ParameterSpec::query("tags", ParamType::StringList).describe("Tags to filter by"))
            .response_shape("[Pet]"),
        ToolDescriptor::new("add_pet", Method::Post, "/pet")
            .summary("Add a new pet to the store")
            .param(
                ParameterSpec::body_raw("body", ParamType::Object)
                    .required()
                    .describe("Pet object to add"),
            )
            .response_shape("Pet"),
        ToolDescriptor::new("update_pet", Method::Put, "/pet")
            .summary("Update an existing pet")
            .param(
                ParameterSpec::body_raw("body", ParamType::Object)
                    .required()
                    .describe("Pet object with updated fields"),
            )
            .response_shape("Pet"),
        ToolDescriptor::new("delete_pet", Method::Delete, "/pet/{petId}")
            .summary("Deletes a pet")
            .param(ParameterSpec::path("petId", ParamType::Integer).describe("Pet ID to delete"))
            .param(ParameterSpec::header("api_key", ParamType::String)),
        ToolDescriptor::new("get_inventory", Method::Get, "/store/inventory")
            .summary("Returns pet inventories by status")
            .response_shape("map<string, integer>"),
        ToolDescriptor::new("place_order", Method::Post, "/store/order")
            .summary("Place an order for a pet")
            .param(
                ParameterSpec::body_field("petId", ParamType::Integer, "petId")
                    .required()
                    .describe("ID of the pet to order"),
            )
            .param(
                ParameterSpec::body_field("quantity", ParamType::Integer, "quantity")
                    .default_value(serde_json::json!(1)),
            )
            .param(
                ParameterSpec::body_field("status", ParamType::String, "status")
                    .describe("Order status: placed, approved, delivered"),
            )
            .param(ParameterSpec::body_field("complete", ParamType::Boolean, "complete"))
            .response_shape("Order"),
        ToolDescriptor::new("get_order_by_id", Method::Get, "/store/order/{orderId}")
            .summary("Find purchase order by ID")
            .param(ParameterSpec::path("orderId", ParamType::Integer))
            .response_shape("Order"),
        ToolDescriptor::new("delete_order", Method::Delete, "/store/order/{orderId}")
            .summary("Delete purchase order by ID")
            .param(ParameterSpec::path("orderId", ParamType::Integer)),
        ToolDescriptor::new("create_user", Method::Post, "/user")
            .summary("Create user")
            .param(
                ParameterSpec::body_field("username", ParamType::String, "username").required(),
            )
            .param(ParameterSpec::body_field("firstName", ParamType::String, "firstName"))
            .param(ParameterSpec::body_field("lastName", ParamType::String, "lastName"))
            .param(ParameterSpec::body_field("email", ParamType::String, "email"))
            .param(ParameterSpec::body_field("password", ParamType::String, "password"))
            .param(ParameterSpec::body_field("phone", ParamType::String, "phone")),
        ToolDescriptor::new("login_user", Method::Get, "/user/login")
            .summary("Logs user into the system")
            .param(ParameterSpec::query("username", ParamType::String).required())
            .param(ParameterSpec::query("password", ParamType::String).required()),
        ToolDescriptor::new("logout_user", Method::Get, "/user/logout")
            .summary("Logs out current logged in user session"),
        ToolDescriptor::new("get_user_by_name", Method::Get, "/user/{username}")
            .summary("Get user by user name")
            .param(ParameterSpec::path("username", ParamType::String))
            .response_shape("User"),
        ToolDescriptor::new("update_user", Method::Put, "/user/{username}")
            .summary("Update user")
            .param(ParameterSpec::path("username", ParamType::String))
            .param(ParameterSpec::body_raw("body", ParamType::Object).required()),
        ToolDescriptor::new("delete_user", Method::Delete, "/user/{username}")
            .summary("Delete user")
            .param(ParameterSpec::path("username", ParamType::String)),
    ]
}
